//! CSV export for the enriched table.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::analysis::types::EnrichedRecord;

/// Column header for the enriched-table CSV export.
const HEADER: &str =
    "timestamp,consumption_kwh,hour,day_name,day_type,rolling_avg,anomaly,efficiency_score";

/// Exports the enriched table to a CSV file at the given path.
///
/// Undefined statistics (`None`) are written as empty cells. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[EnrichedRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes the enriched table as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[EnrichedRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            format!("{:.4}", r.consumption_kwh),
            r.hour.to_string(),
            r.day_name.to_string(),
            r.day_type.to_string(),
            r.rolling_avg.map_or_else(String::new, |v| format!("{v:.4}")),
            r.anomaly.to_string(),
            r.efficiency_score
                .map_or_else(String::new, |v| format!("{v:.4}")),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
