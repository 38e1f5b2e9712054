//! CSV ingestion for consumption logs.
//!
//! Columns are located by name from the header row; the names themselves are
//! configuration (`[input]` section), defaulting to `Datetime` and
//! `Consumption_kWh`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::analysis::types::ConsumptionRecord;
use crate::config::InputConfig;
use crate::error::PipelineError;

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M",
];

/// Loads consumption records from a CSV file.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedInput`] if the file cannot be opened,
/// a required column is missing, or any cell fails to parse.
pub fn load_csv_file(path: &Path, input: &InputConfig) -> Result<Vec<ConsumptionRecord>, PipelineError> {
    let file = File::open(path).map_err(|e| {
        PipelineError::header(format!("cannot open \"{}\": {e}", path.display()))
    })?;
    read_records(file, input)
}

/// Reads consumption records from any CSV reader.
///
/// Rows are numbered from 1 (first data row) in error messages.
///
/// # Errors
///
/// Returns [`PipelineError::MalformedInput`] for a missing column, an
/// unparsable timestamp, or a non-numeric, negative, or non-finite
/// consumption value.
pub fn read_records<R: Read>(
    reader: R,
    input: &InputConfig,
) -> Result<Vec<ConsumptionRecord>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| PipelineError::header(format!("cannot read header row: {e}")))?;

    let find = |name: &str| {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            PipelineError::header(format!(
                "missing column \"{name}\" (found: {})",
                headers.iter().collect::<Vec<_>>().join(", ")
            ))
        })
    };
    let ts_idx = find(&input.timestamp_column)?;
    let kwh_idx = find(&input.consumption_column)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| PipelineError::MalformedInput {
            row,
            reason: format!("unreadable CSV record: {e}"),
        })?;

        let ts_cell = record.get(ts_idx).ok_or_else(|| PipelineError::MalformedInput {
            row,
            reason: format!("missing \"{}\" cell", input.timestamp_column),
        })?;
        let kwh_cell = record.get(kwh_idx).ok_or_else(|| PipelineError::MalformedInput {
            row,
            reason: format!("missing \"{}\" cell", input.consumption_column),
        })?;

        let timestamp = parse_timestamp(ts_cell).ok_or_else(|| PipelineError::MalformedInput {
            row,
            reason: format!("unparsable timestamp \"{ts_cell}\""),
        })?;

        let consumption_kwh: f64 =
            kwh_cell.parse().map_err(|e| PipelineError::MalformedInput {
                row,
                reason: format!("non-numeric consumption \"{kwh_cell}\": {e}"),
            })?;
        if !consumption_kwh.is_finite() || consumption_kwh < 0.0 {
            return Err(PipelineError::MalformedInput {
                row,
                reason: format!("consumption must be finite and >= 0, got {consumption_kwh}"),
            });
        }

        records.push(ConsumptionRecord::new(timestamp, consumption_kwh));
    }
    Ok(records)
}

/// Parses a timestamp cell against the accepted layouts.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn default_input() -> InputConfig {
        InputConfig::default()
    }

    #[test]
    fn reads_well_formed_csv() {
        let csv = "\
Datetime,Consumption_kWh
2024-01-01 00:00:00,10.0
2024-01-01 01:00:00,12.5
";
        let records = read_records(csv.as_bytes(), &default_input()).expect("well-formed input");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].consumption_kwh, 10.0);
        assert_eq!(records[1].timestamp.hour(), 1);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "\
MeterId,Datetime,Consumption_kWh
m-1,2024-01-01 00:00:00,3.0
";
        let records = read_records(csv.as_bytes(), &default_input()).expect("extra columns ok");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn custom_column_names() {
        let csv = "\
ts,kwh
2024-01-01 00:00:00,3.0
";
        let input = InputConfig {
            timestamp_column: "ts".to_string(),
            consumption_column: "kwh".to_string(),
        };
        let records = read_records(csv.as_bytes(), &input).expect("custom names ok");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_input_is_accepted() {
        let csv = "Datetime,Consumption_kWh\n";
        let records = read_records(csv.as_bytes(), &default_input()).expect("header-only ok");
        assert!(records.is_empty());
    }

    #[test]
    fn missing_timestamp_column_fails() {
        let csv = "Time,Consumption_kWh\n2024-01-01 00:00:00,1.0\n";
        let err = read_records(csv.as_bytes(), &default_input());
        match err {
            Err(PipelineError::MalformedInput { row: 0, reason }) => {
                assert!(reason.contains("Datetime"), "reason: {reason}");
            }
            other => panic!("expected header error, got {other:?}"),
        }
    }

    #[test]
    fn missing_consumption_column_fails() {
        let csv = "Datetime,Load\n2024-01-01 00:00:00,1.0\n";
        let err = read_records(csv.as_bytes(), &default_input());
        assert!(matches!(
            err,
            Err(PipelineError::MalformedInput { row: 0, .. })
        ));
    }

    #[test]
    fn unparsable_timestamp_reports_row() {
        let csv = "\
Datetime,Consumption_kWh
2024-01-01 00:00:00,1.0
not-a-date,2.0
";
        let err = read_records(csv.as_bytes(), &default_input());
        match err {
            Err(PipelineError::MalformedInput { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.contains("not-a-date"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_consumption_fails() {
        let csv = "Datetime,Consumption_kWh\n2024-01-01 00:00:00,lots\n";
        let err = read_records(csv.as_bytes(), &default_input());
        assert!(matches!(
            err,
            Err(PipelineError::MalformedInput { row: 1, .. })
        ));
    }

    #[test]
    fn negative_consumption_fails() {
        let csv = "Datetime,Consumption_kWh\n2024-01-01 00:00:00,-4.0\n";
        let err = read_records(csv.as_bytes(), &default_input());
        assert!(matches!(
            err,
            Err(PipelineError::MalformedInput { row: 1, .. })
        ));
    }

    #[test]
    fn accepts_alternate_timestamp_layouts() {
        let csv = "\
Datetime,Consumption_kWh
2024-01-01T06:30:00,1.0
2024-01-01 06:30,2.0
2024/01/01 06:30:00,3.0
";
        let records = read_records(csv.as_bytes(), &default_input()).expect("layouts ok");
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.timestamp.hour() == 6));
    }
}
