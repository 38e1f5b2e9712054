//! Batch textual report over one pipeline run.

use std::fmt;

use crate::analysis::pipeline::Analysis;
use crate::analysis::summary::fmt_stat;
use crate::analysis::types::AnomalyFlag;

/// Number of rows shown in each preview section.
const PREVIEW_ROWS: usize = 5;

/// Formats a full analysis as the batch console report: dataset preview,
/// segment and category averages, rolling-average preview, flagged
/// anomalies, efficiency preview, and the summary block.
pub struct Report<'a> {
    analysis: &'a Analysis,
}

impl<'a> Report<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self { analysis }
    }

    /// Records flagged as high spikes, in input order.
    pub fn anomalies(&self) -> impl Iterator<Item = &crate::analysis::types::EnrichedRecord> {
        self.analysis
            .records
            .iter()
            .filter(|r| r.anomaly == AnomalyFlag::HighSpike)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let records = &self.analysis.records;
        let summary = &self.analysis.summary;

        writeln!(f, "Dataset Preview ({} records):", records.len())?;
        if records.is_empty() {
            writeln!(f, "  (empty dataset; all statistics undefined)")?;
        }
        for r in records.iter().take(PREVIEW_ROWS) {
            writeln!(f, "  {r}")?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Average Peak Consumption:     {} kWh",
            fmt_stat(summary.peak_avg)
        )?;
        writeln!(
            f,
            "Average Off-Peak Consumption: {} kWh",
            fmt_stat(summary.off_peak_avg)
        )?;
        writeln!(
            f,
            "Weekday Average:              {} kWh",
            fmt_stat(summary.weekday_avg)
        )?;
        writeln!(
            f,
            "Weekend Average:              {} kWh",
            fmt_stat(summary.weekend_avg)
        )?;

        writeln!(f)?;
        writeln!(f, "Rolling Average (first {PREVIEW_ROWS} rows):")?;
        for r in records.iter().take(PREVIEW_ROWS) {
            writeln!(
                f,
                "  {} -> {}",
                r.timestamp.format("%Y-%m-%d %H:%M"),
                fmt_stat(r.rolling_avg)
            )?;
        }

        writeln!(f)?;
        let spikes: Vec<_> = self.anomalies().collect();
        writeln!(f, "Detected Anomalies: {}", spikes.len())?;
        for r in &spikes {
            writeln!(
                f,
                "  {} | {:.3} kWh | {}",
                r.timestamp.format("%Y-%m-%d %H:%M"),
                r.consumption_kwh,
                r.anomaly
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Efficiency Scores (first {PREVIEW_ROWS} rows):")?;
        for r in records.iter().take(PREVIEW_ROWS) {
            writeln!(
                f,
                "  {} -> {}",
                r.timestamp.format("%Y-%m-%d %H:%M"),
                fmt_stat(r.efficiency_score)
            )?;
        }

        writeln!(f)?;
        write!(f, "{summary}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pipeline::run;
    use crate::analysis::types::ConsumptionRecord;
    use crate::config::AnalysisConfig;
    use chrono::NaiveDate;

    fn dataset(values: &[f64]) -> Vec<ConsumptionRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
                    .expect("valid date")
                    .and_hms_opt(i as u32 % 24, 0, 0)
                    .expect("valid time");
                ConsumptionRecord::new(ts, v)
            })
            .collect()
    }

    #[test]
    fn report_renders_all_sections() {
        let records = dataset(&[10.0, 12.0, 11.0, 50.0, 13.0]);
        let analysis = run(&records, &AnalysisConfig::default()).expect("pipeline runs");
        let text = format!("{}", Report::new(&analysis));
        assert!(text.contains("Dataset Preview (5 records):"));
        assert!(text.contains("Average Peak Consumption:"));
        assert!(text.contains("Rolling Average"));
        assert!(text.contains("Detected Anomalies: 0"));
        assert!(text.contains("Efficiency Scores"));
        assert!(text.contains("--- Summary Statistics ---"));
    }

    #[test]
    fn report_lists_flagged_rows() {
        let mut cfg = AnalysisConfig::default();
        cfg.anomaly.threshold = 1.0;
        let records = dataset(&[10.0, 12.0, 11.0, 50.0, 13.0]);
        let analysis = run(&records, &cfg).expect("pipeline runs");
        let report = Report::new(&analysis);
        assert_eq!(report.anomalies().count(), 1);
        let text = format!("{report}");
        assert!(text.contains("Detected Anomalies: 1"));
        assert!(text.contains("High Spike"));
    }

    #[test]
    fn empty_dataset_renders_without_panicking() {
        let analysis = run(&[], &AnalysisConfig::default()).expect("empty ok");
        let text = format!("{}", Report::new(&analysis));
        assert!(text.contains("empty dataset"));
        assert!(text.contains("n/a"));
    }
}
