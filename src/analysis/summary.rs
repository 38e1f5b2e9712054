//! Scalar summary statistics derived from one full pipeline run.

use std::fmt;

/// Aggregate statistics recomputed on demand from the enriched dataset.
///
/// Every field is `Option<f64>`: an empty window, empty partition, empty
/// dataset, or a single-record series leaves the statistic undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStatistics {
    /// Mean consumption over the peak hour window.
    pub peak_avg: Option<f64>,
    /// Mean consumption over the off-peak hour window.
    pub off_peak_avg: Option<f64>,
    /// Mean consumption on weekdays.
    pub weekday_avg: Option<f64>,
    /// Mean consumption on weekends.
    pub weekend_avg: Option<f64>,
    /// Mean of the full series.
    pub mean_load: Option<f64>,
    /// Sample standard deviation of the full series (n-1).
    pub std_load: Option<f64>,
    /// Maximum of the full series.
    pub max_load: Option<f64>,
}

/// Formats an optional statistic, printing `n/a` when undefined.
pub fn fmt_stat(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}"))
}

impl fmt::Display for SummaryStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Summary Statistics ---")?;
        writeln!(f, "Peak average:      {} kWh", fmt_stat(self.peak_avg))?;
        writeln!(f, "Off-peak average:  {} kWh", fmt_stat(self.off_peak_avg))?;
        writeln!(f, "Weekday average:   {} kWh", fmt_stat(self.weekday_avg))?;
        writeln!(f, "Weekend average:   {} kWh", fmt_stat(self.weekend_avg))?;
        writeln!(f, "Mean load:         {} kWh", fmt_stat(self.mean_load))?;
        writeln!(f, "Std deviation:     {} kWh", fmt_stat(self.std_load))?;
        write!(f, "Max load:          {} kWh", fmt_stat(self.max_load))
    }
}
