//! Interactive application state.

use crate::analysis::pipeline;
use crate::analysis::summary::SummaryStatistics;
use crate::analysis::types::{AnomalyFlag, ConsumptionRecord, EnrichedRecord};
use crate::config::AnalysisConfig;
use crate::error::PipelineError;

/// Rolling-window bounds exposed in the UI. The pipeline itself accepts any
/// window >= 1; this is an interaction constraint.
pub const MIN_WINDOW: usize = 2;
pub const MAX_WINDOW: usize = 24;

/// Anomaly-threshold bounds in tenths (1.0 to 3.0, 0.1 steps).
pub const MIN_THRESHOLD_TENTHS: u32 = 10;
pub const MAX_THRESHOLD_TENTHS: u32 = 30;

/// TUI application state: the enriched dataset plus the two live parameters.
pub struct App {
    /// Enriched dataset; rolling averages and anomaly flags track the live
    /// parameters, everything else is fixed after the initial run.
    pub records: Vec<EnrichedRecord>,
    /// Whole-run summary (mean/std/max and segment averages don't change
    /// with the live parameters).
    pub summary: SummaryStatistics,
    /// Current rolling window size.
    pub window: usize,
    /// Current anomaly threshold in tenths, to keep 0.1 steps exact.
    threshold_tenths: u32,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Window to restore on reset.
    default_window: usize,
    /// Threshold tenths to restore on reset.
    default_threshold_tenths: u32,
}

fn clamp_window(window: usize) -> usize {
    window.clamp(MIN_WINDOW, MAX_WINDOW)
}

fn clamp_tenths(tenths: u32) -> u32 {
    tenths.clamp(MIN_THRESHOLD_TENTHS, MAX_THRESHOLD_TENTHS)
}

impl App {
    /// Runs the full pipeline once and captures the live parameters, both
    /// clamped into their UI bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] if the initial pipeline run fails.
    pub fn new(records: Vec<ConsumptionRecord>, cfg: &AnalysisConfig) -> Result<Self, PipelineError> {
        let window = clamp_window(cfg.rolling.window);
        let threshold_tenths = clamp_tenths((cfg.anomaly.threshold * 10.0).round() as u32);

        let mut bounded = cfg.clone();
        bounded.rolling.window = window;
        bounded.anomaly.threshold = f64::from(threshold_tenths) / 10.0;

        let analysis = pipeline::run(&records, &bounded)?;
        Ok(Self {
            records: analysis.records,
            summary: analysis.summary,
            window,
            threshold_tenths,
            quit: false,
            default_window: window,
            default_threshold_tenths: threshold_tenths,
        })
    }

    /// Current anomaly threshold multiplier.
    pub fn threshold(&self) -> f64 {
        f64::from(self.threshold_tenths) / 10.0
    }

    /// Number of records currently flagged as spikes.
    pub fn anomaly_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.anomaly == AnomalyFlag::HighSpike)
            .count()
    }

    /// Grows the rolling window by one record, up to [`MAX_WINDOW`].
    pub fn widen_window(&mut self) {
        self.set_window(self.window + 1);
    }

    /// Shrinks the rolling window by one record, down to [`MIN_WINDOW`].
    pub fn narrow_window(&mut self) {
        self.set_window(self.window.saturating_sub(1));
    }

    fn set_window(&mut self, window: usize) {
        let window = clamp_window(window);
        if window == self.window {
            return;
        }
        self.window = window;
        self.recompute_rolling();
    }

    /// Raises the anomaly threshold by 0.1, up to 3.0.
    pub fn raise_threshold(&mut self) {
        self.set_threshold_tenths(self.threshold_tenths + 1);
    }

    /// Lowers the anomaly threshold by 0.1, down to 1.0.
    pub fn lower_threshold(&mut self) {
        self.set_threshold_tenths(self.threshold_tenths.saturating_sub(1));
    }

    fn set_threshold_tenths(&mut self, tenths: u32) {
        let tenths = clamp_tenths(tenths);
        if tenths == self.threshold_tenths {
            return;
        }
        self.threshold_tenths = tenths;
        self.recompute_anomalies();
    }

    /// Restores both parameters to their configured defaults.
    pub fn reset(&mut self) {
        self.set_window(self.default_window);
        self.set_threshold_tenths(self.default_threshold_tenths);
    }

    fn recompute_rolling(&mut self) {
        // window stays in [MIN_WINDOW, MAX_WINDOW], so this cannot fail
        if pipeline::apply_rolling_average(&mut self.records, self.window).is_err() {
            debug_assert!(false, "clamped window must be valid");
        }
    }

    fn recompute_anomalies(&mut self) {
        // threshold stays in [1.0, 3.0], so this cannot fail
        if pipeline::flag_anomalies(&mut self.records, self.threshold()).is_err() {
            debug_assert!(false, "clamped threshold must be valid");
        }
    }
}
