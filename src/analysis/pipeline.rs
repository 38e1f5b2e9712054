//! The consumption feature pipeline.
//!
//! Six derivations over one loaded dataset: time decomposition, segment
//! averaging, rolling trend, weekday/weekend comparison, anomaly flagging,
//! and efficiency scoring. All are pure given `(records, configuration)`;
//! [`run`] executes every derivation and assembles the summary.

use crate::config::{AnalysisConfig, PeakConfig};
use crate::error::PipelineError;

use super::stats;
use super::summary::SummaryStatistics;
use super::types::{AnomalyFlag, ConsumptionRecord, DayType, EnrichedRecord};

/// Mean consumption over the peak and off-peak hour windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentAverages {
    /// Mean over hours `[start_hour, end_hour]`; `None` when no record falls
    /// in the window.
    pub peak_avg: Option<f64>,
    /// Mean over hours `[0, off_peak_end_hour)`; `None` when empty.
    pub off_peak_avg: Option<f64>,
}

/// Mean consumption per day-type partition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryAverages {
    pub weekday_avg: Option<f64>,
    pub weekend_avg: Option<f64>,
}

/// Whole-series load statistics used by anomaly flagging and scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadStats {
    /// Mean of all consumption values; `None` for an empty dataset.
    pub mean_load: Option<f64>,
    /// Sample standard deviation (n-1); `None` with fewer than 2 records.
    pub std_load: Option<f64>,
    /// Maximum consumption; `None` for an empty dataset.
    pub max_load: Option<f64>,
}

/// A fully enriched dataset plus its scalar summary.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub records: Vec<EnrichedRecord>,
    pub summary: SummaryStatistics,
}

/// Derives hour-of-day and weekday fields for every record. Pure and
/// order-preserving: output length always equals input length.
pub fn decompose_time(records: &[ConsumptionRecord]) -> Vec<EnrichedRecord> {
    records.iter().map(EnrichedRecord::from_record).collect()
}

/// Computes mean consumption over the peak window `[start_hour, end_hour]`
/// (inclusive on both ends) and the off-peak window `[0, off_peak_end_hour)`.
pub fn segment_average(records: &[EnrichedRecord], peak: &PeakConfig) -> SegmentAverages {
    let peak_avg = stats::mean(
        records
            .iter()
            .filter(|r| r.hour >= peak.start_hour && r.hour <= peak.end_hour)
            .map(|r| r.consumption_kwh),
    );
    let off_peak_avg = stats::mean(
        records
            .iter()
            .filter(|r| r.hour < peak.off_peak_end_hour)
            .map(|r| r.consumption_kwh),
    );
    SegmentAverages {
        peak_avg,
        off_peak_avg,
    }
}

/// Simple moving average over the trailing `window` records in input row
/// order (not timestamp-sorted). The first `window - 1` positions are `None`.
///
/// Implemented as an O(n) sliding sum.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidParameter`] if `window == 0`. The upper
/// bound of 24 used by the interactive mode is a UI constraint, not enforced
/// here.
pub fn rolling_average(
    records: &[EnrichedRecord],
    window: usize,
) -> Result<Vec<Option<f64>>, PipelineError> {
    if window == 0 {
        return Err(PipelineError::InvalidParameter {
            name: "window",
            reason: "rolling window must be >= 1".to_string(),
        });
    }

    let mut out = Vec::with_capacity(records.len());
    let mut sum = 0.0;
    for (i, r) in records.iter().enumerate() {
        sum += r.consumption_kwh;
        if i >= window {
            sum -= records[i - window].consumption_kwh;
        }
        out.push((i + 1 >= window).then(|| sum / window as f64));
    }
    Ok(out)
}

/// Runs [`rolling_average`] and stores the result on each record.
pub fn apply_rolling_average(
    records: &mut [EnrichedRecord],
    window: usize,
) -> Result<(), PipelineError> {
    let averages = rolling_average(records, window)?;
    for (r, avg) in records.iter_mut().zip(averages) {
        r.rolling_avg = avg;
    }
    Ok(())
}

/// Partitions records by [`DayType`] and computes each group's mean.
pub fn category_average(records: &[EnrichedRecord]) -> CategoryAverages {
    let mean_of = |day_type: DayType| {
        stats::mean(
            records
                .iter()
                .filter(|r| r.day_type == day_type)
                .map(|r| r.consumption_kwh),
        )
    };
    CategoryAverages {
        weekday_avg: mean_of(DayType::Weekday),
        weekend_avg: mean_of(DayType::Weekend),
    }
}

/// Computes mean, sample standard deviation, and maximum over the series.
pub fn load_stats(records: &[EnrichedRecord]) -> LoadStats {
    let values: Vec<f64> = records.iter().map(|r| r.consumption_kwh).collect();
    LoadStats {
        mean_load: stats::mean(values.iter().copied()),
        std_load: stats::sample_std(&values),
        max_load: stats::max_value(values.iter().copied()),
    }
}

/// Flags each record [`AnomalyFlag::HighSpike`] iff its consumption exceeds
/// `mean + k * std` over the full series, using the sample standard
/// deviation (n-1).
///
/// With fewer than 2 records the standard deviation is undefined, the
/// inequality cannot be evaluated, and every flag stays `Normal`.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidParameter`] if `k` is not a finite value
/// greater than zero.
pub fn flag_anomalies(records: &mut [EnrichedRecord], k: f64) -> Result<LoadStats, PipelineError> {
    if !(k.is_finite() && k > 0.0) {
        return Err(PipelineError::InvalidParameter {
            name: "threshold",
            reason: format!("anomaly threshold must be a finite value > 0, got {k}"),
        });
    }

    let stats = load_stats(records);
    match (stats.mean_load, stats.std_load) {
        (Some(mean), Some(std)) => {
            let cutoff = mean + k * std;
            for r in records.iter_mut() {
                r.anomaly = if r.consumption_kwh > cutoff {
                    AnomalyFlag::HighSpike
                } else {
                    AnomalyFlag::Normal
                };
            }
        }
        _ => {
            for r in records.iter_mut() {
                r.anomaly = AnomalyFlag::Normal;
            }
        }
    }
    Ok(stats)
}

/// Sets each record's efficiency score to `1 - consumption / max_load`.
///
/// When `max_load == 0` (or the dataset is empty) every score is undefined
/// and stays `None`. Returns the maximum load used for normalization.
pub fn apply_efficiency_scores(records: &mut [EnrichedRecord]) -> Option<f64> {
    let max_load = stats::max_value(records.iter().map(|r| r.consumption_kwh));
    let normalizer = max_load.filter(|&m| m > 0.0);
    for r in records.iter_mut() {
        r.efficiency_score = normalizer.map(|m| 1.0 - r.consumption_kwh / m);
    }
    max_load
}

/// Executes all six derivations and assembles the summary statistics.
///
/// Empty input is accepted: the enriched table is empty and every summary
/// statistic is `None`.
///
/// # Errors
///
/// Returns [`PipelineError::InvalidParameter`] for an out-of-range rolling
/// window or anomaly threshold.
pub fn run(records: &[ConsumptionRecord], cfg: &AnalysisConfig) -> Result<Analysis, PipelineError> {
    let mut enriched = decompose_time(records);
    apply_rolling_average(&mut enriched, cfg.rolling.window)?;
    let stats = flag_anomalies(&mut enriched, cfg.anomaly.threshold)?;
    apply_efficiency_scores(&mut enriched);
    let segments = segment_average(&enriched, &cfg.peak);
    let categories = category_average(&enriched);

    Ok(Analysis {
        summary: SummaryStatistics {
            peak_avg: segments.peak_avg,
            off_peak_avg: segments.off_peak_avg,
            weekday_avg: categories.weekday_avg,
            weekend_avg: categories.weekend_avg,
            mean_load: stats.mean_load,
            std_load: stats.std_load,
            max_load: stats.max_load,
        },
        records: enriched,
    })
}
