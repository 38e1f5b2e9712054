//! Shared dataset builders for integration tests.
#![allow(dead_code)] // not every test binary uses every builder

use chrono::{Duration, NaiveDate, NaiveDateTime};
use loadscope::analysis::types::ConsumptionRecord;

/// First timestamp of every synthetic dataset: Monday 2024-01-01 00:00.
pub fn start_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

/// Builds records one hour apart starting at [`start_timestamp`].
pub fn hourly_records(values: &[f64]) -> Vec<ConsumptionRecord> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            ConsumptionRecord::new(start_timestamp() + Duration::hours(i as i64), v)
        })
        .collect()
}

/// A week of hourly readings with a flat load and one injected spike.
pub fn week_with_spike(base: f64, spike: f64, spike_at: usize) -> Vec<ConsumptionRecord> {
    let mut values = vec![base; 24 * 7];
    values[spike_at] = spike;
    hourly_records(&values)
}
