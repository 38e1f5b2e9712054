//! Core record types for the consumption feature pipeline.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

/// One row of raw input: a timestamp and a non-negative consumption reading.
///
/// Timestamps need not be unique or sorted; derivations follow input row
/// order unless stated otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionRecord {
    /// Reading timestamp in the log's local calendar.
    pub timestamp: NaiveDateTime,
    /// Energy consumed (kWh); finite and >= 0 is an ingest invariant.
    pub consumption_kwh: f64,
}

impl ConsumptionRecord {
    pub fn new(timestamp: NaiveDateTime, consumption_kwh: f64) -> Self {
        Self {
            timestamp,
            consumption_kwh,
        }
    }
}

/// Weekday/weekend partition of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    /// `Weekend` iff the weekday is Saturday or Sunday; everything else is
    /// `Weekday`. Exhaustive, no third category.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekday => write!(f, "Weekday"),
            Self::Weekend => write!(f, "Weekend"),
        }
    }
}

/// Threshold-based anomaly classification of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnomalyFlag {
    #[default]
    Normal,
    /// Consumption exceeded `mean + k * std` over the full series.
    HighSpike,
}

impl fmt::Display for AnomalyFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::HighSpike => write!(f, "High Spike"),
        }
    }
}

/// Canonical English weekday name, independent of locale settings.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// A [`ConsumptionRecord`] extended with every derived field.
///
/// `rolling_avg` and `efficiency_score` are `None` where the statistic is
/// undefined (leading window positions; zero maximum load).
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
    pub timestamp: NaiveDateTime,
    pub consumption_kwh: f64,
    /// Hour of day, 0-23.
    pub hour: u32,
    /// Canonical weekday name ("Monday".."Sunday").
    pub day_name: &'static str,
    pub day_type: DayType,
    pub rolling_avg: Option<f64>,
    pub anomaly: AnomalyFlag,
    pub efficiency_score: Option<f64>,
}

impl EnrichedRecord {
    /// Decomposes one raw record's timestamp into its time features.
    ///
    /// Rolling average, anomaly flag, and efficiency score start out at their
    /// defaults and are filled in by the corresponding derivations.
    pub fn from_record(record: &ConsumptionRecord) -> Self {
        let weekday = record.timestamp.weekday();
        Self {
            timestamp: record.timestamp,
            consumption_kwh: record.consumption_kwh,
            hour: record.timestamp.hour(),
            day_name: day_name(weekday),
            day_type: DayType::from_weekday(weekday),
            rolling_avg: None,
            anomaly: AnomalyFlag::default(),
            efficiency_score: None,
        }
    }
}

impl fmt::Display for EnrichedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rolling = self
            .rolling_avg
            .map_or_else(|| "   n/a".to_string(), |v| format!("{v:>6.2}"));
        let score = self
            .efficiency_score
            .map_or_else(|| "  n/a".to_string(), |v| format!("{v:>5.3}"));
        write!(
            f,
            "{} | {:>8.3} kWh | h={:>2} {:<9} ({}) | roll={} eff={} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M"),
            self.consumption_kwh,
            self.hour,
            self.day_name,
            self.day_type,
            rolling,
            score,
            self.anomaly,
        )
    }
}
