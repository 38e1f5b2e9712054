//! TOML-based analysis configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level analysis configuration parsed from TOML.
///
/// All fields have defaults matching the original tool's parameters. Load
/// from TOML with [`AnalysisConfig::from_toml_file`] or use
/// [`AnalysisConfig::default`] for the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Input column naming.
    pub input: InputConfig,
    /// Peak and off-peak window bounds.
    pub peak: PeakConfig,
    /// Rolling-average parameters.
    pub rolling: RollingConfig,
    /// Anomaly-flagging parameters.
    pub anomaly: AnomalyConfig,
}

/// Input column naming. Column names are a configuration detail, not a
/// pipeline contract.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Name of the timestamp column.
    pub timestamp_column: String,
    /// Name of the consumption column.
    pub consumption_column: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            timestamp_column: "Datetime".to_string(),
            consumption_column: "Consumption_kWh".to_string(),
        }
    }
}

/// Peak and off-peak window bounds (hours of day).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PeakConfig {
    /// First peak hour (inclusive).
    pub start_hour: u32,
    /// Last peak hour (inclusive).
    pub end_hour: u32,
    /// Off-peak window is `[0, off_peak_end_hour)`.
    pub off_peak_end_hour: u32,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            start_hour: 18,
            end_hour: 22,
            off_peak_end_hour: 6,
        }
    }
}

/// Rolling-average parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RollingConfig {
    /// Trailing window size in records (must be >= 1).
    pub window: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self { window: 5 }
    }
}

/// Anomaly-flagging parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnomalyConfig {
    /// Standard-deviation multiplier `k`; a record is a spike when its
    /// consumption exceeds `mean + k * std` (must be > 0 and finite).
    pub threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self { threshold: 2.0 }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"rolling.window"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl AnalysisConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let input = &self.input;
        if input.timestamp_column.is_empty() {
            errors.push(ConfigError {
                field: "input.timestamp_column".into(),
                message: "must not be empty".into(),
            });
        }
        if input.consumption_column.is_empty() {
            errors.push(ConfigError {
                field: "input.consumption_column".into(),
                message: "must not be empty".into(),
            });
        }

        let peak = &self.peak;
        if peak.end_hour > 23 {
            errors.push(ConfigError {
                field: "peak.end_hour".into(),
                message: "must be <= 23".into(),
            });
        }
        if peak.start_hour > peak.end_hour {
            errors.push(ConfigError {
                field: "peak.start_hour".into(),
                message: "must be <= peak.end_hour".into(),
            });
        }
        if peak.off_peak_end_hour > 24 {
            errors.push(ConfigError {
                field: "peak.off_peak_end_hour".into(),
                message: "must be <= 24".into(),
            });
        }

        if self.rolling.window == 0 {
            errors.push(ConfigError {
                field: "rolling.window".into(),
                message: "must be >= 1".into(),
            });
        }

        let k = self.anomaly.threshold;
        if !(k.is_finite() && k > 0.0) {
            errors.push(ConfigError {
                field: "anomaly.threshold".into(),
                message: format!("must be a finite value > 0, got {k}"),
            });
        }

        errors
    }
}
