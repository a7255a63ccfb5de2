//! Query defaults
//!
//! Loaded from TOML; every field is optional and falls back to the values
//! below.
//!
//! ```toml
//! default_city = "London"
//! history_days = 7
//! forecast_days = 3
//! anomaly_window_days = 30
//! upstream_trust_threshold = 10
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::anomaly::{self, Anomaly, TemperaturePoint};
use crate::error::{AqiError, Result};
use crate::reading::DEFAULT_TRUST_THRESHOLD;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// City used when a request names none
    pub default_city: String,
    /// Days of history fetched for charts and summaries
    pub history_days: u32,
    pub forecast_days: u32,
    /// Days of history scanned for temperature anomalies
    pub anomaly_window_days: u32,
    /// Upstream EPA index is trusted only when strictly above this
    pub upstream_trust_threshold: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: "London".to_string(),
            history_days: 7,
            forecast_days: 3,
            anomaly_window_days: 30,
            upstream_trust_threshold: DEFAULT_TRUST_THRESHOLD,
        }
    }
}

impl Config {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConfig` - malformed TOML, unknown keys or invalid values
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConfig` - unreadable file or invalid contents
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| AqiError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// # Errors
    ///
    /// * `AqiError::InvalidConfig` - empty city or a zero day count
    pub fn validate(&self) -> Result<()> {
        if self.default_city.trim().is_empty() {
            return Err(AqiError::invalid_field("default_city", "must not be empty"));
        }

        for (field, days) in [
            ("history_days", self.history_days),
            ("forecast_days", self.forecast_days),
            ("anomaly_window_days", self.anomaly_window_days),
        ] {
            if days == 0 {
                return Err(AqiError::invalid_field(field, "must be positive"));
            }
        }

        Ok(())
    }

    /// Most recent `history_days` entries of an oldest-first series
    #[must_use]
    pub fn history_window<'a, T>(&self, series: &'a [T]) -> &'a [T] {
        most_recent(series, self.history_days)
    }

    /// Anomalies over the most recent `anomaly_window_days` points
    #[must_use]
    pub fn recent_anomalies(&self, series: &[TemperaturePoint]) -> Vec<Anomaly> {
        anomaly::detect_anomalies(most_recent(series, self.anomaly_window_days))
    }

    /// Requested city, or the default when none was given
    #[must_use]
    pub fn city_or_default<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .unwrap_or(self.default_city.as_str())
    }
}

fn most_recent<T>(series: &[T], days: u32) -> &[T] {
    let keep = usize::try_from(days).unwrap_or(usize::MAX).min(series.len());
    &series[series.len() - keep..]
}
