//! US EPA Air Quality Index engine
//!
//! This crate derives a normalized AQI from third-party pollutant readings:
//! - Unit normalization from μg/m³ to each breakpoint table's native unit
//! - Per-pollutant sub-indices from the EPA breakpoint tables
//! - The overall AQI as the worst sub-index, with a deterministic city-based
//!   estimate when nothing was measured
//! - Temperature anomaly detection over a daily series
//!
//! # Example
//!
//! ```rust
//! use climate_aqi::{comprehensive_aqi, PollutantReading};
//!
//! let reading = PollutantReading {
//!     pm2_5: 10.0,
//!     no2: 100.0,
//!     ..Default::default()
//! };
//! assert_eq!(comprehensive_aqi(&reading, "London"), 50);
//!
//! // Nothing measured: estimate from the city name
//! let estimate = comprehensive_aqi(&PollutantReading::default(), "London");
//! assert!((25..=200).contains(&estimate));
//! ```

pub mod aggregate;
pub mod anomaly;
pub mod breakpoints;
pub mod category;
pub mod config;
pub mod error;
pub mod pollutant;
pub mod reading;
pub mod summary;

pub use aggregate::{AqiResult, AqiSource, assess, comprehensive_aqi, normalize_and_score};
pub use anomaly::{Anomaly, TemperaturePoint, detect_anomalies};
pub use breakpoints::{SubIndex, sub_index};
pub use category::AqiCategory;
pub use config::Config;
pub use error::{AqiError, Result};
pub use pollutant::{PollutantKind, normalize};
pub use reading::{AirQualityPayload, PollutantReading, resolve_aqi};
pub use summary::{NullSummarizer, Summarizer, SummaryError};

/// Main entry point for an upstream `air_quality` JSON object
///
/// Parses the payload and applies the upstream trust policy with the
/// configured threshold.
///
/// # Arguments
///
/// * `json` - The provider's `air_quality` object
/// * `city_name` - Location name, used only when no pollutant was measured
/// * `config` - Supplies `upstream_trust_threshold`
///
/// # Example
///
/// ```rust
/// use climate_aqi::{aqi_from_upstream, Config};
///
/// let json = r#"{"pm2_5": 10.0, "pm10": 0.0, "us-epa-index": 1}"#;
/// let result = aqi_from_upstream(json, "London", &Config::default()).unwrap();
/// assert_eq!(result.value, 41);
/// ```
///
/// # Errors
///
/// * `AqiError::InvalidPayload` - The payload is not valid JSON of numeric fields
pub fn aqi_from_upstream(json: &str, city_name: &str, config: &Config) -> Result<AqiResult> {
    let payload = AirQualityPayload::from_json(json)?;
    Ok(resolve_aqi(
        &payload,
        city_name,
        config.upstream_trust_threshold,
    ))
}
