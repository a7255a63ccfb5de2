//! Error types for the AQI engine
//!
//! The scoring functions themselves are total. Errors only come out of the
//! parsing seams: pollutant names, upstream payloads and configuration.

use thiserror::Error;

/// Result type alias for parsing operations
pub type Result<T> = std::result::Result<T, AqiError>;

/// Errors that can occur while turning outside input into engine values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// Pollutant name or payload key that is not one of the six tracked kinds
    #[error("Unknown pollutant: {0}")]
    UnknownPollutant(String),

    /// Concentration that is negative, NaN or infinite
    #[error("Invalid concentration for {pollutant}: {value}")]
    InvalidConcentration { pollutant: String, value: f64 },

    /// Upstream air quality payload could not be parsed
    #[error("Invalid upstream payload: {0}")]
    InvalidPayload(String),

    /// Configuration could not be parsed or failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AqiError {
    /// Create a new `InvalidConcentration` error
    #[must_use]
    pub fn invalid_concentration(pollutant: &str, value: f64) -> Self {
        Self::InvalidConcentration {
            pollutant: pollutant.to_string(),
            value,
        }
    }

    /// Create a new `InvalidConfig` error for a specific field
    #[must_use]
    pub fn invalid_field(field: &str, reason: &str) -> Self {
        Self::InvalidConfig(format!("{field} {reason}"))
    }
}

impl From<serde_json::Error> for AqiError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidPayload(err.to_string())
    }
}

impl From<toml::de::Error> for AqiError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidConfig(err.message().to_string())
    }
}
