//! Health categories for AQI values

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    /// 0 to 50
    Good,
    /// 51 to 100
    Moderate,
    /// 101 to 150
    UnhealthyForSensitiveGroups,
    /// 151 to 200
    Unhealthy,
    /// Above 200
    VeryUnhealthy,
}

impl AqiCategory {
    /// Category for an AQI value, which may be a fractional average
    #[must_use]
    pub fn from_aqi(aqi: f64) -> Self {
        if aqi <= 50.0 {
            Self::Good
        } else if aqi <= 100.0 {
            Self::Moderate
        } else if aqi <= 150.0 {
            Self::UnhealthyForSensitiveGroups
        } else if aqi <= 200.0 {
            Self::Unhealthy
        } else {
            Self::VeryUnhealthy
        }
    }

    /// Phrase used in summaries, e.g. "moderate air quality"
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::Good => "good air quality",
            Self::Moderate => "moderate air quality",
            Self::UnhealthyForSensitiveGroups => "unhealthy for sensitive groups",
            Self::Unhealthy => "unhealthy air quality",
            Self::VeryUnhealthy => "very unhealthy air quality",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.status())
    }
}
