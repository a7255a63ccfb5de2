//! Pollutant readings and the upstream air quality payload
//!
//! A reading is the six mass concentrations reported by the weather provider.
//! A zero (or absent) value means the pollutant was not measured.

use serde::{Deserialize, Serialize};

use crate::aggregate::{self, AqiResult};
use crate::error::{AqiError, Result};
use crate::pollutant::PollutantKind;

/// Upstream EPA index at or below this value is treated as implausible
pub const DEFAULT_TRUST_THRESHOLD: i64 = 10;

/// Concentrations in μg/m³ as supplied upstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    #[serde(default)]
    pub pm2_5: f64,
    #[serde(default)]
    pub pm10: f64,
    #[serde(default)]
    pub no2: f64,
    #[serde(default)]
    pub so2: f64,
    #[serde(default)]
    pub co: f64,
    #[serde(default)]
    pub o3: f64,
}

impl PollutantReading {
    /// Concentration for a kind, 0.0 when unmeasured
    #[must_use]
    pub fn get(&self, kind: PollutantKind) -> f64 {
        match kind {
            PollutantKind::Pm25 => self.pm2_5,
            PollutantKind::Pm10 => self.pm10,
            PollutantKind::No2 => self.no2,
            PollutantKind::So2 => self.so2,
            PollutantKind::Co => self.co,
            PollutantKind::O3 => self.o3,
        }
    }

    /// Set a concentration
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidConcentration` - value is negative, NaN or infinite
    pub fn set(&mut self, kind: PollutantKind, concentration_ugm3: f64) -> Result<()> {
        if !concentration_ugm3.is_finite() || concentration_ugm3 < 0.0 {
            return Err(AqiError::invalid_concentration(
                kind.name(),
                concentration_ugm3,
            ));
        }

        let slot = match kind {
            PollutantKind::Pm25 => &mut self.pm2_5,
            PollutantKind::Pm10 => &mut self.pm10,
            PollutantKind::No2 => &mut self.no2,
            PollutantKind::So2 => &mut self.so2,
            PollutantKind::Co => &mut self.co,
            PollutantKind::O3 => &mut self.o3,
        };
        *slot = concentration_ugm3;
        Ok(())
    }

    /// Build a reading from `(name, μg/m³)` pairs, e.g. `("pm2_5", 12.0)`
    ///
    /// # Errors
    ///
    /// * `AqiError::UnknownPollutant` - name is not one of the six kinds
    /// * `AqiError::InvalidConcentration` - value is negative, NaN or infinite
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut reading = Self::default();
        for (name, value) in pairs {
            reading.set(name.parse()?, value)?;
        }
        Ok(reading)
    }

    /// Pollutants with a strictly positive concentration, in evaluation order
    pub fn measured(&self) -> impl Iterator<Item = (PollutantKind, f64)> + '_ {
        PollutantKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, conc)| *conc > 0.0)
    }

    /// True when no pollutant was measured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measured().next().is_none()
    }
}

/// `air_quality` object of the upstream weather payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirQualityPayload {
    #[serde(flatten)]
    pub reading: PollutantReading,
    /// Provider's own US EPA index, if any
    #[serde(rename = "us-epa-index", default, skip_serializing_if = "Option::is_none")]
    pub us_epa_index: Option<i64>,
}

impl AirQualityPayload {
    /// Parse the `air_quality` JSON object
    ///
    /// # Errors
    ///
    /// * `AqiError::InvalidPayload` - not a JSON object of numeric fields
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Upstream index if it is trusted under `threshold`
    #[must_use]
    pub fn trusted_index(&self, threshold: i64) -> Option<i64> {
        self.us_epa_index.filter(|index| *index > threshold)
    }
}

/// Final AQI for an upstream payload
///
/// The provider's index is used verbatim when present and strictly above
/// `threshold`; otherwise the AQI is derived from the payload's pollutants
/// (or the city estimate when none were measured).
#[must_use]
pub fn resolve_aqi(payload: &AirQualityPayload, city_name: &str, threshold: i64) -> AqiResult {
    match payload.trusted_index(threshold) {
        Some(index) => {
            log::info!("Using upstream AQI for {city_name}: {index}");
            AqiResult::upstream(index)
        }
        None => {
            log::debug!(
                "Upstream AQI {:?} for {city_name} not trusted, computing from pollutants",
                payload.us_epa_index
            );
            aggregate::assess(&payload.reading, city_name)
        }
    }
}
