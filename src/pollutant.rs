//! Pollutant kinds and unit normalization
//!
//! Upstream providers report every pollutant as a mass concentration in
//! μg/m³. The EPA breakpoint tables expect particulates in μg/m³ but gases in
//! ppb (or ppm for CO), so gas readings are scaled by fixed factors that
//! assume standard temperature and pressure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AqiError, Result};

/// NO2: μg/m³ to ppb
pub const NO2_UGM3_TO_PPB: f64 = 0.532;
/// SO2: μg/m³ to ppb
pub const SO2_UGM3_TO_PPB: f64 = 0.382;
/// CO: μg/m³ to ppm
pub const CO_UGM3_TO_PPM: f64 = 0.000_873;
/// O3: μg/m³ to ppb
pub const O3_UGM3_TO_PPB: f64 = 0.510;

/// The six pollutants covered by the EPA breakpoint tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PollutantKind {
    /// Fine particulate matter, μg/m³
    #[serde(rename = "PM2.5")]
    Pm25,
    /// Coarse particulate matter, μg/m³
    #[serde(rename = "PM10")]
    Pm10,
    /// Nitrogen dioxide, ppb
    #[serde(rename = "NO2")]
    No2,
    /// Sulfur dioxide, ppb
    #[serde(rename = "SO2")]
    So2,
    /// Carbon monoxide, ppm
    #[serde(rename = "CO")]
    Co,
    /// Ozone, ppb
    #[serde(rename = "O3")]
    O3,
}

/// Native unit of a breakpoint table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    MicrogramsPerCubicMeter,
    PartsPerBillion,
    PartsPerMillion,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MicrogramsPerCubicMeter => "µg/m³",
            Self::PartsPerBillion => "ppb",
            Self::PartsPerMillion => "ppm",
        })
    }
}

impl PollutantKind {
    /// Every kind, in the order the aggregator evaluates them
    pub const ALL: [Self; 6] = [
        Self::Pm25,
        Self::Pm10,
        Self::No2,
        Self::So2,
        Self::Co,
        Self::O3,
    ];

    /// Display name, e.g. `PM2.5`
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pm25 => "PM2.5",
            Self::Pm10 => "PM10",
            Self::No2 => "NO2",
            Self::So2 => "SO2",
            Self::Co => "CO",
            Self::O3 => "O3",
        }
    }

    /// Key used by the upstream air quality payload, e.g. `pm2_5`
    #[must_use]
    pub fn payload_key(&self) -> &'static str {
        match self {
            Self::Pm25 => "pm2_5",
            Self::Pm10 => "pm10",
            Self::No2 => "no2",
            Self::So2 => "so2",
            Self::Co => "co",
            Self::O3 => "o3",
        }
    }

    /// Unit the breakpoint table for this kind is expressed in
    #[must_use]
    pub fn native_unit(&self) -> Unit {
        match self {
            Self::Pm25 | Self::Pm10 => Unit::MicrogramsPerCubicMeter,
            Self::No2 | Self::So2 | Self::O3 => Unit::PartsPerBillion,
            Self::Co => Unit::PartsPerMillion,
        }
    }

    /// Multiplier from μg/m³ to the native unit
    #[must_use]
    pub fn conversion_factor(&self) -> f64 {
        match self {
            Self::Pm25 | Self::Pm10 => 1.0,
            Self::No2 => NO2_UGM3_TO_PPB,
            Self::So2 => SO2_UGM3_TO_PPB,
            Self::Co => CO_UGM3_TO_PPM,
            Self::O3 => O3_UGM3_TO_PPB,
        }
    }
}

impl fmt::Display for PollutantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PollutantKind {
    type Err = AqiError;

    /// Accepts display names and payload keys, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.name().eq_ignore_ascii_case(wanted)
                    || kind.payload_key().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| AqiError::UnknownPollutant(wanted.to_string()))
    }
}

/// Convert a μg/m³ concentration into the unit the kind's breakpoint table expects
#[must_use]
pub fn normalize(kind: PollutantKind, concentration_ugm3: f64) -> f64 {
    concentration_ugm3 * kind.conversion_factor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    #[rstest]
    #[case(PollutantKind::Pm25, 35.0, 35.0)]
    #[case(PollutantKind::Pm10, 120.0, 120.0)]
    #[case(PollutantKind::No2, 100.0, 53.2)]
    #[case(PollutantKind::So2, 100.0, 38.2)]
    #[case(PollutantKind::Co, 1000.0, 0.873)]
    #[case(PollutantKind::O3, 100.0, 51.0)]
    fn normalize_cases(#[case] kind: PollutantKind, #[case] ugm3: f64, #[case] expected: f64) {
        let got = normalize(kind, ugm3);
        assert!(
            (got - expected).abs() < EPS,
            "normalize({kind}, {ugm3}) = {got}, expected {expected}"
        );
    }

    #[rstest]
    #[case("PM2.5", PollutantKind::Pm25)]
    #[case("pm2_5", PollutantKind::Pm25)]
    #[case("pm10", PollutantKind::Pm10)]
    #[case(" NO2 ", PollutantKind::No2)]
    #[case("so2", PollutantKind::So2)]
    #[case("Co", PollutantKind::Co)]
    #[case("o3", PollutantKind::O3)]
    fn parse_names(#[case] input: &str, #[case] expected: PollutantKind) {
        assert_eq!(input.parse::<PollutantKind>().unwrap(), expected);
    }

    #[test]
    fn parse_unknown() {
        let err = "nh3".parse::<PollutantKind>().unwrap_err();
        assert_eq!(err, AqiError::UnknownPollutant("nh3".into()));
    }

    #[test]
    fn native_units() {
        assert_eq!(PollutantKind::Pm25.native_unit().to_string(), "µg/m³");
        assert_eq!(PollutantKind::O3.native_unit().to_string(), "ppb");
        assert_eq!(PollutantKind::Co.native_unit().to_string(), "ppm");
    }

    #[test]
    fn serde_uses_display_names() {
        let json = serde_json::to_string(&PollutantKind::ALL).unwrap();
        insta::assert_snapshot!(json, @r#"["PM2.5","PM10","NO2","SO2","CO","O3"]"#);
    }
}
