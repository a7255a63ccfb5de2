//! EPA breakpoint tables and the per-pollutant sub-index
//!
//! Each table is an ordered list of concentration segments mapped onto AQI
//! segments. A concentration falls into the first segment whose upper bound
//! meets or exceeds it; anything past the last upper bound still uses the
//! last segment, so the top segment is open-ended. Concentrations are in the
//! kind's native unit (see [`crate::pollutant::normalize`]).

use crate::pollutant::PollutantKind;

/// Sub-index attributable to a single pollutant
pub type SubIndex = u32;

/// One piecewise-linear segment of a breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub conc_low: f64,
    pub conc_high: f64,
    pub aqi_low: u32,
    pub aqi_high: u32,
}

const fn bp(conc_low: f64, conc_high: f64, aqi_low: u32, aqi_high: u32) -> Breakpoint {
    Breakpoint {
        conc_low,
        conc_high,
        aqi_low,
        aqi_high,
    }
}

/// PM2.5, 24-hour, μg/m³
pub const PM25_BREAKPOINTS: [Breakpoint; 7] = [
    bp(0.0, 12.0, 0, 50),
    bp(12.1, 35.4, 51, 100),
    bp(35.5, 55.4, 101, 150),
    bp(55.5, 150.4, 151, 200),
    bp(150.5, 250.4, 201, 300),
    bp(250.5, 350.4, 301, 400),
    bp(350.5, 500.4, 401, 500),
];

/// PM10, 24-hour, μg/m³
pub const PM10_BREAKPOINTS: [Breakpoint; 6] = [
    bp(0.0, 54.0, 0, 50),
    bp(55.0, 154.0, 51, 100),
    bp(155.0, 254.0, 101, 150),
    bp(255.0, 354.0, 151, 200),
    bp(355.0, 424.0, 201, 300),
    bp(425.0, 604.0, 301, 500),
];

/// NO2, 1-hour, ppb
pub const NO2_BREAKPOINTS: [Breakpoint; 6] = [
    bp(0.0, 53.0, 0, 50),
    bp(54.0, 100.0, 51, 100),
    bp(101.0, 360.0, 101, 150),
    bp(361.0, 649.0, 151, 200),
    bp(650.0, 1249.0, 201, 300),
    bp(1250.0, 2049.0, 301, 500),
];

/// SO2, 1-hour, ppb
pub const SO2_BREAKPOINTS: [Breakpoint; 6] = [
    bp(0.0, 35.0, 0, 50),
    bp(36.0, 75.0, 51, 100),
    bp(76.0, 185.0, 101, 150),
    bp(186.0, 304.0, 151, 200),
    bp(305.0, 604.0, 201, 300),
    bp(605.0, 1004.0, 301, 500),
];

/// CO, 8-hour, ppm
pub const CO_BREAKPOINTS: [Breakpoint; 6] = [
    bp(0.0, 4.4, 0, 50),
    bp(4.5, 9.4, 51, 100),
    bp(9.5, 12.4, 101, 150),
    bp(12.5, 15.4, 151, 200),
    bp(15.5, 30.4, 201, 300),
    bp(30.5, 50.4, 301, 500),
];

/// O3, ppb
pub const O3_BREAKPOINTS: [Breakpoint; 6] = [
    bp(0.0, 54.0, 0, 50),
    bp(55.0, 70.0, 51, 100),
    bp(71.0, 85.0, 101, 150),
    bp(86.0, 105.0, 151, 200),
    bp(106.0, 200.0, 201, 300),
    bp(201.0, 300.0, 301, 500),
];

const O3_TOP_MIN: SubIndex = 301;
const O3_TOP_MAX: SubIndex = 500;

/// Breakpoint table for a pollutant kind
#[must_use]
pub fn table(kind: PollutantKind) -> &'static [Breakpoint] {
    match kind {
        PollutantKind::Pm25 => &PM25_BREAKPOINTS,
        PollutantKind::Pm10 => &PM10_BREAKPOINTS,
        PollutantKind::No2 => &NO2_BREAKPOINTS,
        PollutantKind::So2 => &SO2_BREAKPOINTS,
        PollutantKind::Co => &CO_BREAKPOINTS,
        PollutantKind::O3 => &O3_BREAKPOINTS,
    }
}

impl Breakpoint {
    /// Linear interpolation inside this segment, truncated toward zero
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn interpolate(&self, concentration: f64) -> SubIndex {
        let slope = f64::from(self.aqi_high - self.aqi_low) / (self.conc_high - self.conc_low);
        let value = slope * (concentration - self.conc_low) + f64::from(self.aqi_low);
        // `as` truncates toward zero and saturates at the integer bounds
        value as SubIndex
    }
}

/// Select the segment a concentration falls into
///
/// Returns the lowest segment whose upper bound meets or exceeds the
/// concentration, or the open-ended top segment.
#[must_use]
pub fn segment_for(kind: PollutantKind, concentration: f64) -> (usize, &'static Breakpoint) {
    let segments = table(kind);
    let last = segments.len() - 1;
    segments
        .iter()
        .enumerate()
        .find(|(_, seg)| concentration <= seg.conc_high)
        .unwrap_or((last, &segments[last]))
}

/// Map a concentration (native unit) to its sub-index
///
/// Callers skip concentrations that are zero or negative; those mean "not
/// measured" rather than clean air. Only ozone's top segment is clamped into
/// `[301, 500]`. Other pollutants extrapolate their top segment unclamped.
///
/// Concentrations that land in the gap between two published segments
/// (e.g. PM2.5 = 12.05) never score below the top of the segment beneath.
/// Converted gas readings land there routinely: 107 µg/m³ of O3 is 54.57 ppb.
#[must_use]
pub fn sub_index(kind: PollutantKind, concentration: f64) -> SubIndex {
    let segments = table(kind);
    let (position, segment) = segment_for(kind, concentration);
    let mut value = segment.interpolate(concentration);

    if position > 0 && concentration < segment.conc_low {
        value = value.max(segments[position - 1].aqi_high);
    }

    if kind == PollutantKind::O3 && position == segments.len() - 1 {
        value.clamp(O3_TOP_MIN, O3_TOP_MAX)
    } else {
        value
    }
}
