//! Temperature anomaly detection
//!
//! A point is anomalous when it lies more than two population standard
//! deviations from the series mean.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fewer points than this yield no anomalies
pub const MIN_POINTS: usize = 5;
/// Distance from the mean, in standard deviations, beyond which a point is flagged
pub const STD_DEV_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperaturePoint {
    pub date: NaiveDate,
    /// Degrees Celsius
    pub temperature: f64,
}

impl TemperaturePoint {
    #[must_use]
    pub fn new(date: NaiveDate, temperature: f64) -> Self {
        Self { date, temperature }
    }
}

/// A flagged point and its absolute distance from the mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub temperature: f64,
    pub deviation: f64,
}

/// Population mean and standard deviation (denominator N)
fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Flag points beyond two standard deviations of the mean, in input order
///
/// Series shorter than [`MIN_POINTS`] return an empty list.
#[must_use]
pub fn detect_anomalies(series: &[TemperaturePoint]) -> Vec<Anomaly> {
    if series.len() < MIN_POINTS {
        return Vec::new();
    }

    let temperatures: Vec<f64> = series.iter().map(|p| p.temperature).collect();
    let (mean, std_dev) = mean_and_std_dev(&temperatures);
    let limit = STD_DEV_FACTOR * std_dev;

    series
        .iter()
        .filter_map(|point| {
            let deviation = (point.temperature - mean).abs();
            (deviation > limit).then_some(Anomaly {
                date: point.date,
                temperature: point.temperature,
                deviation,
            })
        })
        .collect()
}
