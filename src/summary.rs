//! Weather and air quality summaries
//!
//! A [`Summarizer`] turns a prompt into prose, typically by calling a hosted
//! text generation service. Without one configured, [`NullSummarizer`]
//! declines every request and the fixed template text is used instead.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::category::AqiCategory;

/// Failure reported by a summarizer backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// No backend configured
    #[error("Summarizer unavailable")]
    Unavailable,

    /// Backend call failed
    #[error("Summarizer failed: {0}")]
    Backend(String),
}

/// Generates summary text from a prompt
pub trait Summarizer {
    /// # Errors
    ///
    /// Implementations return `SummaryError` when no text could be produced.
    fn generate(&self, prompt: &str) -> Result<String, SummaryError>;
}

/// Summarizer used when no backend is configured; every request is declined
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSummarizer;

impl Summarizer for NullSummarizer {
    fn generate(&self, _prompt: &str) -> Result<String, SummaryError> {
        Err(SummaryError::Unavailable)
    }
}

/// One day of history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    /// Average temperature, °C
    pub temperature: f64,
    /// Total precipitation, mm
    pub rainfall: f64,
    pub aqi: u32,
}

/// Sort observations oldest to newest, keeping equal dates in input order
pub fn sort_chronologically(observations: &mut [DailyObservation]) {
    observations.sort_by_key(|obs| obs.date);
}

/// Averages over a window of daily observations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateDigest {
    pub avg_temperature: f64,
    pub avg_rainfall: f64,
    /// Mean over days with a positive AQI only
    pub avg_aqi: f64,
}

impl ClimateDigest {
    /// Digest of a history window, `None` when it is empty
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_history(history: &[DailyObservation]) -> Option<Self> {
        if history.is_empty() {
            return None;
        }

        let n = history.len() as f64;
        let avg_temperature = history.iter().map(|d| d.temperature).sum::<f64>() / n;
        let avg_rainfall = history.iter().map(|d| d.rainfall).sum::<f64>() / n;

        let rated: Vec<f64> = history
            .iter()
            .filter(|d| d.aqi > 0)
            .map(|d| f64::from(d.aqi))
            .collect();
        let avg_aqi = rated.iter().sum::<f64>() / rated.len().max(1) as f64;

        Some(Self {
            avg_temperature,
            avg_rainfall,
            avg_aqi,
        })
    }

    #[must_use]
    pub fn category(&self) -> AqiCategory {
        AqiCategory::from_aqi(self.avg_aqi)
    }
}

/// Current conditions for the city being summarized
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature: f64,
    pub aqi: u32,
}

/// Prompt sent to the summarizer
#[must_use]
pub fn compose_prompt(current: &CurrentConditions, digest: &ClimateDigest) -> String {
    format!(
        "Weather data for {city}:\n\
         Current temperature: {temp}°C\n\
         7-day average temperature: {avg_temp:.1}°C\n\
         Average rainfall: {rain:.2}mm\n\
         Current AQI: {aqi} ({status})\n\
         Give a short, friendly one-line summary of the weather and air quality for local residents. \
         Then, in a separate line, give a creative, actionable recommendation for what people can do today based on the weather. \
         Keep both lines concise and engaging.",
        city = current.city,
        temp = current.temperature,
        avg_temp = digest.avg_temperature,
        rain = digest.avg_rainfall,
        aqi = current.aqi,
        status = digest.category().status(),
    )
}

/// Template summary used when no generated text is available
#[must_use]
pub fn fallback_summary(current: &CurrentConditions, digest: &ClimateDigest) -> String {
    format!(
        "Current temperature in {city} is {temp}°C. \
         7-day average temperature is {avg_temp:.1}°C. \
         Average rainfall is {rain:.2}mm. \
         Current AQI is {aqi}, indicating {status}.",
        city = current.city,
        temp = current.temperature,
        avg_temp = digest.avg_temperature,
        rain = digest.avg_rainfall,
        aqi = current.aqi,
        status = digest.category().status(),
    )
}

/// Summary text for the current conditions and recent history
///
/// Uses the summarizer's output when it returns non-blank text, otherwise
/// the template summary.
pub fn summarize<S>(summarizer: &S, current: &CurrentConditions, digest: &ClimateDigest) -> String
where
    S: Summarizer + ?Sized,
{
    let prompt = compose_prompt(current, digest);
    match summarizer.generate(&prompt) {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => {
            log::warn!("Summarizer returned empty text for {}", current.city);
            fallback_summary(current, digest)
        }
        Err(SummaryError::Unavailable) => fallback_summary(current, digest),
        Err(err) => {
            log::warn!("{err}; using template summary for {}", current.city);
            fallback_summary(current, digest)
        }
    }
}
