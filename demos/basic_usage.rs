//! Basic Usage Example for the AQI engine
//!
//! Scores an upstream payload, falls back to a city estimate, and scans a
//! temperature series for anomalies.
//!
//! Run with: RUST_LOG=debug cargo run --example basic_usage

use chrono::NaiveDate;
use climate_aqi::summary::{self, ClimateDigest, CurrentConditions, DailyObservation};
use climate_aqi::{
    AqiCategory, Config, NullSummarizer, PollutantKind, PollutantReading, TemperaturePoint,
    aqi_from_upstream, comprehensive_aqi, normalize_and_score,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let config = Config::default();
    let city = config.city_or_default(std::env::args().nth(1).as_deref()).to_string();

    println!("Example 1: Upstream payload for {city}");
    println!("=====================================");
    let payload = r#"{"co": 230.3, "no2": 13.5, "o3": 62.0, "so2": 3.1, "pm2_5": 8.2, "pm10": 10.4, "us-epa-index": 1}"#;
    let result = aqi_from_upstream(payload, &city, &config)?;
    println!("AQI {} ({:?})", result.value, result.source);
    println!("{}", AqiCategory::from_aqi(f64::from(result.value)));
    println!();

    println!("Example 2: Individual pollutants");
    println!("================================");
    for kind in PollutantKind::ALL {
        println!(
            "{:>5} @ 50 µg/m³ -> sub-index {}",
            kind.name(),
            normalize_and_score(kind, 50.0)
        );
    }
    println!();

    println!("Example 3: No measurements");
    println!("==========================");
    for name in ["Delhi", "Los Angeles", "London", "Reykjavik", "Springfield"] {
        let estimate = comprehensive_aqi(&PollutantReading::default(), name);
        println!("{name:<12} estimated AQI {estimate}");
    }
    println!();

    println!("Example 4: Anomalies and summary");
    println!("================================");
    println!(
        "{} day history window, {} day anomaly window, {} day forecast",
        config.history_days, config.anomaly_window_days, config.forecast_days
    );
    let start = NaiveDate::from_ymd_opt(2024, 7, 1).ok_or("invalid start date")?;
    let temps = [18.0, 19.5, 17.8, 18.4, 31.2, 18.9, 19.1, 18.2, 17.6, 18.8];
    let history: Vec<DailyObservation> = temps
        .iter()
        .zip(start.iter_days())
        .map(|(t, date)| DailyObservation {
            date,
            temperature: *t,
            rainfall: 0.4,
            aqi: result.value,
        })
        .collect();

    let series: Vec<TemperaturePoint> = history
        .iter()
        .map(|d| TemperaturePoint::new(d.date, d.temperature))
        .collect();
    for anomaly in config.recent_anomalies(&series) {
        println!(
            "{}: {:.1}°C (±{:.2})",
            anomaly.date, anomaly.temperature, anomaly.deviation
        );
    }

    if let Some(digest) = ClimateDigest::from_history(config.history_window(&history)) {
        let current = CurrentConditions {
            city: city.clone(),
            temperature: 19.0,
            aqi: result.value,
        };
        println!("{}", summary::summarize(&NullSummarizer, &current, &digest));
    }

    Ok(())
}
