use chrono::NaiveDate;
use climate_aqi::{
    PollutantKind, PollutantReading, TemperaturePoint, comprehensive_aqi, detect_anomalies,
    normalize_and_score, sub_index,
};
use rstest::rstest;

fn reading_with(kind: PollutantKind, value: f64) -> PollutantReading {
    let mut reading = PollutantReading::default();
    reading.set(kind, value).unwrap();
    reading
}

#[rstest]
#[case(PollutantKind::Pm25)]
#[case(PollutantKind::Pm10)]
#[case(PollutantKind::No2)]
#[case(PollutantKind::So2)]
#[case(PollutantKind::Co)]
#[case(PollutantKind::O3)]
fn raising_one_pollutant_never_lowers_aqi(#[case] kind: PollutantKind) {
    let base = PollutantReading {
        pm2_5: 20.0,
        pm10: 40.0,
        no2: 30.0,
        so2: 10.0,
        co: 400.0,
        o3: 60.0,
    };

    let mut previous = comprehensive_aqi(&base, "London");
    let start = base.get(kind);
    for step in 1..=400 {
        let mut reading = base;
        reading.set(kind, start + f64::from(step) * 2.5).unwrap();
        let aqi = comprehensive_aqi(&reading, "London");
        assert!(aqi >= previous, "{kind} at step {step}: {aqi} < {previous}");
        previous = aqi;
    }
}

#[test]
fn all_zero_reading_gives_bounded_stable_estimate() {
    for city in ["London", "Delhi", "Mexico City", "Vancouver", "Nowhere", "", "ßtraße"] {
        let first = comprehensive_aqi(&PollutantReading::default(), city);
        assert!((25..=200).contains(&first), "{city}: {first}");
        for _ in 0..3 {
            assert_eq!(comprehensive_aqi(&PollutantReading::default(), city), first);
        }
    }
}

#[test]
fn single_pollutant_equals_direct_conversion() {
    let reading = reading_with(PollutantKind::Pm25, 10.0);
    assert_eq!(
        comprehensive_aqi(&reading, "Tokyo"),
        sub_index(PollutantKind::Pm25, 10.0)
    );
}

#[test]
fn no2_unit_conversion() {
    // 100 µg/m³ -> 53.2 ppb, just past the first NO2 segment
    assert_eq!(normalize_and_score(PollutantKind::No2, 100.0), 50);
}

#[test]
fn ozone_never_exceeds_500() {
    for ugm3 in [500.0, 1_000.0, 10_000.0] {
        let aqi = comprehensive_aqi(&reading_with(PollutantKind::O3, ugm3), "Cairo");
        assert!(aqi <= 500);
    }
    assert_eq!(sub_index(PollutantKind::O3, 400.0), 500);
}

#[test]
fn anomaly_detection_needs_five_points() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let points: Vec<TemperaturePoint> = [20.0, 21.0, 19.0, 99.0]
        .into_iter()
        .zip(start.iter_days())
        .map(|(t, d)| TemperaturePoint::new(d, t))
        .collect();
    assert!(detect_anomalies(&points).is_empty());
}
