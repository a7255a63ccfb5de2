//! Overall AQI across pollutants
//!
//! The overall index is the worst (highest) pollutant sub-index, following
//! the EPA convention. When nothing was measured the index is estimated from
//! the city name instead: a static tier table gives a base and a spread, and a
//! stable string hash picks a value inside that spread so the same city always
//! gets the same estimate.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::breakpoints::{self, SubIndex};
use crate::pollutant::{self, PollutantKind};
use crate::reading::PollutantReading;

/// Bounds for the city-based estimate
pub const ESTIMATE_MIN: u32 = 25;
pub const ESTIMATE_MAX: u32 = 200;

/// Where an AQI value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AqiSource {
    /// Provider's own index, trusted as-is
    Upstream,
    /// Maximum sub-index of the measured pollutants
    Measured { dominant: PollutantKind },
    /// No measurements; estimated from the city name
    Estimated,
}

/// An AQI value together with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqiResult {
    pub value: u32,
    pub source: AqiSource,
}

impl AqiResult {
    #[must_use]
    pub fn upstream(index: i64) -> Self {
        Self {
            value: u32::try_from(index.max(0)).unwrap_or(u32::MAX),
            source: AqiSource::Upstream,
        }
    }
}

/// A group of cities sharing a baseline pollution level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityTier {
    pub name: &'static str,
    /// Lowercase substrings matched against the lowercased city name
    pub cities: &'static [&'static str],
    pub base: u32,
    pub spread: u32,
}

/// Tiers in match order; the first tier with a matching substring wins
pub const CITY_TIERS: [CityTier; 4] = [
    CityTier {
        name: "heavily polluted",
        cities: &["delhi", "beijing", "mumbai", "dhaka", "lahore", "kolkata"],
        base: 120,
        spread: 50,
    },
    CityTier {
        name: "industrial",
        cities: &["los angeles", "mexico city", "shanghai", "tehran", "cairo"],
        base: 80,
        spread: 40,
    },
    CityTier {
        name: "medium",
        cities: &["new york", "london", "paris", "tokyo", "sydney"],
        base: 45,
        spread: 35,
    },
    CityTier {
        name: "clean",
        cities: &["reykjavik", "wellington", "vancouver", "zurich"],
        base: 25,
        spread: 25,
    },
];

/// Tier for cities not in the table
pub const DEFAULT_TIER: CityTier = CityTier {
    name: "default",
    cities: &[],
    base: 55,
    spread: 30,
};

/// Classify a city name (case-insensitive substring match)
#[must_use]
pub fn classify_city(city_name: &str) -> &'static CityTier {
    let lower = city_name.to_lowercase();
    CITY_TIERS
        .iter()
        .find(|tier| tier.cities.iter().any(|city| lower.contains(city)))
        .unwrap_or(&DEFAULT_TIER)
}

/// First eight bytes of the SHA-256 digest of the UTF-8 bytes, big-endian
///
/// Unlike `std`'s `DefaultHasher`, the output is fixed across processes,
/// releases and platforms.
#[must_use]
pub fn stable_hash(s: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// City-based estimate used when no pollutant was measured
#[must_use]
pub fn estimate_for_city(city_name: &str) -> u32 {
    let tier = classify_city(city_name);
    // spread is at most a few dozen, so the remainder fits
    #[allow(clippy::cast_possible_truncation)]
    let offset = (stable_hash(city_name) % u64::from(tier.spread)) as u32;
    (tier.base + offset).clamp(ESTIMATE_MIN, ESTIMATE_MAX)
}

/// Normalize a μg/m³ concentration and map it to its sub-index
#[must_use]
pub fn normalize_and_score(kind: PollutantKind, concentration_ugm3: f64) -> SubIndex {
    breakpoints::sub_index(kind, pollutant::normalize(kind, concentration_ugm3))
}

/// Overall AQI with provenance
///
/// Measured pollutants always win: the city estimate is only used when the
/// reading has no positive concentration at all.
#[must_use]
pub fn assess(reading: &PollutantReading, city_name: &str) -> AqiResult {
    let mut worst: Option<(PollutantKind, SubIndex)> = None;

    for (kind, concentration) in reading.measured() {
        let native = pollutant::normalize(kind, concentration);
        let index = breakpoints::sub_index(kind, native);
        log::debug!(
            "{city_name}: {kind} {concentration} µg/m³ = {native:.3} {} -> AQI {index}",
            kind.native_unit()
        );

        if worst.is_none_or(|(_, current)| index > current) {
            worst = Some((kind, index));
        }
    }

    if let Some((dominant, value)) = worst {
        log::debug!("{city_name}: final AQI {value} (dominant {dominant})");
        return AqiResult {
            value,
            source: AqiSource::Measured { dominant },
        };
    }

    let value = estimate_for_city(city_name);
    log::info!(
        "No pollutant data for {city_name}, using {} city estimate: {value}",
        classify_city(city_name).name
    );
    AqiResult {
        value,
        source: AqiSource::Estimated,
    }
}

/// Overall AQI for a reading
///
/// The maximum pollutant sub-index, or the deterministic city estimate in
/// `[25, 200]` when nothing was measured.
#[must_use]
pub fn comprehensive_aqi(reading: &PollutantReading, city_name: &str) -> u32 {
    assess(reading, city_name).value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn single_pollutant_matches_converter() {
        let reading = PollutantReading {
            pm2_5: 10.0,
            ..Default::default()
        };
        assert_eq!(
            comprehensive_aqi(&reading, "London"),
            breakpoints::sub_index(PollutantKind::Pm25, 10.0)
        );
    }

    #[test]
    fn takes_worst_pollutant() {
        let reading = PollutantReading {
            pm2_5: 10.0, // 41
            pm10: 60.0,  // 53
            no2: 100.0,  // 53.2 ppb -> 50
            ..Default::default()
        };
        let result = assess(&reading, "Paris");
        assert_eq!(result.value, 53);
        assert_eq!(
            result.source,
            AqiSource::Measured {
                dominant: PollutantKind::Pm10
            }
        );
    }

    #[test]
    fn measured_data_never_blends_with_estimate() {
        let reading = PollutantReading {
            so2: 1.0,
            ..Default::default()
        };
        // 0.382 ppb -> AQI 0, well below any city estimate
        assert_eq!(comprehensive_aqi(&reading, "Delhi"), 0);
    }

    #[test]
    fn normalize_and_score_no2() {
        assert_eq!(normalize_and_score(PollutantKind::No2, 100.0), 50);
    }

    #[rstest]
    #[case(PollutantKind::O3, 107.0, 50)] // 54.57 ppb, between 54 and 55
    #[case(PollutantKind::O3, 168.0, 150)] // 85.68 ppb, between 85 and 86
    #[case(PollutantKind::So2, 92.0, 50)] // 35.14 ppb, between 35 and 36
    fn converted_gases_in_segment_gaps(#[case] kind: PollutantKind, #[case] ugm3: f64, #[case] expected: SubIndex) {
        assert_eq!(normalize_and_score(kind, ugm3), expected);
        let mut reading = PollutantReading::default();
        reading.set(kind, ugm3).unwrap();
        assert_eq!(comprehensive_aqi(&reading, "Delhi"), expected);
    }

    #[rstest]
    #[case("Delhi", "heavily polluted")]
    #[case("NEW DELHI", "heavily polluted")]
    #[case("Greater Los Angeles", "industrial")]
    #[case("london", "medium")]
    #[case("Zurich", "clean")]
    #[case("Springfield", "default")]
    #[case("", "default")]
    fn tiers(#[case] city: &str, #[case] tier: &str) {
        assert_eq!(classify_city(city).name, tier);
    }

    #[rstest]
    #[case("Delhi", 142)]
    #[case("New Delhi", 126)]
    #[case("Los Angeles", 115)]
    #[case("London", 73)]
    #[case("Reykjavik", 36)]
    #[case("Zurich", 26)]
    #[case("Springfield", 75)]
    #[case("", 77)]
    fn estimates_are_pinned(#[case] city: &str, #[case] expected: u32) {
        assert_eq!(comprehensive_aqi(&PollutantReading::default(), city), expected);
    }

    #[test]
    fn estimate_is_deterministic_and_bounded() {
        for city in ["Delhi", "Cairo", "Tokyo", "Wellington", "Atlantis", "東京"] {
            let first = comprehensive_aqi(&PollutantReading::default(), city);
            let second = comprehensive_aqi(&PollutantReading::default(), city);
            assert_eq!(first, second);
            assert!((ESTIMATE_MIN..=ESTIMATE_MAX).contains(&first), "{city}: {first}");

            let tier = classify_city(city);
            assert!(first >= tier.base && first < tier.base + tier.spread);
        }
    }

    #[test]
    fn stable_hash_known_values() {
        assert_eq!(stable_hash(""), 0xe3b0_c442_98fc_1c14);
        assert_eq!(stable_hash("a"), 0xca97_8112_ca1b_bdca);
    }

    #[test]
    fn result_serialization() {
        let result = AqiResult {
            value: 53,
            source: AqiSource::Measured {
                dominant: PollutantKind::Pm10,
            },
        };
        insta::assert_snapshot!(
            serde_json::to_string(&result).unwrap(),
            @r#"{"value":53,"source":{"kind":"measured","dominant":"PM10"}}"#
        );
    }
}
