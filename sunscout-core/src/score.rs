//! Weather scoring: per-factor sub-scores blended under preference
//! weights.
//!
//! All sub-scores land in `0.0..=1.0`, so any normalized blend of them
//! does too. The wind constants are product-tuned defaults with no
//! derivation behind them; they stay configurable fields rather than hard
//! invariants.

use crate::weather::WeatherObservation;
use crate::weights::NormalizedWeights;

/// Temperature at which the temperature sub-score peaks, in °C.
pub const IDEAL_TEMPERATURE_C: f64 = 25.0;

/// Degrees of deviation from the ideal at which the temperature sub-score
/// reaches its floor.
pub const TEMPERATURE_FALLOFF_C: f64 = 20.0;

/// How the wind sub-score treats wind speed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WindProfile {
    /// Prefer still air: full score at 0 m/s, floor at the ceiling.
    Calm {
        /// Wind speed in m/s at which the sub-score reaches zero.
        ceiling_ms: f64,
    },
    /// Chase strong wind: full score at the optimum, falling off linearly
    /// on both sides.
    Storm {
        /// Wind speed in m/s scoring a full 1.0.
        optimal_ms: f64,
    },
}

impl WindProfile {
    /// Default ceiling for the calm-seeking profile, in m/s.
    pub const DEFAULT_CALM_CEILING_MS: f64 = 15.0;

    /// Default optimum for the storm-seeking profile, in m/s.
    pub const DEFAULT_STORM_OPTIMAL_MS: f64 = 17.0;

    /// The calm-seeking profile with its default ceiling.
    #[must_use]
    pub const fn calm() -> Self {
        Self::Calm {
            ceiling_ms: Self::DEFAULT_CALM_CEILING_MS,
        }
    }

    /// The storm-seeking profile with its default optimum.
    #[must_use]
    pub const fn storm() -> Self {
        Self::Storm {
            optimal_ms: Self::DEFAULT_STORM_OPTIMAL_MS,
        }
    }

    /// Wind sub-score for a sustained wind speed in m/s.
    #[must_use]
    pub fn wind_score(&self, wind_speed: f64) -> f64 {
        match *self {
            Self::Calm { ceiling_ms } => 1.0 - (wind_speed / ceiling_ms).min(1.0),
            Self::Storm { optimal_ms } => {
                1.0 - ((wind_speed - optimal_ms).abs() / optimal_ms).min(1.0)
            }
        }
    }
}

impl Default for WindProfile {
    fn default() -> Self {
        Self::calm()
    }
}

/// Sunshine sub-score: the clear-sky fraction.
///
/// Cloud cover is a percentage in `0..=100`, which keeps the result in
/// `0.0..=1.0` without further clamping.
#[must_use]
pub fn sun_score(cloud_fraction: f64) -> f64 {
    1.0 - cloud_fraction / 100.0
}

/// Temperature sub-score: peak at [`IDEAL_TEMPERATURE_C`], linear falloff,
/// floor at zero beyond [`TEMPERATURE_FALLOFF_C`] degrees of deviation.
#[must_use]
pub fn temp_score(temperature_c: f64) -> f64 {
    1.0 - ((temperature_c - IDEAL_TEMPERATURE_C).abs() / TEMPERATURE_FALLOFF_C).min(1.0)
}

/// Blend the three sub-scores of `observation` under `weights`.
///
/// The weights sum to one by construction, so the result is a convex
/// combination of values in `0.0..=1.0`; a final clamp guards against
/// rounding drift at the boundaries. Scoring the same observation with
/// the same weights is bit-identical.
///
/// # Examples
/// ```
/// use sunscout_core::{WeatherObservation, WeightTriple, WindProfile, score};
///
/// let clear = WeatherObservation {
///     temperature_c: 25.0,
///     cloud_fraction: 0.0,
///     wind_speed: 0.0,
///     wind_gust: None,
///     symbol_code: String::new(),
/// };
/// let weights = WeightTriple::default().normalized().expect("positive sum");
/// assert!((score(&clear, &weights, WindProfile::calm()) - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn score(
    observation: &WeatherObservation,
    weights: &NormalizedWeights,
    profile: WindProfile,
) -> f64 {
    let blended = weights.sun() * sun_score(observation.cloud_fraction)
        + weights.temp() * temp_score(observation.temperature_c)
        + weights.wind() * profile.wind_score(observation.wind_speed);
    blended.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::WeightTriple;
    use rstest::{fixture, rstest};

    fn observation(temperature_c: f64, cloud_fraction: f64, wind_speed: f64) -> WeatherObservation {
        WeatherObservation {
            temperature_c,
            cloud_fraction,
            wind_speed,
            wind_gust: None,
            symbol_code: String::new(),
        }
    }

    #[fixture]
    fn even_weights() -> NormalizedWeights {
        WeightTriple::default().normalized().expect("positive sum")
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(50.0, 0.5)]
    #[case(100.0, 0.0)]
    fn sun_score_is_the_clear_fraction(#[case] cloud: f64, #[case] expected: f64) {
        assert!((sun_score(cloud) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(25.0, 1.0)]
    #[case(15.0, 0.5)]
    #[case(35.0, 0.5)]
    #[case(5.0, 0.0)]
    #[case(45.0, 0.0)]
    #[case(60.0, 0.0)]
    #[case(-20.0, 0.0)]
    fn temp_score_peaks_at_the_ideal(#[case] temperature: f64, #[case] expected: f64) {
        assert!((temp_score(temperature) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn temp_score_strictly_decreases_with_deviation() {
        let mut previous = temp_score(IDEAL_TEMPERATURE_C);
        for step in 1..20 {
            let current = temp_score(IDEAL_TEMPERATURE_C + f64::from(step));
            assert!(current < previous, "not decreasing at step {step}");
            previous = current;
        }
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(7.5, 0.5)]
    #[case(15.0, 0.0)]
    #[case(30.0, 0.0)]
    fn calm_profile_prefers_still_air(#[case] wind: f64, #[case] expected: f64) {
        assert!((WindProfile::calm().wind_score(wind) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(17.0, 1.0)]
    #[case(0.0, 0.0)]
    #[case(34.0, 0.0)]
    #[case(8.5, 0.5)]
    fn storm_profile_peaks_at_the_optimum(#[case] wind: f64, #[case] expected: f64) {
        assert!((WindProfile::storm().wind_score(wind) - expected).abs() < 1e-12);
    }

    #[rstest]
    fn tuned_constants_are_plain_fields() {
        let gentle = WindProfile::Calm { ceiling_ms: 5.0 };
        assert!((gentle.wind_score(5.0) - 0.0).abs() < 1e-12);
        let breeze = WindProfile::Storm { optimal_ms: 10.0 };
        assert!((breeze.wind_score(10.0) - 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn blend_respects_the_weights(even_weights: NormalizedWeights) {
        // Perfect sun, worst temperature, worst wind: only the sun third
        // contributes.
        let obs = observation(70.0, 0.0, 20.0);
        let blended = score(&obs, &even_weights, WindProfile::calm());
        assert!((blended - 1.0 / 3.0).abs() < 1e-12);
    }

    #[rstest]
    fn pure_sun_weight_ignores_other_factors() {
        let weights = WeightTriple::new(1.0, 0.0, 0.0)
            .normalized()
            .expect("positive sum");
        let obs = observation(-30.0, 25.0, 40.0);
        assert!((score(&obs, &weights, WindProfile::calm()) - 0.75).abs() < 1e-12);
    }

    #[rstest]
    fn rescoring_is_bit_identical(even_weights: NormalizedWeights) {
        let obs = observation(17.3, 42.7, 6.1);
        let first = score(&obs, &even_weights, WindProfile::calm());
        let second = score(&obs, &even_weights, WindProfile::calm());
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[rstest]
    fn scores_stay_in_unit_range(even_weights: NormalizedWeights) {
        for temperature in [-40.0, 0.0, 25.0, 50.0] {
            for cloud in [0.0, 100.0] {
                for wind in [0.0, 17.0, 60.0] {
                    let s = score(
                        &observation(temperature, cloud, wind),
                        &even_weights,
                        WindProfile::storm(),
                    );
                    assert!((0.0..=1.0).contains(&s));
                }
            }
        }
    }
}
