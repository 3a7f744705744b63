//! Forecast series and observation types.
//!
//! A [`ForecastSeries`] is the time-ordered sequence a forecast provider
//! returns for one coordinate. Scoring never looks at a single instant:
//! [`ForecastSeries::mean_observation`] averages the raw factors over a
//! fixed window first, rewarding locations with stable favourable
//! conditions over a day rather than a single lucky hour.

use chrono::{DateTime, Utc};

/// Number of forecast steps folded into the scoring average.
pub const AGGREGATION_WINDOW: usize = 24;

/// Instantaneous conditions at one forecast step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstantDetails {
    /// Air temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Cloud cover as a percentage, `0.0..=100.0`.
    pub cloud_fraction: f64,
    /// Sustained wind speed in m/s.
    pub wind_speed: f64,
    /// Wind gust speed in m/s, when the provider reports one.
    pub wind_gust: Option<f64>,
}

/// Summary of the period following a forecast step.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodSummary {
    /// Provider symbol code, e.g. `clearsky_day`.
    pub symbol_code: String,
    /// Expected precipitation in millimetres, when reported.
    pub precipitation_mm: Option<f64>,
}

/// One step of a forecast series.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastSample {
    /// Valid time of the step.
    pub time: DateTime<Utc>,
    /// Instantaneous conditions at that time.
    pub details: InstantDetails,
    /// Summary of the following hour, when the provider reports one.
    pub next_hour: Option<PeriodSummary>,
}

/// A per-point weather summary, either one instant or a window average.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherObservation {
    /// Temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Cloud cover percentage, `0.0..=100.0`.
    pub cloud_fraction: f64,
    /// Sustained wind speed in m/s.
    pub wind_speed: f64,
    /// Gust speed in m/s, absent when no step in the window reported one.
    pub wind_gust: Option<f64>,
    /// Symbol code of the first step in the window, empty when none was
    /// reported.
    pub symbol_code: String,
}

/// Time-ordered forecast steps for one coordinate.
///
/// # Examples
/// ```
/// use sunscout_core::{AGGREGATION_WINDOW, ForecastSeries};
///
/// let series = ForecastSeries::new(Vec::new());
/// assert!(series.mean_observation(AGGREGATION_WINDOW).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForecastSeries {
    samples: Vec<ForecastSample>,
}

impl ForecastSeries {
    /// Wrap an ordered sequence of samples.
    #[must_use]
    pub const fn new(samples: Vec<ForecastSample>) -> Self {
        Self { samples }
    }

    /// The underlying samples in time order.
    #[must_use]
    pub fn samples(&self) -> &[ForecastSample] {
        &self.samples
    }

    /// Number of steps in the series.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the series holds no steps at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Average the raw factors over the first `window` steps.
    ///
    /// Temperature, cloud fraction, and wind speed are averaged
    /// independently; gusts average over the steps that report one. The
    /// symbol code is taken from the first step. Returns `None` for an
    /// empty series.
    ///
    /// Averaging happens on the raw factors, never on per-instant scores;
    /// scoring the mean is the deliberate design here.
    #[must_use]
    pub fn mean_observation(&self, window: usize) -> Option<WeatherObservation> {
        let head = self.samples.get(..window.min(self.samples.len()))?;
        let first = head.first()?;

        #[expect(
            clippy::cast_precision_loss,
            reason = "window sizes are far below 2^52"
        )]
        let count = head.len() as f64;
        let mut temperature = 0.0;
        let mut cloud = 0.0;
        let mut wind = 0.0;
        let mut gust_sum = 0.0;
        let mut gust_count: u32 = 0;
        for sample in head {
            temperature += sample.details.temperature_c;
            cloud += sample.details.cloud_fraction;
            wind += sample.details.wind_speed;
            if let Some(gust) = sample.details.wind_gust {
                gust_sum += gust;
                gust_count += 1;
            }
        }

        Some(WeatherObservation {
            temperature_c: temperature / count,
            cloud_fraction: cloud / count,
            wind_speed: wind / count,
            wind_gust: (gust_count > 0).then(|| gust_sum / f64::from(gust_count)),
            symbol_code: first
                .next_hour
                .as_ref()
                .map(|summary| summary.symbol_code.clone())
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rstest::rstest;

    fn sample(hour: i64, temperature_c: f64, cloud: f64, wind: f64) -> ForecastSample {
        ForecastSample {
            time: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::hours(hour),
            details: InstantDetails {
                temperature_c,
                cloud_fraction: cloud,
                wind_speed: wind,
                wind_gust: None,
            },
            next_hour: Some(PeriodSummary {
                symbol_code: "clearsky_day".to_owned(),
                precipitation_mm: Some(0.0),
            }),
        }
    }

    #[rstest]
    fn empty_series_has_no_mean() {
        assert!(ForecastSeries::new(Vec::new()).mean_observation(24).is_none());
    }

    #[rstest]
    fn mean_averages_each_factor_independently() {
        let series = ForecastSeries::new(vec![
            sample(0, 10.0, 0.0, 2.0),
            sample(1, 20.0, 50.0, 4.0),
            sample(2, 30.0, 100.0, 6.0),
        ]);
        let mean = series.mean_observation(24).expect("non-empty series");
        assert!((mean.temperature_c - 20.0).abs() < 1e-12);
        assert!((mean.cloud_fraction - 50.0).abs() < 1e-12);
        assert!((mean.wind_speed - 4.0).abs() < 1e-12);
    }

    #[rstest]
    fn mean_is_limited_to_the_window() {
        let mut samples: Vec<_> = (0..24).map(|h| sample(h, 20.0, 0.0, 3.0)).collect();
        // A scorching outlier beyond the window must not shift the mean.
        samples.push(sample(24, 1000.0, 100.0, 40.0));
        let mean = ForecastSeries::new(samples)
            .mean_observation(24)
            .expect("non-empty series");
        assert!((mean.temperature_c - 20.0).abs() < 1e-12);
        assert!((mean.cloud_fraction - 0.0).abs() < 1e-12);
    }

    #[rstest]
    fn short_series_averages_what_exists() {
        let series = ForecastSeries::new(vec![sample(0, 15.0, 20.0, 5.0)]);
        let mean = series.mean_observation(24).expect("non-empty series");
        assert!((mean.temperature_c - 15.0).abs() < 1e-12);
    }

    #[rstest]
    fn gusts_average_over_reporting_steps_only() {
        let mut with_gust = sample(0, 20.0, 0.0, 3.0);
        with_gust.details.wind_gust = Some(8.0);
        let without_gust = sample(1, 20.0, 0.0, 3.0);
        let mut with_other_gust = sample(2, 20.0, 0.0, 3.0);
        with_other_gust.details.wind_gust = Some(12.0);

        let mean = ForecastSeries::new(vec![with_gust, without_gust, with_other_gust])
            .mean_observation(24)
            .expect("non-empty series");
        assert_eq!(mean.wind_gust, Some(10.0));
    }

    #[rstest]
    fn symbol_comes_from_the_first_step() {
        let mut first = sample(0, 20.0, 0.0, 3.0);
        first.next_hour = Some(PeriodSummary {
            symbol_code: "partlycloudy_day".to_owned(),
            precipitation_mm: None,
        });
        let series = ForecastSeries::new(vec![first, sample(1, 20.0, 0.0, 3.0)]);
        let mean = series.mean_observation(24).expect("non-empty series");
        assert_eq!(mean.symbol_code, "partlycloudy_day");
    }
}
