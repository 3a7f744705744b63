//! Test-only scripted providers and series builders used by unit and
//! behaviour tests.

use std::future::pending;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use geo::Coord;

use crate::forecast::{FetchError, ForecastProvider};
use crate::geocode::{Geocoder, LookupError, Place};
use crate::weather::{ForecastSample, ForecastSeries, InstantDetails, PeriodSummary};

/// A forecast series with identical conditions at every step.
///
/// Handy for scripting grids where only a few points differ: build one
/// flat series per condition and hand them out by coordinate.
#[must_use]
pub fn flat_series(
    steps: usize,
    temperature_c: f64,
    cloud_fraction: f64,
    wind_speed: f64,
) -> ForecastSeries {
    let samples = (0..steps)
        .map(|step| ForecastSample {
            time: DateTime::<Utc>::UNIX_EPOCH
                + TimeDelta::hours(i64::try_from(step).unwrap_or(i64::MAX)),
            details: InstantDetails {
                temperature_c,
                cloud_fraction,
                wind_speed,
                wind_gust: None,
            },
            next_hour: Some(PeriodSummary {
                symbol_code: "clearsky_day".to_owned(),
                precipitation_mm: Some(0.0),
            }),
        })
        .collect();
    ForecastSeries::new(samples)
}

/// Forecast provider answering from a caller-supplied script.
///
/// The script sees each requested coordinate and decides the outcome;
/// every call is counted so tests can assert on request volume.
pub struct ScriptedForecastProvider {
    #[expect(
        clippy::type_complexity,
        reason = "the boxed script type appears exactly once"
    )]
    script: Box<dyn Fn(Coord<f64>) -> Result<ForecastSeries, FetchError> + Send + Sync>,
    calls: AtomicUsize,
}

impl ScriptedForecastProvider {
    /// Wrap a script deciding the outcome per coordinate.
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(Coord<f64>) -> Result<ForecastSeries, FetchError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider returning the same series for every coordinate.
    pub fn uniform(series: ForecastSeries) -> Self {
        Self::new(move |_| Ok(series.clone()))
    }

    /// A provider failing every request.
    pub fn failing() -> Self {
        Self::new(|_| {
            Err(FetchError::Network {
                message: "scripted failure".to_owned(),
            })
        })
    }

    /// Number of fetches issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for ScriptedForecastProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedForecastProvider")
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ForecastProvider for ScriptedForecastProvider {
    async fn fetch_forecast(&self, location: Coord<f64>) -> Result<ForecastSeries, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.script)(location)
    }
}

/// Forecast provider whose requests never complete.
///
/// Exercises the caller-side timeout path: the wrapping timeout fires and
/// the pending request is dropped.
#[derive(Debug, Default)]
pub struct StalledForecastProvider {
    calls: AtomicUsize,
}

impl StalledForecastProvider {
    /// Number of fetches that were started (and then abandoned).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForecastProvider for StalledForecastProvider {
    async fn fetch_forecast(&self, _location: Coord<f64>) -> Result<ForecastSeries, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        pending::<()>().await;
        Err(FetchError::Network {
            message: "unreachable: pending() never resolves".to_owned(),
        })
    }
}

/// Geocoder answering every lookup with one fixed place, or failing when
/// constructed without one.
#[derive(Debug, Default)]
pub struct StaticGeocoder {
    place: Option<Place>,
    calls: AtomicUsize,
}

impl StaticGeocoder {
    /// Answer every lookup with `place`.
    #[must_use]
    pub fn with_place(place: Place) -> Self {
        Self {
            place: Some(place),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every lookup with [`LookupError::NoMatch`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Number of lookups issued so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn forward_search(
        &self,
        _query: &str,
        _country_filter: Option<&str>,
    ) -> Result<Vec<Place>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.place
            .as_ref()
            .map(|place| vec![place.clone()])
            .ok_or(LookupError::NoMatch)
    }

    async fn reverse_lookup(&self, location: Coord<f64>) -> Result<Place, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.place
            .clone()
            .map(|mut place| {
                place.location = location;
                place
            })
            .ok_or(LookupError::NoMatch)
    }
}
