//! The search orchestrator: grid → batched fetches → scores → result.

use futures_util::future::join_all;
use geo::Coord;
use log::{debug, info, warn};
use sunscout_core::grid::{self, SamplePoint};
use sunscout_core::score::{WindProfile, score};
use sunscout_core::weather::{ForecastSeries, WeatherObservation};
use sunscout_core::weights::{NormalizedWeights, WeightTriple};
use sunscout_core::{ForecastProvider, Geocoder};
use tokio::time::{sleep, timeout};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::rank;

/// Parameters for one search.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use sunscout_core::{WeightTriple, WindProfile};
/// use sunscout_search::SearchRequest;
///
/// let request = SearchRequest {
///     center: Coord { x: 10.75, y: 59.91 },
///     radius_km: 10.0,
///     weights: WeightTriple::new(1.0, 0.0, 0.0),
///     wind_profile: WindProfile::calm(),
/// };
/// assert!(request.weights.normalized().is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Search center, `x = longitude, y = latitude` in decimal degrees.
    pub center: Coord<f64>,
    /// Search radius in kilometres.
    pub radius_km: f64,
    /// Raw preference weights; must normalize to a valid triple.
    pub weights: WeightTriple,
    /// Wind treatment for the wind sub-score.
    pub wind_profile: WindProfile,
}

/// A grid candidate with its aggregated observation and score.
///
/// Immutable once computed; the pool accumulates one per successfully
/// evaluated grid point for the duration of one search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    /// The grid point this candidate came from.
    pub point: SamplePoint,
    /// Window-averaged conditions the score was computed from.
    pub observation: WeatherObservation,
    /// Blended score in `0.0..=1.0`.
    pub score: f64,
}

/// A top-K entry with its resolved display name.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// The underlying scored candidate.
    pub candidate: ScoredCandidate,
    /// Resolved place name, or a coordinate label when lookup failed.
    pub name: String,
    /// 1-based rank within the result.
    pub rank: usize,
}

/// The winning candidate with its display data.
#[derive(Debug, Clone, PartialEq)]
pub struct BestCandidate {
    /// The underlying scored candidate.
    pub candidate: ScoredCandidate,
    /// Resolved place name, or a coordinate label when lookup failed.
    pub name: String,
    /// Full forecast series for display; empty when the refetch failed.
    pub forecast: ForecastSeries,
}

/// Output of one search; replaced wholesale by the next.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The highest-scoring candidate.
    pub best: BestCandidate,
    /// Ranked top-K candidates, best first.
    pub top: Vec<RankedCandidate>,
}

/// Drives one search against injected provider ports.
///
/// # Examples
/// ```no_run
/// use geo::Coord;
/// use sunscout_core::test_support::{ScriptedForecastProvider, StaticGeocoder, flat_series};
/// use sunscout_core::{WeightTriple, WindProfile};
/// use sunscout_search::{SearchRequest, Searcher};
///
/// # async fn run() -> Result<(), sunscout_search::SearchError> {
/// let provider = ScriptedForecastProvider::uniform(flat_series(24, 22.0, 10.0, 3.0));
/// let searcher = Searcher::new(provider, StaticGeocoder::unavailable());
///
/// let result = searcher
///     .search(&SearchRequest {
///         center: Coord { x: 10.75, y: 59.91 },
///         radius_km: 10.0,
///         weights: WeightTriple::default(),
///         wind_profile: WindProfile::calm(),
///     })
///     .await?;
/// assert!(result.top.len() <= 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Searcher<P, G> {
    provider: P,
    geocoder: G,
    config: SearchConfig,
}

impl<P, G> Searcher<P, G>
where
    P: ForecastProvider,
    G: Geocoder,
{
    /// Build a searcher with the default configuration.
    #[must_use]
    pub fn new(provider: P, geocoder: G) -> Self {
        Self::with_config(provider, geocoder, SearchConfig::default())
    }

    /// Build a searcher with an explicit configuration.
    #[must_use]
    pub const fn with_config(provider: P, geocoder: G, config: SearchConfig) -> Self {
        Self {
            provider,
            geocoder,
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one search.
    ///
    /// Fetches run in batches of at most `batch_size` concurrent requests
    /// with a barrier between batches; a short delay separates batches to
    /// respect upstream rate limits. Individual fetch failures drop only
    /// the affected candidate and are never retried within the search.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] when the weights cannot be
    /// normalized (checked before any provider call). [`SearchError::NoData`]
    /// when not a single candidate produced a forecast.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let weights = request
            .weights
            .normalized()
            .ok_or(SearchError::InvalidInput)?;

        let points = grid::generate(request.center, request.radius_km, &self.config.ring_schedule);
        info!(
            "searching {} candidates within {} km of {:.4},{:.4}",
            points.len(),
            request.radius_km,
            request.center.y,
            request.center.x
        );

        let pool = self.evaluate_grid(&points, &weights, request.wind_profile).await;
        if pool.is_empty() {
            return Err(SearchError::NoData);
        }

        // Explicit fold with strict greater-than: equal scores keep the
        // earlier-generated candidate, so results are deterministic.
        let Some(best) = pool.iter().fold(None::<&ScoredCandidate>, |acc, candidate| {
            match acc {
                Some(leader) if candidate.score > leader.score => Some(candidate),
                Some(leader) => Some(leader),
                None => Some(candidate),
            }
        }) else {
            return Err(SearchError::NoData);
        };
        info!(
            "best candidate: ring {} slot {} scoring {:.3}",
            best.point.ring, best.point.slot, best.score
        );

        let ranked = rank::top_k(&pool, self.config.top_k);
        let names = join_all(ranked.iter().map(|candidate| {
            rank::resolve_name(
                &self.geocoder,
                self.config.lookup_timeout,
                candidate.point.location,
            )
        }))
        .await;
        let top = ranked
            .into_iter()
            .zip(names)
            .enumerate()
            .map(|(index, (candidate, name))| RankedCandidate {
                candidate,
                name,
                rank: index + 1,
            })
            .collect();

        let name = rank::resolve_name(
            &self.geocoder,
            self.config.lookup_timeout,
            best.point.location,
        )
        .await;
        let forecast = self.full_forecast(best.point.location).await;

        Ok(SearchResult {
            best: BestCandidate {
                candidate: best.clone(),
                name,
                forecast,
            },
            top,
        })
    }

    /// Fetch and score the whole grid in rate-limited batches.
    ///
    /// The returned pool preserves generation order: batches run in
    /// order, and `join_all` keeps the order within a batch.
    async fn evaluate_grid(
        &self,
        points: &[SamplePoint],
        weights: &NormalizedWeights,
        wind_profile: WindProfile,
    ) -> Vec<ScoredCandidate> {
        let mut pool = Vec::with_capacity(points.len());
        for (index, batch) in points.chunks(self.config.batch_size.max(1)).enumerate() {
            if index > 0 && !self.config.batch_delay.is_zero() {
                sleep(self.config.batch_delay).await;
            }
            let outcomes = join_all(
                batch
                    .iter()
                    .map(|point| self.evaluate(point, weights, wind_profile)),
            )
            .await;
            pool.extend(outcomes.into_iter().flatten());
            debug!(
                "batch {index}: {} of {} candidates evaluated so far",
                pool.len(),
                points.len()
            );
        }
        pool
    }

    /// Fetch, aggregate, and score a single candidate.
    ///
    /// Any failure (timeout, fetch error, empty series) drops the
    /// candidate and returns `None`; nothing here can fail the search.
    async fn evaluate(
        &self,
        point: &SamplePoint,
        weights: &NormalizedWeights,
        wind_profile: WindProfile,
    ) -> Option<ScoredCandidate> {
        let series = match timeout(
            self.config.fetch_timeout,
            self.provider.fetch_forecast(point.location),
        )
        .await
        {
            Ok(Ok(series)) => series,
            Ok(Err(err)) => {
                warn!(
                    "dropping ring {} slot {}: {err}",
                    point.ring, point.slot
                );
                return None;
            }
            Err(_) => {
                warn!(
                    "dropping ring {} slot {}: fetch timed out after {}s",
                    point.ring,
                    point.slot,
                    self.config.fetch_timeout.as_secs()
                );
                return None;
            }
        };

        let Some(observation) = series.mean_observation(self.config.aggregation_window) else {
            warn!(
                "dropping ring {} slot {}: provider returned an empty series",
                point.ring, point.slot
            );
            return None;
        };

        Some(ScoredCandidate {
            score: score(&observation, weights, wind_profile),
            point: point.clone(),
            observation,
        })
    }

    /// Refetch the full forecast series for the winning point.
    ///
    /// Display-only data: a failure here degrades to an empty series
    /// instead of failing a search that already has a scored result.
    async fn full_forecast(&self, location: Coord<f64>) -> ForecastSeries {
        match timeout(
            self.config.fetch_timeout,
            self.provider.fetch_forecast(location),
        )
        .await
        {
            Ok(Ok(series)) => series,
            Ok(Err(err)) => {
                warn!("full forecast for the best point unavailable: {err}");
                ForecastSeries::default()
            }
            Err(_) => {
                warn!(
                    "full forecast for the best point timed out after {}s",
                    self.config.fetch_timeout.as_secs()
                );
                ForecastSeries::default()
            }
        }
    }
}
