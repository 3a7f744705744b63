//! Forecast provider port.
//!
//! The search engine never talks to a weather service directly; it goes
//! through this trait so tests can script responses and adapters can live
//! in their own crate. Implementations are expected to be rate-limited
//! upstream, which is why the orchestrator batches and delays its calls.

use async_trait::async_trait;
use geo::Coord;
use thiserror::Error;

use crate::weather::ForecastSeries;

/// Errors from [`ForecastProvider::fetch_forecast`].
///
/// Each variant describes a single-candidate failure; the orchestrator
/// absorbs them by dropping the affected candidate rather than aborting
/// the search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request exceeded its deadline.
    #[error("forecast request timed out after {timeout_secs}s")]
    Timeout {
        /// The deadline that was exceeded, in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("forecast service returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Service-provided detail, possibly empty.
        message: String,
    },
    /// The request never produced a response.
    #[error("forecast request failed: {message}")]
    Network {
        /// Transport-level detail.
        message: String,
    },
    /// The response arrived but could not be interpreted.
    #[error("could not parse forecast payload: {message}")]
    Parse {
        /// Decoder detail.
        message: String,
    },
}

/// Fetch a time-ordered forecast series for one coordinate.
///
/// `location` follows the crate convention `x = longitude, y = latitude`
/// in decimal degrees. Implementations must honour cancellation: the
/// caller wraps each fetch in its own timeout and may drop the future at
/// any point.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use geo::Coord;
/// use sunscout_core::{FetchError, ForecastProvider, ForecastSeries};
///
/// struct EmptyProvider;
///
/// #[async_trait]
/// impl ForecastProvider for EmptyProvider {
///     async fn fetch_forecast(
///         &self,
///         _location: Coord<f64>,
///     ) -> Result<ForecastSeries, FetchError> {
///         Ok(ForecastSeries::new(Vec::new()))
///     }
/// }
/// ```
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    /// Return the forecast series for `location`.
    async fn fetch_forecast(&self, location: Coord<f64>) -> Result<ForecastSeries, FetchError>;
}

#[async_trait]
impl<T> ForecastProvider for std::sync::Arc<T>
where
    T: ForecastProvider + ?Sized,
{
    async fn fetch_forecast(&self, location: Coord<f64>) -> Result<ForecastSeries, FetchError> {
        self.as_ref().fetch_forecast(location).await
    }
}
