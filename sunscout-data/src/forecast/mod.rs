//! HTTP forecast provider against a Locationforecast-style API.
//!
//! [`HttpForecastProvider`] implements
//! [`sunscout_core::ForecastProvider`] by calling the
//! `locationforecast/2.0/compact` endpoint and flattening its timeseries
//! into the core [`ForecastSeries`](sunscout_core::ForecastSeries) shape.
//!
//! The upstream is a free, rate-limited service: requests must carry an
//! identifying User-Agent, coordinates are truncated to four decimals as
//! the service asks, and the provider never retries; the search layer's
//! batching is the only throttle.

mod api;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpForecastProvider, HttpForecastProviderConfig,
};
