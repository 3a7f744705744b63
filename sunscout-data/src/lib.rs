//! HTTP adapters for the sunscout engine's provider ports.
//!
//! Responsibilities:
//! - Implement [`sunscout_core::ForecastProvider`] against a
//!   Locationforecast-style weather API.
//! - Implement [`sunscout_core::Geocoder`] against a Nominatim-style
//!   geocoding API.
//! - Map transport failures into the core port error types.
//!
//! Boundaries:
//! - No scoring or search rules live here (they belong to
//!   `sunscout-core` and `sunscout-search`).
//! - Both upstreams are rate-limited free services: adapters identify
//!   themselves with a User-Agent, apply per-request timeouts, and never
//!   retry on their own.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod forecast;
pub mod geocode;

pub use forecast::{HttpForecastProvider, HttpForecastProviderConfig};
pub use geocode::{HttpGeocoder, HttpGeocoderConfig};

/// Error type for adapter construction failures.
#[derive(Debug, Error)]
pub enum AdapterBuildError {
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
