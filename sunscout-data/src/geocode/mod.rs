//! HTTP geocoder against a Nominatim-style API.
//!
//! [`HttpGeocoder`] implements [`sunscout_core::Geocoder`] over the
//! `search` and `reverse` endpoints, mapping address details into the
//! core [`Place`](sunscout_core::Place) shape.
//!
//! The public Nominatim instance is free and rate-limited (one request
//! per second): clients must send an identifying User-Agent and keep
//! volume low. The search layer only issues a handful of lookups per
//! search, which stays well inside that budget.

mod api;
mod provider;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpGeocoder, HttpGeocoderConfig,
};
