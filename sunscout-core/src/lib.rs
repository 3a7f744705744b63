//! Core domain logic for the sunscout engine.
//!
//! The crate is deliberately free of I/O: it holds the weight-selector
//! geometry, the polar candidate grid, the weather scoring rules, and the
//! trait ports through which forecast and geocoding data reach the engine.
//! Constructors validate their input and return `Result` so invalid state
//! surfaces early instead of deep inside a search.
//!
//! Coordinates follow the [`geo`] convention throughout: `Coord { x, y }`
//! is `x = longitude, y = latitude` in decimal degrees for geographic
//! points, and plain 2D units for selector-space points.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod forecast;
pub mod geocode;
pub mod grid;
pub mod score;
pub mod selector;
pub mod weather;
pub mod weights;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use forecast::{FetchError, ForecastProvider};
pub use geocode::{AddressComponents, Geocoder, LookupError, Place};
pub use grid::{COARSE_RING_SCHEDULE, DEFAULT_RING_SCHEDULE, SamplePoint};
pub use score::{WindProfile, score, sun_score, temp_score};
pub use selector::{DragController, Triangle, TriangleError};
pub use weather::{
    AGGREGATION_WINDOW, ForecastSample, ForecastSeries, InstantDetails, PeriodSummary,
    WeatherObservation,
};
pub use weights::{NormalizedWeights, WeightTriple};
