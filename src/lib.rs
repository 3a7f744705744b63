//! Facade crate for the sunscout weather-spot search engine.
//!
//! Re-exports the core domain types and the search orchestrator so most
//! callers can depend on this one crate. The HTTP adapters live in
//! `sunscout-data` and are pulled in separately by binaries that talk to
//! real services.

#![forbid(unsafe_code)]

pub use sunscout_core::{
    AGGREGATION_WINDOW, AddressComponents, COARSE_RING_SCHEDULE, DEFAULT_RING_SCHEDULE,
    DragController, FetchError, ForecastProvider, ForecastSample, ForecastSeries, Geocoder,
    InstantDetails, LookupError, NormalizedWeights, PeriodSummary, Place, SamplePoint, Triangle,
    TriangleError, WeatherObservation, WeightTriple, WindProfile, grid, score, selector, sun_score,
    temp_score, weather,
};

pub use sunscout_search::{
    BestCandidate, RankedCandidate, ScoredCandidate, SearchConfig, SearchError, SearchRequest,
    SearchResult, Searcher,
};
