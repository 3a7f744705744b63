//! Search orchestration for the sunscout engine.
//!
//! One search is one request/response cycle: generate the candidate grid,
//! fetch forecasts through the injected provider port in bounded
//! concurrent batches, score each success, and hand back a ranked result.
//! Per-candidate failures are absorbed; only a search that produces no
//! usable candidate at all fails.
//!
//! # Concurrency model
//!
//! A single coordinating task fans out at most one batch of fetch futures
//! at a time and fans back in before touching any state, so the candidate
//! pool and the running best are updated strictly between batches, with
//! no locks and no shared mutable state. Each fetch carries its own timeout;
//! dropping the future returned by [`Searcher::search`] abandons every
//! in-flight request, which is how a superseded search is cancelled as a
//! unit.

#![forbid(unsafe_code)]

mod config;
mod error;
mod rank;
mod searcher;

pub use config::SearchConfig;
pub use error::SearchError;
pub use searcher::{
    BestCandidate, RankedCandidate, ScoredCandidate, SearchRequest, SearchResult, Searcher,
};
