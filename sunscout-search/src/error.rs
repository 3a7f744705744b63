//! Search-fatal errors.
//!
//! Per-candidate fetch and lookup failures never appear here; they are
//! absorbed where they happen. Only conditions that invalidate the whole
//! search surface to the caller.

use thiserror::Error;

/// Errors returned by [`Searcher::search`](crate::Searcher::search).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// All preference weights were zero (or otherwise degenerate).
    /// Rejected before any network access.
    #[error("at least one preference weight must be positive")]
    InvalidInput,
    /// Every candidate in the grid failed to produce a forecast, so there
    /// is nothing to rank. A fresh search is the retry mechanism.
    #[error("no forecast could be retrieved for any candidate point")]
    NoData,
}
