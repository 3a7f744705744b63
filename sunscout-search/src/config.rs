//! Tunables for one search run.

use std::time::Duration;

use sunscout_core::grid::DEFAULT_RING_SCHEDULE;
use sunscout_core::weather::AGGREGATION_WINDOW;

/// Default number of concurrently outstanding forecast fetches.
const DEFAULT_BATCH_SIZE: usize = 10;

/// Default per-fetch deadline in seconds.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default per-geocoding-lookup deadline in seconds.
const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 8;

/// Default pause between batches, respecting upstream rate limits.
const DEFAULT_BATCH_DELAY_MS: u64 = 50;

/// Default number of ranked candidates returned.
const DEFAULT_TOP_K: usize = 3;

/// Configuration for [`Searcher`](crate::Searcher).
///
/// The defaults implement the canonical 81-point single-pass search; the
/// coarse 37-point schedule from the iterative-refinement variant can be
/// swapped in via [`SearchConfig::with_ring_schedule`].
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use sunscout_core::grid::COARSE_RING_SCHEDULE;
/// use sunscout_search::SearchConfig;
///
/// let config = SearchConfig::default()
///     .with_ring_schedule(COARSE_RING_SCHEDULE)
///     .with_fetch_timeout(Duration::from_secs(5));
/// assert_eq!(config.ring_schedule, COARSE_RING_SCHEDULE);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum concurrently outstanding forecast fetches.
    pub batch_size: usize,
    /// Deadline applied independently to every forecast fetch.
    pub fetch_timeout: Duration,
    /// Deadline applied independently to every geocoding lookup.
    pub lookup_timeout: Duration,
    /// Pause inserted between batches; not counted against any fetch's
    /// timeout.
    pub batch_delay: Duration,
    /// Number of ranked candidates to return.
    pub top_k: usize,
    /// Points per concentric grid ring.
    pub ring_schedule: Vec<usize>,
    /// Forecast steps folded into the scoring average.
    pub aggregation_window: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            lookup_timeout: Duration::from_secs(DEFAULT_LOOKUP_TIMEOUT_SECS),
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
            top_k: DEFAULT_TOP_K,
            ring_schedule: DEFAULT_RING_SCHEDULE.to_vec(),
            aggregation_window: AGGREGATION_WINDOW,
        }
    }
}

impl SearchConfig {
    /// Set the batch size, keeping at least one slot.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the per-fetch deadline.
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the per-lookup deadline.
    #[must_use]
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Set the inter-batch pause.
    #[must_use]
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay = delay;
        self
    }

    /// Set the number of ranked candidates to return.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Replace the ring schedule.
    #[must_use]
    pub fn with_ring_schedule(mut self, schedule: &[usize]) -> Self {
        self.ring_schedule = schedule.to_vec();
        self
    }
}
