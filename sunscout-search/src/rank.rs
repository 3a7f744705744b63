//! Ranking and naming of scored candidates.

use std::time::Duration;

use geo::Coord;
use log::warn;
use sunscout_core::Geocoder;
use tokio::time::timeout;

use crate::searcher::ScoredCandidate;

/// The `k` highest-scoring candidates, best first.
///
/// The sort is stable and the pool is in generation order, so candidates
/// with equal scores rank in the order the grid produced them.
pub(crate) fn top_k(pool: &[ScoredCandidate], k: usize) -> Vec<ScoredCandidate> {
    let mut ranked = pool.to_vec();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(k);
    ranked
}

/// Coordinate-derived label used when reverse geocoding fails.
pub(crate) fn fallback_label(location: Coord<f64>) -> String {
    format!("{:.3}, {:.3}", location.y, location.x)
}

/// Resolve a display name for `location`, falling back to a coordinate
/// label on any lookup failure.
///
/// Lookup failures are cosmetic: a search that already has a scored
/// result must not fail because a name was unavailable.
pub(crate) async fn resolve_name<G: Geocoder>(
    geocoder: &G,
    deadline: Duration,
    location: Coord<f64>,
) -> String {
    match timeout(deadline, geocoder.reverse_lookup(location)).await {
        Ok(Ok(place)) => place.short_name(),
        Ok(Err(err)) => {
            warn!(
                "reverse lookup for {:.4},{:.4} failed ({err}); using coordinate label",
                location.y, location.x
            );
            fallback_label(location)
        }
        Err(_) => {
            warn!(
                "reverse lookup for {:.4},{:.4} timed out after {}s; using coordinate label",
                location.y,
                location.x,
                deadline.as_secs()
            );
            fallback_label(location)
        }
    }
}
