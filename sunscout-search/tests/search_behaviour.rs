//! End-to-end behaviour of the search orchestrator against scripted
//! providers.

use std::sync::Arc;
use std::time::Duration;

use geo::Coord;
use rstest::{fixture, rstest};
use sunscout_core::grid;
use sunscout_core::test_support::{
    ScriptedForecastProvider, StalledForecastProvider, StaticGeocoder, flat_series,
};
use sunscout_core::{AddressComponents, Place, WeightTriple, WindProfile};
use sunscout_search::{SearchConfig, SearchError, SearchRequest, Searcher};

const OSLO: Coord<f64> = Coord { x: 10.75, y: 59.91 };

#[fixture]
fn config() -> SearchConfig {
    // Keep tests snappy: no inter-batch pauses, tight deadlines.
    SearchConfig::default()
        .with_batch_delay(Duration::ZERO)
        .with_fetch_timeout(Duration::from_secs(1))
        .with_lookup_timeout(Duration::from_secs(1))
}

#[fixture]
fn request() -> SearchRequest {
    SearchRequest {
        center: OSLO,
        radius_km: 10.0,
        weights: WeightTriple::default(),
        wind_profile: WindProfile::calm(),
    }
}

fn oslo_place() -> Place {
    Place {
        location: OSLO,
        display_name: "Oslo, Norway".to_owned(),
        address: AddressComponents {
            city: Some("Oslo".to_owned()),
            country: Some("Norway".to_owned()),
            ..AddressComponents::default()
        },
    }
}

#[rstest]
#[tokio::test]
async fn sunniest_points_outrank_the_single_cloudy_one(
    config: SearchConfig,
    mut request: SearchRequest,
) {
    // All 81 points report clear skies except the center, which is fully
    // overcast. With a pure sun preference the overcast point must rank
    // below every other candidate.
    let provider = Arc::new(ScriptedForecastProvider::new(move |location| {
        if location == OSLO {
            Ok(flat_series(24, 20.0, 100.0, 3.0))
        } else {
            Ok(flat_series(24, 20.0, 0.0, 3.0))
        }
    }));
    let searcher = Searcher::with_config(
        Arc::clone(&provider),
        StaticGeocoder::unavailable(),
        config,
    );
    request.weights = WeightTriple::new(1.0, 0.0, 0.0);

    let result = searcher.search(&request).await.expect("search succeeds");

    assert!(
        result.best.candidate.point.ring > 0,
        "the overcast center must not win"
    );
    assert!((result.best.candidate.score - 1.0).abs() < 1e-12);
    assert_eq!(result.top.len(), 3);
    for entry in &result.top {
        assert!(entry.candidate.point.location != OSLO);
        assert!((entry.candidate.score - 1.0).abs() < 1e-12);
    }
}

#[rstest]
#[tokio::test]
async fn zero_weights_fail_before_any_network_call(config: SearchConfig, mut request: SearchRequest) {
    let provider = Arc::new(ScriptedForecastProvider::uniform(flat_series(
        24, 20.0, 0.0, 3.0,
    )));
    let geocoder = Arc::new(StaticGeocoder::with_place(oslo_place()));
    let searcher = Searcher::with_config(Arc::clone(&provider), Arc::clone(&geocoder), config);
    request.weights = WeightTriple::new(0.0, 0.0, 0.0);

    let err = searcher.search(&request).await.expect_err("must reject");

    assert_eq!(err, SearchError::InvalidInput);
    assert_eq!(provider.call_count(), 0, "no forecast may be fetched");
    assert_eq!(geocoder.call_count(), 0, "no lookup may be issued");
}

#[rstest]
#[tokio::test]
async fn partial_fetch_failures_still_produce_a_full_result(
    config: SearchConfig,
    request: SearchRequest,
) {
    // Five grid points fail; the remaining 76 succeed and must carry the
    // result on their own.
    let failing: Vec<Coord<f64>> = grid::generate(OSLO, 10.0, grid::DEFAULT_RING_SCHEDULE)
        .into_iter()
        .skip(10)
        .take(5)
        .map(|p| p.location)
        .collect();
    let unlucky = failing.clone();
    let provider = Arc::new(ScriptedForecastProvider::new(move |location| {
        if unlucky.contains(&location) {
            Err(sunscout_core::FetchError::Network {
                message: "connection reset".to_owned(),
            })
        } else {
            Ok(flat_series(24, 20.0, 0.0, 3.0))
        }
    }));
    let searcher = Searcher::with_config(
        Arc::clone(&provider),
        StaticGeocoder::unavailable(),
        config,
    );

    let result = searcher.search(&request).await.expect("search succeeds");

    assert_eq!(result.top.len(), 3);
    for entry in &result.top {
        assert!(
            !failing.contains(&entry.candidate.point.location),
            "failed candidates must not be ranked"
        );
    }
    assert!(!failing.contains(&result.best.candidate.point.location));
    // 81 grid fetches plus the full-forecast refetch for the winner.
    assert_eq!(provider.call_count(), 82);
}

#[rstest]
#[tokio::test]
async fn total_fetch_failure_is_no_data(config: SearchConfig, request: SearchRequest) {
    let provider = Arc::new(ScriptedForecastProvider::failing());
    let searcher = Searcher::with_config(
        Arc::clone(&provider),
        StaticGeocoder::unavailable(),
        config,
    );

    let err = searcher.search(&request).await.expect_err("must fail");

    assert_eq!(err, SearchError::NoData);
    assert_eq!(provider.call_count(), 81, "every candidate was attempted");
}

#[rstest]
#[tokio::test]
async fn stalled_fetches_time_out_into_no_data(request: SearchRequest) {
    let provider = Arc::new(StalledForecastProvider::default());
    let tight = SearchConfig::default()
        .with_batch_delay(Duration::ZERO)
        .with_fetch_timeout(Duration::from_millis(20));
    let searcher = Searcher::with_config(Arc::clone(&provider), StaticGeocoder::unavailable(), tight);

    let err = searcher.search(&request).await.expect_err("must fail");

    assert_eq!(err, SearchError::NoData);
    assert_eq!(provider.call_count(), 81);
}

#[rstest]
#[tokio::test]
async fn equal_scores_keep_the_earliest_candidate(config: SearchConfig, request: SearchRequest) {
    // Identical conditions everywhere: the center is generated first and
    // must win the tie, both as best and at rank 1.
    let provider = ScriptedForecastProvider::uniform(flat_series(48, 22.0, 10.0, 3.0));
    let searcher = Searcher::with_config(provider, StaticGeocoder::unavailable(), config);

    let result = searcher.search(&request).await.expect("search succeeds");

    assert_eq!(result.best.candidate.point.ring, 0);
    assert_eq!(result.top[0].candidate.point.ring, 0);
    let ranks: Vec<usize> = result.top.iter().map(|entry| entry.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3]);
    // The winner's display forecast is the full series, not the scoring
    // window.
    assert_eq!(result.best.forecast.len(), 48);
}

#[rstest]
#[tokio::test]
async fn ranking_is_descending_by_score(config: SearchConfig, request: SearchRequest) {
    // Cloudiness grows with distance from the center, so scores fall
    // ring by ring.
    let provider = ScriptedForecastProvider::new(move |location| {
        let dx = location.x - OSLO.x;
        let dy = location.y - OSLO.y;
        let cloud = (dx.hypot(dy) * 800.0).min(100.0);
        Ok(flat_series(24, 20.0, cloud, 3.0))
    });
    let searcher = Searcher::with_config(provider, StaticGeocoder::unavailable(), config);

    let result = searcher.search(&request).await.expect("search succeeds");

    assert_eq!(result.best.candidate.point.ring, 0);
    let scores: Vec<f64> = result.top.iter().map(|entry| entry.candidate.score).collect();
    assert!(
        scores.windows(2).all(|pair| pair[0] >= pair[1]),
        "top-K must be sorted descending: {scores:?}"
    );
    assert!((result.top[0].candidate.score - result.best.candidate.score).abs() < 1e-12);
}

#[rstest]
#[tokio::test]
async fn resolved_names_come_from_the_geocoder(config: SearchConfig, request: SearchRequest) {
    let provider = ScriptedForecastProvider::uniform(flat_series(24, 22.0, 10.0, 3.0));
    let searcher = Searcher::with_config(
        provider,
        StaticGeocoder::with_place(oslo_place()),
        config,
    );

    let result = searcher.search(&request).await.expect("search succeeds");

    assert_eq!(result.best.name, "Oslo, Norway");
    for entry in &result.top {
        assert_eq!(entry.name, "Oslo, Norway");
    }
}

#[rstest]
#[tokio::test]
async fn failed_lookups_fall_back_to_coordinate_labels(
    config: SearchConfig,
    request: SearchRequest,
) {
    let provider = ScriptedForecastProvider::uniform(flat_series(24, 22.0, 10.0, 3.0));
    let searcher = Searcher::with_config(provider, StaticGeocoder::unavailable(), config);

    let result = searcher.search(&request).await.expect("search succeeds");

    // The tie puts the center first; its label is the fixed-precision
    // coordinate pair.
    assert_eq!(result.best.name, "59.910, 10.750");
    for entry in &result.top {
        assert!(
            entry.name.contains(", "),
            "expected a coordinate label, got {:?}",
            entry.name
        );
    }
}

#[rstest]
#[tokio::test]
async fn coarse_schedule_is_an_alternative_mode(request: SearchRequest) {
    let provider = Arc::new(ScriptedForecastProvider::uniform(flat_series(
        24, 22.0, 10.0, 3.0,
    )));
    let coarse = SearchConfig::default()
        .with_batch_delay(Duration::ZERO)
        .with_ring_schedule(grid::COARSE_RING_SCHEDULE);
    let searcher = Searcher::with_config(Arc::clone(&provider), StaticGeocoder::unavailable(), coarse);

    let result = searcher.search(&request).await.expect("search succeeds");

    assert_eq!(result.top.len(), 3);
    // 37 grid fetches plus the winner's refetch.
    assert_eq!(provider.call_count(), 38);
}

#[rstest]
#[tokio::test]
async fn empty_series_drop_their_candidate(config: SearchConfig, request: SearchRequest) {
    // Only the center returns data; every other point yields an empty
    // series and is dropped, so the center wins by default.
    let provider = ScriptedForecastProvider::new(move |location| {
        if location == OSLO {
            Ok(flat_series(24, 22.0, 10.0, 3.0))
        } else {
            Ok(sunscout_core::ForecastSeries::new(Vec::new()))
        }
    });
    let searcher = Searcher::with_config(provider, StaticGeocoder::unavailable(), config);

    let result = searcher.search(&request).await.expect("search succeeds");

    assert_eq!(result.top.len(), 1);
    assert_eq!(result.best.candidate.point.ring, 0);
}
