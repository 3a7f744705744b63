//! Command-line interface for the sunscout engine.
//!
//! One invocation runs one search: resolve the center (coordinates or a
//! forward-geocoded place name), fetch and score the candidate grid, and
//! print the ranked result with the winner's near-term forecast.

#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr, eyre};
use geo::Coord;
use log::info;
use sunscout_core::grid::COARSE_RING_SCHEDULE;
use sunscout_core::{Geocoder, WeightTriple, WindProfile};
use sunscout_data::{HttpForecastProvider, HttpGeocoder};
use sunscout_search::{SearchConfig, SearchRequest, SearchResult, Searcher};

/// Number of forecast steps printed for the winning spot.
const FORECAST_PREVIEW_STEPS: usize = 12;

/// Run the CLI with the current process arguments.
///
/// # Errors
/// Returns an error for invalid arguments, adapter construction
/// failures, and failed searches; the message is meant to be printed
/// as-is.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Search(args) => run_search(args).await,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "sunscout",
    about = "Find the spot with the best weather near you",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search the area around a point for the best-weather spot.
    Search(SearchArgs),
}

/// Arguments for the `search` subcommand.
#[derive(Debug, Parser)]
struct SearchArgs {
    /// Latitude of the search center in decimal degrees.
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,
    /// Longitude of the search center in decimal degrees.
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,
    /// Place name to geocode into a search center instead of --lat/--lon.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    place: Option<String>,
    /// Two-letter country code restricting the place lookup.
    #[arg(long, requires = "place")]
    country: Option<String>,
    /// Search radius in kilometres.
    #[arg(long, default_value_t = 10.0)]
    radius_km: f64,
    /// Raw sunshine weight.
    #[arg(long, default_value_t = 1.0)]
    sun: f64,
    /// Raw temperature weight.
    #[arg(long, default_value_t = 1.0)]
    temp: f64,
    /// Raw wind weight.
    #[arg(long, default_value_t = 1.0)]
    wind: f64,
    /// Chase strong wind instead of avoiding it.
    #[arg(long)]
    storm_chase: bool,
    /// Use the coarse 37-point grid instead of the 81-point default.
    #[arg(long)]
    coarse_grid: bool,
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let geocoder = HttpGeocoder::new(sunscout_data::geocode::DEFAULT_BASE_URL)
        .wrap_err("could not set up the geocoding client")?;
    let provider = HttpForecastProvider::new(sunscout_data::forecast::DEFAULT_BASE_URL)
        .wrap_err("could not set up the forecast client")?;

    let center = resolve_center(&args, &geocoder).await?;

    let mut config = SearchConfig::default();
    if args.coarse_grid {
        config = config.with_ring_schedule(COARSE_RING_SCHEDULE);
    }
    let request = SearchRequest {
        center,
        radius_km: args.radius_km,
        weights: WeightTriple::new(args.sun, args.temp, args.wind),
        wind_profile: if args.storm_chase {
            WindProfile::storm()
        } else {
            WindProfile::calm()
        },
    };

    let searcher = Searcher::with_config(provider, geocoder, config);
    let result = searcher
        .search(&request)
        .await
        .wrap_err("search failed")?;
    render(&result);
    Ok(())
}

/// Turn the argument set into a search center.
///
/// A `--place` name wins and is forward geocoded (first hit); otherwise
/// both `--lat` and `--lon` must be present.
async fn resolve_center<G: Geocoder>(args: &SearchArgs, geocoder: &G) -> Result<Coord<f64>> {
    if let Some(place) = &args.place {
        let hits = geocoder
            .forward_search(place, args.country.as_deref())
            .await
            .wrap_err_with(|| format!("could not look up {place:?}"))?;
        let hit = hits
            .into_iter()
            .next()
            .ok_or_else(|| eyre!("no place matched {place:?}"))?;
        info!(
            "resolved {place:?} to {} at {:.4},{:.4}",
            hit.short_name(),
            hit.location.y,
            hit.location.x
        );
        return Ok(hit.location);
    }
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Ok(Coord { x: lon, y: lat }),
        _ => Err(eyre!("provide either --place or both --lat and --lon")),
    }
}

fn render(result: &SearchResult) {
    let best = &result.best;
    let obs = &best.candidate.observation;
    println!(
        "Best spot: {} (score {:.3})",
        best.name, best.candidate.score
    );
    println!(
        "  {:.1} °C, {:.0}% cloud, {:.1} m/s wind at {:.4},{:.4}",
        obs.temperature_c,
        obs.cloud_fraction,
        obs.wind_speed,
        best.candidate.point.location.y,
        best.candidate.point.location.x
    );

    println!();
    println!("Ranked spots:");
    for entry in &result.top {
        println!(
            "  {}. {}  score {:.3}  ({:.4},{:.4})",
            entry.rank,
            entry.name,
            entry.candidate.score,
            entry.candidate.point.location.y,
            entry.candidate.point.location.x
        );
    }

    if !best.forecast.is_empty() {
        println!();
        println!("Forecast for {}:", best.name);
        for sample in best.forecast.samples().iter().take(FORECAST_PREVIEW_STEPS) {
            let symbol = sample
                .next_hour
                .as_ref()
                .map(|summary| summary.symbol_code.as_str())
                .unwrap_or_default();
            println!(
                "  {}  {:>5.1} °C  {:>3.0}% cloud  {:>4.1} m/s  {symbol}",
                sample.time.format("%a %H:%M"),
                sample.details.temperature_c,
                sample.details.cloud_fraction,
                sample.details.wind_speed
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sunscout_core::test_support::StaticGeocoder;
    use sunscout_core::{AddressComponents, Place};

    fn parse(args: &[&str]) -> SearchArgs {
        let cli = Cli::try_parse_from(args.iter().copied()).expect("arguments should parse");
        let Command::Search(search) = cli.command;
        search
    }

    #[rstest]
    fn defaults_are_even_weights_over_ten_km() {
        let args = parse(&["sunscout", "search", "--lat", "59.91", "--lon", "10.75"]);
        assert!((args.radius_km - 10.0).abs() < 1e-12);
        assert!((args.sun - 1.0).abs() < 1e-12);
        assert!(!args.storm_chase);
        assert!(!args.coarse_grid);
    }

    #[rstest]
    fn negative_coordinates_parse() {
        let args = parse(&["sunscout", "search", "--lat", "-33.86", "--lon", "-151.2"]);
        assert_eq!(args.lat, Some(-33.86));
        assert_eq!(args.lon, Some(-151.2));
    }

    #[rstest]
    fn lat_without_lon_is_rejected() {
        assert!(Cli::try_parse_from(["sunscout", "search", "--lat", "59.91"]).is_err());
    }

    #[rstest]
    fn place_conflicts_with_coordinates() {
        assert!(
            Cli::try_parse_from([
                "sunscout", "search", "--place", "Oslo", "--lat", "59.91", "--lon", "10.75"
            ])
            .is_err()
        );
    }

    #[tokio::test]
    async fn resolve_center_prefers_the_place() {
        let args = parse(&["sunscout", "search", "--place", "Oslo"]);
        let geocoder = StaticGeocoder::with_place(Place {
            location: Coord { x: 10.75, y: 59.91 },
            display_name: "Oslo, Norway".to_owned(),
            address: AddressComponents::default(),
        });

        let center = resolve_center(&args, &geocoder).await.expect("resolves");

        assert!((center.y - 59.91).abs() < 1e-12);
        assert!((center.x - 10.75).abs() < 1e-12);
    }

    #[tokio::test]
    async fn resolve_center_fails_on_zero_hits() {
        let args = parse(&["sunscout", "search", "--place", "Nowhere"]);
        let geocoder = StaticGeocoder::unavailable();

        assert!(resolve_center(&args, &geocoder).await.is_err());
    }

    #[tokio::test]
    async fn resolve_center_uses_raw_coordinates() {
        let args = parse(&["sunscout", "search", "--lat", "59.91", "--lon", "10.75"]);
        let geocoder = StaticGeocoder::unavailable();

        let center = resolve_center(&args, &geocoder).await.expect("resolves");

        assert!((center.x - 10.75).abs() < 1e-12);
    }
}
