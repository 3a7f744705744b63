//! Locationforecast API response types.
//!
//! Deserialisation types for the `compact` product of the MET Norway
//! Locationforecast 2.0 API. Only the fields the engine consumes are
//! modelled; unknown fields are ignored.
//!
//! See: <https://api.met.no/weatherapi/locationforecast/2.0/documentation>

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Top-level Locationforecast response (a GeoJSON `Feature`).
#[derive(Debug, Deserialize)]
pub struct LocationforecastResponse {
    /// Payload carrying the forecast timeseries.
    pub properties: Properties,
}

/// The `properties` member of the response.
#[derive(Debug, Deserialize)]
pub struct Properties {
    /// Time-ordered forecast steps.
    pub timeseries: Vec<TimeseriesEntry>,
}

/// One forecast step.
#[derive(Debug, Deserialize)]
pub struct TimeseriesEntry {
    /// Valid time of the step.
    pub time: DateTime<Utc>,
    /// Measurements and summaries for the step.
    pub data: TimeseriesData,
}

/// Measurements attached to one step.
#[derive(Debug, Deserialize)]
pub struct TimeseriesData {
    /// Instantaneous conditions.
    pub instant: InstantBlock,
    /// Summary of the following hour; absent near the end of the series.
    pub next_1_hours: Option<NextHoursBlock>,
}

/// Wrapper around the instantaneous detail map.
#[derive(Debug, Deserialize)]
pub struct InstantBlock {
    /// Instantaneous measurement values.
    pub details: InstantDetailsDto,
}

/// Instantaneous measurements. All optional on the wire; steps missing a
/// required value are skipped during conversion.
#[derive(Debug, Deserialize)]
pub struct InstantDetailsDto {
    /// Air temperature in °C.
    pub air_temperature: Option<f64>,
    /// Total cloud cover in percent.
    pub cloud_area_fraction: Option<f64>,
    /// Sustained wind speed in m/s.
    pub wind_speed: Option<f64>,
    /// Gust speed in m/s.
    pub wind_speed_of_gust: Option<f64>,
}

/// The `next_1_hours` block.
#[derive(Debug, Deserialize)]
pub struct NextHoursBlock {
    /// Symbolic weather summary.
    pub summary: SummaryDto,
    /// Accumulated values over the hour.
    pub details: Option<NextHoursDetailsDto>,
}

/// Symbol summary for a period.
#[derive(Debug, Deserialize)]
pub struct SummaryDto {
    /// Symbol code such as `clearsky_day`.
    pub symbol_code: String,
}

/// Accumulated values for a period.
#[derive(Debug, Deserialize)]
pub struct NextHoursDetailsDto {
    /// Precipitation over the hour in millimetres.
    pub precipitation_amount: Option<f64>,
}
