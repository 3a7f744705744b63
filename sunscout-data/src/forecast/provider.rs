//! HTTP implementation of the forecast port.

use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use log::debug;
use reqwest::Client;
use sunscout_core::weather::{ForecastSample, ForecastSeries, InstantDetails, PeriodSummary};
use sunscout_core::{FetchError, ForecastProvider};

use crate::AdapterBuildError;

use super::api::LocationforecastResponse;

/// Default base URL for the forecast service.
pub const DEFAULT_BASE_URL: &str = "https://api.met.no";

/// Default User-Agent; the upstream rejects anonymous clients.
pub const DEFAULT_USER_AGENT: &str = "sunscout/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpForecastProvider`].
#[derive(Debug, Clone)]
pub struct HttpForecastProviderConfig {
    /// Base URL of the forecast service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpForecastProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpForecastProviderConfig {
    /// Create a configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Forecast provider backed by a Locationforecast-style HTTP API.
///
/// # Examples
///
/// ```no_run
/// use geo::Coord;
/// use sunscout_core::ForecastProvider;
/// use sunscout_data::HttpForecastProvider;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = HttpForecastProvider::new("https://api.met.no")?;
/// let series = provider
///     .fetch_forecast(Coord { x: 10.75, y: 59.91 })
///     .await?;
/// println!("{} forecast steps", series.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpForecastProvider {
    client: Client,
    config: HttpForecastProviderConfig,
}

impl HttpForecastProvider {
    /// Create a provider with default configuration.
    ///
    /// # Errors
    /// Returns an error when the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AdapterBuildError> {
        Self::with_config(HttpForecastProviderConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error when the HTTP client fails to build.
    pub fn with_config(config: HttpForecastProviderConfig) -> Result<Self, AdapterBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Build the compact-product URL for a coordinate.
    ///
    /// Coordinates are fixed to four decimals; the upstream asks clients
    /// not to exceed that precision so its cache stays effective.
    fn forecast_url(&self, location: Coord<f64>) -> String {
        format!(
            "{}/weatherapi/locationforecast/2.0/compact?lat={:.4}&lon={:.4}",
            self.config.base_url.trim_end_matches('/'),
            location.y,
            location.x
        )
    }

    /// Map a transport error to the port error type.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return FetchError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        FetchError::Network {
            message: error.to_string(),
        }
    }

    /// Flatten the wire shape into the core series, skipping steps with
    /// incomplete instant details.
    fn convert_response(response: LocationforecastResponse) -> Result<ForecastSeries, FetchError> {
        let total = response.properties.timeseries.len();
        let samples: Vec<ForecastSample> = response
            .properties
            .timeseries
            .into_iter()
            .filter_map(|entry| {
                let details = entry.data.instant.details;
                let (Some(temperature_c), Some(cloud_fraction), Some(wind_speed)) = (
                    details.air_temperature,
                    details.cloud_area_fraction,
                    details.wind_speed,
                ) else {
                    return None;
                };
                Some(ForecastSample {
                    time: entry.time,
                    details: InstantDetails {
                        temperature_c,
                        cloud_fraction,
                        wind_speed,
                        wind_gust: details.wind_speed_of_gust,
                    },
                    next_hour: entry.data.next_1_hours.map(|block| PeriodSummary {
                        symbol_code: block.summary.symbol_code,
                        precipitation_mm: block.details.and_then(|d| d.precipitation_amount),
                    }),
                })
            })
            .collect();

        if samples.is_empty() {
            return Err(FetchError::Parse {
                message: format!("no usable forecast steps in {total} timeseries entries"),
            });
        }
        Ok(ForecastSeries::new(samples))
    }
}

#[async_trait]
impl ForecastProvider for HttpForecastProvider {
    async fn fetch_forecast(&self, location: Coord<f64>) -> Result<ForecastSeries, FetchError> {
        let url = self.forecast_url(location);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let payload: LocationforecastResponse =
            response.json().await.map_err(|err| FetchError::Parse {
                message: err.to_string(),
            })?;

        Self::convert_response(payload)
    }
}
