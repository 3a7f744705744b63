//! HTTP implementation of the geocoding port.

use std::time::Duration;

use async_trait::async_trait;
use geo::Coord;
use log::debug;
use reqwest::Client;
use sunscout_core::{AddressComponents, Geocoder, LookupError, Place};
use url::Url;

use crate::AdapterBuildError;

use super::api::GeocodeHit;

/// Default base URL for the geocoding service.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default User-Agent; the public instance rejects anonymous clients.
pub const DEFAULT_USER_AGENT: &str = "sunscout/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Maximum hits requested from forward search.
const FORWARD_LIMIT: &str = "10";

/// Zoom level for reverse lookups: settlement rather than house number.
const REVERSE_ZOOM: &str = "10";

/// Configuration for [`HttpGeocoder`].
#[derive(Debug, Clone)]
pub struct HttpGeocoderConfig {
    /// Base URL of the geocoding service.
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpGeocoderConfig {
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

/// Geocoder backed by a Nominatim-style HTTP API.
///
/// # Examples
///
/// ```no_run
/// use sunscout_core::Geocoder;
/// use sunscout_data::HttpGeocoder;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let geocoder = HttpGeocoder::new("https://nominatim.openstreetmap.org")?;
/// let hits = geocoder.forward_search("Oslo", Some("no")).await?;
/// println!("{} hits", hits.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpGeocoder {
    client: Client,
    config: HttpGeocoderConfig,
}

impl HttpGeocoder {
    /// Create a geocoder with default configuration.
    ///
    /// # Errors
    /// Returns an error when the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AdapterBuildError> {
        Self::with_config(HttpGeocoderConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    /// Returns an error when the HTTP client fails to build.
    pub fn with_config(config: HttpGeocoderConfig) -> Result<Self, AdapterBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self, path: &str) -> Result<Url, LookupError> {
        let raw = format!("{}/{path}", self.config.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|err| LookupError::Parse {
            message: format!("invalid endpoint URL {raw}: {err}"),
        })
    }

    /// Build the forward-search URL.
    fn search_url(&self, query: &str, country_filter: Option<&str>) -> Result<Url, LookupError> {
        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("limit", FORWARD_LIMIT);
        if let Some(country) = country_filter {
            url.query_pairs_mut()
                .append_pair("countrycodes", &country.to_lowercase());
        }
        Ok(url)
    }

    /// Build the reverse-lookup URL.
    fn reverse_url(&self, location: Coord<f64>) -> Result<Url, LookupError> {
        let mut url = self.endpoint("reverse")?;
        url.query_pairs_mut()
            .append_pair("lat", &location.y.to_string())
            .append_pair("lon", &location.x.to_string())
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("zoom", REVERSE_ZOOM);
        Ok(url)
    }

    /// Map a transport error to the port error type.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> LookupError {
        if error.is_timeout() {
            return LookupError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return LookupError::Http {
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        LookupError::Network {
            message: error.to_string(),
        }
    }

    /// Convert a wire hit into a [`Place`].
    ///
    /// Returns `None` when the hit has no parseable coordinate.
    fn convert_hit(hit: GeocodeHit) -> Option<Place> {
        let lat: f64 = hit.lat.as_deref()?.parse().ok()?;
        let lon: f64 = hit.lon.as_deref()?.parse().ok()?;
        let address = hit.address.map_or_else(AddressComponents::default, |dto| {
            AddressComponents {
                city: dto.city,
                town: dto.town,
                village: dto.village,
                municipality: dto.municipality,
                county: dto.county,
                state: dto.state,
                country: dto.country,
            }
        });
        Some(Place {
            location: Coord { x: lon, y: lat },
            display_name: hit.display_name.unwrap_or_default(),
            address,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, LookupError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;
        response.json().await.map_err(|err| LookupError::Parse {
            message: err.to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn forward_search(
        &self,
        query: &str,
        country_filter: Option<&str>,
    ) -> Result<Vec<Place>, LookupError> {
        let url = self.search_url(query, country_filter)?;
        let hits: Vec<GeocodeHit> = self.get_json(url).await?;
        Ok(hits.into_iter().filter_map(Self::convert_hit).collect())
    }

    async fn reverse_lookup(&self, location: Coord<f64>) -> Result<Place, LookupError> {
        let url = self.reverse_url(location)?;
        let hit: GeocodeHit = self.get_json(url).await?;
        if hit.error.is_some() {
            return Err(LookupError::NoMatch);
        }
        Self::convert_hit(hit).ok_or_else(|| LookupError::Parse {
            message: "reverse hit carried no coordinate".to_owned(),
        })
    }
}
