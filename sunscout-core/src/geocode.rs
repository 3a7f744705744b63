//! Geocoding port: place name to coordinate and back.
//!
//! Forward search turns user input into a search center; reverse lookup
//! labels result candidates. Reverse failures are cosmetic by design, so
//! callers substitute a coordinate-derived label instead of failing a
//! search that already has a scored result.

use async_trait::async_trait;
use geo::Coord;
use thiserror::Error;

/// Errors from [`Geocoder`] lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The request exceeded its deadline.
    #[error("geocoding request timed out after {timeout_secs}s")]
    Timeout {
        /// The deadline that was exceeded, in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success status.
    #[error("geocoding service returned HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Service-provided detail, possibly empty.
        message: String,
    },
    /// The request never produced a response.
    #[error("geocoding request failed: {message}")]
    Network {
        /// Transport-level detail.
        message: String,
    },
    /// The response arrived but could not be interpreted.
    #[error("could not parse geocoding payload: {message}")]
    Parse {
        /// Decoder detail.
        message: String,
    },
    /// The service had no answer for the query or coordinate.
    #[error("no place matched the lookup")]
    NoMatch,
}

/// Structured address parts of a geocoding hit.
///
/// All parts are optional; providers fill whatever their data covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddressComponents {
    /// City name.
    pub city: Option<String>,
    /// Town name, for places below city rank.
    pub town: Option<String>,
    /// Village name.
    pub village: Option<String>,
    /// Administrative municipality.
    pub municipality: Option<String>,
    /// County or district.
    pub county: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country name.
    pub country: Option<String>,
}

/// One geocoding hit: a coordinate with naming metadata.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    /// Hit coordinate, `x = longitude, y = latitude` in decimal degrees.
    pub location: Coord<f64>,
    /// Provider's full display name, possibly long.
    pub display_name: String,
    /// Structured address parts.
    pub address: AddressComponents,
}

impl Place {
    /// A compact human-readable name for the place.
    ///
    /// Prefers the most specific populated-place component (city over town
    /// over village over municipality over county over state over
    /// country), appending the state or country when it adds information.
    /// Falls back to the provider display name when no components are
    /// populated.
    ///
    /// # Examples
    /// ```
    /// use sunscout_core::{AddressComponents, Place};
    ///
    /// let place = Place {
    ///     display_name: "Oslo, 0026, Norway".to_owned(),
    ///     address: AddressComponents {
    ///         city: Some("Oslo".to_owned()),
    ///         country: Some("Norway".to_owned()),
    ///         ..AddressComponents::default()
    ///     },
    ///     ..Place::default()
    /// };
    /// assert_eq!(place.short_name(), "Oslo, Norway");
    /// ```
    #[must_use]
    pub fn short_name(&self) -> String {
        let address = &self.address;
        let Some(primary) = address
            .city
            .as_deref()
            .or(address.town.as_deref())
            .or(address.village.as_deref())
            .or(address.municipality.as_deref())
            .or(address.county.as_deref())
            .or(address.state.as_deref())
            .or(address.country.as_deref())
        else {
            return self.display_name.clone();
        };

        let suffix = address
            .state
            .as_deref()
            .filter(|s| !s.is_empty() && *s != primary)
            .or_else(|| {
                address
                    .country
                    .as_deref()
                    .filter(|c| !c.is_empty() && *c != primary)
            });

        match suffix {
            Some(region) => format!("{primary}, {region}"),
            None => primary.to_owned(),
        }
    }
}

/// Resolve place names to coordinates and coordinates to names.
///
/// Both lookups are assumed rate-limited upstream; callers keep request
/// volume low and apply their own timeouts.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Rank places matching a free-form query, best match first.
    ///
    /// `country_filter` is an ISO 3166-1 alpha-2 code restricting the
    /// search when present.
    async fn forward_search(
        &self,
        query: &str,
        country_filter: Option<&str>,
    ) -> Result<Vec<Place>, LookupError>;

    /// Name the place at a coordinate.
    async fn reverse_lookup(&self, location: Coord<f64>) -> Result<Place, LookupError>;
}

#[async_trait]
impl<T> Geocoder for std::sync::Arc<T>
where
    T: Geocoder + ?Sized,
{
    async fn forward_search(
        &self,
        query: &str,
        country_filter: Option<&str>,
    ) -> Result<Vec<Place>, LookupError> {
        self.as_ref().forward_search(query, country_filter).await
    }

    async fn reverse_lookup(&self, location: Coord<f64>) -> Result<Place, LookupError> {
        self.as_ref().reverse_lookup(location).await
    }
}
