//! Nominatim API response types.
//!
//! Both the `search` endpoint (an array of hits) and the `reverse`
//! endpoint (a single hit, or an object with an `error` member) share the
//! same hit shape. Coordinates arrive as strings on the wire.
//!
//! See: <https://nominatim.org/release-docs/latest/api/Output/>

use serde::Deserialize;

/// One geocoding hit, also the whole body of a `reverse` response.
#[derive(Debug, Deserialize)]
pub struct GeocodeHit {
    /// Latitude as a decimal string.
    pub lat: Option<String>,
    /// Longitude as a decimal string.
    pub lon: Option<String>,
    /// Full display name.
    pub display_name: Option<String>,
    /// Structured address details, present with `addressdetails=1`.
    pub address: Option<AddressDto>,
    /// Error message; `reverse` answers with this instead of a hit when a
    /// coordinate cannot be geocoded.
    pub error: Option<String>,
}

/// Structured address parts of a hit.
#[derive(Debug, Deserialize, Default)]
pub struct AddressDto {
    /// City name.
    pub city: Option<String>,
    /// Town name.
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
