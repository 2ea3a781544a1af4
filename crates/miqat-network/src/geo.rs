//! Place labels for a coordinate.
//!
//! Online via OpenStreetMap Nominatim, or offline via a local MaxMind database.

use log::warn;
use miqat_types::{GeoCoordinate, MiqatError};
use serde::{Deserialize, Serialize};

/// Public Nominatim endpoint.
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

const USER_AGENT: &str = concat!("miqat/", env!("CARGO_PKG_VERSION"), " (prayer times)");

const UNKNOWN_COUNTRY: &str = "Unknown Country";
const UNKNOWN_REGION: &str = "Unknown Region";
const CURRENT_LOCATION: &str = "Current Location";

/// A coordinate with the place labels shown in the location picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub coords: GeoCoordinate,
    /// Suburb, town or village.
    pub sub_district: Option<String>,
    /// State, province or city.
    pub region: Option<String>,
    pub country: Option<String>,
}

impl LocationInfo {
    /// A location with no labels at all.
    pub fn unlabelled(coords: GeoCoordinate) -> Self {
        Self {
            coords,
            sub_district: None,
            region: None,
            country: None,
        }
    }

    /// `"sub-district, region, country"`, skipping missing parts, or the
    /// coordinates when nothing is known.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [
            self.sub_district.as_deref(),
            self.region.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            self.coords.to_string()
        } else {
            parts.join(", ")
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    country: Option<String>,
    state: Option<String>,
    city: Option<String>,
    suburb: Option<String>,
    town: Option<String>,
    village: Option<String>,
}

impl NominatimAddress {
    fn into_location(self, coords: GeoCoordinate) -> LocationInfo {
        LocationInfo {
            coords,
            sub_district: Some(
                self.suburb
                    .or(self.town)
                    .or(self.village)
                    .unwrap_or_else(|| CURRENT_LOCATION.to_string()),
            ),
            region: Some(self.state.or(self.city).unwrap_or_else(|| UNKNOWN_REGION.to_string())),
            country: Some(self.country.unwrap_or_else(|| UNKNOWN_COUNTRY.to_string())),
        }
    }
}

/// Reverse geocodes against the public Nominatim service.
///
/// Nominatim allows about one request per second; callers should not poll.
///
/// # Example
/// ```rust,no_run
/// use miqat_network::reverse_geocode;
/// use miqat_types::GeoCoordinate;
///
/// #[tokio::main]
/// async fn main() {
///     let coords = GeoCoordinate::new(-7.8195, 110.3610).unwrap();
///     let info = reverse_geocode(coords).await.unwrap();
///     println!("{}", info.display_name());
/// }
/// ```
pub async fn reverse_geocode(coords: GeoCoordinate) -> Result<LocationInfo, MiqatError> {
    reverse_geocode_with(NOMINATIM_URL, coords).await
}

/// Reverse geocodes against a Nominatim-compatible server at `base_url`.
///
/// Missing address parts get the labels "Unknown Country", "Unknown Region"
/// and "Current Location".
///
/// # Errors
/// `NetworkError` when the request fails, the server answers with a non-success
/// status, or the body is not Nominatim JSON.
pub async fn reverse_geocode_with(base_url: &str, coords: GeoCoordinate) -> Result<LocationInfo, MiqatError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| MiqatError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

    let url = format!("{}/reverse", base_url.trim_end_matches('/'));
    let response = client
        .get(&url)
        .query(&[
            ("format", "json".to_string()),
            ("lat", coords.lat.to_string()),
            ("lon", coords.lng.to_string()),
            ("zoom", "10".to_string()),
        ])
        .send()
        .await
        .map_err(|e| MiqatError::NetworkError(format!("Nominatim request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(MiqatError::NetworkError(format!("Nominatim returned {}", status)));
    }

    let data: NominatimResponse = response
        .json()
        .await
        .map_err(|e| MiqatError::NetworkError(format!("Failed to parse Nominatim response: {}", e)))?;

    Ok(data.address.into_location(coords))
}

/// Like [`reverse_geocode_with`] but never fails: on any error the coordinate is
/// kept and labelled as a GPS fix.
pub async fn reverse_geocode_or_fallback(base_url: &str, coords: GeoCoordinate) -> LocationInfo {
    match reverse_geocode_with(base_url, coords).await {
        Ok(info) => info,
        Err(e) => {
            warn!("reverse geocoding {} failed, using fallback labels: {}", coords, e);
            LocationInfo {
                coords,
                sub_district: Some(CURRENT_LOCATION.to_string()),
                region: Some("GPS Detected".to_string()),
                country: Some("Your Country".to_string()),
            }
        }
    }
}

/// Offline IP geolocation using a MaxMind GeoLite2 City database.
///
/// Nothing leaves the machine; the database file is read locally.
#[cfg(feature = "local-geo")]
pub struct LocalGeoProvider;

#[cfg(feature = "local-geo")]
impl LocalGeoProvider {
    /// Looks up the location of `ip` in the `.mmdb` file at `db_path`.
    ///
    /// # Errors
    /// `DatabaseError` if the database cannot be opened, the lookup fails,
    /// or the record carries no usable coordinates.
    pub fn lookup(ip: std::net::IpAddr, db_path: &std::path::Path) -> Result<LocationInfo, MiqatError> {
        use maxminddb::{geoip2, Reader};

        let reader = Reader::open_readfile(db_path)
            .map_err(|e| MiqatError::DatabaseError(format!("Failed to open MaxMind DB at {:?}: {}", db_path, e)))?;

        let city: geoip2::City = reader
            .lookup(ip)
            .map_err(|e| MiqatError::DatabaseError(format!("IP lookup failed for {}: {}", ip, e)))?;

        let location = city
            .location
            .ok_or_else(|| MiqatError::DatabaseError(format!("No location data for IP {}", ip)))?;
        let (lat, lng) = location
            .latitude
            .zip(location.longitude)
            .ok_or_else(|| MiqatError::DatabaseError(format!("No coordinates for IP {}", ip)))?;
        let coords = GeoCoordinate::new(lat, lng)?;

        Ok(LocationInfo {
            coords,
            sub_district: city
                .city
                .and_then(|c| c.names)
                .and_then(|n| n.get("en").map(|s| s.to_string())),
            region: city
                .subdivisions
                .and_then(|s| s.into_iter().next())
                .and_then(|s| s.names)
                .and_then(|n| n.get("en").map(|s| s.to_string())),
            country: city
                .country
                .and_then(|c| c.names)
                .and_then(|n| n.get("en").map(|s| s.to_string())),
        })
    }
}
