// crates/citycompare-core/src/providers/nominatim.rs

//! OpenStreetMap Nominatim: forward search and reverse lookup.

use super::{GeocodeMatch, ReverseMatch};
use crate::error::ProviderError;
use crate::model::{BoundingBox, Coordinates};
use serde::Deserialize;

#[cfg(feature = "http")]
use super::{absent_on_error, ForwardGeocoder, GeocodeError, HttpClient, ReverseGeocoder};

// -----------------------------------------------------------------------------
// RAW RESPONSE SHAPES
// -----------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct ExtraTagsRaw {
    #[serde(default)]
    wikidata: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AddressRaw {
    #[serde(default)]
    country: Option<String>,
}

/// One element of the `/search` array.
#[derive(Debug, Deserialize)]
struct PlaceRaw {
    display_name: String,
    lat: String,
    lon: String,
    /// `[south, north, west, east]` as decimal strings.
    #[serde(default)]
    boundingbox: Option<Vec<String>>,
    #[serde(default)]
    extratags: Option<ExtraTagsRaw>,
}

/// The `/reverse` object. On failure Nominatim answers `{"error": "..."}`,
/// which simply leaves every field empty.
#[derive(Debug, Default, Deserialize)]
struct ReverseRaw {
    #[serde(default)]
    address: Option<AddressRaw>,
    #[serde(default)]
    extratags: Option<ExtraTagsRaw>,
    #[serde(default)]
    error: Option<String>,
}

// -----------------------------------------------------------------------------
// PARSING
// -----------------------------------------------------------------------------

/// Parse a `/search` body; `Ok(None)` when the array is empty.
pub fn parse_search(body: &str) -> Result<Option<GeocodeMatch>, ProviderError> {
    let places: Vec<PlaceRaw> = serde_json::from_str(body)?;
    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let lat = super::parse_number(&place.lat);
    let lon = super::parse_number(&place.lon);
    let coordinates = lat
        .zip(lon)
        .and_then(|(lat, lon)| Coordinates::new(lat, lon))
        .ok_or_else(|| {
            ProviderError::Malformed(format!("invalid coordinate {}, {}", place.lat, place.lon))
        })?;

    Ok(Some(GeocodeMatch {
        display_name: place.display_name,
        coordinates,
        bounding_box: place.boundingbox.as_deref().and_then(parse_bbox),
        wikidata_id: place.extratags.and_then(|t| t.wikidata).filter(|id| !id.is_empty()),
    }))
}

pub fn parse_reverse(body: &str) -> Result<ReverseMatch, ProviderError> {
    let raw: ReverseRaw = serde_json::from_str(body)?;
    if let Some(error) = &raw.error {
        tracing::debug!(%error, "reverse lookup returned no address");
    }
    Ok(ReverseMatch {
        country: raw.address.and_then(|a| a.country).filter(|c| !c.trim().is_empty()),
        wikidata_id: raw.extratags.and_then(|t| t.wikidata).filter(|id| !id.is_empty()),
    })
}

fn parse_bbox(values: &[String]) -> Option<BoundingBox> {
    let [south, north, west, east] = values else {
        return None;
    };
    Some(BoundingBox {
        south: super::parse_number(south)?,
        north: super::parse_number(north)?,
        west: super::parse_number(west)?,
        east: super::parse_number(east)?,
    })
}

// -----------------------------------------------------------------------------
// LIVE ADAPTER
// -----------------------------------------------------------------------------

#[cfg(feature = "http")]
pub struct Nominatim {
    http: HttpClient,
    base_url: String,
}

#[cfg(feature = "http")]
impl Nominatim {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(feature = "http")]
impl ForwardGeocoder for Nominatim {
    fn search(&self, name: &str) -> Result<GeocodeMatch, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let query = [
            ("format", "jsonv2".to_string()),
            ("q", name.to_string()),
            ("limit", "1".to_string()),
            ("addressdetails", "1".to_string()),
            ("extratags", "1".to_string()),
            ("namedetails", "1".to_string()),
            ("accept-language", "en".to_string()),
            ("featuretype", "city".to_string()),
        ];
        let body = self.http.get_text(&url, &query)?;
        parse_search(&body)?.ok_or(GeocodeError::NotFound)
    }
}

#[cfg(feature = "http")]
impl ReverseGeocoder for Nominatim {
    fn reverse(&self, at: Coordinates) -> Option<ReverseMatch> {
        let url = format!("{}/reverse", self.base_url);
        let query = [
            ("format", "jsonv2".to_string()),
            ("lat", at.lat().to_string()),
            ("lon", at.lon().to_string()),
            ("zoom", "10".to_string()),
            ("addressdetails", "1".to_string()),
            ("extratags", "1".to_string()),
        ];
        let result = self
            .http
            .get_text(&url, &query)
            .and_then(|body| parse_reverse(&body))
            .map(Some);
        absent_on_error("nominatim-reverse", result)
    }
}
