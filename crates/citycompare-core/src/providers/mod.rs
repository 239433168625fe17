// crates/citycompare-core/src/providers/mod.rs

//! # Provider Adapters
//!
//! One trait per external data source. Secondary adapters return `Option`:
//! every transport, status or decoding failure is logged at `warn` and turned
//! into an absent value, so the caller only ever branches on presence.
//!
//! The forward geocoder is the exception. Without a coordinate there is no
//! record at all, so it reports [`GeocodeError`] and the resolver aborts.
//!
//! Response parsing lives next to each adapter as plain functions over the
//! body text, so it is testable without the `http` feature.

use crate::error::ProviderError;
use crate::model::{BoundingBox, Coordinates, GrowthPoint, TimezoneInfo, WeatherReading};
use std::ops::RangeInclusive;
use std::sync::Arc;

pub mod nominatim;
pub mod openweather;
pub mod timezonedb;
pub mod wikidata;
pub mod worldbank;

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::HttpClient;

/// Best forward-geocode match for a free-text name.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeMatch {
    /// Full label, e.g. `"Berlin, Germany"`.
    pub display_name: String,
    pub coordinates: Coordinates,
    pub bounding_box: Option<BoundingBox>,
    pub wikidata_id: Option<String>,
}

/// Address details for a coordinate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseMatch {
    pub country: Option<String>,
    pub wikidata_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("no match")]
    NotFound,
    #[error(transparent)]
    Unavailable(#[from] ProviderError),
}

pub trait ForwardGeocoder: Send + Sync {
    /// First match for `name`; the provider is trusted to rank.
    fn search(&self, name: &str) -> Result<GeocodeMatch, GeocodeError>;
}

pub trait ReverseGeocoder: Send + Sync {
    fn reverse(&self, at: Coordinates) -> Option<ReverseMatch>;
}

pub trait PopulationSource: Send + Sync {
    /// Most recent population statement for a Wikidata entity (`Q64`).
    fn population_of(&self, wikidata_id: &str) -> Option<u64>;
}

pub trait TimezoneSource: Send + Sync {
    fn lookup(&self, at: Coordinates) -> Option<TimezoneInfo>;
}

pub trait WeatherSource: Send + Sync {
    fn current(&self, at: Coordinates) -> Option<WeatherReading>;
}

pub trait GrowthSource: Send + Sync {
    /// Yearly urban population growth for an ISO 3166-1 alpha-2 code.
    fn urban_growth(
        &self,
        country_code: &str,
        years: RangeInclusive<i32>,
    ) -> Option<Vec<GrowthPoint>>;
}

/// The full set of adapters one resolver talks to.
#[derive(Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn ForwardGeocoder>,
    pub reverse: Arc<dyn ReverseGeocoder>,
    pub population: Arc<dyn PopulationSource>,
    pub timezone: Arc<dyn TimezoneSource>,
    pub weather: Arc<dyn WeatherSource>,
    pub growth: Arc<dyn GrowthSource>,
}

#[cfg(feature = "http")]
impl Providers {
    /// Live adapters sharing one HTTP client.
    pub fn live(config: &crate::config::ProviderConfig) -> Result<Self, ProviderError> {
        let http = HttpClient::new(&config.user_agent)?;
        let nominatim = Arc::new(nominatim::Nominatim::new(http.clone(), &config.nominatim_url));
        Ok(Self {
            geocoder: nominatim.clone(),
            reverse: nominatim,
            population: Arc::new(wikidata::Wikidata::new(
                http.clone(),
                &config.wikidata_sparql_url,
            )),
            timezone: Arc::new(timezonedb::TimezoneDb::new(
                http.clone(),
                &config.timezonedb_url,
                config.timezonedb_key.clone(),
            )),
            weather: Arc::new(openweather::OpenWeather::new(
                http.clone(),
                &config.openweather_url,
                config.openweather_key.clone(),
            )),
            growth: Arc::new(worldbank::WorldBank::new(http, &config.worldbank_url)),
        })
    }
}

/// Log a swallowed provider failure and turn it into an absent value.
#[cfg_attr(not(feature = "http"), allow(dead_code))]
pub(crate) fn absent_on_error<T>(
    provider: &'static str,
    result: Result<Option<T>, ProviderError>,
) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(provider, %error, "provider failed, field will be absent");
            None
        }
    }
}

/// Parse a JSON number that providers sometimes send as a string.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
