// crates/citycompare-core/src/resolver.rs

//! # City Record Resolver
//!
//! Turns one free-text name into one [`CityRecord`] by fanning out to the
//! provider adapters and reconciling what comes back:
//!
//! | field        | source, in precedence order                         |
//! |--------------|-----------------------------------------------------|
//! | coordinates  | forward geocode (required)                          |
//! | country      | reverse geocode, else absent                        |
//! | wikidata id  | forward `extratags`, else reverse `extratags`       |
//! | population   | Wikidata, via the id above                          |
//! | area         | forward bounding box, approximated at the latitude  |
//! | timezone     | TimezoneDB (joined with weather)                    |
//! | weather      | OpenWeatherMap (joined with timezone)               |
//! | growth       | World Bank, via the static country table            |

use crate::config::ProviderConfig;
use crate::countries::code_for_country;
use crate::error::{CompareError, Result};
use crate::geo::bbox_area_sq_km;
use crate::model::{CityPair, CityRecord};
use crate::providers::{GeocodeError, GeocodeMatch, Providers};
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

/// Called with the pause between the two resolutions of a pair.
pub type Pacer = Arc<dyn Fn(Duration) + Send + Sync>;

pub struct Resolver {
    providers: Providers,
    growth_years: RangeInclusive<i32>,
    pair_delay: Duration,
    pacer: Pacer,
}

impl Resolver {
    pub fn new(providers: Providers, config: &ProviderConfig) -> Self {
        Self {
            providers,
            growth_years: config.growth_years.clone(),
            pair_delay: config.pair_delay(),
            pacer: Arc::new(std::thread::sleep),
        }
    }

    /// Replace the sleeping pacer (tests record the pause instead).
    pub fn with_pacer(mut self, pacer: Pacer) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn pair_delay(&self) -> Duration {
        self.pair_delay
    }

    /// Resolve a single name.
    pub fn resolve(&self, name: &str) -> Result<CityRecord> {
        let name = validate_name(name)?;
        let found = self.providers.geocoder.search(name).map_err(|e| match e {
            GeocodeError::NotFound => CompareError::CityNotFound(name.to_string()),
            GeocodeError::Unavailable(source) => CompareError::ProviderUnavailable {
                provider: "geocoder",
                reason: source.to_string(),
            },
        })?;
        tracing::debug!(query = name, label = %found.display_name, "geocoded");
        Ok(self.augment(found))
    }

    /// Resolve both names sequentially with the fixed pause in between.
    ///
    /// Both names are validated before the first request goes out; a fatal
    /// error on either city aborts the pair.
    pub fn resolve_pair(&self, first: &str, second: &str) -> Result<CityPair> {
        let (first, second) = validate_pair(first, second)?;
        let first = self.resolve(first)?;
        (self.pacer)(self.pair_delay);
        let second = self.resolve(second)?;
        Ok(CityPair::new(first, second))
    }

    fn augment(&self, found: GeocodeMatch) -> CityRecord {
        let coords = found.coordinates;
        let p = &self.providers;

        let reverse = p.reverse.reverse(coords).unwrap_or_default();
        let country = reverse.country;

        let wikidata_id = found.wikidata_id.or(reverse.wikidata_id);
        let population = wikidata_id.as_deref().and_then(|id| p.population.population_of(id));

        let area = found
            .bounding_box
            .map(|bbox| bbox_area_sq_km(&bbox, coords.lat()));

        let (timezone, weather) = std::thread::scope(|s| {
            let timezone = s.spawn(|| p.timezone.lookup(coords));
            let weather = p.weather.current(coords);
            let timezone = timezone.join().unwrap_or_else(|_| {
                tracing::warn!("timezone lookup panicked, timezone will be absent");
                None
            });
            (timezone, weather)
        });

        let growth = match country.as_deref().map(|c| (c, code_for_country(c))) {
            Some((_, Some(code))) => p.growth.urban_growth(code, self.growth_years.clone()),
            Some((name, None)) => {
                tracing::debug!(country = name, "no indicator code for country, growth absent");
                None
            }
            None => None,
        };

        let record = CityRecord::new(display_name(&found.display_name), coords)
            .with_country(country)
            .with_population(population)
            .with_area_sq_km(area)
            .with_timezone(timezone)
            .with_weather(weather)
            .with_historical_growth(growth);

        tracing::info!(
            city = record.display_name(),
            country = record.country(),
            population = record.population(),
            area_sq_km = record.area_sq_km(),
            "resolved city"
        );
        record
    }
}

/// Trimmed, non-empty name or [`CompareError::MalformedInput`].
pub fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CompareError::MalformedInput("City name must not be empty".into()));
    }
    Ok(trimmed)
}

/// Both names trimmed, or one [`CompareError::MalformedInput`] for the pair.
pub fn validate_pair<'a>(first: &'a str, second: &'a str) -> Result<(&'a str, &'a str)> {
    match (validate_name(first), validate_name(second)) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        _ => Err(CompareError::MalformedInput("Please enter both city names".into())),
    }
}

/// `"Paris, Ile-de-France, France"` -> `"Paris, Ile-de-France"`.
///
/// The first comma token is the label; the second, when non-empty, is kept
/// as a region qualifier.
pub fn display_name(full_label: &str) -> String {
    let mut parts = full_label.split(',').map(str::trim);
    let primary = parts.next().unwrap_or_default();
    match parts.next().filter(|region| !region.is_empty()) {
        Some(region) => format!("{primary}, {region}"),
        None => primary.to_string(),
    }
}
