// crates/citycompare-core/tests/common/mod.rs
#![allow(dead_code)]

use citycompare_core::common::fold_key;
use citycompare_core::model::{BoundingBox, GrowthPoint, TimezoneInfo, WeatherReading};
use citycompare_core::providers::{
    ForwardGeocoder, GeocodeError, GeocodeMatch, GrowthSource, PopulationSource, ReverseGeocoder,
    ReverseMatch, TimezoneSource, WeatherSource,
};
use citycompare_core::{Coordinates, ProviderConfig, ProviderError, Providers, Resolver};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Everything the fake providers know about one city.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub query: String,
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub bbox: Option<BoundingBox>,
    pub forward_wikidata: Option<String>,
    pub reverse_wikidata: Option<String>,
    pub country: Option<String>,
    pub population: Option<u64>,
    pub timezone: Option<TimezoneInfo>,
    pub temperature_c: Option<f64>,
}

impl Fixture {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon).expect("fixture coordinates")
    }
}

pub fn tz(offset: i64, zone: &str) -> TimezoneInfo {
    TimezoneInfo {
        gmt_offset_seconds: offset,
        zone_name: zone.to_string(),
        local_time: "2024-05-01 12:00:00".to_string(),
    }
}

pub fn berlin() -> Fixture {
    Fixture {
        query: "Berlin".into(),
        label: "Berlin, Germany".into(),
        lat: 52.5170365,
        lon: 13.3888599,
        bbox: Some(BoundingBox {
            south: 52.3382448,
            north: 52.6755087,
            west: 13.0883450,
            east: 13.7611609,
        }),
        forward_wikidata: Some("Q64".into()),
        reverse_wikidata: None,
        country: Some("Germany".into()),
        population: Some(3_755_251),
        timezone: Some(tz(7_200, "Europe/Berlin")),
        temperature_c: Some(18.5),
    }
}

pub fn paris() -> Fixture {
    Fixture {
        query: "Paris".into(),
        label: "Paris, Ile-de-France, Metropolitan France, France".into(),
        lat: 48.8588897,
        lon: 2.3200410,
        bbox: Some(BoundingBox {
            south: 48.8155755,
            north: 48.9021560,
            west: 2.2241220,
            east: 2.4697602,
        }),
        forward_wikidata: None,
        reverse_wikidata: Some("Q90".into()),
        country: Some("France".into()),
        population: Some(2_102_650),
        timezone: Some(tz(7_200, "Europe/Paris")),
        temperature_c: Some(21.0),
    }
}

#[derive(Default)]
pub struct Counters {
    pub geocode: AtomicUsize,
    pub reverse: AtomicUsize,
    pub population: AtomicUsize,
    pub timezone: AtomicUsize,
    pub weather: AtomicUsize,
    pub growth: AtomicUsize,
}

impl Counters {
    pub fn total(&self) -> usize {
        [
            &self.geocode,
            &self.reverse,
            &self.population,
            &self.timezone,
            &self.weather,
            &self.growth,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

/// A set of fake providers answering from fixtures.
#[derive(Default)]
pub struct FakeWorld {
    pub cities: Vec<Fixture>,
    pub growth: HashMap<String, Vec<GrowthPoint>>,
    pub geocoder_down: bool,
    pub calls: Counters,
}

impl FakeWorld {
    pub fn with(cities: Vec<Fixture>) -> Self {
        Self {
            cities,
            ..Self::default()
        }
    }

    fn at(&self, c: Coordinates) -> Option<&Fixture> {
        self.cities.iter().find(|f| f.lat == c.lat() && f.lon == c.lon())
    }

    pub fn providers(self: &Arc<Self>) -> Providers {
        Providers {
            geocoder: self.clone(),
            reverse: self.clone(),
            population: self.clone(),
            timezone: self.clone(),
            weather: self.clone(),
            growth: self.clone(),
        }
    }
}

impl ForwardGeocoder for FakeWorld {
    fn search(&self, name: &str) -> Result<GeocodeMatch, GeocodeError> {
        self.calls.geocode.fetch_add(1, Ordering::SeqCst);
        if self.geocoder_down {
            return Err(GeocodeError::Unavailable(ProviderError::Status(503)));
        }
        let f = self
            .cities
            .iter()
            .find(|f| fold_key(&f.query) == fold_key(name))
            .ok_or(GeocodeError::NotFound)?;
        Ok(GeocodeMatch {
            display_name: f.label.clone(),
            coordinates: f.coordinates(),
            bounding_box: f.bbox,
            wikidata_id: f.forward_wikidata.clone(),
        })
    }
}

impl ReverseGeocoder for FakeWorld {
    fn reverse(&self, at: Coordinates) -> Option<ReverseMatch> {
        self.calls.reverse.fetch_add(1, Ordering::SeqCst);
        self.at(at).map(|f| ReverseMatch {
            country: f.country.clone(),
            wikidata_id: f.reverse_wikidata.clone(),
        })
    }
}

impl PopulationSource for FakeWorld {
    fn population_of(&self, wikidata_id: &str) -> Option<u64> {
        self.calls.population.fetch_add(1, Ordering::SeqCst);
        self.cities
            .iter()
            .find(|f| {
                f.forward_wikidata.as_deref() == Some(wikidata_id)
                    || f.reverse_wikidata.as_deref() == Some(wikidata_id)
            })
            .and_then(|f| f.population)
    }
}

impl TimezoneSource for FakeWorld {
    fn lookup(&self, at: Coordinates) -> Option<TimezoneInfo> {
        self.calls.timezone.fetch_add(1, Ordering::SeqCst);
        self.at(at).and_then(|f| f.timezone.clone())
    }
}

impl WeatherSource for FakeWorld {
    fn current(&self, at: Coordinates) -> Option<WeatherReading> {
        self.calls.weather.fetch_add(1, Ordering::SeqCst);
        self.at(at)
            .and_then(|f| f.temperature_c)
            .map(|temperature_celsius| WeatherReading { temperature_celsius })
    }
}

impl GrowthSource for FakeWorld {
    fn urban_growth(
        &self,
        country_code: &str,
        years: RangeInclusive<i32>,
    ) -> Option<Vec<GrowthPoint>> {
        self.calls.growth.fetch_add(1, Ordering::SeqCst);
        let points: Vec<GrowthPoint> = self
            .growth
            .get(country_code)?
            .iter()
            .copied()
            .filter(|p| years.contains(&p.year))
            .collect();
        (!points.is_empty()).then_some(points)
    }
}

pub type Pauses = Arc<Mutex<Vec<Duration>>>;

/// A resolver over `world` whose pacer records pauses instead of sleeping.
pub fn resolver(world: &Arc<FakeWorld>) -> (Resolver, Pauses) {
    let pauses: Pauses = Arc::default();
    let sink = pauses.clone();
    let resolver = Resolver::new(world.providers(), &ProviderConfig::default())
        .with_pacer(Arc::new(move |d| sink.lock().expect("pauses lock").push(d)));
    (resolver, pauses)
}
