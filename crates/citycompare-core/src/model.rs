// crates/citycompare-core/src/model.rs

//! # Data Model
//!
//! Provider-agnostic city snapshot. Every value is stored in canonical
//! metric/Celsius form; unit conversion only happens in [`crate::render`].

use serde::{Deserialize, Serialize};

/// A validated WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = String;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lon)
            .ok_or_else(|| format!("coordinate out of range: {}, {}", raw.lat, raw.lon))
    }
}

impl Coordinates {
    /// Returns `None` when either component is non-finite or out of range.
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        valid.then_some(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Bounding box as returned by Nominatim: `[south, north, west, east]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    pub gmt_offset_seconds: i64,
    pub zone_name: String,
    /// Provider-formatted local wall time, `YYYY-MM-DD HH:MM:SS`.
    pub local_time: String,
}

impl TimezoneInfo {
    /// `HH:MM` slice of [`TimezoneInfo::local_time`], if it has the expected shape.
    pub fn clock(&self) -> Option<&str> {
        let time = self.local_time.split_whitespace().nth(1)?;
        time.get(..5).filter(|hm| hm.as_bytes().get(2) == Some(&b':'))
    }
}

/// One year of urban population growth, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: i32,
    pub percent: f64,
}

/// Normalized snapshot of one resolved city.
///
/// Only `display_name` and `coordinates` are guaranteed; every other field
/// is independently optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    display_name: String,
    country: Option<String>,
    population: Option<u64>,
    area_sq_km: Option<f64>,
    coordinates: Coordinates,
    weather: Option<WeatherReading>,
    timezone: Option<TimezoneInfo>,
    historical_growth: Option<Vec<GrowthPoint>>,
}

impl CityRecord {
    pub fn new(display_name: impl Into<String>, coordinates: Coordinates) -> Self {
        Self {
            display_name: display_name.into(),
            country: None,
            population: None,
            area_sq_km: None,
            coordinates,
            weather: None,
            timezone: None,
            historical_growth: None,
        }
    }

    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }

    pub fn with_population(mut self, population: Option<u64>) -> Self {
        self.population = population;
        self
    }

    pub fn with_area_sq_km(mut self, area: Option<f64>) -> Self {
        self.area_sq_km = area.filter(|a| a.is_finite() && *a >= 0.0);
        self
    }

    pub fn with_weather(mut self, weather: Option<WeatherReading>) -> Self {
        self.weather = weather;
        self
    }

    pub fn with_timezone(mut self, timezone: Option<TimezoneInfo>) -> Self {
        self.timezone = timezone;
        self
    }

    /// Stores the series sorted ascending by year; an empty series is absent.
    pub fn with_historical_growth(mut self, growth: Option<Vec<GrowthPoint>>) -> Self {
        self.historical_growth = growth
            .map(|mut points| {
                points.sort_by_key(|p| p.year);
                points
            })
            .filter(|points| !points.is_empty());
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn population(&self) -> Option<u64> {
        self.population
    }

    pub fn area_sq_km(&self) -> Option<f64> {
        self.area_sq_km
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn weather(&self) -> Option<WeatherReading> {
        self.weather
    }

    pub fn timezone(&self) -> Option<&TimezoneInfo> {
        self.timezone.as_ref()
    }

    pub fn historical_growth(&self) -> Option<&[GrowthPoint]> {
        self.historical_growth.as_deref()
    }
}

/// The last resolved pair. At most one is live at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityPair {
    pub first: CityRecord,
    pub second: CityRecord,
}

impl CityPair {
    pub fn new(first: CityRecord, second: CityRecord) -> Self {
        Self { first, second }
    }

    pub fn get(&self, side: Side) -> &CityRecord {
        match side {
            Side::First => &self.first,
            Side::Second => &self.second,
        }
    }
}

/// Which of the two compared cities a label refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Coordinates::new(90.0, 180.0).is_some());
        assert!(Coordinates::new(-90.0, -180.0).is_some());
        assert!(Coordinates::new(90.1, 0.0).is_none());
        assert!(Coordinates::new(0.0, -180.5).is_none());
        assert!(Coordinates::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn deserializing_validates_coordinates() {
        let ok: Coordinates = serde_json::from_str(r#"{"lat": 52.5, "lon": 13.4}"#).unwrap();
        assert_eq!(ok, Coordinates::new(52.5, 13.4).unwrap());

        assert!(serde_json::from_str::<Coordinates>(r#"{"lat": 91.0, "lon": 0.0}"#).is_err());
        let record = r#"{"display_name": "X", "coordinates": {"lat": 0.0, "lon": 20.0}}"#;
        assert!(serde_json::from_str::<CityRecord>(record).is_ok());
        let record = r#"{"display_name": "X", "coordinates": {"lat": 0.0, "lon": 200.0}}"#;
        assert!(serde_json::from_str::<CityRecord>(record).is_err());
    }

    #[test]
    fn growth_is_sorted_and_empty_is_absent() {
        let c = Coordinates::new(0.0, 0.0).unwrap();
        let rec = CityRecord::new("X", c).with_historical_growth(Some(vec![
            GrowthPoint { year: 2002, percent: 1.0 },
            GrowthPoint { year: 2000, percent: 3.0 },
        ]));
        let years: Vec<i32> = rec.historical_growth().unwrap().iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2000, 2002]);

        let empty = CityRecord::new("Y", c).with_historical_growth(Some(Vec::new()));
        assert!(empty.historical_growth().is_none());
    }

    #[test]
    fn clock_slices_formatted_time() {
        let tz = TimezoneInfo {
            gmt_offset_seconds: 3600,
            zone_name: "Europe/Berlin".into(),
            local_time: "2024-05-01 13:45:10".into(),
        };
        assert_eq!(tz.clock(), Some("13:45"));

        let odd = TimezoneInfo {
            local_time: "garbage".into(),
            ..tz
        };
        assert_eq!(odd.clock(), None);
    }
}
