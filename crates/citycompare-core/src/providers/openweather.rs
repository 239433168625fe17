// crates/citycompare-core/src/providers/openweather.rs

//! OpenWeatherMap current conditions, metric units.

use crate::error::ProviderError;
use crate::model::WeatherReading;
use serde::Deserialize;

#[cfg(feature = "http")]
use super::{absent_on_error, HttpClient, WeatherSource};
#[cfg(feature = "http")]
use crate::model::Coordinates;

#[derive(Debug, Deserialize)]
struct WeatherRaw {
    main: MainRaw,
}

#[derive(Debug, Deserialize)]
struct MainRaw {
    temp: f64,
}

pub fn parse_weather(body: &str) -> Result<WeatherReading, ProviderError> {
    let raw: WeatherRaw = serde_json::from_str(body)?;
    if !raw.main.temp.is_finite() {
        return Err(ProviderError::Malformed("non-finite temperature".into()));
    }
    Ok(WeatherReading {
        temperature_celsius: raw.main.temp,
    })
}

#[cfg(feature = "http")]
pub struct OpenWeather {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

#[cfg(feature = "http")]
impl OpenWeather {
    pub fn new(http: HttpClient, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[cfg(feature = "http")]
impl WeatherSource for OpenWeather {
    fn current(&self, at: Coordinates) -> Option<WeatherReading> {
        let Some(key) = &self.api_key else {
            tracing::debug!("no OpenWeatherMap key configured, weather will be absent");
            return None;
        };
        let url = format!("{}/weather", self.base_url);
        let query = [
            ("lat", at.lat().to_string()),
            ("lon", at.lon().to_string()),
            ("units", "metric".to_string()),
            ("appid", key.clone()),
        ];
        let result = self
            .http
            .get_text(&url, &query)
            .and_then(|body| parse_weather(&body))
            .map(Some);
        absent_on_error("openweathermap", result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_main_temp() {
        let body = r#"{"coord": {"lon": 13.4, "lat": 52.5}, "main": {"temp": 17.25, "humidity": 40}, "cod": 200}"#;
        assert_eq!(parse_weather(body).unwrap().temperature_celsius, 17.25);
    }

    #[test]
    fn missing_main_is_an_error() {
        assert!(parse_weather(r#"{"cod": "401", "message": "Invalid API key"}"#).is_err());
    }
}
