// crates/citycompare-core/src/providers/worldbank.rs

//! World Bank indicator API: urban population growth (`SP.URB.GROW`).

use crate::error::ProviderError;
use crate::model::GrowthPoint;
use serde::Deserialize;

#[cfg(feature = "http")]
use super::{absent_on_error, GrowthSource, HttpClient};
#[cfg(feature = "http")]
use std::ops::RangeInclusive;

pub const URBAN_GROWTH_INDICATOR: &str = "SP.URB.GROW";

#[derive(Debug, Deserialize)]
struct ObservationRaw {
    date: String,
    #[serde(default)]
    value: Option<f64>,
}

/// Parse `[meta, [observations]]`, skipping null values and sorting by year.
///
/// An error payload (`[{"message": [...]}]`) or an empty page is `Ok(None)`.
pub fn parse_growth(body: &str) -> Result<Option<Vec<GrowthPoint>>, ProviderError> {
    let pages: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let observations = match pages.into_iter().nth(1) {
        Some(serde_json::Value::Array(items)) => items,
        _ => return Ok(None),
    };

    let mut points = Vec::with_capacity(observations.len());
    for item in observations {
        let obs: ObservationRaw = serde_json::from_value(item)?;
        let Some(percent) = obs.value.filter(|v| v.is_finite()) else {
            continue;
        };
        let year = obs
            .date
            .trim()
            .parse()
            .map_err(|_| ProviderError::Malformed(format!("year {:?}", obs.date)))?;
        points.push(GrowthPoint { year, percent });
    }
    points.sort_by_key(|p| p.year);
    Ok((!points.is_empty()).then_some(points))
}

#[cfg(feature = "http")]
pub struct WorldBank {
    http: HttpClient,
    base_url: String,
}

#[cfg(feature = "http")]
impl WorldBank {
    pub fn new(http: HttpClient, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(feature = "http")]
impl GrowthSource for WorldBank {
    fn urban_growth(
        &self,
        country_code: &str,
        years: RangeInclusive<i32>,
    ) -> Option<Vec<GrowthPoint>> {
        let url = format!(
            "{}/country/{}/indicator/{}",
            self.base_url,
            country_code.to_ascii_lowercase(),
            URBAN_GROWTH_INDICATOR
        );
        let query = [
            ("date", format!("{}:{}", years.start(), years.end())),
            ("format", "json".to_string()),
            ("per_page", "100".to_string()),
        ];
        let result = self
            .http
            .get_text(&url, &query)
            .and_then(|body| parse_growth(&body));
        absent_on_error("worldbank", result)
    }
}
