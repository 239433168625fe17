// crates/citycompare-core/src/providers/timezonedb.rs

//! TimezoneDB `get-time-zone` by position.

use crate::error::ProviderError;
use crate::model::TimezoneInfo;
use serde::Deserialize;

#[cfg(feature = "http")]
use super::{absent_on_error, HttpClient, TimezoneSource};
#[cfg(feature = "http")]
use crate::model::Coordinates;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimezoneRaw {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    zone_name: Option<String>,
    #[serde(default)]
    gmt_offset: Option<i64>,
    #[serde(default)]
    formatted: Option<String>,
}

pub fn parse_timezone(body: &str) -> Result<TimezoneInfo, ProviderError> {
    let raw: TimezoneRaw = serde_json::from_str(body)?;
    if raw.status != "OK" {
        return Err(ProviderError::Malformed(format!(
            "status {}: {}",
            raw.status,
            raw.message.unwrap_or_default()
        )));
    }
    let gmt_offset_seconds = raw
        .gmt_offset
        .ok_or_else(|| ProviderError::Malformed("missing gmtOffset".into()))?;
    Ok(TimezoneInfo {
        gmt_offset_seconds,
        zone_name: raw.zone_name.unwrap_or_default(),
        local_time: raw.formatted.unwrap_or_default(),
    })
}

#[cfg(feature = "http")]
pub struct TimezoneDb {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
}

#[cfg(feature = "http")]
impl TimezoneDb {
    pub fn new(http: HttpClient, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[cfg(feature = "http")]
impl TimezoneSource for TimezoneDb {
    fn lookup(&self, at: Coordinates) -> Option<TimezoneInfo> {
        let Some(key) = &self.api_key else {
            tracing::debug!("no TimezoneDB key configured, timezone will be absent");
            return None;
        };
        let url = format!("{}/get-time-zone", self.base_url);
        let query = [
            ("key", key.clone()),
            ("format", "json".to_string()),
            ("by", "position".to_string()),
            ("lat", at.lat().to_string()),
            ("lng", at.lon().to_string()),
        ];
        let result = self
            .http
            .get_text(&url, &query)
            .and_then(|body| parse_timezone(&body))
            .map(Some);
        absent_on_error("timezonedb", result)
    }
}
