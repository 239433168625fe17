// crates/citycompare-core/src/config.rs

//! Provider endpoints, credentials and pacing.
//!
//! Defaults point at the public services; [`ProviderConfig::from_env`]
//! overlays the `CITYCOMPARE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Lower bound for the pause between the two geocoding calls of one pair.
pub const MIN_PAIR_DELAY: Duration = Duration::from_millis(1000);

pub const ENV_TIMEZONEDB_KEY: &str = "CITYCOMPARE_TIMEZONEDB_KEY";
pub const ENV_OPENWEATHER_KEY: &str = "CITYCOMPARE_OPENWEATHER_KEY";
pub const ENV_USER_AGENT: &str = "CITYCOMPARE_USER_AGENT";
pub const ENV_PAIR_DELAY_MS: &str = "CITYCOMPARE_PAIR_DELAY_MS";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub nominatim_url: String,
    pub wikidata_sparql_url: String,
    pub timezonedb_url: String,
    pub openweather_url: String,
    pub worldbank_url: String,
    pub user_agent: String,
    pub timezonedb_key: Option<String>,
    pub openweather_key: Option<String>,
    /// Pause between the first and second resolution, in milliseconds.
    pub pair_delay_ms: u64,
    pub growth_years: RangeInclusive<i32>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            nominatim_url: "https://nominatim.openstreetmap.org".into(),
            wikidata_sparql_url: "https://query.wikidata.org/sparql".into(),
            timezonedb_url: "https://api.timezonedb.com/v2.1".into(),
            openweather_url: "https://api.openweathermap.org/data/2.5".into(),
            worldbank_url: "https://api.worldbank.org/v2".into(),
            user_agent: concat!(
                "CityComparisonApp/",
                env!("CARGO_PKG_VERSION"),
                " (educational project)"
            )
            .into(),
            timezonedb_key: None,
            openweather_key: None,
            pair_delay_ms: MIN_PAIR_DELAY.as_millis() as u64,
            growth_years: 2000..=2023,
        }
    }
}

impl ProviderConfig {
    /// Defaults overlaid with the `CITYCOMPARE_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary lookup; blank values are ignored.
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(key) = get(ENV_TIMEZONEDB_KEY) {
            self.timezonedb_key = Some(key);
        }
        if let Some(key) = get(ENV_OPENWEATHER_KEY) {
            self.openweather_key = Some(key);
        }
        if let Some(agent) = get(ENV_USER_AGENT) {
            self.user_agent = agent;
        }
        if let Some(ms) = get(ENV_PAIR_DELAY_MS) {
            match ms.parse() {
                Ok(ms) => self.pair_delay_ms = ms,
                Err(_) => tracing::warn!(value = %ms, "ignoring invalid {ENV_PAIR_DELAY_MS}"),
            }
        }
        self
    }

    /// The configured pause, never shorter than [`MIN_PAIR_DELAY`].
    pub fn pair_delay(&self) -> Duration {
        Duration::from_millis(self.pair_delay_ms).max(MIN_PAIR_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn overlay_reads_keys_and_ignores_blanks() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_TIMEZONEDB_KEY, "tz-key"),
            (ENV_OPENWEATHER_KEY, "   "),
            (ENV_PAIR_DELAY_MS, "2500"),
        ]);
        let cfg = ProviderConfig::default().overlay(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.timezonedb_key.as_deref(), Some("tz-key"));
        assert_eq!(cfg.openweather_key, None);
        assert_eq!(cfg.pair_delay(), Duration::from_millis(2500));
    }

    #[test]
    fn pair_delay_is_clamped() {
        let cfg = ProviderConfig {
            pair_delay_ms: 10,
            ..ProviderConfig::default()
        };
        assert_eq!(cfg.pair_delay(), MIN_PAIR_DELAY);
    }
}
