// crates/citycompare-core/tests/providers.rs
#![cfg(feature = "http")]

use citycompare_core::providers::{
    ForwardGeocoder, GeocodeError, GrowthSource, PopulationSource, Providers, ReverseGeocoder,
    TimezoneSource, WeatherSource,
};
use citycompare_core::{CompareError, Coordinates, ProviderConfig, Resolver};
use std::sync::Arc;

/// Nothing listens on the discard port, so every request is refused.
const DEAD: &str = "http://127.0.0.1:9";

fn unreachable_config() -> ProviderConfig {
    ProviderConfig {
        nominatim_url: DEAD.into(),
        wikidata_sparql_url: format!("{DEAD}/sparql"),
        timezonedb_url: DEAD.into(),
        openweather_url: DEAD.into(),
        worldbank_url: DEAD.into(),
        timezonedb_key: Some("test-key".into()),
        openweather_key: Some("test-key".into()),
        ..ProviderConfig::default()
    }
}

fn berlin() -> Coordinates {
    Coordinates::new(52.52, 13.405).unwrap()
}

#[test]
fn secondary_adapters_turn_transport_failures_into_absent() {
    let providers = Providers::live(&unreachable_config()).unwrap();

    assert!(providers.reverse.reverse(berlin()).is_none());
    assert!(providers.population.population_of("Q64").is_none());
    assert!(providers.timezone.lookup(berlin()).is_none());
    assert!(providers.weather.current(berlin()).is_none());
    assert!(providers.growth.urban_growth("DE", 2000..=2023).is_none());
}

#[test]
fn keyless_adapters_are_absent() {
    let config = ProviderConfig {
        timezonedb_key: None,
        openweather_key: None,
        ..unreachable_config()
    };
    let providers = Providers::live(&config).unwrap();

    assert!(providers.timezone.lookup(berlin()).is_none());
    assert!(providers.weather.current(berlin()).is_none());
}

#[test]
fn unreachable_geocoder_is_unavailable_not_missing() {
    let providers = Providers::live(&unreachable_config()).unwrap();
    assert!(matches!(
        providers.geocoder.search("Berlin"),
        Err(GeocodeError::Unavailable(_))
    ));
}

#[test]
fn resolver_reports_unreachable_geocoder_as_fatal() {
    let resolver = Resolver::new(
        Providers::live(&unreachable_config()).unwrap(),
        &ProviderConfig::default(),
    )
    .with_pacer(Arc::new(|_| {}));

    let err = resolver.resolve("Berlin").unwrap_err();
    assert!(matches!(err, CompareError::ProviderUnavailable { .. }));
}
