// crates/citycompare-core/tests/resolver.rs
mod common;

use citycompare_core::config::MIN_PAIR_DELAY;
use citycompare_core::model::GrowthPoint;
use citycompare_core::CompareError;
use common::{berlin, paris, resolver, FakeWorld, Fixture};
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[test]
fn forward_wikidata_id_wins_over_reverse() {
    let mut city = berlin();
    city.reverse_wikidata = Some("Q1055".into());
    let mut decoy = paris();
    decoy.query = "Decoy".into();
    decoy.forward_wikidata = Some("Q1055".into());
    decoy.population = Some(1);
    let world = Arc::new(FakeWorld::with(vec![decoy, city]));
    let (resolver, _) = resolver(&world);

    let record = resolver.resolve("Berlin").unwrap();
    assert_eq!(record.population(), Some(3_755_251));
}

#[test]
fn reverse_wikidata_id_is_the_fallback() {
    let world = Arc::new(FakeWorld::with(vec![paris()]));
    let (resolver, _) = resolver(&world);

    let record = resolver.resolve("paris").unwrap();
    assert_eq!(record.display_name(), "Paris, Ile-de-France");
    assert_eq!(record.country(), Some("France"));
    assert_eq!(record.population(), Some(2_102_650));
}

#[test]
fn missing_secondary_data_is_absent_not_fatal() {
    let bare = Fixture {
        query: "Nowhereville".into(),
        label: "Nowhereville".into(),
        lat: 10.0,
        lon: 20.0,
        ..Fixture::default()
    };
    let world = Arc::new(FakeWorld::with(vec![bare]));
    let (resolver, _) = resolver(&world);

    let record = resolver.resolve("Nowhereville").unwrap();
    assert_eq!(record.display_name(), "Nowhereville");
    assert_eq!(record.country(), None);
    assert_eq!(record.population(), None);
    assert_eq!(record.area_sq_km(), None);
    assert!(record.timezone().is_none());
    assert!(record.weather().is_none());
    assert!(record.historical_growth().is_none());
    // No id means no population request.
    assert_eq!(world.calls.population.load(Ordering::SeqCst), 0);
}

#[test]
fn area_comes_from_the_bounding_box() {
    let world = Arc::new(FakeWorld::with(vec![berlin()]));
    let (resolver, _) = resolver(&world);

    let area = resolver.resolve("Berlin").unwrap().area_sq_km().unwrap();
    assert!((1_650.0..1_750.0).contains(&area), "area {area}");
    assert_eq!(area, area.round());
}

#[test]
fn growth_uses_the_country_table() {
    let mut world = FakeWorld::with(vec![berlin()]);
    world.growth.insert(
        "DE".into(),
        vec![
            GrowthPoint { year: 2021, percent: 0.2 },
            GrowthPoint { year: 1990, percent: 9.9 },
            GrowthPoint { year: 2020, percent: 0.4 },
        ],
    );
    let world = Arc::new(world);
    let (resolver, _) = resolver(&world);

    let record = resolver.resolve("Berlin").unwrap();
    let years: Vec<i32> = record.historical_growth().unwrap().iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2020, 2021]);
}

#[test]
fn unknown_country_skips_growth_request() {
    let mut city = berlin();
    city.country = Some("Atlantis".into());
    let world = Arc::new(FakeWorld::with(vec![city]));
    let (resolver, _) = resolver(&world);

    let record = resolver.resolve("Berlin").unwrap();
    assert!(record.historical_growth().is_none());
    assert_eq!(world.calls.growth.load(Ordering::SeqCst), 0);
}

#[test]
fn pair_is_paced_by_at_least_one_second() {
    let world = Arc::new(FakeWorld::with(vec![berlin(), paris()]));
    let (resolver, pauses) = resolver(&world);

    let pair = resolver.resolve_pair("Berlin", "Paris").unwrap();
    assert_eq!(pair.first.display_name(), "Berlin, Germany");
    assert_eq!(pair.second.display_name(), "Paris, Ile-de-France");

    let pauses = pauses.lock().unwrap();
    assert_eq!(pauses.len(), 1);
    assert!(pauses[0] >= MIN_PAIR_DELAY);
    assert_eq!(world.calls.geocode.load(Ordering::SeqCst), 2);
}

#[test]
fn not_found_names_the_input() {
    let world = Arc::new(FakeWorld::with(vec![berlin()]));
    let (resolver, pauses) = resolver(&world);

    let err = resolver.resolve_pair("Berlin", "Qwxyzzz").unwrap_err();
    assert!(matches!(&err, CompareError::CityNotFound(name) if name == "Qwxyzzz"));
    assert_eq!(
        err.to_string(),
        "City \"Qwxyzzz\" not found. Please try a different search term."
    );
    assert_eq!(pauses.lock().unwrap().len(), 1);
}

#[test]
fn first_failure_aborts_before_the_pause() {
    let world = Arc::new(FakeWorld::with(vec![paris()]));
    let (resolver, pauses) = resolver(&world);

    assert!(resolver.resolve_pair("Qwxyzzz", "Paris").is_err());
    assert!(pauses.lock().unwrap().is_empty());
    assert_eq!(world.calls.geocode.load(Ordering::SeqCst), 1);
}

#[test]
fn geocoder_outage_is_provider_unavailable() {
    let mut world = FakeWorld::with(vec![berlin()]);
    world.geocoder_down = true;
    let world = Arc::new(world);
    let (resolver, _) = resolver(&world);

    let err = resolver.resolve("Berlin").unwrap_err();
    assert!(matches!(err, CompareError::ProviderUnavailable { provider: "geocoder", .. }));
}

#[test]
fn blank_input_makes_no_request() {
    let world = Arc::new(FakeWorld::with(vec![berlin()]));
    let (resolver, pauses) = resolver(&world);

    let err = resolver.resolve_pair("Berlin", "   ").unwrap_err();
    assert!(matches!(err, CompareError::MalformedInput(_)));
    assert_eq!(world.calls.total(), 0);
    assert!(pauses.lock().unwrap().is_empty());
}
