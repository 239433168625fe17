//! Basic usage example for citycompare-rs
//!
//! This example demonstrates how to:
//! - Build city records by hand (no network needed)
//! - Run the comparison engine
//! - Render the panels and the map in metric and imperial units
//! - Export the map overlays as GeoJSON

use citycompare_core::model::{GrowthPoint, TimezoneInfo, WeatherReading};
use citycompare_core::{
    compare, render, CityPair, CityRecord, Coordinates, RecordingMap, Result, UnitPreference,
};

fn main() -> Result<()> {
    println!("=== citycompare-rs Basic Usage Example ===\n");

    let tokyo = CityRecord::new("Tokyo, Japan", Coordinates::new(35.6762, 139.6503).unwrap())
        .with_country(Some("Japan".into()))
        .with_population(Some(14_094_034))
        .with_area_sq_km(Some(2_194.0))
        .with_weather(Some(WeatherReading { temperature_celsius: 22.4 }))
        .with_timezone(Some(TimezoneInfo {
            gmt_offset_seconds: 9 * 3600,
            zone_name: "Asia/Tokyo".into(),
            local_time: "2024-05-01 21:00:00".into(),
        }))
        .with_historical_growth(Some(vec![
            GrowthPoint { year: 2019, percent: 0.21 },
            GrowthPoint { year: 2020, percent: 0.13 },
            GrowthPoint { year: 2021, percent: -0.05 },
        ]));

    let delhi = CityRecord::new("Delhi, India", Coordinates::new(28.6139, 77.2090).unwrap())
        .with_country(Some("India".into()))
        .with_population(Some(16_787_941))
        .with_area_sq_km(Some(1_484.0))
        .with_timezone(Some(TimezoneInfo {
            gmt_offset_seconds: 19_800,
            zone_name: "Asia/Kolkata".into(),
            local_time: "2024-05-01 17:30:00".into(),
        }));

    let pair = CityPair::new(tokyo, delhi);

    // Example 1: Pure comparison, canonical units
    println!("--- Example 1: Comparison engine ---");
    let comparison = compare(&pair);
    println!("Distance: {:.1} km", comparison.distance_km);
    if let Some(pop) = &comparison.population {
        println!("Population difference: {:.1}%", pop.ratio.percent_diff);
    }
    println!();

    // Example 2: Render in metric
    println!("--- Example 2: Metric view ---");
    let mut map = RecordingMap::new();
    let view = render(&comparison, UnitPreference::default(), &mut map);
    print!("{view}");
    println!();

    // Example 3: Same records, imperial; nothing is refetched or recomputed
    println!("--- Example 3: Imperial view ---");
    let imperial = UnitPreference {
        use_imperial: true,
        ..UnitPreference::default()
    };
    let view = render(&comparison, imperial, &mut map);
    println!("{}", view.distance);
    println!("{}: {}", view.first.name, view.first.area);
    println!("Markers on map: {}, lines: {}", map.markers.len(), map.lines.len());
    println!();

    // Example 4: GeoJSON export
    println!("--- Example 4: GeoJSON ---");
    println!("{}", map.to_geojson());

    Ok(())
}
