//! Error handling example for citycompare-rs
//!
//! This example demonstrates how failures surface. It talks to the live
//! providers, so it needs network access.

use citycompare_core::resolver::validate_pair;
use citycompare_core::{
    AppState, CompareError, PreferenceStore, ProviderConfig, Providers, RecordingMap, Resolver,
    Result, Session, UnitPreference, View,
};

fn main() -> Result<()> {
    println!("=== citycompare-rs Error Handling Example ===\n");

    // Example 1: Blank input is rejected before any request
    println!("--- Example 1: Blank input ---");
    for (a, b) in [("", "Paris"), ("Berlin", "   ")] {
        match validate_pair(a, b) {
            Ok(_) => println!("  accepted: {a:?} / {b:?}"),
            Err(e) => println!("  rejected {a:?} / {b:?}: {e}"),
        }
    }
    println!();

    // Example 2: Setting up the live providers
    println!("--- Example 2: Live providers ---");
    let config = ProviderConfig::from_env();
    let providers = match Providers::live(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("✗ Could not build HTTP client: {e}");
            return Ok(());
        }
    };
    if config.timezonedb_key.is_none() || config.openweather_key.is_none() {
        println!("  Some API keys are missing; those panels will read \"not available\".");
    }
    let resolver = Resolver::new(providers, &config);
    let state = AppState::new(PreferenceStore::in_memory(UnitPreference::default()));
    let mut session = Session::new(resolver, state, RecordingMap::new());
    println!();

    // Example 3: A name the geocoder does not know
    println!("--- Example 3: Unknown city ---");
    match session.run_compare("Berlin", "Qwxyzzzplonk") {
        Ok(View::Error(e)) => {
            println!("  left panel:  {}", e.first);
            println!("  right panel: {}", e.second);
            println!("  map untouched: {}", session.map().is_empty());
        }
        Ok(View::Comparison(_)) => println!("  unexpectedly found a match"),
        Err(CompareError::MalformedInput(msg)) => println!("  malformed: {msg}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 4: Toggling units with nothing resolved does nothing
    println!("--- Example 4: Toggle without a pair ---");
    match session.toggle_units()? {
        Some(view) => println!("  re-rendered: {}", view.distance),
        None => println!("  nothing to re-render"),
    }

    Ok(())
}
