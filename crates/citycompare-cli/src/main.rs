//! citycompare: compare two cities from the terminal
//!
//! Resolves both names against the public geo providers, then prints the
//! city panels, the distance and every comparison that the available data
//! allows.
//!
//! Usage examples
//! --------------
//!
//! - Compare two cities
//!   $ citycompare compare Berlin Paris
//!
//! - Same, as JSON, and dump the map overlays
//!   $ citycompare compare Tokyo "New York" --json --geojson map.json
//!
//! - Random pair, keeping one side fixed
//!   $ citycompare random --keep-first Lagos
//!
//! - Switch to imperial units for every later run
//!   $ citycompare settings --imperial true
//!
//! - Interactive session (unit toggles re-render without refetching)
//!   $ citycompare session
//!
//! Configuration
//! -------------
//!
//! API keys are read from `CITYCOMPARE_TIMEZONEDB_KEY` and
//! `CITYCOMPARE_OPENWEATHER_KEY`; without them the time zone and weather
//! panels read "not available". Logging goes to stderr and is controlled
//! by `RUST_LOG` (e.g. `RUST_LOG=citycompare_core=debug`).
mod args;
mod repl;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use citycompare_core::random::{pick_pair, Slot};
use citycompare_core::{
    AppState, PreferenceStore, ProviderConfig, Providers, RecordingMap, Resolver, Session,
    UnitPreference, View,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const PREFS_ENV: &str = "CITYCOMPARE_PREFS";
const DEFAULT_PREFS_FILE: &str = "citycompare.prefs.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let prefs_path = args.prefs.clone().unwrap_or_else(default_prefs_path);
    let mut config = ProviderConfig::from_env();
    if let Some(ms) = args.delay_ms {
        config.pair_delay_ms = ms;
    }
    tracing::debug!(
        prefs = %prefs_path.display(),
        pair_delay_ms = config.pair_delay().as_millis() as u64,
        "configuration loaded"
    );

    match args.command {
        Commands::Settings { dark_mode, imperial } => {
            let mut store = PreferenceStore::open(&prefs_path);
            if let Some(on) = dark_mode {
                store.set_dark_mode(on)?;
            }
            if let Some(on) = imperial {
                store.set_imperial(on)?;
            }
            print_prefs(store.get(), &prefs_path);
        }

        Commands::Compare {
            first,
            second,
            json,
            geojson,
        } => {
            let mut session = build_session(&config, &prefs_path)?;
            let view = session.run_compare(&first, &second)?;
            print_view(&view, json)?;
            if let (Some(path), View::Comparison(_)) = (geojson, &view) {
                write_geojson(session.map(), &path)?;
            }
        }

        Commands::Random {
            keep_first,
            keep_second,
            json,
        } => {
            let (first, second) = pick_pair(
                &mut rand::rng(),
                slot(keep_first.as_deref()),
                slot(keep_second.as_deref()),
            );
            eprintln!("Comparing {first} and {second}");
            let mut session = build_session(&config, &prefs_path)?;
            let view = session.run_compare(&first, &second)?;
            print_view(&view, json)?;
        }

        Commands::Session => {
            let session = build_session(&config, &prefs_path)?;
            repl::run(session)?;
        }
    }

    Ok(())
}

pub(crate) fn slot(keep: Option<&str>) -> Slot<'_> {
    keep.map_or(Slot::Free, Slot::Locked)
}

fn default_prefs_path() -> PathBuf {
    std::env::var_os(PREFS_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PREFS_FILE))
}

#[cfg(feature = "http")]
fn live_providers(config: &ProviderConfig) -> anyhow::Result<Providers> {
    Providers::live(config).context("could not set up the HTTP client")
}

#[cfg(not(feature = "http"))]
fn live_providers(_config: &ProviderConfig) -> anyhow::Result<Providers> {
    anyhow::bail!("citycompare was built without the `http` feature; no providers available")
}

fn build_session(
    config: &ProviderConfig,
    prefs_path: &Path,
) -> anyhow::Result<Session<RecordingMap>> {
    let resolver = Resolver::new(live_providers(config)?, config);
    let state = AppState::new(PreferenceStore::open(prefs_path));
    Ok(Session::new(resolver, state, RecordingMap::new()))
}

fn print_view(view: &View, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}

fn write_geojson(map: &RecordingMap, path: &Path) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(&map.to_geojson())?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    eprintln!("Map written to {}", path.display());
    Ok(())
}

fn print_prefs(prefs: UnitPreference, path: &Path) {
    println!("Preferences ({}):", path.display());
    println!("  Units: {}", if prefs.use_imperial { "imperial" } else { "metric" });
    println!("  Theme: {}", if prefs.is_dark_mode { "dark" } else { "light" });
}
