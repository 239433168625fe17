use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for citycompare
#[derive(Debug, Parser)]
#[command(
    name = "citycompare",
    version,
    about = "Compare two cities side by side: distance, population, area, time zones, weather and growth"
)]
pub struct CliArgs {
    /// Preference file (default: $CITYCOMPARE_PREFS or ./citycompare.prefs.json)
    #[arg(long = "prefs", global = true, value_name = "PATH")]
    pub prefs: Option<PathBuf>,

    /// Pause between the two city lookups in milliseconds (never below 1000)
    #[arg(long = "delay-ms", global = true, value_name = "MS")]
    pub delay_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare two cities
    Compare {
        /// First city (e.g. "Berlin")
        first: String,
        /// Second city (e.g. "Paris")
        second: String,
        /// Print the rendered view as JSON
        #[arg(long)]
        json: bool,
        /// Write the map overlays (markers and line) as GeoJSON
        #[arg(long, value_name = "PATH")]
        geojson: Option<PathBuf>,
    },

    /// Compare a random pair of major cities
    Random {
        /// Keep this city in the first slot
        #[arg(long, value_name = "CITY")]
        keep_first: Option<String>,
        /// Keep this city in the second slot
        #[arg(long, value_name = "CITY")]
        keep_second: Option<String>,
        /// Print the rendered view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change the stored display preferences
    Settings {
        /// Dark theme on or off
        #[arg(long, value_name = "BOOL")]
        dark_mode: Option<bool>,
        /// Imperial units (miles, sq mi, °F) on or off
        #[arg(long, value_name = "BOOL")]
        imperial: Option<bool>,
    },

    /// Interactive session: compare, toggle units and re-render without refetching
    Session,
}
