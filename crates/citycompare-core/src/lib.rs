// crates/citycompare-core/src/lib.rs

//! Resolve two free-text city names against several public data providers,
//! reconcile what they return into one [`CityRecord`] each, and project the
//! comparison onto a map and a set of display panels.
//!
//! ```no_run
//! use citycompare_core::{
//!     AppState, PreferenceStore, ProviderConfig, Providers, RecordingMap, Resolver, Session,
//! };
//!
//! # fn main() -> citycompare_core::Result<()> {
//! let config = ProviderConfig::from_env();
//! let providers = Providers::live(&config).expect("http client");
//! let resolver = Resolver::new(providers, &config);
//! let state = AppState::new(PreferenceStore::open("citycompare.prefs.json"));
//! let mut session = Session::new(resolver, state, RecordingMap::new());
//!
//! let view = session.run_compare("Berlin", "Paris")?;
//! println!("{view}");
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod compare;
pub mod config;
pub mod countries;
pub mod error;
pub mod geo;
pub mod map;
pub mod model;
pub mod prefs;
pub mod providers; // Adapters; live ones behind `http`
pub mod random;
pub mod render;
pub mod resolver;
pub mod session;

// Re-exports
pub use crate::compare::{compare, Comparison};
pub use crate::config::ProviderConfig;
pub use crate::error::{CompareError, ProviderError, Result};
pub use crate::map::{MapSurface, RecordingMap};
pub use crate::model::{CityPair, CityRecord, Coordinates, Side};
pub use crate::prefs::{PreferenceStore, UnitPreference};
pub use crate::providers::Providers;
pub use crate::render::{render, render_error, ComparisonView, ErrorView, View};
pub use crate::resolver::Resolver;
pub use crate::session::{AppState, Session, Ticket};
