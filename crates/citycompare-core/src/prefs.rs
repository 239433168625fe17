// crates/citycompare-core/src/prefs.rs

//! # Unit Preference Store
//!
//! Two persisted flags: dark theme and imperial units. They are stored as a
//! tiny JSON object of string values so the file stays compatible with the
//! browser `localStorage` layout the tool grew out of:
//!
//! ```json
//! { "darkMode": "false", "useImperial": "true" }
//! ```
//!
//! The file is read once when the store is opened and rewritten on every
//! toggle. Listeners registered with [`PreferenceStore::subscribe`] are
//! notified after each change.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DARK_MODE_KEY: &str = "darkMode";
pub const USE_IMPERIAL_KEY: &str = "useImperial";

/// Process-wide display preference. Never affects stored city values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPreference {
    pub use_imperial: bool,
    pub is_dark_mode: bool,
}

type Listener = Box<dyn Fn(&UnitPreference) + Send>;

pub struct PreferenceStore {
    path: Option<PathBuf>,
    current: UnitPreference,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("path", &self.path)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl PreferenceStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing or unreadable file is not an error: the defaults
    /// (light theme, metric) are used and the file is created on the first
    /// toggle.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let current = match fs::read_to_string(&path) {
            Ok(text) => parse_flags(&text).unwrap_or_else(|e| {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ignoring unreadable preferences"
                );
                UnitPreference::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => UnitPreference::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read preferences");
                UnitPreference::default()
            }
        };
        tracing::debug!(?current, path = %path.display(), "preferences loaded");
        Self {
            path: Some(path),
            current,
            listeners: Vec::new(),
        }
    }

    /// A store that is never written to disk.
    pub fn in_memory(initial: UnitPreference) -> Self {
        Self {
            path: None,
            current: initial,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> UnitPreference {
        self.current
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Registers a listener called with the new value after every change.
    pub fn subscribe(&mut self, listener: impl Fn(&UnitPreference) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_imperial(&mut self, on: bool) -> Result<bool> {
        let next = UnitPreference {
            use_imperial: on,
            ..self.current
        };
        self.apply(next)
    }

    pub fn set_dark_mode(&mut self, on: bool) -> Result<bool> {
        let next = UnitPreference {
            is_dark_mode: on,
            ..self.current
        };
        self.apply(next)
    }

    pub fn toggle_imperial(&mut self) -> Result<UnitPreference> {
        self.set_imperial(!self.current.use_imperial)?;
        Ok(self.current)
    }

    pub fn toggle_dark_mode(&mut self) -> Result<UnitPreference> {
        self.set_dark_mode(!self.current.is_dark_mode)?;
        Ok(self.current)
    }

    /// Stores `next`; returns whether anything changed.
    fn apply(&mut self, next: UnitPreference) -> Result<bool> {
        if next == self.current {
            return Ok(false);
        }
        self.persist(next)?;
        self.current = next;
        tracing::info!(
            imperial = next.use_imperial,
            dark_mode = next.is_dark_mode,
            "preferences changed"
        );
        for listener in &self.listeners {
            listener(&self.current);
        }
        Ok(true)
    }

    /// Writes `next` to disk; the in-memory value is untouched on failure.
    fn persist(&self, next: UnitPreference) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let text = serde_json::to_string_pretty(&to_flags(next))?;
        fs::write(path, text)?;
        Ok(())
    }
}

fn to_flags(p: UnitPreference) -> BTreeMap<&'static str, String> {
    BTreeMap::from([
        (DARK_MODE_KEY, p.is_dark_mode.to_string()),
        (USE_IMPERIAL_KEY, p.use_imperial.to_string()),
    ])
}

/// Anything other than the exact string `"true"` reads as `false`.
fn parse_flags(text: &str) -> std::result::Result<UnitPreference, serde_json::Error> {
    let map: BTreeMap<String, serde_json::Value> = serde_json::from_str(text)?;
    let flag = |key: &str| {
        matches!(map.get(key), Some(serde_json::Value::String(s)) if s == "true")
    };
    Ok(UnitPreference {
        use_imperial: flag(USE_IMPERIAL_KEY),
        is_dark_mode: flag(DARK_MODE_KEY),
    })
}
