//! citycompare-cli
//! ===============
//!
//! Command-line interface for the `citycompare-core` crate.
//!
//! This crate primarily provides a binary (`citycompare`). The library
//! target only exists so docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! citycompare --help
//! citycompare compare Berlin Paris
//! citycompare random --keep-second Tokyo --json
//! citycompare settings --imperial true
//! citycompare session
//! ```
//!
//! Set `CITYCOMPARE_TIMEZONEDB_KEY` and `CITYCOMPARE_OPENWEATHER_KEY` to
//! enable the time zone and weather panels. For programmatic access use
//! [`citycompare_core`] directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
