// crates/citycompare-core/src/session.rs

//! # App State and Session
//!
//! [`AppState`] owns the only mutable state of the tool: the preference
//! store and the last resolved pair. Every comparison attempt is stamped
//! with a [`Ticket`]; only the newest ticket may replace the pair or show
//! its outcome, so a slow earlier attempt can never overwrite a later one.
//!
//! [`Session`] ties the state to a [`Resolver`] and a [`MapSurface`].

use crate::compare::compare;
use crate::error::{CompareError, Result};
use crate::map::MapSurface;
use crate::model::CityPair;
use crate::prefs::{PreferenceStore, UnitPreference};
use crate::render::{render, render_error, ComparisonView, View};
use crate::resolver::{validate_pair, Resolver};

/// Sequence number of one comparison attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn number(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
pub struct AppState {
    prefs: PreferenceStore,
    last_pair: Option<CityPair>,
    issued: u64,
}

impl AppState {
    pub fn new(prefs: PreferenceStore) -> Self {
        Self {
            prefs,
            last_pair: None,
            issued: 0,
        }
    }

    pub fn preference(&self) -> UnitPreference {
        self.prefs.get()
    }

    pub fn prefs_mut(&mut self) -> &mut PreferenceStore {
        &mut self.prefs
    }

    pub fn last_pair(&self) -> Option<&CityPair> {
        self.last_pair.as_ref()
    }

    /// Start a new attempt. The previous pair is dropped, so a unit toggle
    /// while this attempt is in flight has nothing to redraw.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.last_pair = None;
        Ticket(self.issued)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued
    }

    /// Store `pair` if `ticket` is the newest one issued.
    pub fn commit(&mut self, ticket: Ticket, pair: CityPair) -> bool {
        if !self.is_current(ticket) {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.issued,
                "dropping stale comparison result"
            );
            return false;
        }
        self.last_pair = Some(pair);
        true
    }

    /// Re-project the last pair under the current preference. No provider
    /// is called.
    pub fn rerender<M>(&self, map: &mut M) -> Option<ComparisonView>
    where
        M: MapSurface + ?Sized,
    {
        let pair = self.last_pair.as_ref()?;
        Some(render(&compare(pair), self.prefs.get(), map))
    }

    pub fn toggle_imperial(&mut self) -> Result<UnitPreference> {
        self.prefs.toggle_imperial()
    }

    pub fn toggle_dark_mode(&mut self) -> Result<UnitPreference> {
        self.prefs.toggle_dark_mode()
    }
}

pub struct Session<M: MapSurface> {
    resolver: Resolver,
    state: AppState,
    map: M,
}

impl<M: MapSurface> Session<M> {
    pub fn new(resolver: Resolver, state: AppState, map: M) -> Self {
        Self { resolver, state, map }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Resolve, compare and render one pair.
    ///
    /// Blank input is returned as [`CompareError::MalformedInput`] before any
    /// request is made. Every other failure becomes a [`View::Error`] and the
    /// map is left as it was.
    pub fn run_compare(&mut self, first: &str, second: &str) -> Result<View> {
        let (first, second) = validate_pair(first, second)?;
        let ticket = self.state.begin();
        let outcome = self.resolver.resolve_pair(first, second);
        Ok(self.project(ticket, outcome))
    }

    /// Finish an attempt whose resolution ran elsewhere.
    ///
    /// Returns `None` when a newer attempt has been started since `ticket`
    /// was issued; the outcome is then discarded.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<CityPair>) -> Option<View> {
        if !self.state.is_current(ticket) {
            tracing::warn!(ticket = ticket.0, "dropping stale comparison outcome");
            return None;
        }
        Some(self.project(ticket, outcome))
    }

    /// Start an attempt without resolving it; see [`Session::complete`].
    pub fn begin(&mut self) -> Ticket {
        self.state.begin()
    }

    pub fn rerender(&mut self) -> Option<ComparisonView> {
        self.state.rerender(&mut self.map)
    }

    /// Flip metric/imperial and redraw the stored pair.
    pub fn toggle_units(&mut self) -> Result<Option<ComparisonView>> {
        self.state.toggle_imperial()?;
        Ok(self.rerender())
    }

    pub fn toggle_theme(&mut self) -> Result<Option<ComparisonView>> {
        self.state.toggle_dark_mode()?;
        Ok(self.rerender())
    }

    fn project(&mut self, ticket: Ticket, outcome: Result<CityPair>) -> View {
        match outcome {
            Ok(pair) => {
                let view = render(&compare(&pair), self.state.preference(), &mut self.map);
                self.state.commit(ticket, pair);
                View::Comparison(view)
            }
            Err(error) => {
                if let CompareError::ProviderUnavailable { provider, reason } = &error {
                    tracing::warn!(provider, reason = %reason, "comparison aborted");
                }
                View::Error(render_error(&error.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CityRecord, Coordinates};

    fn pair(a: &str, b: &str) -> CityPair {
        let c = Coordinates::new(0.0, 0.0).unwrap();
        CityPair::new(CityRecord::new(a, c), CityRecord::new(b, c))
    }

    #[test]
    fn only_latest_ticket_commits() {
        let mut state = AppState::new(PreferenceStore::in_memory(UnitPreference::default()));
        let old = state.begin();
        let new = state.begin();
        assert!(old < new);

        assert!(!state.commit(old, pair("Old", "Older")));
        assert!(state.last_pair().is_none());

        assert!(state.commit(new, pair("New", "Newer")));
        assert_eq!(state.last_pair().unwrap().first.display_name(), "New");
    }

    #[test]
    fn begin_forgets_previous_pair() {
        let mut state = AppState::new(PreferenceStore::in_memory(UnitPreference::default()));
        let t = state.begin();
        state.commit(t, pair("A", "B"));
        state.begin();
        assert!(state.last_pair().is_none());
    }
}
