// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use super::fragment::{decode, encode, Fragment};
use super::history::{History, MemoryHistory};
use super::state::{NavigationState, View};
use crate::model::Catalog;

/// What a single [`Router::navigate`] call did besides replacing the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NavOutcome {
    /// The requested leaf was already selected, so the selection was cleared.
    pub toggled_off: bool,
    /// A new history entry was created.
    pub pushed: bool,
    /// Part of the request did not resolve and was dropped.
    pub fell_back: bool,
}

/// Owns the one [`NavigationState`] and keeps history in step with it.
#[derive(Debug)]
pub struct Router<H = MemoryHistory> {
    catalog: Arc<Catalog>,
    state: NavigationState,
    history: H,
}

impl<H: History> Router<H> {
    /// Starts from whatever fragment `history` currently points at.
    pub fn new(catalog: Arc<Catalog>, history: H) -> Self {
        let state = decode(&catalog, history.current().as_str());
        Self {
            catalog,
            state,
            history,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn navigate(&mut self, view: &View, selected: Option<&str>) -> NavOutcome {
        let toggled_off = selected.is_some()
            && self.state.view() == view
            && self.state.selected().map(|id| id.as_str()) == selected;
        let requested = if toggled_off { None } else { selected };

        let next = NavigationState::resolve(&self.catalog, view, requested);
        let fell_back = next.view() != view || (requested.is_some() && next.selected().is_none());
        self.state = next;

        let fragment = encode(&self.state);
        debug!(
            fragment = fragment.as_str(),
            toggled_off, fell_back, "navigate"
        );
        let pushed = self.sync_history(fragment);

        NavOutcome {
            toggled_off,
            pushed,
            fell_back,
        }
    }

    /// Re-reads the state from the current history entry without pushing.
    pub fn restore(&mut self) -> &NavigationState {
        self.state = decode(&self.catalog, self.history.current().as_str());
        debug!(fragment = self.history.current().as_str(), "restore");
        &self.state
    }

    pub fn back(&mut self) -> bool {
        if !self.history.back() {
            return false;
        }
        self.restore();
        true
    }

    pub fn forward(&mut self) -> bool {
        if !self.history.forward() {
            return false;
        }
        self.restore();
        true
    }

    /// Typing into the address bar. When the text names a different state it
    /// becomes the current entry verbatim and is decoded like a history pop;
    /// text that resolves to the current state leaves history alone.
    pub fn enter_fragment(&mut self, raw: &str) -> &NavigationState {
        let fragment = Fragment::from_address(raw);
        if decode(&self.catalog, fragment.as_str()) == self.state {
            debug!(fragment = fragment.as_str(), "entered address is already shown");
            return &self.state;
        }
        self.sync_history(fragment);
        self.restore()
    }

    fn sync_history(&mut self, fragment: Fragment) -> bool {
        if self.history.current() == &fragment {
            trace!(fragment = fragment.as_str(), "history unchanged");
            return false;
        }
        trace!(fragment = fragment.as_str(), "history push");
        self.history.push(fragment);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::Router;
    use crate::model::fixtures::{nid, small_catalog};
    use crate::nav::fragment::Fragment;
    use crate::nav::history::{History, MemoryHistory};
    use crate::nav::state::{NavigationState, View};

    #[fixture]
    fn router() -> Router {
        Router::new(Arc::new(small_catalog()), MemoryHistory::default())
    }

    #[test]
    fn startup_decodes_the_initial_fragment() {
        let history = MemoryHistory::new(Fragment::from_address("#alpha/a2"));
        let router = Router::new(Arc::new(small_catalog()), history);
        assert_eq!(router.state().selected(), Some(&nid("a2")));
        assert_eq!(router.history().entries().len(), 1);
    }

    #[rstest]
    fn selecting_twice_toggles_and_third_time_reselects(mut router: Router) {
        let alpha = View::section(nid("alpha"));
        router.navigate(&alpha, None);

        let first = router.navigate(&alpha, Some("a1"));
        assert!(!first.toggled_off);
        assert_eq!(router.state().selected(), Some(&nid("a1")));

        let second = router.navigate(&alpha, Some("a1"));
        assert!(second.toggled_off);
        assert_eq!(router.state().selected(), None);

        router.navigate(&alpha, Some("a1"));
        assert_eq!(router.state().selected(), Some(&nid("a1")));
    }

    #[rstest]
    fn same_leaf_in_another_view_is_not_a_toggle(mut router: Router) {
        router.navigate(&View::section(nid("alpha")), Some("a1"));
        let outcome = router.navigate(&View::section(nid("beta")), Some("a1"));
        assert!(!outcome.toggled_off);
        assert!(outcome.fell_back);
        assert_eq!(router.state().view(), &View::section(nid("beta")));
        assert_eq!(router.state().selected(), None);
    }

    #[rstest]
    fn repeated_navigation_does_not_duplicate_history(mut router: Router) {
        let beta = View::section(nid("beta"));
        assert!(router.navigate(&beta, None).pushed);
        assert!(!router.navigate(&beta, None).pushed);
        assert_eq!(router.history().entries().len(), 2);

        // Fallback to top re-encodes to the empty fragment, which is a change.
        let outcome = router.navigate(&View::section(nid("nope")), None);
        assert!(outcome.fell_back);
        assert!(outcome.pushed);
        assert_eq!(router.state(), &NavigationState::top());
    }

    #[rstest]
    fn back_restores_without_pushing(mut router: Router) {
        router.navigate(&View::section(nid("alpha")), None);
        router.navigate(&View::section(nid("alpha")), Some("a3"));
        assert!(router.back());
        assert_eq!(router.state().selected(), None);
        assert_eq!(router.history().entries().len(), 3);
        assert!(router.forward());
        assert_eq!(router.state().selected(), Some(&nid("a3")));
        assert!(!router.forward());
    }

    #[rstest]
    fn doubled_hash_does_not_resolve(mut router: Router) {
        assert_eq!(router.enter_fragment("##alpha"), &NavigationState::top());
        assert_eq!(router.history().entries().len(), 1);

        router.navigate(&View::section(nid("alpha")), None);
        assert_eq!(router.history().current().as_str(), "alpha");
        assert_eq!(router.history().entries().len(), 2);
    }

    #[rstest]
    #[case::unknown_leaf("alpha/nonexistent")]
    #[case::unknown_section("#delta")]
    #[case::empty("#")]
    fn address_for_the_current_state_adds_no_entry(mut router: Router, #[case] raw: &str) {
        assert_eq!(router.enter_fragment(raw), &NavigationState::top());
        assert_eq!(router.history().entries().len(), 1);
        assert!(!router.history().can_go_back());

        router.navigate(&View::section(nid("beta")), Some("b2"));
        router.enter_fragment("beta/b2");
        assert_eq!(router.history().entries().len(), 2);
    }

    #[rstest]
    fn entered_fragment_stays_in_history_even_when_invalid(mut router: Router) {
        router.navigate(&View::section(nid("alpha")), None);
        let state = router.enter_fragment("#alpha/missing").clone();
        assert_eq!(state, NavigationState::top());
        assert_eq!(router.history().current().as_str(), "alpha/missing");

        assert!(router.back());
        assert_eq!(router.state().view(), &View::section(nid("alpha")));
    }
}
