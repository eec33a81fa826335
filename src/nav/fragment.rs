// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Address-bar codec.
//!
//! ```text
//! fragment := "" | section | section "/" leaf
//! ```
//!
//! Decoding is total: anything that does not name a reachable state maps to
//! the top-level view.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::state::{NavigationState, View};
use crate::model::Catalog;

pub const SEPARATOR: char = '/';

/// An encoded navigation state, without the leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Fragment(String);

impl Fragment {
    /// Wraps text typed into the address bar; a leading `#` is dropped.
    pub fn from_address(raw: &str) -> Self {
        Self(raw.strip_prefix('#').unwrap_or(raw).to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn href(&self) -> String {
        format!("#{}", self.0)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn encode(state: &NavigationState) -> Fragment {
    match (state.view(), state.selected()) {
        (View::Macro, _) => Fragment::default(),
        (View::Section(section), None) => Fragment(section.as_str().to_owned()),
        (View::Section(section), Some(leaf)) => {
            Fragment(format!("{}{SEPARATOR}{}", section.as_str(), leaf.as_str()))
        }
    }
}

/// Decodes fragment text as stored in history, i.e. after
/// [`Fragment::from_address`] has dropped the `#`. A `#` left in `raw` is
/// part of the section id and does not resolve.
pub fn decode(catalog: &Catalog, raw: &str) -> NavigationState {
    if raw.is_empty() {
        return NavigationState::top();
    }

    let mut segments = raw.splitn(3, SEPARATOR);
    let section = segments.next().unwrap_or_default();
    let leaf = segments.next();
    if segments.next().is_some() {
        debug!(fragment = raw, "too many segments; falling back to top");
        return NavigationState::top();
    }

    match NavigationState::lookup(catalog, section, leaf) {
        Some(state) => state,
        None => {
            debug!(fragment = raw, "fragment does not resolve; falling back to top");
            NavigationState::top()
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    use super::{decode, encode, Fragment};
    use crate::model::fixtures::{nid, small_catalog};
    use crate::model::Catalog;
    use crate::nav::state::{NavigationState, View};

    #[fixture]
    fn catalog() -> Catalog {
        small_catalog()
    }

    #[rstest]
    fn encode_shapes(catalog: Catalog) {
        assert_eq!(encode(&NavigationState::top()).as_str(), "");
        let section = NavigationState::resolve(&catalog, &View::section(nid("beta")), None);
        assert_eq!(encode(&section).as_str(), "beta");
        let leaf = NavigationState::resolve(&catalog, &View::section(nid("beta")), Some("b1"));
        assert_eq!(encode(&leaf).as_str(), "beta/b1");
        assert_eq!(encode(&leaf).href(), "#beta/b1");
    }

    #[rstest]
    #[case::empty("")]
    #[case::hash_only("#")]
    #[case::unknown_section("delta")]
    #[case::unknown_leaf("alpha/zzz")]
    #[case::leaf_of_other_section("alpha/b1")]
    #[case::group_as_leaf("alpha/alpha-g")]
    #[case::trailing_separator("alpha/")]
    #[case::leading_separator("/a1")]
    #[case::too_many_segments("beta/beta-outer/b1")]
    #[case::reserved("macro")]
    #[case::leaf_as_section("a1")]
    fn decode_falls_back_to_top(catalog: Catalog, #[case] raw: &str) {
        assert_eq!(decode(&catalog, raw), NavigationState::top());
    }

    #[rstest]
    fn hash_is_stripped_once_at_the_address_edge(catalog: Catalog) {
        let state = decode(&catalog, Fragment::from_address("#alpha/a3").as_str());
        assert_eq!(state.view(), &View::section(nid("alpha")));
        assert_eq!(state.selected(), Some(&nid("a3")));

        assert_eq!(decode(&catalog, "#alpha/a3"), NavigationState::top());
        let doubled = Fragment::from_address("##alpha");
        assert_eq!(decode(&catalog, doubled.as_str()), NavigationState::top());
    }

    #[rstest]
    fn every_reachable_state_round_trips(catalog: Catalog) {
        for state in NavigationState::reachable(&catalog) {
            let fragment = encode(&state);
            assert_eq!(decode(&catalog, fragment.as_str()), state, "{fragment}");
        }
    }

    #[test]
    fn from_address_strips_one_hash() {
        assert_eq!(Fragment::from_address("#ph0").as_str(), "ph0");
        assert_eq!(Fragment::from_address("##ph0").as_str(), "#ph0");
    }

    proptest! {
        #[test]
        fn garbage_never_panics_and_stays_consistent(raw in ".{0,40}") {
            let catalog = small_catalog();
            let state = decode(&catalog, &raw);
            // Whatever comes back must itself be a fixed point of the codec.
            prop_assert_eq!(decode(&catalog, encode(&state).as_str()), state);
        }

        #[test]
        fn unknown_ids_decode_to_top(section in "[a-z]{1,8}-x", leaf in "[a-z0-9-]{0,8}") {
            let catalog = small_catalog();
            prop_assert_eq!(decode(&catalog, &section), NavigationState::top());
            prop_assert_eq!(decode(&catalog, &format!("{section}/{leaf}")), NavigationState::top());
        }
    }
}
