// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::trace;

use super::history::{History, MemoryHistory};
use super::router::Router;
use super::state::View;
use crate::model::{Catalog, NodeId};
use crate::render::{
    render_presentation, CrumbTarget, NodeAction, Presentation, Transition, VisualNode,
};

/// A user action, independent of the input device that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Navigate {
        view: View,
        selected: Option<NodeId>,
    },
    Crumb(CrumbTarget),
    /// One level up: leaf to section, section to the top-level view.
    Ascend,
    Back,
    Forward,
    EnterFragment(String),
}

impl Interaction {
    /// The interaction a diagram node stands for when shown in `view`.
    pub fn activate(node: &VisualNode, view: &View) -> Self {
        match node.action {
            NodeAction::OpenSection => Self::Navigate {
                view: View::Section(node.id.clone()),
                selected: None,
            },
            NodeAction::ToggleSelection => Self::Navigate {
                view: view.clone(),
                selected: Some(node.id.clone()),
            },
        }
    }

    /// Opening a tree entry by id: sections open, leaves select. Groups have no target.
    pub fn open_node(catalog: &Catalog, id: &NodeId) -> Option<Self> {
        if catalog.section(id.as_str()).is_some() {
            return Some(Self::Navigate {
                view: View::Section(id.clone()),
                selected: None,
            });
        }
        let section = catalog.section_of(id.as_str())?;
        Some(Self::Navigate {
            view: View::Section(section.clone()),
            selected: Some(id.clone()),
        })
    }
}

/// Glues interactions to the router and keeps the latest [`Presentation`].
///
/// Each interaction that navigates produces exactly one history sync followed
/// by exactly one full render.
#[derive(Debug)]
pub struct Dispatcher<H = MemoryHistory> {
    router: Router<H>,
    last_view: View,
    presentation: Presentation,
}

impl<H: History> Dispatcher<H> {
    pub fn new(router: Router<H>) -> Self {
        let presentation = render_presentation(
            router.state(),
            router.catalog(),
            router.history().current().clone(),
            0,
            Transition::None,
        );
        Self {
            last_view: router.state().view().clone(),
            router,
            presentation,
        }
    }

    pub fn router(&self) -> &Router<H> {
        &self.router
    }

    pub fn catalog(&self) -> &Catalog {
        self.router.catalog()
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn dispatch(&mut self, interaction: Interaction) -> &Presentation {
        let rendered = match interaction {
            Interaction::Navigate { view, selected } => {
                self.router
                    .navigate(&view, selected.as_ref().map(NodeId::as_str));
                true
            }
            Interaction::Crumb(CrumbTarget::Top) => {
                self.router.navigate(&View::Macro, None);
                true
            }
            Interaction::Crumb(CrumbTarget::Section(id)) => {
                self.router.navigate(&View::Section(id), None);
                true
            }
            Interaction::Ascend => self.ascend(),
            Interaction::Back => self.router.back(),
            Interaction::Forward => self.router.forward(),
            Interaction::EnterFragment(raw) => {
                self.router.enter_fragment(&raw);
                true
            }
        };

        if rendered {
            self.render();
        }
        &self.presentation
    }

    fn ascend(&mut self) -> bool {
        let state = self.router.state();
        let view = state.view().clone();
        match (view, state.selected().is_some()) {
            (View::Macro, _) => false,
            (view @ View::Section(_), true) => {
                self.router.navigate(&view, None);
                true
            }
            (View::Section(_), false) => {
                self.router.navigate(&View::Macro, None);
                true
            }
        }
    }

    fn render(&mut self) {
        let state = self.router.state();
        let transition = if state.view() != &self.last_view {
            Transition::ViewChanged
        } else {
            Transition::None
        };
        let seq = self.presentation.seq().wrapping_add(1);
        self.presentation = render_presentation(
            state,
            self.router.catalog(),
            self.router.history().current().clone(),
            seq,
            transition,
        );
        self.last_view = state.view().clone();
        trace!(seq, ?transition, "render");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rstest::{fixture, rstest};

    use super::{Dispatcher, Interaction};
    use crate::model::fixtures::{nid, small_catalog};
    use crate::nav::{MemoryHistory, NavigationState, Router, View};
    use crate::render::{CrumbTarget, Emphasis, Transition};

    #[fixture]
    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Router::new(
            Arc::new(small_catalog()),
            MemoryHistory::default(),
        ))
    }

    fn select(section: &str, leaf: &str) -> Interaction {
        Interaction::Navigate {
            view: View::section(nid(section)),
            selected: Some(nid(leaf)),
        }
    }

    #[rstest]
    fn every_navigation_renders_once(mut dispatcher: Dispatcher) {
        assert_eq!(dispatcher.presentation().seq(), 0);
        dispatcher.dispatch(select("alpha", "a1"));
        assert_eq!(dispatcher.presentation().seq(), 1);
        dispatcher.dispatch(select("alpha", "a1"));
        assert_eq!(dispatcher.presentation().seq(), 2);
        assert_eq!(dispatcher.presentation().fragment().as_str(), "alpha");
    }

    #[rstest]
    fn view_change_is_flagged_only_when_the_view_moves(mut dispatcher: Dispatcher) {
        let frame = dispatcher.dispatch(select("alpha", "a1"));
        assert_eq!(frame.transition(), Transition::ViewChanged);
        let frame = dispatcher.dispatch(select("alpha", "a2"));
        assert_eq!(frame.transition(), Transition::None);
    }

    #[rstest]
    fn diagram_activation_maps_to_navigation(mut dispatcher: Dispatcher) {
        let node = dispatcher
            .presentation()
            .diagram()
            .nodes()
            .find(|n| n.id.as_str() == "beta")
            .cloned()
            .expect("beta node");
        let interaction = Interaction::activate(&node, &View::Macro);
        dispatcher.dispatch(interaction);

        let frame = dispatcher.presentation();
        assert_eq!(frame.state().view(), &View::section(nid("beta")));
        let leaf = frame.diagram().nodes().next().cloned().expect("leaf node");
        let frame = dispatcher.dispatch(Interaction::activate(&leaf, &View::section(nid("beta"))));
        assert_eq!(frame.fragment().as_str(), "beta/b1");
        assert_eq!(
            frame.diagram().nodes().next().map(|n| n.emphasis),
            Some(Emphasis::Selected)
        );
    }

    #[rstest]
    fn ascend_walks_up_one_level(mut dispatcher: Dispatcher) {
        dispatcher.dispatch(select("beta", "b2"));
        dispatcher.dispatch(Interaction::Ascend);
        assert_eq!(dispatcher.presentation().fragment().as_str(), "beta");
        dispatcher.dispatch(Interaction::Ascend);
        assert!(dispatcher.presentation().state().is_top());

        let seq = dispatcher.presentation().seq();
        dispatcher.dispatch(Interaction::Ascend);
        assert_eq!(dispatcher.presentation().seq(), seq, "no-op at the top");
    }

    #[rstest]
    fn section_crumb_clears_the_selection(mut dispatcher: Dispatcher) {
        dispatcher.dispatch(select("alpha", "a3"));
        let frame = dispatcher.dispatch(Interaction::Crumb(CrumbTarget::Section(nid("alpha"))));
        assert_eq!(frame.state().selected(), None);
        assert_eq!(frame.state().view(), &View::section(nid("alpha")));
        assert_eq!(frame.transition(), Transition::None);
    }

    #[rstest]
    fn back_at_the_oldest_entry_does_not_render(mut dispatcher: Dispatcher) {
        let frame = dispatcher.dispatch(Interaction::Back);
        assert_eq!(frame.seq(), 0);

        dispatcher.dispatch(select("alpha", "a1"));
        let frame = dispatcher.dispatch(Interaction::Back);
        assert_eq!(frame.state(), &NavigationState::top());
        assert_eq!(frame.seq(), 2);
    }

    #[rstest]
    fn entered_fragment_is_shown_verbatim(mut dispatcher: Dispatcher) {
        dispatcher.dispatch(Interaction::Navigate {
            view: View::section(nid("alpha")),
            selected: None,
        });
        let frame = dispatcher.dispatch(Interaction::EnterFragment("#alpha/ghost".to_owned()));
        assert_eq!(frame.fragment().as_str(), "alpha/ghost");
        assert!(frame.state().is_top());
    }

    #[test]
    fn tree_entries_open_sections_and_select_leaves() {
        let catalog = small_catalog();
        assert_eq!(
            Interaction::open_node(&catalog, &nid("a3")),
            Some(select("alpha", "a3"))
        );
        assert!(matches!(
            Interaction::open_node(&catalog, &nid("beta")),
            Some(Interaction::Navigate { selected: None, .. })
        ));
        assert_eq!(Interaction::open_node(&catalog, &nid("beta-outer")), None);
    }
}
