// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Presentation builders.
//!
//! Every renderer is a pure function of `(NavigationState, Catalog)`; the
//! result is rebuilt from scratch on each state change and handed to the TUI,
//! the text printer or the JSON serialiser.

use serde::Serialize;

use crate::model::{Catalog, NodeKind};
use crate::nav::{Fragment, NavigationState};

pub mod breadcrumb;
pub mod canvas;
pub mod diagram;
pub mod highlight;
pub mod print;
mod text;
pub mod tree;

pub use breadcrumb::{render_breadcrumb, Breadcrumb, Crumb, CrumbTarget};
pub use diagram::{render_diagram, DiagramView, Emphasis, Lane, NodeAction, VisualNode};
pub use highlight::apply_highlight;
pub use print::render_text;
pub use tree::{render_tree, Detail, RowContent, TreeItem, TreeRow, TreeView};

pub(crate) use text::{text_len, truncate_with_ellipsis};

/// One value per [`NodeKind`]; renderers keep their builders in one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindTable<T> {
    pub root: T,
    pub section: T,
    pub group: T,
    pub leaf: T,
}

impl<T> KindTable<T> {
    pub const fn get(&self, kind: NodeKind) -> &T {
        match kind {
            NodeKind::Root => &self.root,
            NodeKind::Section => &self.section,
            NodeKind::Group => &self.group,
            NodeKind::Leaf => &self.leaf,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    #[default]
    None,
    /// The diagram now shows a different view than the previous frame.
    ViewChanged,
}

/// Everything a display adapter needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    seq: u64,
    fragment: Fragment,
    state: NavigationState,
    transition: Transition,
    breadcrumb: Breadcrumb,
    diagram: DiagramView,
    tree: TreeView,
}

impl Presentation {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn fragment(&self) -> &Fragment {
        &self.fragment
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn transition(&self) -> Transition {
        self.transition
    }

    pub fn breadcrumb(&self) -> &Breadcrumb {
        &self.breadcrumb
    }

    pub fn diagram(&self) -> &DiagramView {
        &self.diagram
    }

    pub fn tree(&self) -> &TreeView {
        &self.tree
    }
}

/// Runs all three renderers and the highlight pass for `state`.
///
/// `fragment` is what the history currently shows; it is passed in rather than
/// re-encoded so the frame reflects the address bar verbatim.
pub fn render_presentation(
    state: &NavigationState,
    catalog: &Catalog,
    fragment: Fragment,
    seq: u64,
    transition: Transition,
) -> Presentation {
    let breadcrumb = render_breadcrumb(state, catalog);
    let mut diagram = render_diagram(state, catalog);
    apply_highlight(&mut diagram, state.selected());
    let tree = render_tree(state, catalog);

    Presentation {
        seq,
        fragment,
        state: state.clone(),
        transition,
        breadcrumb,
        diagram,
        tree,
    }
}

#[cfg(test)]
mod tests {
    use super::{render_presentation, KindTable, Transition};
    use crate::model::fixtures::small_catalog;
    use crate::model::NodeKind;
    use crate::nav::{decode, Fragment};

    #[test]
    fn kind_table_maps_every_kind() {
        let table = KindTable {
            root: 'r',
            section: 's',
            group: 'g',
            leaf: 'l',
        };
        assert_eq!(*table.get(NodeKind::Group), 'g');
        assert_eq!(*table.get(NodeKind::Leaf), 'l');
    }

    #[test]
    fn presentation_serialises_state_and_views() {
        let catalog = small_catalog();
        let state = decode(&catalog, "alpha/a1");
        let frame = render_presentation(
            &state,
            &catalog,
            Fragment::from_address("alpha/a1"),
            4,
            Transition::ViewChanged,
        );

        let json = serde_json::to_value(&frame).expect("json");
        assert_eq!(json["seq"], 4);
        assert_eq!(json["fragment"], "alpha/a1");
        assert_eq!(json["state"]["view"], "alpha");
        assert_eq!(json["state"]["selected"], "a1");
        assert_eq!(json["transition"], "view_changed");
        assert_eq!(json["breadcrumb"][1]["target"]["kind"], "section");
        assert_eq!(json["diagram"]["lanes"][0]["nodes"][0]["emphasis"], "selected");
    }
}
