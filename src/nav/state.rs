// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::model::{Catalog, NodeId, MACRO_VIEW_ID};

/// Which diagram is on screen: the top-level overview or one section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Macro,
    Section(NodeId),
}

impl View {
    pub fn section(id: NodeId) -> Self {
        Self::Section(id)
    }

    pub fn section_id(&self) -> Option<&NodeId> {
        match self {
            Self::Macro => None,
            Self::Section(id) => Some(id),
        }
    }

    pub fn is_macro(&self) -> bool {
        matches!(self, Self::Macro)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Macro => MACRO_VIEW_ID,
            Self::Section(id) => id.as_str(),
        }
    }
}

impl Serialize for View {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The single source of truth for what is shown.
///
/// A selection, when present, always names a leaf living under the current
/// section; the top-level view never carries one. Both are enforced by the
/// constructors, which fail soft instead of erroring.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct NavigationState {
    view: View,
    selected: Option<NodeId>,
}

impl NavigationState {
    pub fn top() -> Self {
        Self::default()
    }

    /// Strict construction: `None` unless `section` (and `leaf`, when given) exist.
    pub fn lookup(catalog: &Catalog, section: &str, leaf: Option<&str>) -> Option<Self> {
        let section_node = catalog.section(section)?;
        let selected = match leaf {
            Some(leaf) => Some(catalog.leaf(section, leaf)?.id().clone()),
            None => None,
        };
        Some(Self {
            view: View::Section(section_node.id().clone()),
            selected,
        })
    }

    /// Lenient construction used by navigation.
    ///
    /// An unknown section falls back to the top-level view; a selection that is
    /// not a leaf of the resolved section is dropped.
    pub fn resolve(catalog: &Catalog, view: &View, selected: Option<&str>) -> Self {
        let section = match view {
            View::Macro => {
                if let Some(leaf) = selected {
                    debug!(leaf, "selection ignored at top-level view");
                }
                return Self::top();
            }
            View::Section(id) => id,
        };

        if catalog.section(section.as_str()).is_none() {
            debug!(section = section.as_str(), "unknown section; falling back to top");
            return Self::top();
        }

        let selected = selected.and_then(|leaf| match catalog.leaf(section.as_str(), leaf) {
            Some(node) => Some(node.id().clone()),
            None => {
                debug!(
                    section = section.as_str(),
                    leaf, "selection not reachable; clearing"
                );
                None
            }
        });

        Self {
            view: view.clone(),
            selected,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.selected.as_ref()
    }

    pub fn section_id(&self) -> Option<&NodeId> {
        self.view.section_id()
    }

    pub fn is_top(&self) -> bool {
        self.view.is_macro()
    }

    /// Every state the catalog allows, in catalog order.
    pub fn reachable(catalog: &Catalog) -> Vec<Self> {
        let mut out = vec![Self::top()];
        for section in catalog.sections() {
            out.push(Self {
                view: View::Section(section.id().clone()),
                selected: None,
            });
            for leaf in section.leaves() {
                out.push(Self {
                    view: View::Section(section.id().clone()),
                    selected: Some(leaf.id().clone()),
                });
            }
        }
        out
    }
}
