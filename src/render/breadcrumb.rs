// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use crate::model::{Catalog, NodeId};
use crate::nav::NavigationState;

/// Where a crumb leads when activated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CrumbTarget {
    Top,
    Section(NodeId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// `None` for the trailing leaf crumb, which is never a link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<CrumbTarget>,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Breadcrumb {
    pub crumbs: Vec<Crumb>,
}

impl Breadcrumb {
    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    pub fn current(&self) -> Option<&Crumb> {
        self.crumbs.iter().find(|crumb| crumb.current)
    }

    /// The crumb one level above the current one.
    pub fn parent(&self) -> Option<&Crumb> {
        let idx = self.crumbs.iter().position(|crumb| crumb.current)?;
        self.crumbs.get(idx.checked_sub(1)?)
    }

    pub fn label_path(&self, separator: &str) -> String {
        self.crumbs
            .iter()
            .map(|crumb| crumb.label.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

pub fn render_breadcrumb(state: &NavigationState, catalog: &Catalog) -> Breadcrumb {
    let root = catalog.root();
    let mut crumbs = vec![Crumb {
        label: root.label().to_owned(),
        icon: root.icon().map(str::to_owned),
        target: Some(CrumbTarget::Top),
        current: state.is_top(),
    }];

    let Some(section) = state
        .section_id()
        .and_then(|id| catalog.section(id.as_str()))
    else {
        return Breadcrumb { crumbs };
    };
    crumbs.push(Crumb {
        label: section.label().to_owned(),
        icon: section.icon().map(str::to_owned),
        target: Some(CrumbTarget::Section(section.id().clone())),
        current: state.selected().is_none(),
    });

    if let Some(leaf) = state
        .selected()
        .and_then(|leaf| catalog.leaf(section.id().as_str(), leaf.as_str()))
    {
        crumbs.push(Crumb {
            label: leaf.label().to_owned(),
            icon: leaf.icon().map(str::to_owned),
            target: None,
            current: true,
        });
    }

    Breadcrumb { crumbs }
}
