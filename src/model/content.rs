// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ids::NodeId;

/// Position of a node in the content hierarchy.
///
/// Navigation only ever targets [`NodeKind::Section`] views and
/// [`NodeKind::Leaf`] selections; roots and groups exist for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    Section,
    Group,
    Leaf,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Root => "root",
            Self::Section => "section",
            Self::Group => "group",
            Self::Leaf => "leaf",
        })
    }
}

/// A display-only key/value pair attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MetaEntry(pub String, pub MetaValue);

impl MetaEntry {
    pub fn key(&self) -> &str {
        &self.0
    }

    pub fn value(&self) -> &MetaValue {
        &self.1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

/// On-disk shape of one catalog node (the whole file is one root `NodeSpec`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NodeSpec {
    /// Catalog-wide unique id; must not contain `/` and must not be `macro`.
    pub id: String,
    pub kind: NodeKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// `#rrggbb` accent colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Lane name used by the top-level diagram (sections only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<String>,
    /// Plural noun for a section's direct leaves, e.g. `Agents`. The tree then
    /// lists those leaves under one `Agents (N)` entry. Ignored below sections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meta: Vec<MetaEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

/// A validated catalog node. Built once by [`super::Catalog`], never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentNode {
    id: NodeId,
    kind: NodeKind,
    label: String,
    caption: Option<String>,
    icon: Option<String>,
    color: Option<String>,
    track: Option<String>,
    leaf_label: Option<String>,
    meta: Vec<MetaEntry>,
    children: Vec<ContentNode>,
}

pub(crate) struct ContentParts {
    pub(crate) label: String,
    pub(crate) caption: Option<String>,
    pub(crate) icon: Option<String>,
    pub(crate) color: Option<String>,
    pub(crate) track: Option<String>,
    pub(crate) leaf_label: Option<String>,
    pub(crate) meta: Vec<MetaEntry>,
}

impl ContentNode {
    pub(crate) fn from_parts(
        id: NodeId,
        kind: NodeKind,
        parts: ContentParts,
        children: Vec<ContentNode>,
    ) -> Self {
        Self {
            id,
            kind,
            label: parts.label,
            caption: parts.caption,
            icon: parts.icon,
            color: parts.color,
            track: parts.track,
            leaf_label: parts.leaf_label,
            meta: parts.meta,
            children,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn track(&self) -> Option<&str> {
        self.track.as_deref()
    }

    pub fn leaf_label(&self) -> Option<&str> {
        self.leaf_label.as_deref()
    }

    pub fn meta(&self) -> &[MetaEntry] {
        &self.meta
    }

    pub fn children(&self) -> &[ContentNode] {
        &self.children
    }

    /// All leaves below this node, depth-first in document order.
    pub fn leaves(&self) -> Vec<&ContentNode> {
        let mut out = Vec::new();
        collect_leaves(self, &mut out);
        out
    }
}

fn collect_leaves<'a>(node: &'a ContentNode, out: &mut Vec<&'a ContentNode>) {
    for child in &node.children {
        if child.kind == NodeKind::Leaf {
            out.push(child);
        } else {
            collect_leaves(child, out);
        }
    }
}
