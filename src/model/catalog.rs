// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use super::content::{ContentNode, ContentParts, NodeKind, NodeSpec};
use super::ids::{IdError, NodeId};

/// Fragment segment that addresses the top-level view; no node may use it.
pub const MACRO_VIEW_ID: &str = "macro";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid node id {id:?}: {source}")]
    InvalidId {
        id: String,
        #[source]
        source: IdError,
    },
    #[error("duplicate node id {id:?}")]
    DuplicateId { id: String },
    #[error("node id {id:?} is reserved for the top-level view")]
    ReservedId { id: String },
    #[error("top-level node must be a root, found {kind}")]
    NotRoot { kind: NodeKind },
    #[error("{kind} node {id:?} cannot be placed under a {parent} node")]
    Misplaced {
        id: String,
        kind: NodeKind,
        parent: NodeKind,
    },
    #[error("leaf node {id:?} must not have children")]
    LeafWithChildren { id: String },
    #[error("catalog has no sections")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LeafEntry {
    section: NodeId,
    path: Vec<usize>,
    ancestors: Vec<NodeId>,
}

/// Immutable registry of the content tree with O(1) section and leaf lookup.
///
/// Every index is built once in [`Catalog::from_spec`]; there is no mutation API,
/// so a catalog can be shared freely behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    root: ContentNode,
    sections: HashMap<NodeId, usize>,
    leaves: HashMap<NodeId, LeafEntry>,
    paths: HashMap<NodeId, Vec<usize>>,
}

impl Catalog {
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let spec: NodeSpec = serde_json::from_str(raw)?;
        Self::from_spec(spec)
    }

    pub fn from_spec(spec: NodeSpec) -> Result<Self, CatalogError> {
        if spec.kind != NodeKind::Root {
            return Err(CatalogError::NotRoot { kind: spec.kind });
        }

        let mut index = Index::default();
        let root = index.convert(spec, None, &mut Vec::new(), &mut Vec::new())?;
        if index.sections.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self {
            root,
            sections: index.sections,
            leaves: index.leaves,
            paths: index.paths,
        })
    }

    pub fn root(&self) -> &ContentNode {
        &self.root
    }

    /// Sections in catalog order.
    pub fn sections(&self) -> &[ContentNode] {
        self.root.children()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn section(&self, id: &str) -> Option<&ContentNode> {
        let idx = *self.sections.get(id)?;
        self.root.children().get(idx)
    }

    /// Resolves `leaf` only when it lives somewhere under `section`.
    pub fn leaf(&self, section: &str, leaf: &str) -> Option<&ContentNode> {
        let entry = self.leaves.get(leaf)?;
        if entry.section.as_str() != section {
            return None;
        }
        self.at(&entry.path)
    }

    /// Section and group ids above `leaf`, outermost first.
    pub fn ancestors(&self, leaf: &str) -> Option<&[NodeId]> {
        self.leaves
            .get(leaf)
            .map(|entry| entry.ancestors.as_slice())
    }

    /// The section owning `leaf`, if `leaf` is a leaf id.
    pub fn section_of(&self, leaf: &str) -> Option<&NodeId> {
        self.leaves.get(leaf).map(|entry| &entry.section)
    }

    pub fn node(&self, id: &str) -> Option<&ContentNode> {
        let path = self.paths.get(id)?;
        self.at(path)
    }

    fn at(&self, path: &[usize]) -> Option<&ContentNode> {
        let mut node = &self.root;
        for &idx in path {
            node = node.children().get(idx)?;
        }
        Some(node)
    }
}

#[derive(Default)]
struct Index {
    sections: HashMap<NodeId, usize>,
    leaves: HashMap<NodeId, LeafEntry>,
    paths: HashMap<NodeId, Vec<usize>>,
}

impl Index {
    fn convert(
        &mut self,
        spec: NodeSpec,
        parent: Option<NodeKind>,
        path: &mut Vec<usize>,
        ancestors: &mut Vec<NodeId>,
    ) -> Result<ContentNode, CatalogError> {
        let NodeSpec {
            id: raw_id,
            kind,
            label,
            caption,
            icon,
            color,
            track,
            leaf_label,
            meta,
            children: child_specs,
        } = spec;

        let id = NodeId::new(raw_id.clone()).map_err(|source| CatalogError::InvalidId {
            id: raw_id.clone(),
            source,
        })?;
        if id.as_str() == MACRO_VIEW_ID {
            return Err(CatalogError::ReservedId { id: raw_id });
        }
        if let Some(parent) = parent {
            if !placement_allowed(parent, kind) {
                return Err(CatalogError::Misplaced {
                    id: raw_id,
                    kind,
                    parent,
                });
            }
        }
        if kind == NodeKind::Leaf && !child_specs.is_empty() {
            return Err(CatalogError::LeafWithChildren { id: raw_id });
        }
        if self.paths.contains_key(id.as_str()) {
            return Err(CatalogError::DuplicateId { id: raw_id });
        }

        self.paths.insert(id.clone(), path.clone());
        match kind {
            NodeKind::Section => {
                if let Some(&idx) = path.first() {
                    self.sections.insert(id.clone(), idx);
                }
            }
            NodeKind::Leaf => {
                // Placement rules guarantee a section sits above every leaf.
                if let Some(section) = ancestors.first().cloned() {
                    self.leaves.insert(
                        id.clone(),
                        LeafEntry {
                            section,
                            path: path.clone(),
                            ancestors: ancestors.clone(),
                        },
                    );
                }
            }
            NodeKind::Root | NodeKind::Group => {}
        }

        let nested = kind != NodeKind::Root;
        if nested {
            ancestors.push(id.clone());
        }
        let mut children = Vec::with_capacity(child_specs.len());
        for (idx, child) in child_specs.into_iter().enumerate() {
            path.push(idx);
            let converted = self.convert(child, Some(kind), path, ancestors);
            path.pop();
            children.push(converted?);
        }
        if nested {
            ancestors.pop();
        }

        let parts = ContentParts {
            label,
            caption,
            icon,
            color,
            track,
            leaf_label: leaf_label.filter(|_| kind == NodeKind::Section),
            meta,
        };
        Ok(ContentNode::from_parts(id, kind, parts, children))
    }
}

fn placement_allowed(parent: NodeKind, child: NodeKind) -> bool {
    matches!(
        (parent, child),
        (NodeKind::Root, NodeKind::Section)
            | (NodeKind::Section | NodeKind::Group, NodeKind::Group | NodeKind::Leaf)
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Catalog, CatalogError};
    use crate::model::fixtures::small_catalog;
    use crate::model::NodeKind;

    #[test]
    fn section_and_leaf_lookup() {
        let catalog = small_catalog();

        assert_eq!(catalog.section_count(), 3);
        assert_eq!(catalog.leaf_count(), 5);
        assert_eq!(catalog.section("alpha").map(|s| s.label()), Some("Alpha"));
        assert!(catalog.section("a1").is_none(), "leaves are not sections");

        let nested = catalog.leaf("beta", "b1").expect("nested leaf");
        assert_eq!(nested.kind(), NodeKind::Leaf);
        assert!(catalog.leaf("alpha", "b1").is_none(), "wrong section");
        assert!(catalog.leaf("beta", "beta-outer").is_none(), "groups are not leaves");
    }

    #[test]
    fn ancestors_are_outermost_first() {
        let catalog = small_catalog();
        let ids: Vec<&str> = catalog
            .ancestors("b1")
            .expect("ancestors")
            .iter()
            .map(|id| id.as_str())
            .collect();
        assert_eq!(ids, ["beta", "beta-outer", "beta-inner"]);
        assert_eq!(catalog.section_of("a3").map(|id| id.as_str()), Some("alpha"));
    }

    #[test]
    fn node_lookup_covers_every_kind() {
        let catalog = small_catalog();
        assert_eq!(catalog.node("atlas").map(|n| n.kind()), Some(NodeKind::Root));
        assert_eq!(catalog.node("alpha-g").map(|n| n.kind()), Some(NodeKind::Group));
        assert_eq!(catalog.node("missing"), None);
    }

    #[rstest]
    #[case::not_root(
        r#"{"id": "s", "kind": "section", "label": "S"}"#,
        "must be a root"
    )]
    #[case::reserved(
        r#"{"id": "r", "kind": "root", "label": "R", "children": [
            {"id": "macro", "kind": "section", "label": "M"}]}"#,
        "reserved"
    )]
    #[case::duplicate(
        r#"{"id": "r", "kind": "root", "label": "R", "children": [
            {"id": "s", "kind": "section", "label": "S", "children": [
                {"id": "s", "kind": "leaf", "label": "L"}]}]}"#,
        "duplicate"
    )]
    #[case::leaf_under_root(
        r#"{"id": "r", "kind": "root", "label": "R", "children": [
            {"id": "l", "kind": "leaf", "label": "L"}]}"#,
        "cannot be placed under a root"
    )]
    #[case::leaf_with_children(
        r#"{"id": "r", "kind": "root", "label": "R", "children": [
            {"id": "s", "kind": "section", "label": "S", "children": [
                {"id": "l", "kind": "leaf", "label": "L", "children": [
                    {"id": "x", "kind": "leaf", "label": "X"}]}]}]}"#,
        "must not have children"
    )]
    #[case::slash(
        r#"{"id": "r", "kind": "root", "label": "R", "children": [
            {"id": "a/b", "kind": "section", "label": "S"}]}"#,
        "must not contain '/'"
    )]
    #[case::empty(r#"{"id": "r", "kind": "root", "label": "R"}"#, "no sections")]
    fn invalid_catalogs_are_rejected(#[case] raw: &str, #[case] needle: &str) {
        let err = Catalog::from_json_str(raw).expect_err("invalid catalog");
        assert!(
            err.to_string().contains(needle),
            "expected {needle:?} in {err}"
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json_str("{").expect_err("parse error");
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
