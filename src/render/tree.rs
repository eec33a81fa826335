// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::KindTable;
use crate::model::{Catalog, ContentNode, MetaEntry, NodeId, NodeKind};
use crate::nav::{NavigationState, View};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub key: String,
    pub value: String,
}

impl From<&MetaEntry> for Detail {
    fn from(entry: &MetaEntry) -> Self {
        Self {
            key: entry.key().to_owned(),
            value: entry.value().to_string(),
        }
    }
}

/// One collapsible tree entry. Summary entries carry no `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<Detail>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeItem>,
    pub expanded: bool,
    pub selected: bool,
}

impl TreeItem {
    fn new(id: Option<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id,
            icon: None,
            label: label.into(),
            caption: None,
            details: Vec::new(),
            children: Vec::new(),
            expanded: false,
            selected: false,
        }
    }

    pub fn has_body(&self) -> bool {
        self.caption.is_some() || !self.details.is_empty() || !self.children.is_empty()
    }

    fn set_expanded_recursive(&mut self, expanded: bool) {
        self.expanded = expanded;
        for child in &mut self.children {
            child.set_expanded_recursive(expanded);
        }
    }
}

/// A visible line of the flattened tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowContent<'a> {
    Item(&'a TreeItem),
    Caption(&'a str),
    Detail(&'a Detail),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow<'a> {
    pub depth: usize,
    /// Index path of the item the row belongs to.
    pub path: Vec<usize>,
    pub content: RowContent<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TreeView {
    pub items: Vec<TreeItem>,
    /// Index path of the selected item, for scrolling it into view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reveal: Option<Vec<usize>>,
}

impl TreeView {
    pub fn expand_all(&mut self) {
        for item in &mut self.items {
            item.set_expanded_recursive(true);
        }
    }

    pub fn collapse_all(&mut self) {
        for item in &mut self.items {
            item.set_expanded_recursive(false);
        }
    }

    pub fn item_at(&self, path: &[usize]) -> Option<&TreeItem> {
        let (first, rest) = path.split_first()?;
        let mut item = self.items.get(*first)?;
        for &idx in rest {
            item = item.children.get(idx)?;
        }
        Some(item)
    }

    pub fn item_at_mut(&mut self, path: &[usize]) -> Option<&mut TreeItem> {
        let (first, rest) = path.split_first()?;
        let mut item = self.items.get_mut(*first)?;
        for &idx in rest {
            item = item.children.get_mut(idx)?;
        }
        Some(item)
    }

    /// Flips one item; returns the new state, or `None` for a stale path.
    pub fn toggle(&mut self, path: &[usize]) -> Option<bool> {
        let item = self.item_at_mut(path)?;
        item.expanded = !item.expanded;
        Some(item.expanded)
    }

    /// Visible rows, honouring `expanded`.
    pub fn rows(&self) -> Vec<TreeRow<'_>> {
        let mut rows = Vec::new();
        let mut path = Vec::new();
        for (idx, item) in self.items.iter().enumerate() {
            path.push(idx);
            push_rows(item, 0, &mut path, &mut rows);
            path.pop();
        }
        rows
    }
}

fn push_rows<'a>(
    item: &'a TreeItem,
    depth: usize,
    path: &mut Vec<usize>,
    rows: &mut Vec<TreeRow<'a>>,
) {
    rows.push(TreeRow {
        depth,
        path: path.clone(),
        content: RowContent::Item(item),
    });
    if !item.expanded {
        return;
    }
    if let Some(caption) = item.caption.as_deref() {
        rows.push(TreeRow {
            depth: depth + 1,
            path: path.clone(),
            content: RowContent::Caption(caption),
        });
    }
    for detail in &item.details {
        rows.push(TreeRow {
            depth: depth + 1,
            path: path.clone(),
            content: RowContent::Detail(detail),
        });
    }
    for (idx, child) in item.children.iter().enumerate() {
        path.push(idx);
        push_rows(child, depth + 1, path, rows);
        path.pop();
    }
}

type TreeBuilder = fn(&ContentNode) -> Vec<TreeItem>;

const TREE_BUILDERS: KindTable<Option<TreeBuilder>> = KindTable {
    root: Some(macro_tree),
    section: Some(section_tree),
    group: Some(group_tree),
    leaf: Some(leaf_tree),
};

pub fn render_tree(state: &NavigationState, catalog: &Catalog) -> TreeView {
    let node = match state.view() {
        View::Macro => catalog.root(),
        View::Section(id) => catalog.section(id.as_str()).unwrap_or_else(|| {
            debug_assert!(false, "state names unknown section {id}");
            catalog.root()
        }),
    };

    let mut view = TreeView {
        items: tree_for(node),
        reveal: None,
    };
    if let Some(leaf) = state.selected() {
        view.reveal = reveal(&mut view.items, catalog, leaf);
    }
    view
}

fn tree_for(node: &ContentNode) -> Vec<TreeItem> {
    match TREE_BUILDERS.get(node.kind()) {
        Some(builder) => builder(node),
        None => {
            debug_assert!(false, "no tree for {} node {}", node.kind(), node.id());
            Vec::new()
        }
    }
}

fn summary_item(node: &ContentNode, label: String) -> TreeItem {
    let mut item = TreeItem::new(None, label);
    item.icon = node.icon().map(str::to_owned);
    item.caption = node.caption().map(str::to_owned);
    item.details = node.meta().iter().map(Detail::from).collect();
    item.expanded = true;
    item
}

fn macro_tree(root: &ContentNode) -> Vec<TreeItem> {
    let mut items = vec![summary_item(root, root.label().to_owned())];
    for section in root.children() {
        let mut item = TreeItem::new(Some(section.id().clone()), section.label());
        item.icon = section.icon().map(str::to_owned);
        item.caption = section.caption().map(str::to_owned);
        item.details.push(Detail {
            key: "Items".to_owned(),
            value: section.leaves().len().to_string(),
        });
        item.details
            .extend(section.meta().iter().map(Detail::from));
        items.push(item);
    }
    items
}

fn section_tree(section: &ContentNode) -> Vec<TreeItem> {
    let mut items = vec![summary_item(section, section.label().to_owned())];
    let Some(noun) = section.leaf_label() else {
        items.extend(section.children().iter().flat_map(tree_for));
        return items;
    };

    let (leaves, groups): (Vec<_>, Vec<_>) = section
        .children()
        .iter()
        .partition(|child| child.kind() == NodeKind::Leaf);
    if !leaves.is_empty() {
        let mut container = TreeItem::new(None, format!("{noun} ({})", leaves.len()));
        container.children = leaves.into_iter().flat_map(tree_for).collect();
        container.expanded = true;
        items.push(container);
    }
    items.extend(groups.into_iter().flat_map(tree_for));
    items
}

fn group_tree(group: &ContentNode) -> Vec<TreeItem> {
    let label = format!("{} ({})", group.label(), group.leaves().len());
    let mut item = TreeItem::new(Some(group.id().clone()), label);
    item.icon = group.icon().map(str::to_owned);
    item.caption = group.caption().map(str::to_owned);
    item.details = group.meta().iter().map(Detail::from).collect();
    item.children = group.children().iter().flat_map(tree_for).collect();
    vec![item]
}

fn leaf_tree(leaf: &ContentNode) -> Vec<TreeItem> {
    let mut item = TreeItem::new(Some(leaf.id().clone()), leaf.label());
    item.icon = leaf.icon().map(str::to_owned);
    item.caption = leaf.caption().map(str::to_owned);
    item.details = leaf.meta().iter().map(Detail::from).collect();
    vec![item]
}

/// Expands the ancestors of `leaf`, marks it selected and returns its path.
fn reveal(items: &mut [TreeItem], catalog: &Catalog, leaf: &NodeId) -> Option<Vec<usize>> {
    // The section itself is the tree's scope, so its groups start at the top level.
    let groups = catalog.ancestors(leaf.as_str())?.get(1..).unwrap_or_default();

    let mut path = Vec::with_capacity(groups.len() + 2);
    let mut level = items;
    if groups.is_empty() && position_by_id(level, leaf).is_none() {
        let idx = level.iter().position(is_leaf_container)?;
        path.push(idx);
        let container = &mut level[idx];
        container.expanded = true;
        level = container.children.as_mut_slice();
    }
    for group in groups {
        let idx = position_by_id(level, group)?;
        path.push(idx);
        let item = &mut level[idx];
        item.expanded = true;
        level = item.children.as_mut_slice();
    }

    let idx = position_by_id(level, leaf)?;
    path.push(idx);
    let target = &mut level[idx];
    target.expanded = true;
    target.selected = true;
    Some(path)
}

/// The id-less entry holding a section's direct leaves.
fn is_leaf_container(item: &TreeItem) -> bool {
    item.id.is_none() && !item.children.is_empty()
}

fn position_by_id(items: &[TreeItem], id: &NodeId) -> Option<usize> {
    items.iter().position(|item| item.id.as_ref() == Some(id))
}
