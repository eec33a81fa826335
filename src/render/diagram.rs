// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::KindTable;
use crate::model::{Catalog, ContentNode, NodeId, NodeKind};
use crate::nav::{NavigationState, View};

/// Separator between nested group names in a lane label.
pub const LANE_PATH_SEPARATOR: &str = " › ";

/// What activating a diagram node does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAction {
    OpenSection,
    ToggleSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    #[default]
    Plain,
    Selected,
    Dimmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualNode {
    pub id: NodeId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub action: NodeAction,
    pub emphasis: Emphasis,
}

/// A row of nodes: a track at the top level, a group inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lane {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub nodes: Vec<VisualNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub lanes: Vec<Lane>,
}

impl DiagramView {
    pub fn nodes(&self) -> impl Iterator<Item = &VisualNode> {
        self.lanes.iter().flat_map(|lane| lane.nodes.iter())
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut VisualNode> {
        self.lanes.iter_mut().flat_map(|lane| lane.nodes.iter_mut())
    }

    pub fn node_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.nodes.len()).sum()
    }

    /// `(lane, index)` of the node with `id`.
    pub fn position_of(&self, id: &str) -> Option<(usize, usize)> {
        self.lanes.iter().enumerate().find_map(|(lane_idx, lane)| {
            lane.nodes
                .iter()
                .position(|node| node.id.as_str() == id)
                .map(|node_idx| (lane_idx, node_idx))
        })
    }

    pub fn node_at(&self, lane: usize, index: usize) -> Option<&VisualNode> {
        self.lanes.get(lane)?.nodes.get(index)
    }
}

type DiagramBuilder = fn(&ContentNode) -> DiagramView;

const DIAGRAM_BUILDERS: KindTable<Option<DiagramBuilder>> = KindTable {
    root: Some(macro_diagram),
    section: Some(section_diagram),
    group: None,
    leaf: None,
};

pub fn render_diagram(state: &NavigationState, catalog: &Catalog) -> DiagramView {
    let node = match state.view() {
        View::Macro => catalog.root(),
        View::Section(id) => catalog.section(id.as_str()).unwrap_or_else(|| {
            debug_assert!(false, "state names unknown section {id}");
            catalog.root()
        }),
    };
    diagram_for(node, catalog)
}

pub(crate) fn diagram_for(node: &ContentNode, catalog: &Catalog) -> DiagramView {
    match DIAGRAM_BUILDERS.get(node.kind()) {
        Some(builder) => builder(node),
        None => {
            debug_assert!(false, "no diagram for {} node {}", node.kind(), node.id());
            macro_diagram(catalog.root())
        }
    }
}

fn macro_diagram(root: &ContentNode) -> DiagramView {
    let mut lanes: Vec<Lane> = Vec::new();
    for section in root.children() {
        let track = section.track().map(str::to_owned);
        let node = visual_node(section, NodeAction::OpenSection, None);
        match lanes.iter_mut().find(|lane| lane.label == track) {
            Some(lane) => lane.nodes.push(node),
            None => lanes.push(Lane {
                label: track,
                color: None,
                nodes: vec![node],
            }),
        }
    }

    DiagramView {
        title: root.label().to_owned(),
        subtitle: root.caption().map(str::to_owned),
        icon: root.icon().map(str::to_owned),
        color: root.color().map(str::to_owned),
        lanes,
    }
}

fn section_diagram(section: &ContentNode) -> DiagramView {
    let mut lanes = Vec::new();
    push_lanes(section, None, section.color(), &mut lanes);

    DiagramView {
        title: section.label().to_owned(),
        subtitle: section.caption().map(str::to_owned),
        icon: section.icon().map(str::to_owned),
        color: section.color().map(str::to_owned),
        lanes,
    }
}

/// Direct leaves of `parent` form one lane per contiguous run; every group
/// becomes its own lane(s), labelled with the group path.
fn push_lanes(
    parent: &ContentNode,
    label: Option<&str>,
    color: Option<&str>,
    lanes: &mut Vec<Lane>,
) {
    let mut run: Vec<VisualNode> = Vec::new();
    for child in parent.children() {
        match child.kind() {
            NodeKind::Leaf => run.push(visual_node(child, NodeAction::ToggleSelection, color)),
            _ => {
                flush_run(&mut run, label, color, lanes);
                let nested = match label {
                    Some(outer) => format!("{outer}{LANE_PATH_SEPARATOR}{}", child.label()),
                    None => child.label().to_owned(),
                };
                push_lanes(child, Some(&nested), child.color().or(color), lanes);
            }
        }
    }
    flush_run(&mut run, label, color, lanes);
}

fn flush_run(
    run: &mut Vec<VisualNode>,
    label: Option<&str>,
    color: Option<&str>,
    lanes: &mut Vec<Lane>,
) {
    if run.is_empty() {
        return;
    }
    lanes.push(Lane {
        label: label.map(str::to_owned),
        color: color.map(str::to_owned),
        nodes: std::mem::take(run),
    });
}

fn visual_node(node: &ContentNode, action: NodeAction, inherited: Option<&str>) -> VisualNode {
    VisualNode {
        id: node.id().clone(),
        label: node.label().to_owned(),
        caption: node.caption().map(str::to_owned),
        icon: node.icon().map(str::to_owned),
        color: node.color().or(inherited).map(str::to_owned),
        action,
        emphasis: Emphasis::Plain,
    }
}
