// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::diagram::{DiagramView, Emphasis};
use crate::model::NodeId;

/// Marks the selected node and dims the rest; without a selection every node is plain.
pub fn apply_highlight(diagram: &mut DiagramView, selected: Option<&NodeId>) {
    for node in diagram.nodes_mut() {
        node.emphasis = match selected {
            None => Emphasis::Plain,
            Some(id) if &node.id == id => Emphasis::Selected,
            Some(_) => Emphasis::Dimmed,
        };
    }
}
