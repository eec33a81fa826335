// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Plain-text snapshot of a [`Presentation`], used by `--print`.

use super::canvas::{BoxStyle, Canvas, CanvasError};
use super::diagram::{DiagramView, Emphasis, Lane};
use super::text::{canvas_to_string_trimmed, truncate_with_ellipsis};
use super::tree::{RowContent, TreeView};
use super::Presentation;

const NODE_WIDTH: usize = 24;
const NODE_HEIGHT: usize = 4;
const NODE_GAP: usize = 1;
const CRUMB_SEPARATOR: &str = " › ";

pub fn render_text(presentation: &Presentation, width: usize) -> Result<String, CanvasError> {
    let width = width.max(NODE_WIDTH);
    let mut out = String::new();

    let crumbs = presentation
        .breadcrumb()
        .crumbs
        .iter()
        .map(|crumb| {
            if crumb.current {
                format!("[{}]", crumb.label)
            } else {
                crumb.label.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(CRUMB_SEPARATOR);
    out.push_str(&crumbs);
    out.push('\n');
    out.push_str(&presentation.fragment().href());
    out.push_str("\n\n");

    out.push_str(&diagram_text(presentation.diagram(), width)?);
    out.push_str("\n\n");
    out.push_str(&tree_text(presentation.tree()));
    Ok(out)
}

fn nodes_per_row(width: usize) -> usize {
    ((width + NODE_GAP) / (NODE_WIDTH + NODE_GAP)).max(1)
}

fn lane_height(lane: &Lane, per_row: usize) -> usize {
    let rows = lane.nodes.len().div_ceil(per_row);
    usize::from(lane.label.is_some()) + rows * NODE_HEIGHT + 1
}

fn diagram_text(diagram: &DiagramView, width: usize) -> Result<String, CanvasError> {
    let per_row = nodes_per_row(width);
    let header = 1 + usize::from(diagram.subtitle.is_some()) + 1;
    let height = header
        + diagram
            .lanes
            .iter()
            .map(|lane| lane_height(lane, per_row))
            .sum::<usize>();
    let mut canvas = Canvas::new(width, height)?;

    let title = match diagram.icon.as_deref() {
        Some(icon) => format!("{icon} {}", diagram.title),
        None => diagram.title.clone(),
    };
    canvas.write_str(0, 0, &title)?;
    let mut y = 1;
    if let Some(subtitle) = diagram.subtitle.as_deref() {
        canvas.write_str(0, y, subtitle)?;
        y += 1;
    }
    y += 1;

    for lane in &diagram.lanes {
        if let Some(label) = lane.label.as_deref() {
            canvas.write_str(0, y, &format!("[{label}]"))?;
            y += 1;
        }
        for (idx, node) in lane.nodes.iter().enumerate() {
            let row = idx / per_row;
            let col = idx % per_row;
            let x0 = col * (NODE_WIDTH + NODE_GAP);
            let y0 = y + row * NODE_HEIGHT;
            let style = match node.emphasis {
                Emphasis::Selected => BoxStyle::Heavy,
                Emphasis::Dimmed => BoxStyle::Dashed,
                Emphasis::Plain => BoxStyle::Light,
            };
            canvas.draw_box(x0, y0, x0 + NODE_WIDTH - 1, y0 + NODE_HEIGHT - 1, style)?;

            let inner = NODE_WIDTH - 4;
            let label = match node.icon.as_deref() {
                Some(icon) => format!("{icon} {}", node.label),
                None => node.label.clone(),
            };
            canvas.write_str(x0 + 2, y0 + 1, &truncate_with_ellipsis(&label, inner))?;
            if let Some(caption) = node.caption.as_deref() {
                canvas.write_str(x0 + 2, y0 + 2, &truncate_with_ellipsis(caption, inner))?;
            }
        }
        y += lane.nodes.len().div_ceil(per_row) * NODE_HEIGHT + 1;
    }

    Ok(canvas_to_string_trimmed(&canvas))
}

fn tree_text(tree: &TreeView) -> String {
    let mut lines = Vec::new();
    for row in tree.rows() {
        let indent = "  ".repeat(row.depth);
        let line = match row.content {
            RowContent::Item(item) => {
                let marker = match (item.has_body(), item.expanded) {
                    (false, _) => '·',
                    (true, true) => '▾',
                    (true, false) => '▸',
                };
                let selected = if item.selected { " ◀" } else { "" };
                match item.icon.as_deref() {
                    Some(icon) => format!("{indent}{marker} {icon} {}{selected}", item.label),
                    None => format!("{indent}{marker} {}{selected}", item.label),
                }
            }
            RowContent::Caption(caption) => format!("{indent}  {caption}"),
            RowContent::Detail(detail) => format!("{indent}  {}: {}", detail.key, detail.value),
        };
        lines.push(line);
    }
    lines.join("\n")
}
