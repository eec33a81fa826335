// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rstest::{fixture, rstest};

use nexos::model::{builtin_catalog, Catalog, NodeId};
use nexos::nav::{decode, Dispatcher, Fragment, Interaction, MemoryHistory, Router, View};
use nexos::render::{render_text, CrumbTarget, Emphasis, Presentation, RowContent, Transition};

fn id(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

#[fixture]
fn catalog() -> Arc<Catalog> {
    Arc::new(builtin_catalog().expect("built-in catalog"))
}

fn dispatcher_at(catalog: Arc<Catalog>, fragment: &str) -> Dispatcher {
    Dispatcher::new(Router::new(
        catalog,
        MemoryHistory::new(Fragment::from_address(fragment)),
    ))
}

fn open_ph0() -> Interaction {
    Interaction::Navigate {
        view: View::section(id("ph0")),
        selected: None,
    }
}

fn select_web_scout() -> Interaction {
    Interaction::Navigate {
        view: View::section(id("ph0")),
        selected: Some(id("web-scout")),
    }
}

fn emphasis_counts(frame: &Presentation) -> (usize, usize, usize) {
    frame
        .diagram()
        .nodes()
        .fold((0, 0, 0), |(plain, selected, dimmed), node| match node.emphasis {
            Emphasis::Plain => (plain + 1, selected, dimmed),
            Emphasis::Selected => (plain, selected + 1, dimmed),
            Emphasis::Dimmed => (plain, selected, dimmed + 1),
        })
}

#[rstest]
fn empty_address_opens_the_overview(catalog: Arc<Catalog>) {
    let dispatcher = dispatcher_at(catalog.clone(), "");
    let frame = dispatcher.presentation();

    assert!(frame.state().is_top());
    assert_eq!(frame.state().selected(), None);
    assert_eq!(frame.breadcrumb().len(), 1);
    assert_eq!(frame.diagram().node_count(), catalog.section_count());
}

#[rstest]
fn drilling_into_a_phase_and_an_agent(catalog: Arc<Catalog>) {
    let mut dispatcher = dispatcher_at(catalog, "");

    let frame = dispatcher.dispatch(open_ph0());
    assert_eq!(frame.fragment().as_str(), "ph0");
    assert_eq!(frame.breadcrumb().len(), 2);
    assert_eq!(frame.transition(), Transition::ViewChanged);
    assert!(frame.diagram().nodes().all(|n| n.emphasis == Emphasis::Plain));

    let frame = dispatcher.dispatch(select_web_scout());
    assert_eq!(frame.fragment().as_str(), "ph0/web-scout");
    assert_eq!(frame.breadcrumb().len(), 3);
    assert_eq!(frame.transition(), Transition::None);
    let (plain, selected, dimmed) = emphasis_counts(frame);
    assert_eq!((plain, selected), (0, 1));
    assert_eq!(dimmed, frame.diagram().node_count() - 1);

    let frame = dispatcher.dispatch(select_web_scout());
    assert_eq!(frame.fragment().as_str(), "ph0");
    assert_eq!(frame.state().selected(), None);
    assert_eq!(emphasis_counts(frame).1, 0);
}

#[rstest]
fn unknown_agent_in_a_known_phase_falls_back_to_the_overview(catalog: Arc<Catalog>) {
    let state = decode(&catalog, "ph0/nonexistent-agent");
    assert!(state.is_top());
    assert_eq!(state.selected(), None);

    let dispatcher = dispatcher_at(catalog, "#ph0/nonexistent-agent");
    assert!(dispatcher.presentation().state().is_top());
    assert_eq!(
        dispatcher.presentation().fragment().as_str(),
        "ph0/nonexistent-agent"
    );
}

#[rstest]
fn section_crumb_clears_the_selection_and_keeps_the_view(catalog: Arc<Catalog>) {
    let mut dispatcher = dispatcher_at(catalog, "ph0/web-scout");
    let crumb = dispatcher
        .presentation()
        .breadcrumb()
        .parent()
        .and_then(|crumb| crumb.target.clone())
        .expect("section crumb");
    assert_eq!(crumb, CrumbTarget::Section(id("ph0")));

    let frame = dispatcher.dispatch(Interaction::Crumb(crumb));
    assert_eq!(frame.fragment().as_str(), "ph0");
    assert_eq!(frame.state().view(), &View::section(id("ph0")));
    assert_eq!(frame.state().selected(), None);
    assert_eq!(frame.transition(), Transition::None);
}

#[rstest]
fn history_replays_without_duplicates(catalog: Arc<Catalog>) {
    let mut dispatcher = dispatcher_at(catalog, "");
    dispatcher.dispatch(open_ph0());
    dispatcher.dispatch(open_ph0());
    dispatcher.dispatch(select_web_scout());
    assert_eq!(
        dispatcher
            .router()
            .history()
            .entries()
            .iter()
            .map(Fragment::as_str)
            .collect::<Vec<_>>(),
        ["", "ph0", "ph0/web-scout"]
    );

    let frame = dispatcher.dispatch(Interaction::Back);
    assert_eq!(frame.state().view(), &View::section(id("ph0")));
    assert_eq!(frame.state().selected(), None);
    let frame = dispatcher.dispatch(Interaction::Back);
    assert!(frame.state().is_top());

    let seq = dispatcher.presentation().seq();
    dispatcher.dispatch(Interaction::Back);
    assert_eq!(dispatcher.presentation().seq(), seq, "nothing left to pop");

    let frame = dispatcher.dispatch(Interaction::Forward);
    assert_eq!(frame.fragment().as_str(), "ph0");
}

#[rstest]
fn grouped_agent_reveals_its_group_in_the_tree(catalog: Arc<Catalog>) {
    let dispatcher = dispatcher_at(catalog, "ph5/lighthouse-runner");
    let frame = dispatcher.presentation();
    let tree = frame.tree();

    let path = tree.reveal.clone().expect("reveal path");
    assert_eq!(path.len(), 2, "group then leaf");
    let group = tree.item_at(&path[..1]).expect("group item");
    assert_eq!(group.id.as_ref(), Some(&id("ph5-performance")));
    assert!(group.expanded);
    let leaf = tree.item_at(&path).expect("leaf item");
    assert!(leaf.selected);

    let selected_rows = tree
        .rows()
        .into_iter()
        .filter(|row| matches!(row.content, RowContent::Item(item) if item.selected))
        .count();
    assert_eq!(selected_rows, 1);

    assert_eq!(
        frame.breadcrumb().label_path(" / "),
        "NEXOS Pipeline / Phase 5 — QA + Deploy / lighthouse-runner"
    );
}

#[rstest]
fn selected_agent_is_revealed_under_its_agents_entry(catalog: Arc<Catalog>) {
    let dispatcher = dispatcher_at(catalog, "ph0/web-scout");
    let tree = dispatcher.presentation().tree();

    let path = tree.reveal.clone().expect("reveal path");
    assert_eq!(path.len(), 2, "agents entry then leaf");
    let agents = tree.item_at(&path[..1]).expect("agents entry");
    assert_eq!(agents.id, None);
    assert!(agents.expanded);
    assert!(agents.label.starts_with("Agents ("), "{}", agents.label);
    let leaf = tree.item_at(&path).expect("leaf item");
    assert_eq!(leaf.id.as_ref(), Some(&id("web-scout")));
    assert!(leaf.selected && leaf.expanded);

    let rows = tree.rows();
    let item_row = |wanted: &[usize]| {
        rows.iter()
            .position(|row| matches!(row.content, RowContent::Item(_)) && row.path == wanted)
    };
    let agents_row = item_row(&path[..1]).expect("agents row visible");
    let leaf_row = item_row(&path).expect("leaf row visible");
    assert!(agents_row < leaf_row);
    assert_eq!(rows[leaf_row].depth, rows[agents_row].depth + 1);
    assert!(rows[leaf_row..].iter().any(|row| matches!(
        row.content,
        RowContent::Detail(detail) if detail.value.contains("swot-matrix.json")
    )));
}

#[rstest]
fn text_frame_lists_path_address_and_details(catalog: Arc<Catalog>) {
    let dispatcher = dispatcher_at(catalog, "ph0/web-scout");
    let text = render_text(dispatcher.presentation(), 100).expect("text frame");

    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("NEXOS Pipeline › Phase 0 — Discovery › [web-scout]")
    );
    assert_eq!(lines.next(), Some("#ph0/web-scout"));
    assert!(text.contains("Scrape 5 concurrents"));
    assert!(text.contains("swot-matrix.json"));
    assert!(text.contains(" ◀"));
}

#[rstest]
fn json_frame_carries_state_and_address(catalog: Arc<Catalog>) {
    let dispatcher = dispatcher_at(catalog, "ph0/web-scout");
    let json = serde_json::to_value(dispatcher.presentation()).expect("json");

    assert_eq!(json["fragment"], "ph0/web-scout");
    assert_eq!(json["state"]["view"], "ph0");
    assert_eq!(json["state"]["selected"], "web-scout");
    assert_eq!(json["breadcrumb"].as_array().map(Vec::len), Some(3));
}
