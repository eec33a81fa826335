// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use nexos::model::{builtin_catalog, Catalog, CatalogError, NodeKind, NodeSpec};
use nexos::nav::{decode, encode, NavigationState};
use nexos::query::{ranked_search_results, search_candidates, SearchKind};

#[test]
fn tracks_keep_catalog_order() {
    let catalog = builtin_catalog().expect("built-in catalog");
    let tracks = catalog
        .sections()
        .iter()
        .map(|section| section.track().unwrap_or_default())
        .collect::<Vec<_>>();

    let first_transversal = tracks
        .iter()
        .position(|track| *track == "Transversal")
        .expect("transversal sections");
    assert!(tracks[..first_transversal]
        .iter()
        .all(|track| *track == "Pipeline"));
    assert!(tracks[first_transversal..]
        .iter()
        .all(|track| *track == "Transversal"));
}

#[test]
fn every_section_has_content() {
    let catalog = builtin_catalog().expect("built-in catalog");
    for section in catalog.sections() {
        assert_eq!(section.kind(), NodeKind::Section);
        assert!(
            !section.leaves().is_empty(),
            "{} has no leaves",
            section.id()
        );
    }
}

#[test]
fn every_reachable_address_round_trips() {
    let catalog = builtin_catalog().expect("built-in catalog");
    let states = NavigationState::reachable(&catalog);
    assert_eq!(
        states.len(),
        1 + catalog.section_count() + catalog.leaf_count()
    );
    for state in states {
        let fragment = encode(&state);
        assert_eq!(decode(&catalog, fragment.as_str()), state, "{fragment}");
    }
}

#[test]
fn search_finds_agents_by_caption() {
    let catalog = builtin_catalog().expect("built-in catalog");
    let candidates = search_candidates(&catalog);
    assert_eq!(
        candidates.len(),
        catalog.section_count() + catalog.leaf_count()
    );

    let hits = ranked_search_results(&candidates, "swot", SearchKind::Regular, None);
    let first = &candidates[*hits.first().expect("a hit")];
    assert_eq!(first.section.as_str(), "ph0");
    assert_eq!(first.leaf.as_ref().map(|id| id.as_str()), Some("web-scout"));
}

#[test]
fn schema_describes_the_catalog_format() {
    let schema = serde_json::to_value(schemars::schema_for!(NodeSpec)).expect("schema json");
    let properties = &schema["properties"];
    for key in ["id", "kind", "label", "children", "meta", "track"] {
        assert!(properties.get(key).is_some(), "schema lacks {key}");
    }
    let required = schema["required"].as_array().expect("required list");
    assert!(required.iter().any(|value| value == "id"));
}

#[test]
fn custom_catalog_errors_are_typed() {
    let raw = r#"{"id": "x", "kind": "section", "label": "X"}"#;
    assert!(matches!(
        Catalog::from_json_str(raw),
        Err(CatalogError::NotRoot { .. })
    ));

    assert!(matches!(
        Catalog::from_json_str("{"),
        Err(CatalogError::Parse(_))
    ));
}
