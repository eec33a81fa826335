// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::Catalog;
use super::ids::NodeId;

pub(crate) const SMALL_CATALOG_JSON: &str = r##"{
  "id": "atlas",
  "kind": "root",
  "label": "Atlas",
  "caption": "Small catalog",
  "meta": [["Sections", "3"]],
  "children": [
    {
      "id": "alpha", "kind": "section", "label": "Alpha", "icon": "A",
      "color": "#3b82f6", "track": "Pipeline",
      "meta": [["Gate", "mu >= 7"]],
      "children": [
        {"id": "a1", "kind": "leaf", "label": "a1", "caption": "first",
         "meta": [["Inputs", ["brief"]]]},
        {"id": "a2", "kind": "leaf", "label": "a2", "caption": "second"},
        {"id": "alpha-g", "kind": "group", "label": "Grouped", "children": [
          {"id": "a3", "kind": "leaf", "label": "a3"}
        ]}
      ]
    },
    {
      "id": "beta", "kind": "section", "label": "Beta", "track": "Transversal",
      "children": [
        {"id": "beta-outer", "kind": "group", "label": "Outer", "children": [
          {"id": "beta-inner", "kind": "group", "label": "Inner", "children": [
            {"id": "b1", "kind": "leaf", "label": "b1"}
          ]}
        ]},
        {"id": "b2", "kind": "leaf", "label": "b2"}
      ]
    },
    {
      "id": "gamma", "kind": "section", "label": "Gamma", "track": "Pipeline"
    }
  ]
}"##;

pub(crate) fn small_catalog() -> Catalog {
    Catalog::from_json_str(SMALL_CATALOG_JSON).expect("fixture catalog")
}

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}
