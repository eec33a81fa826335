// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The NEXOS v3.0 pipeline catalog shipped with the binary.

use super::catalog::{Catalog, CatalogError};

pub const BUILTIN_CATALOG_JSON: &str = include_str!("../../assets/nexos-catalog.json");

pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_json_str(BUILTIN_CATALOG_JSON)
}
