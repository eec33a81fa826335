// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Content catalog: the immutable tree of sections, groups and leaves.

pub mod builtin;
pub mod catalog;
pub mod content;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;

pub use builtin::builtin_catalog;
pub use catalog::{Catalog, CatalogError, MACRO_VIEW_ID};
pub use content::{ContentNode, MetaEntry, MetaValue, NodeKind, NodeSpec};
pub use ids::{IdError, NodeId};
