// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over the catalog.

pub mod search;

pub use search::{ranked_search_results, search_candidates, SearchCandidate, SearchKind};
