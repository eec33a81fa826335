// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! NEXOS: master-detail viewer for the NEXOS content pipeline.
//!
//! The crate is layered bottom-up:
//! - [`model`]: the immutable content catalog (sections, groups, leaves).
//! - [`nav`]: navigation state, the address fragment codec, history and the
//!   router/dispatcher that glue user interactions to renders.
//! - [`render`]: pure presentation builders (breadcrumb, diagram, tree) plus a
//!   plain-text printer.
//! - [`query`]: section/leaf search.
//! - [`tui`]: the ratatui front end.

pub mod model;
pub mod nav;
pub mod query;
pub mod render;
pub mod tui;
