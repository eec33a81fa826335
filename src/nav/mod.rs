// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Navigation: state, fragment codec, history and the event dispatcher.

pub mod dispatch;
pub mod fragment;
pub mod history;
pub mod router;
pub mod state;

pub use dispatch::{Dispatcher, Interaction};
pub use fragment::{decode, encode, Fragment};
pub use history::{History, MemoryHistory};
pub use router::{NavOutcome, Router};
pub use state::{NavigationState, View};
