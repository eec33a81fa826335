// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::fragment::Fragment;

/// Browser-style session history of fragments.
pub trait History {
    fn current(&self) -> &Fragment;

    /// Appends `fragment` after the cursor, discarding any forward entries.
    fn push(&mut self, fragment: Fragment);

    /// Moves the cursor back; `false` when already at the oldest entry.
    fn back(&mut self) -> bool;

    /// Moves the cursor forward; `false` when already at the newest entry.
    fn forward(&mut self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<Fragment>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new(initial: Fragment) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn entries(&self) -> &[Fragment] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Fragment::default())
    }
}

impl History for MemoryHistory {
    fn current(&self) -> &Fragment {
        // `entries` is never empty: it starts with one entry and only grows.
        &self.entries[self.cursor]
    }

    fn push(&mut self, fragment: Fragment) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment);
        self.cursor = self.entries.len() - 1;
    }

    fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    fn forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{History, MemoryHistory};
    use crate::nav::fragment::Fragment;

    fn frag(raw: &str) -> Fragment {
        Fragment::from_address(raw)
    }

    #[test]
    fn push_truncates_forward_entries() {
        let mut history = MemoryHistory::default();
        history.push(frag("ph0"));
        history.push(frag("ph0/web-scout"));
        assert!(history.back());
        assert_eq!(history.current().as_str(), "ph0");

        history.push(frag("ph1"));
        assert_eq!(history.entries().len(), 3);
        assert!(!history.forward());
        assert_eq!(history.current().as_str(), "ph1");
    }

    #[test]
    fn back_and_forward_stop_at_the_ends() {
        let mut history = MemoryHistory::new(frag("ph0"));
        assert!(!history.back());
        assert!(!history.forward());
        history.push(frag("ph1"));
        assert!(history.back());
        assert!(!history.back());
        assert!(history.forward());
        assert_eq!(history.cursor(), 1);
    }
}
