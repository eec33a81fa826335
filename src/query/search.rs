// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Catalog, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchKind {
    #[default]
    Regular,
    Fuzzy,
}

impl SearchKind {
    pub fn toggled(self) -> Self {
        match self {
            Self::Regular => Self::Fuzzy,
            Self::Fuzzy => Self::Regular,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Fuzzy => "fuzzy",
        }
    }
}

/// A jump target: a section, or a leaf inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub section: NodeId,
    pub leaf: Option<NodeId>,
    /// Human-readable line for result lists.
    pub title: String,
    haystack: String,
}

impl SearchCandidate {
    pub fn haystack(&self) -> &str {
        &self.haystack
    }
}

/// Every section followed by its leaves, in catalog order.
pub fn search_candidates(catalog: &Catalog) -> Vec<SearchCandidate> {
    let mut out = Vec::with_capacity(catalog.section_count() + catalog.leaf_count());
    for section in catalog.sections() {
        out.push(SearchCandidate {
            section: section.id().clone(),
            leaf: None,
            title: section.label().to_owned(),
            haystack: haystack_for(&[
                section.id().as_str(),
                section.label(),
                section.caption().unwrap_or_default(),
            ]),
        });
        for leaf in section.leaves() {
            out.push(SearchCandidate {
                section: section.id().clone(),
                leaf: Some(leaf.id().clone()),
                title: format!("{} / {}", section.label(), leaf.label()),
                haystack: haystack_for(&[
                    leaf.id().as_str(),
                    leaf.label(),
                    leaf.caption().unwrap_or_default(),
                ]),
            });
        }
    }
    out
}

fn haystack_for(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Indices into `candidates`, best match first.
///
/// Matches inside `active_section` sort ahead of the rest; ties break on the
/// haystack so the order is stable across runs.
pub fn ranked_search_results(
    candidates: &[SearchCandidate],
    query: &str,
    kind: SearchKind,
    active_section: Option<&NodeId>,
) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let score = match kind {
        SearchKind::Regular => regular_score,
        SearchKind::Fuzzy => fuzzy_score,
    };
    let mut matches: Vec<(bool, i64, usize)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(idx, candidate)| {
            let active = active_section == Some(&candidate.section);
            score(&needle, &candidate.haystack).map(|score| (active, score, idx))
        })
        .collect();

    matches.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(b.1.cmp(&a.1))
            .then_with(|| candidates[a.2].haystack.cmp(&candidates[b.2].haystack))
    });
    matches.into_iter().map(|(_, _, idx)| idx).collect()
}

/// Substring match. The id is the first haystack word: hitting it exactly
/// beats an id prefix, which beats a word start anywhere else.
fn regular_score(needle: &str, haystack: &str) -> Option<i64> {
    let at = haystack.find(needle)?;
    let id = haystack.split(' ').next().unwrap_or_default();
    let word_start = haystack[..at]
        .chars()
        .next_back()
        .map_or(true, |ch| !ch.is_alphanumeric());
    let tier = if id == needle {
        3
    } else if id.starts_with(needle) {
        2
    } else if word_start {
        1
    } else {
        0
    };
    let hits = haystack.matches(needle).count() as i64;
    Some(tier * 100_000 - at as i64 * 100 + hits * 10 - haystack.len() as i64)
}

/// Subsequence match, ranked by the closest single word and then by how
/// tightly the needle's chars cluster.
fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let span = match_span(needle, haystack)?;
    let closest_word = haystack
        .split(' ')
        .map(|word| rapidfuzz::fuzz::ratio(needle.chars(), word.chars()))
        .fold(0.0_f64, f64::max);
    let contiguous = if haystack.contains(needle) { 5_000 } else { 0 };
    Some((closest_word * 10_000.0).round() as i64 + contiguous - span as i64 * 10)
}

/// Chars from the first to the last matched char, when `needle` is a
/// subsequence of `haystack`.
fn match_span(needle: &str, haystack: &str) -> Option<usize> {
    let mut wanted = needle.chars().peekable();
    let mut first = None;
    let mut last = 0;
    for (idx, ch) in haystack.chars().enumerate() {
        match wanted.peek() {
            None => break,
            Some(&want) if want == ch => {
                wanted.next();
                first.get_or_insert(idx);
                last = idx;
            }
            Some(_) => {}
        }
    }
    match (wanted.peek(), first) {
        (None, Some(first)) => Some(last - first + 1),
        _ => None,
    }
}
