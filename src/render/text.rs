// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::canvas::Canvas;

/// Clips `text` to at most `max_len` chars, marking a cut with `…`.
pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_owned(),
        Some(_) if max_len == 0 => String::new(),
        Some(_) => {
            let keep = text
                .char_indices()
                .nth(max_len - 1)
                .map_or(text.len(), |(at, _)| at);
            format!("{}…", &text[..keep])
        }
    }
}

/// Display length in chars (labels are short; no grapheme handling).
pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Canvas contents with trailing blanks and empty trailing lines removed.
pub(crate) fn canvas_to_string_trimmed(canvas: &Canvas) -> String {
    let mut lines: Vec<String> = canvas
        .rows()
        .map(|row| {
            let line: String = row.iter().collect();
            line.trim_end_matches(' ').to_owned()
        })
        .collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    lines.join("\n")
}
