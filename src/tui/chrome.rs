// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, help, and style helpers used by TUI rendering.
fn stack_panes_vertically(area: Rect) -> bool {
    area.width < 90
}

fn footer_uses_compact_mode(area: Rect) -> bool {
    area.width < 100
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Diagram,
    Tree,
    Breadcrumb,
}

impl Focus {
    fn cycle(self) -> Self {
        match self {
            Self::Diagram => Self::Tree,
            Self::Tree => Self::Breadcrumb,
            Self::Breadcrumb => Self::Diagram,
        }
    }

    fn cycle_back(self) -> Self {
        match self {
            Self::Diagram => Self::Breadcrumb,
            Self::Tree => Self::Diagram,
            Self::Breadcrumb => Self::Tree,
        }
    }
}

fn view_title(label: &str, key: char, tail: Option<&str>) -> String {
    let mut title = format!("─[{key}]─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

/// Footer spans: a run of `Label:key` entries joined by ` | `.
#[derive(Default)]
struct Footer {
    spans: Vec<Span<'static>>,
}

impl Footer {
    /// Prompt marker and the text typed so far, followed by entries.
    fn prompt(marker: char, input: &str) -> Self {
        Self {
            spans: vec![
                Span::styled(marker.to_string(), key_style()),
                Span::raw(input.to_owned()),
                Span::raw("   "),
            ],
        }
    }

    fn entry(&mut self, label: &str, key: &str) -> &mut Self {
        self.entry_if(label, key, true)
    }

    /// Disabled entries stay in place, greyed out.
    fn entry_if(&mut self, label: &str, key: &str, enabled: bool) -> &mut Self {
        self.separator();
        self.spans
            .push(Span::styled(format!("{}:", title_case(label)), label_style()));
        let style = if enabled {
            key_style()
        } else {
            key_style().fg(Color::DarkGray)
        };
        self.spans.push(Span::styled(key.to_owned(), style));
        self
    }

    fn push(&mut self, span: Span<'static>) -> &mut Self {
        self.spans.push(span);
        self
    }

    fn toast(&mut self, suffix: &str) -> &mut Self {
        let message = suffix.strip_prefix(" | ").unwrap_or(suffix).trim();
        if !message.is_empty() {
            self.separator();
            self.spans.push(Span::styled("Toast:", label_style()));
            self.spans.push(Span::raw(message.to_owned()));
        }
        self
    }

    fn separator(&mut self) {
        if !self.spans.is_empty() {
            self.spans.push(Span::styled(" | ", label_style()));
        }
    }

    fn into_line(self) -> Line<'static> {
        Line::from(self.spans)
    }
}

fn footer_help_line(app: &App, toast_suffix: &str, compact: bool) -> Line<'static> {
    let history = app.dispatcher.router().history();
    let at_top = app.dispatcher.presentation().state().is_top();
    let mut footer = Footer::default();
    footer.entry("AT", &app.dispatcher.presentation().fragment().href());

    if !compact {
        match app.focus {
            Focus::Diagram => footer.entry("MOVE", "←↑↓→").entry("OPEN", "⏎"),
            Focus::Tree => footer
                .entry("MOVE", "↑↓")
                .entry("OPEN", "⏎")
                .entry("FOLD", "⏡")
                .entry("ALL", "e/c"),
            Focus::Breadcrumb => footer.entry("MOVE", "←→").entry("GO", "⏎"),
        };
        footer
            .entry_if("UP", "⌫", !at_top)
            .entry_if("BACK", "[", history.can_go_back())
            .entry_if("FWD", "]", history.can_go_forward())
            .entry("FIND", "/")
            .entry("GOTO", "g");
    }
    footer.entry("HELP", "?").entry("QUIT", "q").toast(toast_suffix);
    footer.into_line()
}

fn search_footer_line(app: &App, toast_suffix: &str) -> Line<'static> {
    let mut footer = Footer::prompt(app.search_prefix(), &app.search_query);
    if !app.search_query.is_empty() {
        let count = match app.search_results.len() {
            0 => "0".to_owned(),
            total => format!("{}/{total}", app.search_result_index + 1),
        };
        footer.push(Span::styled(count, Style::default().fg(Color::LightGreen)));
    }
    if let Some(candidate) = app.current_search_candidate() {
        footer.push(Span::raw(" ")).push(Span::styled(
            candidate.title.clone(),
            Style::default().fg(Color::White),
        ));
    }

    if app.search_mode == SearchMode::Results {
        footer.entry("Next", "n/N");
    } else {
        footer
            .entry("Pick", "↑↓")
            .entry(app.search_kind.label(), "Tab")
            .entry("Accept", "Enter");
    }
    footer.entry("Close", "Esc").toast(toast_suffix);
    footer.into_line()
}

fn fragment_footer_line(input: &str) -> Line<'static> {
    let mut footer = Footer::prompt('#', input);
    footer.entry("Go", "Enter").entry("Cancel", "Esc");
    footer.into_line()
}

fn footer_brand_line() -> Line<'static> {
    Line::styled(FOOTER_BRAND, Style::default().fg(FOOTER_BRAND_COLOR))
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

fn label_style() -> Style {
    Style::default().fg(FOOTER_LABEL_COLOR)
}

fn key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

/// Box covering the given share of `area`, centred.
fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let scale = |len: u16, percent: u16| (u32::from(len) * u32::from(percent.min(100)) / 100) as u16;
    let width = scale(area.width, width_percent);
    let height = scale(area.height, height_percent);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("?", "Help (toggle)"),
            ("q", "Quit"),
            ("1/2/3", "Focus Diagram/Tree/Path"),
            ("Tab/Shift-Tab", "Focus next/previous panel"),
            ("Backspace/Esc", "Up one level"),
            ("[/]", "History back/forward"),
            ("/", "Regular search"),
            ("\\", "Fuzzy search"),
            ("g", "Go to an address"),
        ],
    ),
    (
        "Diagram",
        &[
            ("←/→ or h/l", "Previous/next node"),
            ("↑/↓ or k/j", "Previous/next lane"),
            ("Home/End", "First/last node"),
            ("Enter/Space", "Open section or toggle selection"),
        ],
    ),
    (
        "Tree",
        &[
            ("↑/↓ or k/j", "Move cursor"),
            ("PgUp/PgDn", "Move by page"),
            ("Enter", "Open or select; fold groups"),
            ("Space", "Fold/unfold item"),
            ("→/← or l/h", "Unfold/fold item"),
            ("e/c", "Unfold/fold everything"),
        ],
    ),
    (
        "Path",
        &[
            ("←/→ or h/l", "Move along the path"),
            ("Enter/Space", "Go to crumb"),
        ],
    ),
    (
        "Search",
        &[
            ("Type", "Update query"),
            ("Tab", "Switch regular/fuzzy"),
            ("↑/↓", "Pick result"),
            ("Enter", "Go to result"),
            ("n/N", "Next/previous result"),
            ("Esc", "Close search"),
        ],
    ),
    (
        "Help",
        &[
            ("j/k, ↑/↓, PgUp/PgDn, Home/End", "Scroll help"),
            ("Esc/?", "Close help"),
        ],
    ),
];

fn help_lines() -> Vec<Line<'static>> {
    let key_width = HELP_SECTIONS
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|(key, _)| text_len(key))
        .max()
        .unwrap_or(0);
    let header = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);

    let mut lines = Vec::new();
    for (header_text, entries) in HELP_SECTIONS {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::styled(format!("--- {header_text} ---"), header));
        lines.extend(entries.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{key:>key_width$}"), key_style()),
                Span::raw("  "),
                Span::raw(*desc),
            ])
        }));
    }
    lines.push(Line::from(vec![
        Span::styled("Note: ", dim),
        Span::styled("g", key_style()),
        Span::styled(
            " accepts section or section/item; unknown addresses show the overview.",
            dim,
        ),
    ]));
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(82, 84, main_area);
    let focus = Style::default().fg(FOCUS_COLOR);
    let block = Block::default()
        .borders(Borders::ALL)
        .title("─ Help ─")
        .border_style(focus)
        .title_style(focus.add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    let lines = help_lines();

    app.help_viewport_height = inner.height;
    let overflow = lines.len().saturating_sub(usize::from(inner.height.max(1)));
    app.help_scroll = app
        .help_scroll
        .min(u16::try_from(overflow).unwrap_or(u16::MAX));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((app.help_scroll, 0)),
        area,
    );
}
