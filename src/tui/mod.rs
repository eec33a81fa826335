// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Master-detail shell (ratatui + crossterm) over a [`Dispatcher`]: the path
//! bar on top, the diagram on the left and the content tree on the right.
//! Every key press is turned into an [`Interaction`] or a local cursor move;
//! drawing only ever reads the dispatcher's latest [`Presentation`].

use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use thiserror::Error;
use tracing::debug;

use crate::nav::{encode, Dispatcher, Fragment, Interaction, View};
use crate::query::{ranked_search_results, search_candidates, SearchCandidate, SearchKind};
use crate::render::{
    text_len, truncate_with_ellipsis, DiagramView, Emphasis, Presentation, RowContent, Transition,
    TreeView, VisualNode,
};

mod theme;

pub use theme::ThemeError;
use theme::TuiTheme;

const FOCUS_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🅽 🅴 🆇 🅾 🆂 ";
const IDLE_POLL: Duration = Duration::from_millis(250);
const FADE_DURATION: Duration = Duration::from_millis(120);
const TOAST_DURATION: Duration = Duration::from_secs(2);
const TREE_PAGE: usize = 10;
const NODE_GAP: &str = "  ";

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// Runs the interactive terminal UI until the user quits.
pub fn run(dispatcher: Dispatcher) -> Result<(), TuiError> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(dispatcher, theme);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let crumb_area = layout[0];
    let main_area = layout[1];
    let status_area = layout[2];

    let direction = if stack_panes_vertically(main_area) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let panes = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_area);
    let diagram_area = panes[0];
    let tree_area = panes[1];

    let fading = app.is_fading(Instant::now());
    if !fading {
        app.fade_until = None;
    }

    let crumbs = Paragraph::new(breadcrumb_line(app)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(view_title("Path", '3', None))
            .border_style(app.theme.panel_border_style(app.focus == Focus::Breadcrumb)),
    );
    frame.render_widget(crumbs, crumb_area);

    let viewport_width = diagram_area.width.saturating_sub(2) as usize;
    let viewport_height = diagram_area.height.saturating_sub(2) as usize;
    let mut text = diagram_text(
        app.dispatcher.presentation().diagram(),
        Some(app.diagram_cursor),
        app.focus == Focus::Diagram,
        &app.theme,
        viewport_width,
    );
    if fading {
        let faded = app.theme.fade_style();
        for line in &mut text.lines {
            for span in &mut line.spans {
                span.style = faded;
            }
        }
    }
    let scroll_y = text
        .cursor_line
        .map(|line| line.saturating_sub(viewport_height.saturating_sub(1)))
        .unwrap_or(0)
        .min(u16::MAX as usize) as u16;
    let diagram_tail = format!("({})", app.dispatcher.presentation().diagram().node_count());
    let diagram = Paragraph::new(text.lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Diagram", '1', Some(&diagram_tail)))
                .border_style(app.theme.panel_border_style(app.focus == Focus::Diagram)),
        )
        .scroll((scroll_y, 0));
    frame.render_widget(diagram, diagram_area);

    let tree_width = tree_area.width.saturating_sub(2) as usize;
    let items = tree_list_items(&app.tree, &app.theme, tree_width);
    let highlight = if app.focus == Focus::Tree {
        app.theme.cursor_style()
    } else {
        Style::default()
    };
    let tree = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(view_title("Tree", '2', None))
                .border_style(app.theme.panel_border_style(app.focus == Focus::Tree)),
        )
        .highlight_style(highlight);
    frame.render_stateful_widget(tree, tree_area, &mut app.tree_state);

    let toast_snapshot = app
        .toast
        .as_ref()
        .map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    let mut prompt_len = None::<usize>;
    let status_line = if let Some(input) = app.fragment_input.as_deref() {
        prompt_len = Some(text_len(input));
        fragment_footer_line(input)
    } else if app.search_mode != SearchMode::Inactive {
        if app.search_mode == SearchMode::Editing {
            prompt_len = Some(text_len(&app.search_query));
        }
        search_footer_line(app, &toast_suffix)
    } else {
        footer_help_line(app, &toast_suffix, footer_uses_compact_mode(area))
    };
    frame.render_widget(Paragraph::new(status_line), status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);
    if let Some(input_len) = prompt_len {
        let cursor_x = status_area
            .x
            .saturating_add(1)
            .saturating_add(input_len.min(u16::MAX as usize) as u16)
            .min(status_area.x.saturating_add(status_area.width.saturating_sub(1)));
        frame.set_cursor_position((cursor_x, status_area.y));
    }

    if app.show_help {
        render_help(frame, app, main_area);
    }
}

// Extracted title/footer/help rendering helpers.
include!("chrome.rs");

fn breadcrumb_line(app: &App) -> Line<'static> {
    let separator = Style::default().fg(FOOTER_LABEL_COLOR);
    let mut spans = Vec::new();
    for (idx, crumb) in app
        .dispatcher
        .presentation()
        .breadcrumb()
        .crumbs
        .iter()
        .enumerate()
    {
        if idx > 0 {
            spans.push(Span::styled(" › ", separator));
        }
        let label = match crumb.icon.as_deref() {
            Some(icon) => format!("{icon} {}", crumb.label),
            None => crumb.label.clone(),
        };
        let mut style = if crumb.current {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(FOOTER_KEY_COLOR)
        };
        if app.focus == Focus::Breadcrumb && idx == app.crumb_cursor {
            style = style.patch(app.theme.cursor_style());
        }
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}

struct DiagramText {
    lines: Vec<Line<'static>>,
    /// Line holding the cursor node, for scrolling.
    cursor_line: Option<usize>,
}

fn diagram_text(
    diagram: &DiagramView,
    cursor: Option<(usize, usize)>,
    focused: bool,
    theme: &TuiTheme,
    width: usize,
) -> DiagramText {
    let width = width.max(8);
    let mut lines = Vec::<Line<'static>>::new();
    let mut cursor_line = None;

    let title = match diagram.icon.as_deref() {
        Some(icon) => format!("{icon} {}", diagram.title),
        None => diagram.title.clone(),
    };
    lines.push(Line::from(Span::styled(
        truncate_with_ellipsis(&title, width),
        theme.lane_label_style(diagram.color.as_deref()),
    )));
    if let Some(subtitle) = diagram.subtitle.as_deref() {
        lines.push(Line::from(Span::styled(
            truncate_with_ellipsis(subtitle, width),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));

    if diagram.lanes.is_empty() {
        lines.push(Line::from(Span::styled(
            "Nothing in this view yet.",
            theme.dimmed_style(),
        )));
    }

    for (lane_idx, lane) in diagram.lanes.iter().enumerate() {
        if let Some(label) = lane.label.as_deref() {
            lines.push(Line::from(Span::styled(
                truncate_with_ellipsis(label, width),
                theme.lane_label_style(lane.color.as_deref().or(diagram.color.as_deref())),
            )));
        }

        let mut row = Vec::<Span<'static>>::new();
        let mut row_len = 0usize;
        for (node_idx, node) in lane.nodes.iter().enumerate() {
            let chip = truncate_with_ellipsis(&node_chip(node), width);
            let chip_len = text_len(&chip);
            if !row.is_empty() && row_len + NODE_GAP.len() + chip_len > width {
                lines.push(Line::from(std::mem::take(&mut row)));
                row_len = 0;
            }
            if !row.is_empty() {
                row.push(Span::raw(NODE_GAP));
                row_len += NODE_GAP.len();
            }

            let mut style = match node.emphasis {
                Emphasis::Plain => theme.plain_node_style(node.color.as_deref()),
                Emphasis::Selected => theme.selected_node_style(node.color.as_deref()),
                Emphasis::Dimmed => theme.dimmed_style(),
            };
            if cursor == Some((lane_idx, node_idx)) {
                cursor_line = Some(lines.len());
                if focused {
                    style = style.patch(theme.cursor_style());
                }
            }
            row.push(Span::styled(chip, style));
            row_len += chip_len;
        }
        if !row.is_empty() {
            lines.push(Line::from(row));
        }
        lines.push(Line::from(""));
    }

    if let Some(node) = cursor.and_then(|(lane, idx)| diagram.node_at(lane, idx)) {
        if let Some(caption) = node.caption.as_deref() {
            lines.push(Line::from(Span::styled(
                truncate_with_ellipsis(&format!("› {caption}"), width),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    DiagramText { lines, cursor_line }
}

fn node_chip(node: &VisualNode) -> String {
    match node.icon.as_deref() {
        Some(icon) => format!("[{icon} {}]", node.label),
        None => format!("[{}]", node.label),
    }
}

fn tree_list_items(tree: &TreeView, theme: &TuiTheme, width: usize) -> Vec<ListItem<'static>> {
    let key_style = Style::default().fg(FOOTER_KEY_COLOR);
    let caption_style = Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC);

    tree.rows()
        .into_iter()
        .map(|row| {
            let indent = "  ".repeat(row.depth);
            let budget = width.saturating_sub(text_len(&indent)).max(4);
            let line = match row.content {
                RowContent::Item(item) => {
                    let marker = if !item.has_body() {
                        "·"
                    } else if item.expanded {
                        "▾"
                    } else {
                        "▸"
                    };
                    let label = match item.icon.as_deref() {
                        Some(icon) => format!("{marker} {icon} {}", item.label),
                        None => format!("{marker} {}", item.label),
                    };
                    let style = if item.selected {
                        Style::default()
                            .fg(FOCUS_COLOR)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    let mut spans = vec![
                        Span::raw(indent),
                        Span::styled(truncate_with_ellipsis(&label, budget), style),
                    ];
                    if item.selected {
                        spans.push(Span::styled(" ◀", style));
                    }
                    Line::from(spans)
                }
                RowContent::Caption(caption) => Line::from(vec![
                    Span::raw(indent),
                    Span::styled(truncate_with_ellipsis(caption, budget), caption_style),
                ]),
                RowContent::Detail(detail) => {
                    let key = format!("{}: ", detail.key);
                    let value_budget = budget.saturating_sub(text_len(&key)).max(1);
                    Line::from(vec![
                        Span::raw(indent),
                        Span::styled(key, key_style),
                        Span::styled(
                            truncate_with_ellipsis(&detail.value, value_budget),
                            theme.plain_node_style(None),
                        ),
                    ])
                }
            };
            ListItem::new(line)
        })
        .collect()
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchMode {
    Inactive,
    Editing,
    Results,
}

struct App {
    dispatcher: Dispatcher,
    theme: TuiTheme,
    seen_seq: u64,
    focus: Focus,
    diagram_cursor: (usize, usize),
    tree: TreeView,
    tree_state: ListState,
    crumb_cursor: usize,
    fade_until: Option<Instant>,
    show_help: bool,
    help_scroll: u16,
    help_viewport_height: u16,
    toast: Option<Toast>,
    search_mode: SearchMode,
    search_kind: SearchKind,
    search_query: String,
    search_candidates: Vec<SearchCandidate>,
    search_results: Vec<usize>,
    search_result_index: usize,
    fragment_input: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(dispatcher: Dispatcher, theme: TuiTheme) -> Self {
        let mut app = Self {
            dispatcher,
            theme,
            seen_seq: 0,
            focus: Focus::Diagram,
            diagram_cursor: (0, 0),
            tree: TreeView::default(),
            tree_state: ListState::default(),
            crumb_cursor: 0,
            fade_until: None,
            show_help: false,
            help_scroll: 0,
            help_viewport_height: 0,
            toast: None,
            search_mode: SearchMode::Inactive,
            search_kind: SearchKind::Regular,
            search_query: String::new(),
            search_candidates: Vec::new(),
            search_results: Vec::new(),
            search_result_index: 0,
            fragment_input: None,
            should_quit: false,
        };
        let presentation = app.dispatcher.presentation().clone();
        app.adopt_presentation(&presentation, true);
        app
    }

    fn presentation(&self) -> &Presentation {
        self.dispatcher.presentation()
    }

    fn dispatch(&mut self, interaction: Interaction) {
        debug!(?interaction, "dispatch");
        let before = self.seen_seq;
        self.dispatcher.dispatch(interaction);
        if self.presentation().seq() != before {
            let presentation = self.presentation().clone();
            self.adopt_presentation(&presentation, false);
        }
    }

    /// Pulls local panel state (tree copy, cursors, fade) from a new frame.
    fn adopt_presentation(&mut self, presentation: &Presentation, initial: bool) {
        self.seen_seq = presentation.seq();
        self.tree = presentation.tree().clone();
        let view_changed = presentation.transition() == Transition::ViewChanged;

        if view_changed && !initial {
            self.fade_until = Some(Instant::now() + FADE_DURATION);
        }
        if view_changed || initial {
            self.diagram_cursor = (0, 0);
            self.tree_state.select(Some(0));
        }
        if let Some(position) = presentation
            .state()
            .selected()
            .and_then(|id| presentation.diagram().position_of(id.as_str()))
        {
            self.diagram_cursor = position;
        }
        self.clamp_diagram_cursor();

        if let Some(row) = presentation
            .tree()
            .reveal
            .as_deref()
            .and_then(|path| item_row_index(&self.tree, path))
        {
            self.tree_state.select(Some(row));
        }
        self.clamp_tree_cursor();

        self.crumb_cursor = presentation
            .breadcrumb()
            .crumbs
            .iter()
            .position(|crumb| crumb.current)
            .unwrap_or(0);
    }

    fn is_fading(&self, now: Instant) -> bool {
        self.fade_until.is_some_and(|until| until > now)
    }

    /// Wakes up in time to draw the settled frame once a fade ends.
    fn poll_timeout(&self, now: Instant) -> Duration {
        match self.fade_until {
            Some(until) if until > now => (until - now).min(IDLE_POLL),
            _ => IDLE_POLL,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            if self.search_mode != SearchMode::Inactive {
                self.clear_search();
            }
            self.help_scroll = 0;
        }
    }

    fn help_scroll_by(&mut self, delta: i32) {
        if delta < 0 {
            self.help_scroll = self.help_scroll.saturating_sub((-delta) as u16);
        } else {
            self.help_scroll = self.help_scroll.saturating_add(delta as u16);
        }
    }

    fn help_scroll_page(&mut self, direction: i32) {
        let page = self.help_viewport_height.max(1).saturating_sub(1) as i32;
        let step = page.max(1);
        self.help_scroll_by(direction.signum() * step);
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.show_help {
            match code {
                KeyCode::Esc | KeyCode::Char('?') => {
                    self.show_help = false;
                }
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => self.help_scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.help_scroll_by(-1),
                KeyCode::PageDown => self.help_scroll_page(1),
                KeyCode::PageUp => self.help_scroll_page(-1),
                KeyCode::Home => self.help_scroll = 0,
                KeyCode::End => self.help_scroll = u16::MAX,
                _ => {}
            }
            return false;
        }

        if self.fragment_input.is_some() {
            self.handle_fragment_key(code);
            return false;
        }

        match self.search_mode {
            SearchMode::Editing => {
                self.handle_search_edit_key(code);
                return false;
            }
            SearchMode::Results => match code {
                KeyCode::Esc => {
                    self.clear_search();
                    return false;
                }
                KeyCode::Char('n') => {
                    self.search_next();
                    return false;
                }
                KeyCode::Char('N') => {
                    self.search_prev();
                    return false;
                }
                _ => {}
            },
            SearchMode::Inactive => {}
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('1') => self.focus = Focus::Diagram,
            KeyCode::Char('2') => self.focus = Focus::Tree,
            KeyCode::Char('3') => self.focus = Focus::Breadcrumb,
            KeyCode::Tab => self.focus = self.focus.cycle(),
            KeyCode::BackTab => self.focus = self.focus.cycle_back(),
            KeyCode::Char('/') => self.enter_search_mode(SearchKind::Regular),
            KeyCode::Char('\\') => self.enter_search_mode(SearchKind::Fuzzy),
            KeyCode::Char('?') => self.toggle_help(),
            KeyCode::Char('g') => self.open_fragment_prompt(),
            KeyCode::Char('[') => self.step_history(Interaction::Back, "No earlier entry"),
            KeyCode::Char(']') => self.step_history(Interaction::Forward, "No later entry"),
            KeyCode::Backspace | KeyCode::Esc => self.ascend(),
            _ => match self.focus {
                Focus::Diagram => self.handle_diagram_key(code),
                Focus::Tree => self.handle_tree_key(code),
                Focus::Breadcrumb => self.handle_breadcrumb_key(code),
            },
        }

        false
    }

    fn step_history(&mut self, interaction: Interaction, empty_message: &str) {
        let before = self.presentation().seq();
        self.dispatch(interaction);
        if self.presentation().seq() == before {
            self.set_toast(empty_message.to_owned());
        }
    }

    fn ascend(&mut self) {
        if self.presentation().state().is_top() {
            self.set_toast("Already at the overview");
            return;
        }
        self.dispatch(Interaction::Ascend);
    }

    fn handle_diagram_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') => self.move_diagram_cursor(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_diagram_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_diagram_lane(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_diagram_lane(1),
            KeyCode::Home => self.diagram_cursor = (0, 0),
            KeyCode::End => {
                let diagram = self.presentation().diagram();
                if let Some(lane) = diagram.lanes.len().checked_sub(1) {
                    let idx = diagram.lanes[lane].nodes.len().saturating_sub(1);
                    self.diagram_cursor = (lane, idx);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_diagram_node(),
            _ => {}
        }
    }

    /// Steps through nodes in reading order, crossing lane boundaries.
    fn move_diagram_cursor(&mut self, delta: isize) {
        let diagram = self.presentation().diagram();
        let order = diagram
            .lanes
            .iter()
            .enumerate()
            .flat_map(|(lane, l)| (0..l.nodes.len()).map(move |idx| (lane, idx)))
            .collect::<Vec<_>>();
        let Some(current) = order.iter().position(|pos| *pos == self.diagram_cursor) else {
            return;
        };
        let next = current
            .saturating_add_signed(delta)
            .min(order.len().saturating_sub(1));
        self.diagram_cursor = order[next];
    }

    fn move_diagram_lane(&mut self, delta: isize) {
        let diagram = self.presentation().diagram();
        let (lane, idx) = self.diagram_cursor;
        let Some(last) = diagram.lanes.len().checked_sub(1) else {
            return;
        };
        let lane = lane.saturating_add_signed(delta).min(last);
        let idx = idx.min(diagram.lanes[lane].nodes.len().saturating_sub(1));
        self.diagram_cursor = (lane, idx);
    }

    fn clamp_diagram_cursor(&mut self) {
        let diagram = self.presentation().diagram();
        let (lane, idx) = self.diagram_cursor;
        self.diagram_cursor = match diagram.lanes.len().checked_sub(1) {
            None => (0, 0),
            Some(last) => {
                let lane = lane.min(last);
                (lane, idx.min(diagram.lanes[lane].nodes.len().saturating_sub(1)))
            }
        };
    }

    fn activate_diagram_node(&mut self) {
        let (lane, idx) = self.diagram_cursor;
        let presentation = self.presentation();
        let Some(node) = presentation.diagram().node_at(lane, idx) else {
            return;
        };
        let interaction = Interaction::activate(node, presentation.state().view());
        self.dispatch(interaction);
    }

    fn handle_tree_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.move_tree_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_tree_cursor(1),
            KeyCode::PageUp => self.move_tree_cursor(-(TREE_PAGE as isize)),
            KeyCode::PageDown => self.move_tree_cursor(TREE_PAGE as isize),
            KeyCode::Home => self.tree_state.select(Some(0)),
            KeyCode::End => {
                let last = self.tree.rows().len().saturating_sub(1);
                self.tree_state.select(Some(last));
            }
            KeyCode::Enter => self.activate_tree_row(),
            KeyCode::Char(' ') => self.fold_tree_row(None),
            KeyCode::Right | KeyCode::Char('l') => self.fold_tree_row(Some(true)),
            KeyCode::Left | KeyCode::Char('h') => self.fold_tree_row(Some(false)),
            KeyCode::Char('e') => {
                self.tree.expand_all();
                self.clamp_tree_cursor();
            }
            KeyCode::Char('c') => {
                self.tree.collapse_all();
                self.clamp_tree_cursor();
            }
            _ => {}
        }
    }

    fn tree_cursor(&self) -> usize {
        self.tree_state.selected().unwrap_or(0)
    }

    fn tree_cursor_path(&self) -> Option<Vec<usize>> {
        self.tree
            .rows()
            .get(self.tree_cursor())
            .map(|row| row.path.clone())
    }

    fn move_tree_cursor(&mut self, delta: isize) {
        let last = self.tree.rows().len().saturating_sub(1);
        let next = self.tree_cursor().saturating_add_signed(delta).min(last);
        self.tree_state.select(Some(next));
    }

    fn clamp_tree_cursor(&mut self) {
        let last = self.tree.rows().len().saturating_sub(1);
        self.tree_state.select(Some(self.tree_cursor().min(last)));
    }

    /// Sections open and leaves select; everything else folds.
    fn activate_tree_row(&mut self) {
        let Some(path) = self.tree_cursor_path() else {
            return;
        };
        let interaction = self
            .tree
            .item_at(&path)
            .and_then(|item| item.id.as_ref())
            .and_then(|id| Interaction::open_node(self.dispatcher.catalog(), id));
        match interaction {
            Some(interaction) => self.dispatch(interaction),
            None => self.fold_tree_row(None),
        }
    }

    /// Sets or flips the expansion of the item under the cursor and parks
    /// the cursor on that item's own row.
    fn fold_tree_row(&mut self, expanded: Option<bool>) {
        let Some(path) = self.tree_cursor_path() else {
            return;
        };
        let Some(item) = self.tree.item_at_mut(&path) else {
            return;
        };
        item.expanded = expanded.unwrap_or(!item.expanded);
        let row = item_row_index(&self.tree, &path).unwrap_or(0);
        self.tree_state.select(Some(row));
        self.clamp_tree_cursor();
    }

    fn handle_breadcrumb_key(&mut self, code: KeyCode) {
        let len = self.presentation().breadcrumb().len();
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.crumb_cursor = self.crumb_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.crumb_cursor = (self.crumb_cursor + 1).min(len.saturating_sub(1));
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_crumb(),
            _ => {}
        }
    }

    fn activate_crumb(&mut self) {
        let target = self
            .presentation()
            .breadcrumb()
            .crumbs
            .get(self.crumb_cursor)
            .and_then(|crumb| crumb.target.clone());
        match target {
            Some(target) => self.dispatch(Interaction::Crumb(target)),
            None => self.set_toast("Already here"),
        }
    }

    fn open_fragment_prompt(&mut self) {
        if self.search_mode != SearchMode::Inactive {
            self.clear_search();
        }
        self.fragment_input = Some(self.presentation().fragment().as_str().to_owned());
    }

    fn handle_fragment_key(&mut self, code: KeyCode) {
        let Some(input) = self.fragment_input.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => self.fragment_input = None,
            KeyCode::Enter => {
                let raw = self.fragment_input.take().unwrap_or_default();
                self.enter_fragment(raw);
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(ch) => input.push(ch),
            _ => {}
        }
    }

    fn enter_fragment(&mut self, raw: String) {
        let typed = Fragment::from_address(&raw);
        self.dispatch(Interaction::EnterFragment(raw));
        let resolved = encode(self.presentation().state());
        if resolved != typed {
            self.set_toast(format!(
                "Unknown address {}; showing {}",
                typed.href(),
                resolved.href()
            ));
        }
    }

    fn enter_search_mode(&mut self, kind: SearchKind) {
        self.search_mode = SearchMode::Editing;
        self.search_kind = kind;
        self.search_query.clear();
        self.search_result_index = 0;
        self.search_results.clear();
        self.search_candidates = search_candidates(self.dispatcher.catalog());
    }

    fn handle_search_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.clear_search(),
            KeyCode::Enter => self.commit_search(),
            KeyCode::Tab => {
                self.search_kind = self.search_kind.toggled();
                self.update_search_results();
            }
            KeyCode::Down => self.step_search_index(1),
            KeyCode::Up => self.step_search_index(-1),
            KeyCode::Backspace => {
                self.search_query.pop();
                self.update_search_results();
            }
            KeyCode::Char(ch) => {
                self.search_query.push(ch);
                self.update_search_results();
            }
            _ => {}
        }
    }

    fn commit_search(&mut self) {
        if self.search_results.is_empty() {
            if !self.search_query.trim().is_empty() {
                self.set_toast(format!("No match for {:?}", self.search_query.trim()));
            }
            self.clear_search();
            return;
        }

        self.jump_to_current_search_result();
        if self.search_results.len() > 1 {
            self.search_mode = SearchMode::Results;
        } else {
            self.clear_search();
        }
    }

    fn clear_search(&mut self) {
        self.search_mode = SearchMode::Inactive;
        self.search_query.clear();
        self.search_candidates.clear();
        self.search_results.clear();
        self.search_result_index = 0;
    }

    fn update_search_results(&mut self) {
        self.search_results = ranked_search_results(
            &self.search_candidates,
            &self.search_query,
            self.search_kind,
            self.presentation().state().section_id(),
        );
        self.search_result_index = 0;
    }

    fn search_prefix(&self) -> char {
        match self.search_kind {
            SearchKind::Regular => '/',
            SearchKind::Fuzzy => '\\',
        }
    }

    fn current_search_candidate(&self) -> Option<&SearchCandidate> {
        self.search_results
            .get(self.search_result_index)
            .and_then(|&idx| self.search_candidates.get(idx))
    }

    fn step_search_index(&mut self, delta: isize) {
        let len = self.search_results.len();
        if len == 0 {
            return;
        }
        self.search_result_index = self
            .search_result_index
            .saturating_add_signed(delta)
            .min(len - 1);
    }

    fn jump_to_current_search_result(&mut self) {
        let Some(candidate) = self.current_search_candidate() else {
            return;
        };
        let view = View::Section(candidate.section.clone());
        let selected = candidate.leaf.clone();

        // Re-selecting the current leaf would toggle it off.
        let state = self.presentation().state();
        if state.view() == &view && state.selected() == selected.as_ref() {
            return;
        }
        self.dispatch(Interaction::Navigate { view, selected });
    }

    fn search_next(&mut self) {
        let len = self.search_results.len();
        if len <= 1 {
            return;
        }

        self.search_result_index = (self.search_result_index + 1) % len;
        self.jump_to_current_search_result();
    }

    fn search_prev(&mut self) {
        let len = self.search_results.len();
        if len <= 1 {
            return;
        }

        self.search_result_index = match self.search_result_index {
            0 => len - 1,
            n => n - 1,
        };
        self.jump_to_current_search_result();
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }
}

/// Row index of the item at `path` itself (not its caption or details).
fn item_row_index(tree: &TreeView, path: &[usize]) -> Option<usize> {
    tree.rows()
        .iter()
        .position(|row| row.path == path && matches!(row.content, RowContent::Item(_)))
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
