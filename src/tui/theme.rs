// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

const COLOR_ENV: &str = "NEXOS_TUI_COLOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TuiTheme {
    node_colors: bool,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self { node_colors: true }
    }
}

impl TuiTheme {
    pub(crate) fn from_env() -> Result<Self, ThemeError> {
        let node_colors = match env::var(COLOR_ENV) {
            Ok(value) => parse_switch(&value).ok_or_else(|| ThemeError::InvalidEnv {
                name: COLOR_ENV.to_owned(),
                value: value.trim().to_owned(),
            })?,
            Err(env::VarError::NotPresent) => true,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ThemeError::InvalidEnv {
                    name: COLOR_ENV.to_owned(),
                    value: "<non-unicode>".to_owned(),
                });
            }
        };
        Ok(Self { node_colors })
    }

    #[cfg(test)]
    pub(crate) fn monochrome() -> Self {
        Self { node_colors: false }
    }

    /// Terminal colour for a catalog colour, or `None` when colours are off
    /// or the value does not parse.
    pub(crate) fn node_color(&self, hex: Option<&str>) -> Option<Color> {
        if !self.node_colors {
            return None;
        }
        let hex = hex?;
        match parse_hex_color(hex) {
            Ok(color) => Some(color),
            Err(error) => {
                tracing::debug!(%error, "ignoring catalog colour");
                None
            }
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(super::FOCUS_COLOR)
        } else {
            Style::default()
        }
    }

    pub(crate) fn lane_label_style(&self, color: Option<&str>) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        match self.node_color(color) {
            Some(color) => style.fg(color),
            None => style,
        }
    }

    pub(crate) fn plain_node_style(&self, color: Option<&str>) -> Style {
        match self.node_color(color) {
            Some(color) => Style::default().fg(color),
            None => Style::default(),
        }
    }

    pub(crate) fn selected_node_style(&self, color: Option<&str>) -> Style {
        let bg = self.node_color(color).unwrap_or(super::FOCUS_COLOR);
        Style::default()
            .fg(Color::Black)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn dimmed_style(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub(crate) fn cursor_style(&self) -> Style {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    /// Whole-panel style for the one frame drawn right after a view change.
    pub(crate) fn fade_style(&self) -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "on" | "true" | "yes" => Some(true),
        "0" | "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn parse_hex_color(value: &str) -> Result<Color, ThemeError> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid = || ThemeError::InvalidColor(trimmed.to_owned());

    let expanded = match hex.len() {
        3 => hex.chars().flat_map(|ch| [ch, ch]).collect::<String>(),
        6 => hex.to_owned(),
        _ => return Err(invalid()),
    };
    if !expanded.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let rgb = u32::from_str_radix(&expanded, 16).map_err(|_| invalid())?;
    let r = ((rgb >> 16) & 0xFF) as u8;
    let g = ((rgb >> 8) & 0xFF) as u8;
    let b = (rgb & 0xFF) as u8;
    Ok(Color::Rgb(r, g, b))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("invalid env {name}={value} (expected on/off)")]
    InvalidEnv { name: String, value: String },
    #[error("invalid hex color: {0} (expected #RRGGBB or #RGB)")]
    InvalidColor(String),
}
