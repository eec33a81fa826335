// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nexos-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of nexos and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Line weight of a drawn box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxStyle {
    Light,
    Heavy,
    Dashed,
}

impl BoxStyle {
    /// `[horizontal, vertical, top-left, top-right, bottom-left, bottom-right]`
    const fn glyphs(self) -> [char; 6] {
        match self {
            Self::Light => ['─', '│', '┌', '┐', '└', '┘'],
            Self::Heavy => ['━', '┃', '┏', '┓', '┗', '┛'],
            Self::Dashed => ['┄', '┆', '┌', '┐', '└', '┘'],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanvasError {
    #[error("canvas area overflow: {width}*{height}")]
    AreaOverflow { width: usize, height: usize },
    #[error("out of bounds: ({x},{y}) not within {width}x{height}")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

/// A fixed-size, bounds-checked character grid. Last writer wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        let len = width
            .checked_mul(height)
            .ok_or(CanvasError::AreaOverflow { width, height })?;
        Ok(Self {
            width,
            height,
            cells: vec![' '; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        self.cells[idx] = ch;
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Writes `text` left-to-right from `(x, y)`, clipping at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        for (offset, ch) in text.chars().enumerate() {
            let cx = x + offset;
            if cx >= self.width {
                break;
            }
            self.set(cx, y, ch)?;
        }
        Ok(())
    }

    /// Draws a box with corners at `(x0, y0)` and `(x1, y1)`, inclusive.
    pub fn draw_box(
        &mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        style: BoxStyle,
    ) -> Result<(), CanvasError> {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        if max_x >= self.width || max_y >= self.height {
            return Err(self.out_of_bounds(max_x, max_y));
        }

        let [h, v, tl, tr, bl, br] = style.glyphs();
        for x in min_x..=max_x {
            self.set(x, min_y, h)?;
            self.set(x, max_y, h)?;
        }
        for y in min_y..=max_y {
            self.set(min_x, y, v)?;
            self.set(max_x, y, v)?;
        }
        self.set(min_x, min_y, tl)?;
        self.set(max_x, min_y, tr)?;
        self.set(min_x, max_y, bl)?;
        self.set(max_x, max_y, br)?;
        Ok(())
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if x >= self.width || y >= self.height {
            return Err(self.out_of_bounds(x, y));
        }
        Ok((y * self.width) + x)
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> CanvasError {
        CanvasError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for (y, row) in self.rows().enumerate() {
            for &ch in row {
                f.write_char(ch)?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}
