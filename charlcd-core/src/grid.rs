//! Cursor and grid state
//!
//! The grid is owned by the renderer task. Nothing else reads or writes it,
//! so it needs no locking.

use crate::command::Anchor;

/// Largest supported number of rows (HD44780 tops out at four)
pub const MAX_ROWS: u8 = 4;

/// Largest supported number of columns
pub const MAX_COLS: u8 = 40;

/// Grid dimensions plus the software cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridState {
    rows: u8,
    cols: u8,
    cursor_row: u8,
    cursor_col: u8,
}

impl GridState {
    /// Create a grid with the cursor at the origin
    ///
    /// Dimensions are clamped to `1..=MAX_ROWS` and `1..=MAX_COLS`.
    pub const fn new(rows: u8, cols: u8) -> Self {
        let rows = clamp(rows, MAX_ROWS);
        let cols = clamp(cols, MAX_COLS);
        Self {
            rows,
            cols,
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    pub const fn rows(&self) -> u8 {
        self.rows
    }

    pub const fn cols(&self) -> u8 {
        self.cols
    }

    /// Current cursor as (row, col)
    pub const fn cursor(&self) -> (u8, u8) {
        (self.cursor_row, self.cursor_col)
    }

    /// True when the cursor sits on the top-left cell
    pub const fn at_origin(&self) -> bool {
        self.cursor_row == 0 && self.cursor_col == 0
    }

    pub const fn row_in_bounds(&self, row: u8) -> bool {
        row < self.rows
    }

    pub const fn col_in_bounds(&self, col: u8) -> bool {
        col < self.cols
    }

    /// Move the cursor if both coordinates are on the grid
    ///
    /// Returns `false` and leaves the cursor alone otherwise.
    pub fn move_to(&mut self, row: u8, col: u8) -> bool {
        if self.row_in_bounds(row) && self.col_in_bounds(col) {
            self.cursor_row = row;
            self.cursor_col = col;
            true
        } else {
            false
        }
    }

    /// Move the cursor to `anchor` when it names a complete on-grid position
    pub fn move_to_anchor(&mut self, anchor: Anchor) -> bool {
        match (anchor.row, anchor.col) {
            (Some(row), Some(col)) => self.move_to(row, col),
            _ => false,
        }
    }

    /// Resolve each coordinate of `anchor` independently against the cursor
    ///
    /// Missing or off-grid coordinates fall back to the cursor's.
    pub fn resolve(&self, anchor: Anchor) -> (u8, u8) {
        let row = anchor
            .row
            .filter(|&r| self.row_in_bounds(r))
            .unwrap_or(self.cursor_row);
        let col = anchor
            .col
            .filter(|&c| self.col_in_bounds(c))
            .unwrap_or(self.cursor_col);
        (row, col)
    }

    /// Home the cursor
    pub fn home(&mut self) {
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// Place the cursor after `written` characters at (`row`, `col`)
    ///
    /// Running off the end of a row moves to the start of the next one;
    /// running off the last row wraps to the origin.
    pub fn advance_from(&mut self, row: u8, col: u8, written: usize) {
        let col = (col as usize).saturating_add(written);
        self.cursor_row = row;
        self.cursor_col = col.min(u8::MAX as usize) as u8;
        self.normalize();
    }

    fn normalize(&mut self) {
        if self.cursor_col >= self.cols {
            self.cursor_col = 0;
            self.cursor_row = self.cursor_row.saturating_add(1);
        }
        if self.cursor_row >= self.rows {
            self.cursor_row = 0;
            self.cursor_col = 0;
        }
    }
}

const fn clamp(value: u8, max: u8) -> u8 {
    if value == 0 {
        1
    } else if value > max {
        max
    } else {
        value
    }
}
