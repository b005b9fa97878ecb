//! RAM-backed character display
//!
//! Behaves like an HD44780 as far as the renderer can tell: writes land at
//! the hardware cursor and advance it, clear homes the cursor, glyph slots
//! 0-7 can be redefined. Text past the end of a row is discarded rather
//! than spilling into hidden display RAM.

use heapless::String;

use charlcd_core::grid::{GridState, MAX_COLS, MAX_ROWS};
use charlcd_core::traits::{CharLcd, LcdError};

use crate::journal::{Journal, Op};

const ROWS: usize = MAX_ROWS as usize;
const COLS: usize = MAX_COLS as usize;

/// Shown for characters outside the 7-bit set
const REPLACEMENT: u8 = b'?';

/// In-memory character display
#[derive(Debug, Clone)]
pub struct ShadowLcd {
    rows: u8,
    cols: u8,
    cells: [[u8; COLS]; ROWS],
    cursor_col: u8,
    cursor_row: u8,
    backlight: bool,
    initialized: bool,
    glyphs: [Option<[u8; 8]>; 8],
    /// Whether content changed since the last `mark_clean`
    dirty: bool,
    /// Fail every primitive with `LcdError::Bus` while set
    failing: bool,
    journal: Journal,
}

impl ShadowLcd {
    /// Create a blank display
    ///
    /// Dimensions are clamped the same way as `GridState`.
    pub fn new(rows: u8, cols: u8) -> Self {
        let grid = GridState::new(rows, cols);
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells: [[b' '; COLS]; ROWS],
            cursor_col: 0,
            cursor_row: 0,
            backlight: false,
            initialized: false,
            glyphs: [None; 8],
            dirty: true,
            failing: false,
            journal: Journal::new(),
        }
    }

    /// Standard 20x4 module
    pub fn lcd2004() -> Self {
        Self::new(4, 20)
    }

    /// Text of `row` as currently visible
    ///
    /// Glyph slots appear as their raw bytes (0-7).
    pub fn row_text(&self, row: u8) -> &str {
        match self.cells.get(usize::from(row)) {
            Some(cells) if row < self.rows => {
                core::str::from_utf8(&cells[..usize::from(self.cols)]).unwrap_or("")
            }
            _ => "",
        }
    }

    /// Visible rows joined with `\n`
    pub fn contents(&self) -> String<{ ROWS * (COLS + 1) }> {
        let mut out = String::new();
        for row in 0..self.rows {
            if row > 0 {
                let _ = out.push('\n');
            }
            let _ = out.push_str(self.row_text(row));
        }
        out
    }

    /// Hardware cursor as (col, row)
    pub fn cursor(&self) -> (u8, u8) {
        (self.cursor_col, self.cursor_row)
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Bitmap loaded into `slot`, if any
    pub fn glyph(&self, slot: u8) -> Option<&[u8; 8]> {
        self.glyphs.get(usize::from(slot)).and_then(Option::as_ref)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn journal_mut(&mut self) -> &mut Journal {
        &mut self.journal
    }

    /// Make every primitive fail with a bus error
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Check if the visible content changed since the last `mark_clean`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark content as presented
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn check(&self) -> Result<(), LcdError> {
        if self.failing {
            Err(LcdError::Bus)
        } else if !self.initialized {
            Err(LcdError::NotInitialized)
        } else {
            Ok(())
        }
    }
}

impl CharLcd for ShadowLcd {
    fn init(&mut self) -> Result<(), LcdError> {
        if self.failing {
            return Err(LcdError::Bus);
        }
        self.journal.record(Op::Init);
        self.initialized = true;
        self.cells = [[b' '; COLS]; ROWS];
        self.cursor_col = 0;
        self.cursor_row = 0;
        self.dirty = true;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), LcdError> {
        self.check()?;
        self.journal.record(Op::Clear);
        self.cells = [[b' '; COLS]; ROWS];
        self.cursor_col = 0;
        self.cursor_row = 0;
        self.dirty = true;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), LcdError> {
        self.check()?;
        self.journal.record(Op::SetCursor { col, row });
        self.cursor_col = col.min(self.cols);
        self.cursor_row = row.min(self.rows - 1);
        Ok(())
    }

    fn write_str(&mut self, text: &str) -> Result<(), LcdError> {
        self.check()?;

        let mut logged: String<COLS> = String::new();
        for ch in text.chars() {
            if logged.push(ch).is_err() {
                break;
            }
        }
        self.journal.record(Op::Write(logged));

        let row = usize::from(self.cursor_row);
        for ch in text.chars() {
            if self.cursor_col >= self.cols {
                break;
            }
            let byte = if ch.is_ascii() { ch as u8 } else { REPLACEMENT };
            self.cells[row][usize::from(self.cursor_col)] = byte;
            self.cursor_col += 1;
        }
        self.dirty = true;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), LcdError> {
        self.check()?;
        self.journal.record(Op::Backlight(on));
        self.backlight = on;
        Ok(())
    }

    fn define_glyph(&mut self, slot: u8, bitmap: &[u8; 8]) -> Result<(), LcdError> {
        self.check()?;
        let entry = self
            .glyphs
            .get_mut(usize::from(slot))
            .ok_or(LcdError::Unsupported)?;
        self.journal.record(Op::DefineGlyph(slot));
        *entry = Some(bitmap.map(|row| row & 0x1F));
        self.dirty = true;
        Ok(())
    }
}
