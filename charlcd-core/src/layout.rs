//! Line packing for the paginator
//!
//! Text is packed greedily into fixed-width lines: the first line gets
//! whatever is left of the cursor's row, later lines get the full width.
//! A single space at the start of a continuation line is dropped so that
//! word breaks do not indent the next row.
//!
//! Content shown at the origin is treated as a fresh message and may run
//! to two pages; anything shown elsewhere is clipped to the rows below the
//! cursor.

use heapless::Vec;

use crate::grid::GridState;

/// Upper bound on the lines a single Show can produce
pub const MAX_PAGE_LINES: usize = 8;

/// Packed lines borrowing from the source text
pub type Lines<'a> = Vec<&'a str, MAX_PAGE_LINES>;

/// Pack `text` into at most `max_lines` non-empty lines
///
/// Widths are counted in characters. Both widths are treated as at least one.
pub fn pack_lines(text: &str, first_width: usize, width: usize, max_lines: usize) -> Lines<'_> {
    let mut lines = Lines::new();
    let max_lines = max_lines.min(MAX_PAGE_LINES);
    let mut rest = text;
    let mut first = true;

    while !rest.is_empty() && lines.len() < max_lines {
        let limit = if first { first_width } else { width }.max(1);

        if !first {
            if let Some(stripped) = rest.strip_prefix(' ') {
                rest = stripped;
                if rest.is_empty() {
                    break;
                }
            }
        }

        let split = rest
            .char_indices()
            .nth(limit)
            .map_or(rest.len(), |(idx, _)| idx);
        let (line, tail) = rest.split_at(split);
        if !line.is_empty() {
            // Cannot overflow: bounded by max_lines above
            let _ = lines.push(line);
        }
        rest = tail;
        first = false;
    }

    lines
}

/// Layout of one Show command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePlan<'a> {
    lines: Lines<'a>,
    rows: u8,
    start_row: u8,
    start_col: u8,
    multi_page: bool,
}

impl<'a> PagePlan<'a> {
    /// Lay out `text` from the grid's current cursor
    ///
    /// `page_line_limit` caps the total lines of a two-page message.
    pub fn new(text: &'a str, grid: &GridState, page_line_limit: usize) -> Self {
        let (start_row, start_col) = grid.cursor();
        let multi_page = grid.at_origin();
        let max_lines = if multi_page {
            page_line_limit
        } else {
            usize::from(grid.rows() - start_row)
        };
        let first_width = usize::from(grid.cols() - start_col);
        let lines = pack_lines(text, first_width, usize::from(grid.cols()), max_lines);

        Self {
            lines,
            rows: grid.rows(),
            start_row,
            start_col,
            multi_page,
        }
    }

    /// All packed lines
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// True when the text was shown at the origin
    pub fn is_multi_page(&self) -> bool {
        self.multi_page
    }

    /// Lines shown immediately
    pub fn first_page(&self) -> &[&'a str] {
        let end = self.lines.len().min(usize::from(self.rows));
        &self.lines[..end]
    }

    /// Lines shown after the page hold, if the message overflows the grid
    ///
    /// The second page is always the last `rows` lines, so it may repeat
    /// lines from the first page when the overflow is smaller than a page.
    pub fn second_page(&self) -> Option<&[&'a str]> {
        let rows = usize::from(self.rows);
        if self.multi_page && self.lines.len() > rows {
            Some(&self.lines[self.lines.len() - rows..])
        } else {
            None
        }
    }

    /// Grid position of line `index` of the first page
    pub fn first_page_position(&self, index: usize) -> (u8, u8) {
        let row = self.start_row.saturating_add(index as u8);
        let col = if index == 0 { self.start_col } else { 0 };
        (row, col)
    }
}
