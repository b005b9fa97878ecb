//! Bottom-row status line
//!
//! Layout on a 20-column display:
//! ```text
//! 23.4° 55.0%    09:05
//! └── climate ──┘└clock┘
//! ```
//! The climate segment is blank when no valid reading exists and the
//! clock shows `--:--` until the wall clock is set.

use core::fmt::Write;

use crate::glyphs;
use crate::grid::MAX_COLS;
use crate::text::BoundedText;
use crate::traits::{ClimateReading, ClockTime};

/// Width of the clock segment at the right edge
pub const CLOCK_WIDTH: usize = 5;

/// Capacity of a composed status line
pub const STATUS_CAPACITY: usize = MAX_COLS as usize;

/// A composed status line, exactly `cols` characters wide
pub type StatusLine = BoundedText<STATUS_CAPACITY>;

/// Compose the status row for a display `cols` characters wide
pub fn compose(cols: u8, climate: Option<ClimateReading>, time: Option<ClockTime>) -> StatusLine {
    let cols = usize::from(cols).min(STATUS_CAPACITY);
    let left_width = cols.saturating_sub(CLOCK_WIDTH);

    let mut left: StatusLine = BoundedText::new();
    if let Some(reading) = climate.filter(is_valid) {
        let _ = write!(
            left,
            "{:4.1}{} {:4.1}{}",
            reading.temperature_c,
            char::from(glyphs::TEMPERATURE),
            reading.humidity_pct,
            char::from(glyphs::HUMIDITY),
        );
    }

    let mut clock: BoundedText<CLOCK_WIDTH> = BoundedText::new();
    match time {
        Some(t) => {
            let _ = write!(clock, "{:02}:{:02}", t.hour, t.minute);
        }
        None => {
            clock.push_str("--:--");
        }
    }

    let mut line: StatusLine = BoundedText::new();
    let mut left_chars = left.chars();
    for _ in 0..left_width {
        line.push(left_chars.next().unwrap_or(' '));
    }
    for ch in clock.chars().take(cols - left_width) {
        line.push(ch);
    }
    line
}

fn is_valid(reading: &ClimateReading) -> bool {
    reading.temperature_c.is_finite() && reading.humidity_pct.is_finite()
}
