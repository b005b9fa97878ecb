//! Configuration type definitions
//!
//! Defaults describe a 20x4 HD44780 module and reproduce the stock
//! timings: 50ms preemption polling, a 500ms hold between pages and
//! 300ms per animation frame.

#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::grid::{MAX_COLS, MAX_ROWS};
use crate::layout::MAX_PAGE_LINES;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Rows outside 1..=MAX_ROWS
    InvalidRows,
    /// Columns outside 1..=MAX_COLS
    InvalidCols,
    /// Poll interval of zero
    InvalidPollInterval,
    /// Page line limit outside 1..=MAX_PAGE_LINES
    InvalidPageLineLimit,
    /// Status refresh period of zero
    InvalidRefreshPeriod,
}

/// Display geometry in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct Geometry {
    pub rows: u8,
    pub cols: u8,
}

impl Default for Geometry {
    fn default() -> Self {
        Self { rows: 4, cols: 20 }
    }
}

/// Render timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct Timing {
    /// Granularity of every interruptible wait (ms)
    pub poll_ms: u32,
    /// Hold before the second page of a long message (ms)
    pub page_hold_ms: u32,
    /// Hold after each animation frame (ms)
    pub frame_hold_ms: u32,
    /// Maximum passes over an animation's frames
    pub animation_loops: u16,
    /// Maximum lines of a two-page message
    pub page_line_limit: u8,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            poll_ms: 50,
            page_hold_ms: 500,
            frame_hold_ms: 300,
            animation_loops: 20,
            page_line_limit: MAX_PAGE_LINES as u8,
        }
    }
}

impl Timing {
    /// Number of poll intervals in a page hold
    pub fn page_hold_steps(&self) -> u32 {
        steps(self.page_hold_ms, self.poll_ms)
    }

    /// Number of poll intervals in a frame hold
    pub fn frame_hold_steps(&self) -> u32 {
        steps(self.frame_hold_ms, self.poll_ms)
    }
}

fn steps(total_ms: u32, poll_ms: u32) -> u32 {
    if poll_ms == 0 {
        0
    } else {
        total_ms.div_ceil(poll_ms)
    }
}

/// Status line refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct StatusConfig {
    /// Seconds between status line refreshes
    pub refresh_s: u32,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { refresh_s: 30 }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize), serde(default))]
pub struct LcdConfig {
    #[cfg_attr(feature = "serde", serde(rename = "display"))]
    pub geometry: Geometry,
    pub timing: Timing,
    pub status: StatusConfig,
}

impl LcdConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every value is within the supported range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_ROWS).contains(&self.geometry.rows) {
            return Err(ConfigError::InvalidRows);
        }
        if !(1..=MAX_COLS).contains(&self.geometry.cols) {
            return Err(ConfigError::InvalidCols);
        }
        if self.timing.poll_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        if !(1..=MAX_PAGE_LINES as u8).contains(&self.timing.page_line_limit) {
            return Err(ConfigError::InvalidPageLineLimit);
        }
        if self.status.refresh_s == 0 {
            return Err(ConfigError::InvalidRefreshPeriod);
        }
        Ok(())
    }
}
