//! Display commands
//!
//! Commands are built by producers and consumed by the single renderer
//! task. They are plain values with no heap allocation so that the command
//! channel can be statically sized.

use crate::text::BoundedText;

/// Where a Show or Animate command should start
///
/// A missing coordinate means "keep the current cursor".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Anchor {
    pub row: Option<u8>,
    pub col: Option<u8>,
}

impl Anchor {
    /// Start wherever the cursor currently is
    pub const CURSOR: Anchor = Anchor {
        row: None,
        col: None,
    };

    /// Top-left cell
    pub const ORIGIN: Anchor = Anchor::at(0, 0);

    /// Explicit position
    pub const fn at(row: u8, col: u8) -> Self {
        Self {
            row: Some(row),
            col: Some(col),
        }
    }
}

/// A request for the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayCommand {
    /// Clear the display and home the cursor
    Clear,
    /// Move the cursor; out-of-range positions are ignored
    SetCursor { row: u8, col: u8 },
    /// Lay out already-transcoded text starting at `at`
    Show { text: BoundedText, at: Anchor },
    /// Play the named animation at `at`
    Animate { name: BoundedText, at: Anchor },
}

impl DisplayCommand {
    /// Build a Show command, truncating `text` to the command capacity
    ///
    /// The text is not transcoded; producers normally go through
    /// `transcode` first.
    pub fn show(text: &str, at: Anchor) -> Self {
        DisplayCommand::Show {
            text: BoundedText::from_str_truncated(text),
            at,
        }
    }

    /// Build an Animate command
    pub fn animate(name: &str, at: Anchor) -> Self {
        DisplayCommand::Animate {
            name: BoundedText::from_str_truncated(name),
            at,
        }
    }

    /// True for commands that may run for a long time
    pub fn is_long_running(&self) -> bool {
        matches!(
            self,
            DisplayCommand::Show { .. } | DisplayCommand::Animate { .. }
        )
    }
}
