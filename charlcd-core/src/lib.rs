//! Board-agnostic core logic for the character-display controller
//!
//! This crate contains everything that does not depend on a specific
//! display transport or async runtime:
//!
//! - Collaborator traits (display primitives, transliteration, session, clock, sensor)
//! - UTF-8 to 7-bit display text transcoding
//! - Display commands and the bounded text buffer they carry
//! - Cursor/grid state and line packing for the paginator
//! - Named animations, custom glyph bitmaps and the status-line composer
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod animation;
pub mod command;
pub mod config;
pub mod glyphs;
pub mod grid;
pub mod layout;
pub mod status;
pub mod text;
pub mod traits;
pub mod transcode;

pub use command::{Anchor, DisplayCommand};
pub use config::{ConfigError, LcdConfig};
pub use grid::GridState;
pub use text::{BoundedText, TEXT_CAPACITY};
pub use transcode::{transcode, transcode_into};
