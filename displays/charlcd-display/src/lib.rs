//! In-memory character display for charlcd
//!
//! This crate provides:
//! - `ShadowLcd`, a `CharLcd` implementation that keeps the visible cells,
//!   hardware cursor, backlight and custom glyphs in RAM
//! - `Op`, a journal of every primitive call, for asserting render order
//!
//! # Architecture
//!
//! The controller renders through the `CharLcd` trait and never sees which
//! transport sits behind it. On target that is an HD44780 driver; on the
//! host it is a `ShadowLcd`, whose cells and journal the tests inspect.

#![no_std]

pub mod journal;
pub mod shadow;

pub use journal::{Journal, Op, JOURNAL_DEPTH};
pub use shadow::ShadowLcd;
