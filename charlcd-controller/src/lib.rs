//! Async controller for HD44780-style character displays
//!
//! Producers on any task call into a [`DisplayController`], which transcodes
//! text and queues [`DisplayCommand`]s on a bounded [`CommandChannel`]. A
//! single [`Renderer`] task owns the display and the cursor, takes commands
//! off the channel in order and draws them. Long renders (two-page
//! messages, animations) give way as soon as newer work is queued.
//!
//! ```text
//! producers ──► CommandChannel ──► Renderer ──► CharLcd
//!                (drop on full)     (preemptible)
//! ```
//!
//! Timing goes through `embedded_hal_async::delay::DelayNs`, so the renderer
//! runs unchanged on embassy or under a scripted delay in tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to every module
mod fmt;

pub mod channel;
pub mod config;
pub mod controller;
mod playback;
pub mod renderer;

pub use channel::{CommandChannel, QUEUE_DEPTH};
pub use config::{load_config, load_or_default, LoadError, EMBEDDED_CONFIG};
pub use controller::{status_bar_task, DisplayController, DEFAULT_LISTENING_STATUS};
pub use renderer::{RenderOutcome, Renderer};

pub use charlcd_core::{Anchor, DisplayCommand, LcdConfig};
