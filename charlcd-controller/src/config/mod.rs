//! Configuration loading
//!
//! The display configuration is TOML, parsed with the `toml` crate in its
//! `no_std` mode. A default file is embedded at build time.

pub mod loader;

pub use loader::{load_config, load_or_default, LoadError};

/// Default configuration compiled into the binary
pub const EMBEDDED_CONFIG: &str = include_str!("../../lcd.toml");
