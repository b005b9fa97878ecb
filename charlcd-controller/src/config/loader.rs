//! Configuration parsing and validation

use charlcd_core::{ConfigError, LcdConfig};

use super::EMBEDDED_CONFIG;

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// TOML syntax error or wrongly typed value
    TomlParse,
    /// Values out of range
    Invalid(ConfigError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Parse and validate a TOML configuration
///
/// Missing sections and keys take their defaults.
pub fn load_config(text: &str) -> Result<LcdConfig, LoadError> {
    let config: LcdConfig = toml::from_str(text).map_err(|e| {
        warn!("TOML parse error: {}", e.message());
        LoadError::TomlParse
    })?;
    config.validate()?;

    log_config_summary(&config);
    Ok(config)
}

/// Load `text` if given, else the embedded file, falling back to defaults
pub fn load_or_default(text: Option<&str>) -> LcdConfig {
    match load_config(text.unwrap_or(EMBEDDED_CONFIG)) {
        Ok(config) => config,
        Err(e) => {
            warn!("Invalid display config ({:?}), using defaults", e);
            LcdConfig::default()
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &LcdConfig) {
    info!("Display configuration loaded");
    debug!("  {}x{} characters", config.geometry.cols, config.geometry.rows);
    debug!(
        "  poll {}ms, page hold {}ms, frame hold {}ms",
        config.timing.poll_ms,
        config.timing.page_hold_ms,
        config.timing.frame_hold_ms
    );
    debug!("  status refresh every {}s", config.status.refresh_s);
}
