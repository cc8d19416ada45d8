//! Application settings loaded from a TOML file.
//!
//! Carries the handful of knobs the core needs outside the environment: an
//! optional database URL override and the low-stock alert threshold used by
//! the inventory report.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Low-stock alert threshold used when pos.toml does not set one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: f64 = 10.0;

/// Settings structure representing the pos.toml file
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Optional database URL; overrides the `DATABASE_URL` environment
    /// variable when present
    pub database_url: Option<String>,
    /// Ingredients with stock below this quantity appear in the low-stock
    /// report
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: f64,
}

fn default_low_stock_threshold() -> f64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse pos.toml: {e}"),
    })
}

/// Loads settings from the default location (./pos.toml), falling back to
/// defaults when the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    if Path::new("pos.toml").exists() {
        load_settings("pos.toml")
    } else {
        Ok(Settings::default())
    }
}
