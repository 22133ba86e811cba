//! Configuration module for netcheck
//!
//! Handles loading probe settings from TOML files.

pub mod settings;

pub use settings::{DnsSettings, HttpSettings, PingSettings, Settings, TcpSettings, TlsSettings};

use crate::utils::ConfigError;
use std::path::Path;

/// Load settings from an explicit path, or fall back to the default location
pub fn load_settings<P: AsRef<Path>>(path: Option<P>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => Settings::load_from_file(path),
        None => Settings::load_default(),
    }
}
