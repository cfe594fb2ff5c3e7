//! Configuration loading
//!
//! The configuration is compiled into the firmware from stepdeck.toml and
//! parsed once at boot. A broken file falls back to the built-in defaults.

use defmt::*;

use stepdeck_core::config::{parse_config, ConsoleConfig};

/// Embedded configuration (edit stepdeck.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../stepdeck.toml");

/// Parse the embedded configuration
pub fn load_config() -> ConsoleConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs validates the file, so this only happens with a
            // parser/validator mismatch
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            ConsoleConfig::default()
        }
    }
}
