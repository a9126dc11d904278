//! Figure configuration
//!
//! figure.toml is embedded at compile time and already validated by the
//! build script, so a parse failure here means the file and the build
//! checks disagree. The figure then runs on the built-in defaults.

use defmt::*;

use buddy_core::config::{parse_config, FigureConfig};

/// Embedded configuration (compiled into firmware)
/// Edit figure.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../figure.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load_config() -> FigureConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Parsed embedded configuration: {} clips",
                config.catalog.len()
            );
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            warn!("Using built-in default configuration");
            FigureConfig::default()
        }
    }
}
