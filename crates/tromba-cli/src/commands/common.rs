//! Shared CLI helpers used across multiple commands.

use std::path::Path;

use tromba_config::{InstrumentConfig, find_config};

/// Load the instrument configuration.
///
/// Searches in this order:
/// 1. The explicit path, if given
/// 2. The user's `instrument.toml`
/// 3. Built-in defaults
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<InstrumentConfig> {
    match find_config(explicit) {
        Some(path) => {
            let config = InstrumentConfig::load(&path)?;
            tracing::info!(path = %path.display(), "configuration loaded");
            Ok(config)
        }
        None => Ok(InstrumentConfig::default()),
    }
}
