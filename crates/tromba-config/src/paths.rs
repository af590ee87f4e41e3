//! Platform-specific configuration paths.
//!
//! - **User config**: `~/.config/tromba/` (Linux), `~/Library/Application Support/tromba/` (macOS), `%APPDATA%\tromba\` (Windows)
//!
//! # Example
//!
//! ```rust,no_run
//! use tromba_config::paths;
//!
//! println!("Config file: {:?}", paths::default_config_path());
//! ```

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "tromba";

/// File name of the instrument configuration.
pub const CONFIG_FILE_NAME: &str = "instrument.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the user's instrument configuration.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(dir: &Path) -> Result<(), ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::create_dir(dir, e))?;
    }
    Ok(())
}

/// Ensure the user config directory exists and return it.
pub fn ensure_user_config_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}

/// Resolves which configuration file to use.
///
/// An explicit path always wins. Otherwise the user's file is used if it
/// exists, and `None` means built-in defaults.
pub fn find_config(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let path = default_config_path();
            path.is_file().then_some(path)
        }
    }
}
