//! Configuration for the tromba wind controller.
//!
//! An instrument is configured by one TOML file: the sample rate of the
//! tone schedule, the poll interval of the input schedule, the audio output,
//! and optionally the GPIO wiring. Every field has a default, and loaded files
//! are validated before use.
//!
//! # Example
//!
//! ```rust,no_run
//! use tromba_config::{InstrumentConfig, default_config_path};
//!
//! let config = InstrumentConfig::load(default_config_path()).unwrap();
//! println!("{} Hz, poll every {} ms", config.sample_rate, config.poll_interval_ms);
//! ```

mod error;
mod instrument;

/// Platform-specific configuration paths.
pub mod paths;

/// Configuration validation.
pub mod validation;

pub use error::ConfigError;
pub use instrument::{
    Bindings, DEFAULT_BUFFER_SIZE, DEFAULT_CHANNELS, DEFAULT_POLL_INTERVAL_MS, InstrumentConfig,
    OutputConfig,
};
pub use paths::{default_config_path, ensure_user_config_dir, find_config, user_config_dir};
pub use validation::{ValidationError, ValidationResult, validate_config};
