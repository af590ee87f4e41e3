//! Instrument configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use tromba_core::{DEFAULT_SAMPLE_RATE, OCTAVE_SELECTORS};
use tromba_platform::InputMap;

use crate::error::ConfigError;
use crate::validation::validate_config;

/// Default poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 50;
/// Default output buffer size in frames.
pub const DEFAULT_BUFFER_SIZE: u32 = 256;
/// Default output channel count.
pub const DEFAULT_CHANNELS: u16 = 1;

/// Runtime settings for one instrument.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 44100
/// poll_interval_ms = 50
///
/// [output]
/// device = "default"
/// buffer_size = 256
/// channels = 1
///
/// [bindings]
/// valves = [19, 21, 22]
/// selectors = [18, 5, 17, 16, 4]
/// sound_enable = 15
/// ```
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InstrumentConfig {
    /// Sample-rate schedule frequency in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Poll-rate schedule period in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u32,

    /// Audio output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// GPIO wiring; the reference board's wiring when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Bindings>,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_poll_interval_ms() -> u32 {
    DEFAULT_POLL_INTERVAL_MS
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            output: OutputConfig::default(),
            bindings: None,
        }
    }
}

impl InstrumentConfig {
    /// Load a configuration from a TOML file and validate it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Save to a file that does not exist yet.
    pub fn save_new(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        self.save(path)
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)?;
        Ok(())
    }

    /// Samples per poll interval at the configured sample rate, at least 1.
    pub fn samples_per_poll(&self) -> usize {
        let samples = u64::from(self.sample_rate) * u64::from(self.poll_interval_ms) / 1_000;
        (samples as usize).max(1)
    }

    /// Input map for the configured wiring.
    pub fn input_map(&self) -> InputMap {
        self.bindings
            .as_ref()
            .map_or_else(InputMap::gpio_layout, Bindings::input_map)
    }
}

/// Audio output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output device name; the host default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,

    /// Requested buffer size in frames.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: u32,

    /// Output channels; the mono signal is copied to each.
    #[serde(default = "default_channels")]
    pub channels: u16,
}

fn default_buffer_size() -> u32 {
    DEFAULT_BUFFER_SIZE
}

fn default_channels() -> u16 {
    DEFAULT_CHANNELS
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            device: None,
            buffer_size: DEFAULT_BUFFER_SIZE,
            channels: DEFAULT_CHANNELS,
        }
    }
}

/// GPIO numbers for the nine instrument lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Bindings {
    /// Valves 1, 2, 3.
    pub valves: [u8; 3],
    /// Octave selectors SW4 through SW8, highest priority first.
    pub selectors: [u8; OCTAVE_SELECTORS],
    /// Sound enable switch.
    pub sound_enable: u8,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            valves: [19, 21, 22],
            selectors: [18, 5, 17, 16, 4],
            sound_enable: 15,
        }
    }
}

impl Bindings {
    /// Input map for these lines.
    pub fn input_map(&self) -> InputMap {
        InputMap::from_gpio(self.valves, self.selectors, self.sound_enable)
    }

    /// Every line with a human-readable role name, valves first.
    pub fn labeled_lines(&self) -> Vec<(String, u8)> {
        let valves = (1..).zip(self.valves).map(|(n, g)| (format!("valve {n}"), g));
        let selectors = (4..)
            .zip(self.selectors)
            .map(|(n, g)| (format!("selector SW{n}"), g));
        valves
            .chain(selectors)
            .chain([("sound enable".to_string(), self.sound_enable)])
            .collect()
    }
}
