//! Range and consistency checks for [`InstrumentConfig`].
//!
//! Every check runs and all failures are collected, so one pass reports
//! everything wrong with a file.
//!
//! # Example
//!
//! ```rust
//! use tromba_config::{InstrumentConfig, validate_config};
//!
//! let mut config = InstrumentConfig::default();
//! assert!(validate_config(&config).is_ok());
//!
//! config.output.channels = 0;
//! assert!(validate_config(&config).is_err());
//! ```

use std::ops::RangeInclusive;

use thiserror::Error;
use tromba_core::NoteChart;

use crate::InstrumentConfig;

/// Accepted sample rates.
pub const SAMPLE_RATE_RANGE: RangeInclusive<u32> = 8_000..=192_000;
/// Accepted poll intervals in milliseconds.
pub const POLL_INTERVAL_RANGE: RangeInclusive<u32> = 1..=1_000;
/// Accepted output buffer sizes in frames.
pub const BUFFER_SIZE_RANGE: RangeInclusive<u32> = 16..=8_192;
/// Accepted output channel counts.
pub const CHANNELS_RANGE: RangeInclusive<u32> = 1..=8;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A numeric field is outside its accepted range.
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        /// Name of the field.
        field: &'static str,
        /// The rejected value.
        value: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },

    /// The sample rate cannot represent the chart's highest note.
    #[error("sample_rate = {sample_rate} is below twice the highest note ({highest_hz} Hz)")]
    BelowNyquist {
        /// Configured sample rate.
        sample_rate: u32,
        /// Highest charted frequency.
        highest_hz: f32,
    },

    /// Two instrument roles are bound to the same GPIO line.
    #[error("GPIO {gpio} is bound to both {first} and {second}")]
    DuplicateBinding {
        /// The shared line.
        gpio: u8,
        /// First role using it.
        first: String,
        /// Second role using it.
        second: String,
    },

    /// Multiple validation errors.
    #[error("{}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_range(
    field: &'static str,
    value: u32,
    range: &RangeInclusive<u32>,
    errors: &mut Vec<ValidationError>,
) {
    if !range.contains(&value) {
        errors.push(ValidationError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
}

/// Checks every field of `config`.
///
/// Returns the single failure directly, or [`ValidationError::Multiple`] when
/// more than one check fails.
pub fn validate_config(config: &InstrumentConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();

    check_range("sample_rate", config.sample_rate, &SAMPLE_RATE_RANGE, &mut errors);
    if let Some((_, highest)) = NoteChart::standard().frequency_bounds()
        && (config.sample_rate as f32) <= 2.0 * highest
    {
        errors.push(ValidationError::BelowNyquist {
            sample_rate: config.sample_rate,
            highest_hz: highest,
        });
    }

    check_range(
        "poll_interval_ms",
        config.poll_interval_ms,
        &POLL_INTERVAL_RANGE,
        &mut errors,
    );
    check_range(
        "output.buffer_size",
        config.output.buffer_size,
        &BUFFER_SIZE_RANGE,
        &mut errors,
    );
    check_range(
        "output.channels",
        u32::from(config.output.channels),
        &CHANNELS_RANGE,
        &mut errors,
    );

    if let Some(bindings) = &config.bindings {
        let lines = bindings.labeled_lines();
        for (i, (first, gpio)) in lines.iter().enumerate() {
            if let Some((second, _)) = lines[i + 1..].iter().find(|(_, g)| g == gpio) {
                errors.push(ValidationError::DuplicateBinding {
                    gpio: *gpio,
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
