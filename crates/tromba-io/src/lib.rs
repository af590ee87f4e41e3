//! Audio output for the tromba wind controller.
//!
//! This crate provides:
//!
//! - **WAV output**: [`write_wav`] for rendered performances in 8-bit, 16-bit
//!   or float, plus [`read_wav_info`] and [`read_wav`] for inspecting them
//! - **Device output**: the [`AudioBackend`] trait with a cpal implementation
//!   ([`CpalBackend`]); its output callback is where the synthesizer ticks
//!   during live play
//! - **Device listing**: [`list_devices`] and [`default_output_device`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tromba_core::{SynthesisState, Synthesizer};
//! use tromba_io::{WavSpec, write_wav};
//!
//! let mut state = SynthesisState::new();
//! let (writer, reader) = state.split();
//! writer.set_frequency(440.0);
//! writer.set_enabled(true);
//!
//! let mut synth = Synthesizer::new(reader, 44_100);
//! let mut samples = vec![0i16; 44_100];
//! synth.fill(&mut samples);
//! write_wav("a440.wav", &samples, WavSpec::mono::<i16>(44_100))?;
//! ```

pub mod backend;
pub mod cpal_backend;
mod device;
mod wav;

pub use backend::{AudioBackend, BackendStreamConfig, ErrorCallback, OutputCallback, StreamHandle};
pub use cpal_backend::CpalBackend;
pub use device::{AudioDevice, default_output_device, find_output_device, list_devices};
pub use wav::{WavFormat, WavInfo, WavSample, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(Error::NoDevice.to_string(), "No audio device available");
        assert_eq!(
            Error::DeviceNotFound("USB".into()).to_string(),
            "Device not found: USB"
        );
        assert_eq!(
            Error::Stream("underrun".into()).to_string(),
            "Audio stream error: underrun"
        );
    }

    #[test]
    fn io_error_converts() {
        let err: Error = std::io::Error::other("disk").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
