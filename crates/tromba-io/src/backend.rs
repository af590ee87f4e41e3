//! Pluggable audio output abstraction.
//!
//! [`AudioBackend`] keeps the instrument's sample-rate schedule independent
//! of any platform audio API. The backend owns the clock: it calls the
//! [`OutputCallback`] whenever it needs the next buffer, and the callback
//! ticks the synthesizer once per frame.
//!
//! The trait uses boxed closures so it stays object-safe, and streams come
//! back as a type-erased [`StreamHandle`] that stops playback on drop.

use crate::{AudioDevice, Result};

/// Configuration for building an output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStreamConfig {
    /// Requested sample rate in Hz.
    pub sample_rate: u32,
    /// Preferred buffer size in frames.
    pub buffer_size: u32,
    /// Number of output channels.
    pub channels: u16,
    /// Optional device name (uses system default if `None`).
    pub device_name: Option<String>,
}

impl Default for BackendStreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: tromba_core::DEFAULT_SAMPLE_RATE,
            buffer_size: 256,
            channels: 1,
            device_name: None,
        }
    }
}

/// Type-erased audio stream handle.
///
/// The stream is active while this handle exists; dropping it stops playback.
pub struct StreamHandle {
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    /// Wraps a backend-specific stream object, keeping it alive until drop.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Audio output callback.
///
/// Receives interleaved f32 frames (`[c0, c1, c0, c1, ...]`) to fill. Runs on
/// the audio thread: it must not allocate, lock, or block.
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Called with a message when the backend hits a streaming error.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Writes a mono signal to every channel of an interleaved buffer.
///
/// `next` is called once per frame.
///
/// ```rust
/// let mut buf = [0.0f32; 6];
/// let mut n = 0.0;
/// tromba_io::backend::fill_frames(&mut buf, 2, || {
///     n += 1.0;
///     n
/// });
/// assert_eq!(buf, [1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
/// ```
#[inline]
pub fn fill_frames(buffer: &mut [f32], channels: u16, mut next: impl FnMut() -> f32) {
    let channels = usize::from(channels.max(1));
    for frame in buffer.chunks_mut(channels) {
        frame.fill(next());
    }
}

/// Pluggable audio output backend.
pub trait AudioBackend: Send {
    /// Human-readable name of this backend.
    fn name(&self) -> &str;

    /// List output devices.
    fn list_devices(&self) -> Result<Vec<AudioDevice>>;

    /// Get the default output device, if any.
    fn default_output_device(&self) -> Result<Option<AudioDevice>>;

    /// Build and start an output stream.
    ///
    /// `callback` is invoked on the audio thread for every buffer. The
    /// returned [`StreamHandle`] keeps the stream alive.
    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;

    /// The sample rate the backend will actually run `config` at.
    ///
    /// Defaults to the requested rate.
    fn actual_sample_rate(&self, config: &BackendStreamConfig) -> u32 {
        config.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackendStreamConfig::default();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.buffer_size, 256);
        assert_eq!(config.channels, 1);
        assert!(config.device_name.is_none());
    }

    #[test]
    fn test_stream_handle_debug() {
        let handle = StreamHandle::new(42u32);
        assert!(format!("{handle:?}").contains("StreamHandle"));
    }

    #[test]
    fn test_fill_frames_mono() {
        let mut buf = [9.0f32; 4];
        fill_frames(&mut buf, 1, || 0.5);
        assert_eq!(buf, [0.5; 4]);
    }

    #[test]
    fn test_fill_frames_zero_channels_is_mono() {
        let mut buf = [0.0f32; 3];
        let mut calls = 0;
        fill_frames(&mut buf, 0, || {
            calls += 1;
            0.0
        });
        assert_eq!(calls, 3);
    }
}
