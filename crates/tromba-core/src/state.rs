//! Tone state shared between the poll schedule and the sample schedule.
//!
//! Ownership is per field:
//!
//! | field              | writer          | reader          |
//! |--------------------|-----------------|-----------------|
//! | target frequency   | [`ToneWriter`]  | [`ToneReader`]  |
//! | enabled            | [`ToneWriter`]  | [`ToneReader`]  |
//! | phase              | [`Synthesizer`](crate::Synthesizer) (not shared) | same |
//!
//! No field is read-modified-written across schedules, so each one only
//! needs an untearable load/store. The frequency travels as the bit pattern
//! of an `f32` in an [`AtomicU32`]. Relaxed ordering is enough: the two
//! fields are independent and a reader seeing an update one poll period late
//! is expected.
//!
//! [`SynthesisState::split`] borrows the state mutably, so at most one writer
//! exists at a time and it cannot be cloned.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Frequency and enable flag shared between schedules.
#[derive(Debug)]
pub struct SynthesisState {
    frequency_bits: AtomicU32,
    enabled: AtomicBool,
}

impl SynthesisState {
    /// Creates a silent, disabled state (0 Hz, enabled = false).
    pub const fn new() -> Self {
        Self {
            frequency_bits: AtomicU32::new(0),
            enabled: AtomicBool::new(false),
        }
    }

    /// Splits the state into its single writer and its reader.
    ///
    /// ```rust
    /// use tromba_core::SynthesisState;
    ///
    /// let mut state = SynthesisState::new();
    /// let (writer, reader) = state.split();
    /// writer.set_frequency(440.0);
    /// writer.set_enabled(true);
    /// assert_eq!(reader.frequency(), 440.0);
    /// assert!(reader.enabled());
    /// ```
    pub fn split(&mut self) -> (ToneWriter<'_>, ToneReader<'_>) {
        let shared: &Self = self;
        (ToneWriter { state: shared }, ToneReader { state: shared })
    }

    /// Current target frequency in Hz.
    #[inline]
    pub fn frequency(&self) -> f32 {
        f32::from_bits(self.frequency_bits.load(Ordering::Relaxed))
    }

    /// Current enable flag.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }
}

impl Default for SynthesisState {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll-side handle: the only writer of frequency and enable.
#[derive(Debug)]
pub struct ToneWriter<'a> {
    state: &'a SynthesisState,
}

impl ToneWriter<'_> {
    /// Stores a new target frequency.
    ///
    /// Non-finite and negative values store 0 Hz ("no tone").
    #[inline]
    pub fn set_frequency(&self, hz: f32) {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { 0.0 };
        self.state
            .frequency_bits
            .store(hz.to_bits(), Ordering::Relaxed);
    }

    /// Stores the enable flag.
    #[inline]
    pub fn set_enabled(&self, enabled: bool) {
        self.state.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Reads back the stored frequency.
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.state.frequency()
    }

    /// Reads back the stored enable flag.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.state.enabled()
    }
}

/// Sample-side handle: read-only view of frequency and enable.
#[derive(Debug, Clone, Copy)]
pub struct ToneReader<'a> {
    state: &'a SynthesisState,
}

impl ToneReader<'_> {
    /// Target frequency in Hz (0 = no tone).
    #[inline]
    pub fn frequency(&self) -> f32 {
        self.state.frequency()
    }

    /// Enable flag.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.state.enabled()
    }
}
