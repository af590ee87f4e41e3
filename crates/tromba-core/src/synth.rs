//! Sample-rate sine synthesizer.
//!
//! A phase accumulator in radians advanced once per [`Synthesizer::tick`].
//! The tick path reads two atomics, does one `sinf`, and never allocates,
//! blocks, or loops, so its cost per sample is constant.

use core::f32::consts::TAU;
use libm::sinf;

use crate::sample::OutputSample;
use crate::state::ToneReader;

/// Default sample rate of the instrument's timer, in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Phase-accumulator sine oscillator driven by a [`ToneReader`].
///
/// Silence (disabled, or a target of 0 Hz) emits [`OutputSample::SILENCE`]
/// and pins the phase to 0, so every tone starts at phase 0.
///
/// # Example
///
/// ```rust
/// use tromba_core::{OutputSample, SynthesisState, Synthesizer};
///
/// let mut state = SynthesisState::new();
/// let (writer, reader) = state.split();
/// let mut synth = Synthesizer::new(reader, 44_100);
///
/// assert_eq!(synth.tick::<u8>(), u8::SILENCE);
///
/// writer.set_frequency(440.0);
/// writer.set_enabled(true);
/// let sample: u8 = synth.tick();
/// assert!(sample > u8::SILENCE);
/// ```
#[derive(Debug, Clone)]
pub struct Synthesizer<'a> {
    tone: ToneReader<'a>,
    /// Current phase in radians, always in `[0, TAU)`.
    phase: f32,
    /// Radians per sample per Hz.
    radians_per_hz: f32,
    /// Highest frequency the accumulator will follow.
    max_frequency: f32,
    sample_rate: u32,
}

impl<'a> Synthesizer<'a> {
    /// Creates a synthesizer reading `tone` at `sample_rate` ticks per second.
    pub fn new(tone: ToneReader<'a>, sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1);
        let sr = sample_rate as f32;
        // Keeps the per-tick increment below PI.
        let max_frequency = sr * 0.499;

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, max_frequency, "synthesizer created");

        Self {
            tone,
            phase: 0.0,
            radians_per_hz: TAU / sr,
            max_frequency,
            sample_rate,
        }
    }

    /// Sample rate in Hz.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Current phase in radians.
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Phase increment per tick for `frequency_hz`.
    #[inline]
    pub fn phase_increment(&self, frequency_hz: f32) -> f32 {
        frequency_hz.min(self.max_frequency) * self.radians_per_hz
    }

    /// Pins the phase to 0.
    #[inline]
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Advances one sample period and returns the unit-range value, or `None`
    /// while silent.
    #[inline]
    pub fn advance(&mut self) -> Option<f32> {
        let frequency = self.tone.frequency();
        if !self.tone.enabled() || frequency <= 0.0 {
            self.phase = 0.0;
            return None;
        }

        self.phase += self.phase_increment(frequency);
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        Some(sinf(self.phase))
    }

    /// Advances one sample period and returns the quantized sample.
    #[inline]
    pub fn tick<S: OutputSample>(&mut self) -> S {
        self.advance().map_or(S::SILENCE, S::from_unit)
    }

    /// Fills `out` with consecutive ticks.
    pub fn fill<S: OutputSample>(&mut self, out: &mut [S]) {
        for sample in out.iter_mut() {
            *sample = self.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SynthesisState;

    const SR: u32 = DEFAULT_SAMPLE_RATE;

    #[test]
    fn test_disabled_is_silent() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        writer.set_frequency(440.0);
        let mut synth = Synthesizer::new(reader, SR);
        for _ in 0..1000 {
            assert_eq!(synth.tick::<u8>(), 128);
            assert_eq!(synth.phase(), 0.0);
        }
    }

    #[test]
    fn test_zero_frequency_is_silent() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        writer.set_enabled(true);
        let mut synth = Synthesizer::new(reader, SR);
        for _ in 0..100 {
            assert_eq!(synth.tick::<i16>(), 0);
            assert_eq!(synth.phase(), 0.0);
        }
    }

    #[test]
    fn test_silence_resets_phase() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        writer.set_frequency(440.0);
        writer.set_enabled(true);
        let mut synth = Synthesizer::new(reader, SR);
        for _ in 0..37 {
            synth.tick::<u8>();
        }
        assert!(synth.phase() > 0.0);

        writer.set_enabled(false);
        assert_eq!(synth.tick::<u8>(), u8::SILENCE);
        assert_eq!(synth.phase(), 0.0);
    }

    #[test]
    fn test_first_tick_advances_one_increment() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        writer.set_frequency(261.6);
        writer.set_enabled(true);
        let mut synth = Synthesizer::new(reader, SR);
        synth.tick::<f32>();
        let expected = TAU * 261.6 / SR as f32;
        assert!((synth.phase() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_phase_stays_wrapped() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        writer.set_frequency(1047.0);
        writer.set_enabled(true);
        let mut synth = Synthesizer::new(reader, SR);
        for _ in 0..SR {
            synth.tick::<u8>();
            assert!((0.0..TAU).contains(&synth.phase()));
        }
    }

    #[test]
    fn test_frequency_above_nyquist_is_capped() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        writer.set_frequency(1.0e9);
        writer.set_enabled(true);
        let mut synth = Synthesizer::new(reader, 8000);
        assert!(synth.phase_increment(1.0e9) < core::f32::consts::PI);
        for _ in 0..1000 {
            synth.tick::<u8>();
            assert!((0.0..TAU).contains(&synth.phase()));
        }
    }

    #[test]
    fn test_fill() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        writer.set_frequency(440.0);
        writer.set_enabled(true);
        let mut synth = Synthesizer::new(reader, SR);
        let mut buf = [0u8; 64];
        synth.fill(&mut buf);
        assert!(buf.iter().any(|&s| s != u8::SILENCE));
    }
}
