//! Output sample formats.
//!
//! The synthesizer produces values in `[-1.0, 1.0]`; an [`OutputSample`]
//! maps them linearly onto its full-scale range with silence at mid-scale.

use libm::roundf;

/// A quantized output sample.
pub trait OutputSample: Copy + PartialEq + PartialOrd {
    /// Mid-scale value emitted while no tone sounds.
    const SILENCE: Self;

    /// Maps a unit value in `[-1.0, 1.0]` onto the format's range.
    ///
    /// Inputs outside the unit range are clamped. The mapping is monotonic
    /// and `from_unit(0.0) == SILENCE`.
    fn from_unit(value: f32) -> Self;
}

/// 8-bit unsigned DAC code: 0 at -1.0, 255 at +1.0, 128 at silence.
impl OutputSample for u8 {
    const SILENCE: Self = 128;

    #[inline]
    fn from_unit(value: f32) -> Self {
        roundf((value.clamp(-1.0, 1.0) + 1.0) * 127.5) as u8
    }
}

/// Signed 16-bit PCM.
impl OutputSample for i16 {
    const SILENCE: Self = 0;

    #[inline]
    fn from_unit(value: f32) -> Self {
        roundf(value.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
    }
}

/// Unquantized float output for host audio APIs.
impl OutputSample for f32 {
    const SILENCE: Self = 0.0;

    #[inline]
    fn from_unit(value: f32) -> Self {
        value.clamp(-1.0, 1.0)
    }
}
