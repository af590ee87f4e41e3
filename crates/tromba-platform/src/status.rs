//! What the display and the log see after each poll cycle.
//!
//! [`Status`] formats as the one-line log record; [`Screen`] formats as the
//! small text display. Both are plain `core::fmt` so they work without
//! `std`.

use core::fmt;

use tromba_core::{Resolution, ValveState};

/// Result of one poll cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    /// Resolved inputs.
    pub resolution: Resolution,
    /// Sound enable switch as read this cycle.
    pub sound_enabled: bool,
}

impl Status {
    /// Creates a status.
    pub const fn new(resolution: Resolution, sound_enabled: bool) -> Self {
        Self {
            resolution,
            sound_enabled,
        }
    }

    /// Returns `true` if the instrument is producing a tone.
    pub fn is_sounding(&self) -> bool {
        self.sound_enabled && self.resolution.is_valid()
    }

    /// Display rendering of this status.
    pub fn screen(&self) -> Screen<'_> {
        Screen(self)
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

/// Log line.
///
/// ```rust
/// use tromba_core::{Octave, Resolver, ValveState};
/// use tromba_platform::Status;
///
/// let res = Resolver::standard().resolve_parts(ValveState::OPEN, Octave::None);
/// assert_eq!(
///     Status::new(res, true).to_string(),
///     "Note: C4 | Freq: 261.60 Hz | Fingering: 0 | Octave: None | Sound: ON",
/// );
/// ```
impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.resolution;
        match r.note {
            Some(note) => write!(
                f,
                "Note: {} | Freq: {:.2} Hz | Fingering: {} | Octave: {} | Sound: {}",
                note.name,
                note.frequency_hz,
                r.fingering,
                r.octave,
                on_off(self.sound_enabled),
            ),
            None => write!(
                f,
                "ERROR: No note for fingering {} with octave {}",
                r.fingering, r.octave
            ),
        }
    }
}

/// Valve levels as three glyphs: the valve number when pressed, `-` when
/// open.
///
/// ```rust
/// use tromba_core::ValveState;
/// use tromba_platform::ValveGlyphs;
///
/// assert_eq!(ValveGlyphs(ValveState::new(true, false, true)).to_string(), "1-3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValveGlyphs(pub ValveState);

impl fmt::Display for ValveGlyphs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        for (pressed, glyph) in [(v.valve1, "1"), (v.valve2, "2"), (v.valve3, "3")] {
            f.write_str(if pressed { glyph } else { "-" })?;
        }
        Ok(())
    }
}

/// Text display contents, one line per row.
///
/// A playable combination shows the note, its frequency, the octave, the
/// valves with their code, and the sound switch. An unplayable one shows
/// `Invalid Combo` with the fingering and octave.
#[derive(Debug, Clone, Copy)]
pub struct Screen<'a>(&'a Status);

impl fmt::Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.0.resolution;
        match r.note {
            Some(note) => {
                writeln!(f, "{}", note.name)?;
                writeln!(f, "Freq: {:.1} Hz", note.frequency_hz)?;
                writeln!(f, "Octave: {}", r.octave)?;
                write!(
                    f,
                    "V:{} [{}] {}",
                    ValveGlyphs(r.valves),
                    r.fingering,
                    on_off(self.0.sound_enabled)
                )
            }
            None => {
                writeln!(f, "Invalid")?;
                writeln!(f, "Combo")?;
                write!(f, "F:{} O:{}", r.fingering, r.octave)
            }
        }
    }
}

/// Receives the status of every poll cycle.
///
/// `changed` is `true` when the status differs from the previous cycle's, so
/// sinks that only care about transitions can skip repeats.
pub trait StatusSink {
    /// Called once per poll cycle.
    fn report(&mut self, status: &Status, changed: bool);
}

/// Sink that discards every status.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn report(&mut self, _status: &Status, _changed: bool) {}
}

impl<F: FnMut(&Status, bool)> StatusSink for F {
    fn report(&mut self, status: &Status, changed: bool) {
        self(status, changed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tromba_core::{Octave, Resolver};

    fn status(valves: ValveState, octave: Octave, sound: bool) -> Status {
        Status::new(Resolver::standard().resolve_parts(valves, octave), sound)
    }

    #[test]
    fn test_log_line_valid() {
        let s = status(ValveState::new(true, false, true), Octave::Sw5, false);
        assert_eq!(
            s.to_string(),
            "Note: A4 | Freq: 440.00 Hz | Fingering: 13 | Octave: SW5 | Sound: OFF"
        );
    }

    #[test]
    fn test_log_line_invalid() {
        let s = status(ValveState::new(true, true, true), Octave::Sw8, true);
        assert_eq!(
            s.to_string(),
            "ERROR: No note for fingering 123 with octave SW8"
        );
        assert!(!s.is_sounding());
    }

    #[test]
    fn test_screen_valid() {
        let s = status(ValveState::OPEN, Octave::None, true);
        assert_eq!(
            s.screen().to_string(),
            "C4\nFreq: 261.6 Hz\nOctave: None\nV:--- [0] ON"
        );
        assert!(s.is_sounding());
    }

    #[test]
    fn test_screen_invalid() {
        let s = status(ValveState::new(true, true, true), Octave::Sw8, true);
        assert_eq!(s.screen().to_string(), "Invalid\nCombo\nF:123 O:SW8");
    }

    #[test]
    fn test_valve_glyphs() {
        assert_eq!(ValveGlyphs(ValveState::OPEN).to_string(), "---");
        assert_eq!(
            ValveGlyphs(ValveState::new(true, true, true)).to_string(),
            "123"
        );
        assert_eq!(
            ValveGlyphs(ValveState::new(false, true, false)).to_string(),
            "-2-"
        );
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = 0;
        let mut sink = |_: &Status, changed: bool| {
            if changed {
                seen += 1;
            }
        };
        let s = status(ValveState::OPEN, Octave::None, true);
        sink.report(&s, true);
        sink.report(&s, false);
        assert_eq!(seen, 1);
    }
}
