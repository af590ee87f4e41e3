//! The instrument's note chart.
//!
//! A flat, immutable table of `(fingering, octave) -> (note, frequency)`
//! entries. Lookup is a linear scan; the chart is small and fixed at build
//! time. Pairs missing from the chart are unplayable and resolve to no note,
//! never to a nearby pitch.

use crate::fingering::{FingeringCode, Octave};

/// One playable note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEntry {
    /// Scientific pitch name, e.g. `"C4"`.
    pub name: &'static str,
    /// Valve fingering that plays this note.
    pub fingering: FingeringCode,
    /// Octave range the note belongs to.
    pub octave: Octave,
    /// Pitch in Hz.
    pub frequency_hz: f32,
}

impl NoteEntry {
    const fn new(name: &'static str, code: u8, octave: Octave, frequency_hz: f32) -> Self {
        let fingering = match FingeringCode::from_value(code) {
            Some(code) => code,
            None => panic!("chart entry with invalid fingering code"),
        };
        Self {
            name,
            fingering,
            octave,
            frequency_hz,
        }
    }

    /// Returns `true` if this entry is keyed by `(fingering, octave)`.
    #[inline]
    pub fn matches(&self, fingering: FingeringCode, octave: Octave) -> bool {
        self.fingering == fingering && self.octave == octave
    }
}

const fn entry(name: &'static str, code: u8, octave: Octave, frequency_hz: f32) -> NoteEntry {
    NoteEntry::new(name, code, octave, frequency_hz)
}

/// The instrument's standard fingering chart, F#3 to C6.
pub static STANDARD_CHART: [NoteEntry; 31] = [
    entry("F#3", 123, Octave::None, 185.0),
    entry("G3", 23, Octave::None, 196.0),
    entry("G#3", 13, Octave::None, 207.7),
    entry("A3", 12, Octave::None, 220.0),
    entry("A#3", 1, Octave::None, 233.1),
    entry("B3", 2, Octave::None, 246.9),
    entry("C4", 0, Octave::None, 261.6),
    entry("C#4", 123, Octave::Sw4, 277.2),
    entry("D4", 23, Octave::Sw4, 293.7),
    entry("D#4", 13, Octave::Sw4, 311.1),
    entry("E4", 12, Octave::Sw4, 329.6),
    entry("F4", 1, Octave::Sw4, 349.2),
    entry("F#4", 2, Octave::Sw4, 370.0),
    entry("G4", 0, Octave::Sw4, 392.0),
    entry("G#4", 23, Octave::Sw5, 415.3),
    entry("A4", 13, Octave::Sw5, 440.0),
    entry("A#4", 12, Octave::Sw5, 466.2),
    entry("B4", 1, Octave::Sw5, 493.9),
    entry("C5", 2, Octave::Sw5, 523.3),
    entry("C#5", 0, Octave::Sw6, 554.4),
    entry("D5", 13, Octave::Sw6, 587.3),
    entry("D#5", 12, Octave::Sw6, 622.3),
    entry("E5", 1, Octave::Sw6, 659.3),
    entry("F5", 1, Octave::Sw7, 698.5),
    entry("F#5", 2, Octave::Sw7, 740.0),
    entry("G5", 0, Octave::Sw7, 784.0),
    entry("G#5", 23, Octave::Sw8, 830.6),
    entry("A5", 13, Octave::Sw8, 880.0),
    entry("A#5", 12, Octave::Sw8, 932.3),
    entry("B5", 1, Octave::Sw8, 987.8),
    entry("C6", 2, Octave::Sw8, 1047.0),
];

const _: () = assert!(keys_unique(&STANDARD_CHART));

const fn keys_unique(entries: &[NoteEntry]) -> bool {
    let mut i = 0;
    while i < entries.len() {
        let mut j = i + 1;
        while j < entries.len() {
            if entries[i].fingering.value() == entries[j].fingering.value()
                && entries[i].octave as u8 == entries[j].octave as u8
            {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

/// Lowest and highest note of one octave range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctaveRange {
    /// Octave this range covers.
    pub octave: Octave,
    /// Lowest-pitched entry.
    pub lowest: &'static NoteEntry,
    /// Highest-pitched entry.
    pub highest: &'static NoteEntry,
}

/// A view over a static note table.
///
/// # Example
///
/// ```rust
/// use tromba_core::{FingeringCode, NoteChart, Octave};
///
/// let chart = NoteChart::standard();
/// let note = chart.lookup(FingeringCode::OPEN, Octave::None).unwrap();
/// assert_eq!(note.name, "C4");
///
/// let code = FingeringCode::from_value(123).unwrap();
/// assert!(chart.lookup(code, Octave::Sw8).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NoteChart {
    entries: &'static [NoteEntry],
}

impl NoteChart {
    /// Wraps a static table.
    pub const fn new(entries: &'static [NoteEntry]) -> Self {
        Self { entries }
    }

    /// The instrument's standard chart.
    pub const fn standard() -> Self {
        Self::new(&STANDARD_CHART)
    }

    /// Returns the entries in table order.
    #[inline]
    pub const fn entries(&self) -> &'static [NoteEntry] {
        self.entries
    }

    /// Number of entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the chart has no entries.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry keyed by `(fingering, octave)`.
    pub fn lookup(&self, fingering: FingeringCode, octave: Octave) -> Option<&'static NoteEntry> {
        self.entries.iter().find(|e| e.matches(fingering, octave))
    }

    /// Returns `true` if no two entries share a `(fingering, octave)` key.
    pub const fn has_unique_keys(&self) -> bool {
        keys_unique(self.entries)
    }

    /// Iterates over the entries in one octave, in table order.
    pub fn in_octave(&self, octave: Octave) -> impl Iterator<Item = &'static NoteEntry> {
        self.entries.iter().filter(move |e| e.octave == octave)
    }

    /// Returns the pitch span of one octave, or `None` if it has no entries.
    pub fn range(&self, octave: Octave) -> Option<OctaveRange> {
        let mut notes = self.in_octave(octave);
        let first = notes.next()?;
        let (lowest, highest) = notes.fold((first, first), |(lo, hi), e| {
            (
                if e.frequency_hz < lo.frequency_hz { e } else { lo },
                if e.frequency_hz > hi.frequency_hz { e } else { hi },
            )
        });
        Some(OctaveRange {
            octave,
            lowest,
            highest,
        })
    }

    /// Lowest and highest frequency across the whole chart.
    pub fn frequency_bounds(&self) -> Option<(f32, f32)> {
        let mut iter = self.entries.iter().map(|e| e.frequency_hz);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), f| (lo.min(f), hi.max(f))))
    }
}

impl Default for NoteChart {
    fn default() -> Self {
        Self::standard()
    }
}
