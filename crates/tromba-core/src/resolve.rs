//! Fingering resolution: raw inputs to a charted note.

use crate::chart::{NoteChart, NoteEntry};
use crate::fingering::{FingeringCode, InputSnapshot, Octave, ValveState};

/// Outcome of resolving one set of inputs.
///
/// Carries the resolved key alongside the lookup result so collaborators can
/// show *which* combination was unplayable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Valve levels that were resolved.
    pub valves: ValveState,
    /// Fingering code for the valves.
    pub fingering: FingeringCode,
    /// Selected octave.
    pub octave: Octave,
    /// Charted note, or `None` for an unplayable combination.
    pub note: Option<&'static NoteEntry>,
}

impl Resolution {
    /// Returns `true` if the combination has a chart entry.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.note.is_some()
    }

    /// Target frequency for the synthesizer: the note's pitch, or 0 Hz.
    #[inline]
    pub fn frequency_hz(&self) -> f32 {
        self.note.map_or(0.0, |n| n.frequency_hz)
    }
}

/// Pure resolver over a note chart.
///
/// Holds no state besides the chart, so the same inputs always give the same
/// result.
///
/// # Example
///
/// ```rust
/// use tromba_core::{Octave, Resolver, ValveState};
///
/// let resolver = Resolver::standard();
/// let res = resolver.resolve_parts(ValveState::new(true, false, true), Octave::Sw5);
/// assert_eq!(res.note.unwrap().name, "A4");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    chart: NoteChart,
}

impl Resolver {
    /// Creates a resolver over `chart`.
    pub const fn new(chart: NoteChart) -> Self {
        Self { chart }
    }

    /// Creates a resolver over the standard chart.
    pub const fn standard() -> Self {
        Self::new(NoteChart::standard())
    }

    /// The chart this resolver searches.
    #[inline]
    pub const fn chart(&self) -> &NoteChart {
        &self.chart
    }

    /// Resolves valves and an already-decoded octave.
    pub fn resolve_parts(&self, valves: ValveState, octave: Octave) -> Resolution {
        let fingering = valves.fingering();
        Resolution {
            valves,
            fingering,
            octave,
            note: self.chart.lookup(fingering, octave),
        }
    }

    /// Resolves a poll-cycle snapshot.
    #[inline]
    pub fn resolve_snapshot(&self, snapshot: &InputSnapshot) -> Resolution {
        self.resolve_parts(snapshot.valves, snapshot.octave)
    }

    /// Resolves raw valve levels and an octave index (0 = none, 1..=5).
    pub fn resolve(
        &self,
        valve1: bool,
        valve2: bool,
        valve3: bool,
        octave_index: usize,
    ) -> Option<&'static NoteEntry> {
        self.resolve_parts(
            ValveState::new(valve1, valve2, valve3),
            Octave::from_index(octave_index),
        )
        .note
    }
}

/// Resolves against the standard chart.
///
/// ```rust
/// let c4 = tromba_core::resolve(false, false, false, 0).unwrap();
/// assert_eq!(c4.frequency_hz, 261.6);
/// assert!(tromba_core::resolve(true, true, true, 5).is_none());
/// ```
pub fn resolve(
    valve1: bool,
    valve2: bool,
    valve3: bool,
    octave_index: usize,
) -> Option<&'static NoteEntry> {
    Resolver::standard().resolve(valve1, valve2, valve3, octave_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_c4() {
        let note = resolve(false, false, false, 0).unwrap();
        assert_eq!(note.name, "C4");
    }

    #[test]
    fn test_resolve_invalid() {
        assert!(resolve(true, true, true, 5).is_none());
        assert!(resolve(false, false, true, 0).is_none());
    }

    #[test]
    fn test_resolution_frequency() {
        let resolver = Resolver::standard();
        let valid = resolver.resolve_parts(ValveState::new(false, true, false), Octave::Sw8);
        assert!(valid.is_valid());
        assert_eq!(valid.frequency_hz(), 1047.0);

        let invalid = resolver.resolve_parts(ValveState::new(true, true, true), Octave::Sw8);
        assert!(!invalid.is_valid());
        assert_eq!(invalid.frequency_hz(), 0.0);
        assert_eq!(invalid.fingering.value(), 123);
        assert_eq!(invalid.octave, Octave::Sw8);
    }

    #[test]
    fn test_resolve_snapshot_uses_selector_priority() {
        let snap = InputSnapshot::from_lines(
            [false, false, false],
            [false, false, true, true, false],
            true,
        );
        let res = Resolver::standard().resolve_snapshot(&snap);
        assert_eq!(res.octave, Octave::Sw6);
        assert_eq!(res.note.unwrap().name, "C#5");
    }

    #[test]
    fn test_out_of_range_index_is_lowest_octave() {
        let note = resolve(false, false, false, 9).unwrap();
        assert_eq!(note.name, "C4");
    }
}
