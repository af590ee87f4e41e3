//! Valve fingerings and octave selection.
//!
//! The three valves form a [`FingeringCode`] using trumpet notation: the code
//! is the concatenation of the pressed valve numbers (`13` = valves 1 and 3),
//! not a bitmask. Five octave selectors plus the "nothing pressed" state form
//! the six [`Octave`] labels.
//!
//! Both mappings are total: every valve combination has a code and every
//! selector combination has an octave. Only the *pair* can be unplayable,
//! which is decided by the [`NoteChart`](crate::NoteChart).

use core::fmt;

/// Number of octave selector lines on the instrument.
pub const OCTAVE_SELECTORS: usize = 5;

/// Instantaneous state of the three valves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValveState {
    /// First valve pressed.
    pub valve1: bool,
    /// Second valve pressed.
    pub valve2: bool,
    /// Third valve pressed.
    pub valve3: bool,
}

impl ValveState {
    /// All valves released.
    pub const OPEN: Self = Self::new(false, false, false);

    /// Creates a valve state from the three valve levels.
    #[inline]
    pub const fn new(valve1: bool, valve2: bool, valve3: bool) -> Self {
        Self {
            valve1,
            valve2,
            valve3,
        }
    }

    /// Returns the trumpet fingering code for this combination.
    #[inline]
    pub const fn fingering(&self) -> FingeringCode {
        FingeringCode::from_valves(*self)
    }
}

/// Trumpet-convention fingering code.
///
/// | valves | code |
/// |--------|------|
/// | none   | 0    |
/// | 1      | 1    |
/// | 2      | 2    |
/// | 3      | 3    |
/// | 1+2    | 12   |
/// | 1+3    | 13   |
/// | 2+3    | 23   |
/// | 1+2+3  | 123  |
///
/// # Example
///
/// ```rust
/// use tromba_core::{FingeringCode, ValveState};
///
/// let code = FingeringCode::from_valves(ValveState::new(false, true, true));
/// assert_eq!(code.value(), 23);
/// assert_eq!(code.valves(), ValveState::new(false, true, true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FingeringCode(u8);

impl FingeringCode {
    /// Open horn, no valves pressed.
    pub const OPEN: Self = Self(0);

    /// All eight codes, ordered by valve count then valve number.
    pub const ALL: [Self; 8] = [
        Self(0),
        Self(1),
        Self(2),
        Self(3),
        Self(12),
        Self(13),
        Self(23),
        Self(123),
    ];

    /// Maps a valve combination to its code.
    pub const fn from_valves(valves: ValveState) -> Self {
        let code = match (valves.valve1, valves.valve2, valves.valve3) {
            (false, false, false) => 0,
            (false, false, true) => 3,
            (false, true, false) => 2,
            (true, false, false) => 1,
            (false, true, true) => 23,
            (true, false, true) => 13,
            (true, true, false) => 12,
            (true, true, true) => 123,
        };
        Self(code)
    }

    /// Parses a raw code value. Returns `None` for values outside the table.
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            0 | 1 | 2 | 3 | 12 | 13 | 23 | 123 => Some(Self(value)),
            _ => None,
        }
    }

    /// Returns the raw code value.
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns the valve combination that produces this code.
    pub const fn valves(&self) -> ValveState {
        match self.0 {
            1 => ValveState::new(true, false, false),
            2 => ValveState::new(false, true, false),
            3 => ValveState::new(false, false, true),
            12 => ValveState::new(true, true, false),
            13 => ValveState::new(true, false, true),
            23 => ValveState::new(false, true, true),
            123 => ValveState::new(true, true, true),
            _ => ValveState::OPEN,
        }
    }
}

impl fmt::Display for FingeringCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Octave range selected by the five selector switches.
///
/// Labels follow the switch silkscreen (`SW4`..`SW8`). [`Octave::None`] is the
/// lowest range and is selected when no switch is held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Octave {
    /// No selector pressed: F#3 to C4.
    #[default]
    None,
    /// Selector 1: C#4 to G4.
    Sw4,
    /// Selector 2: G#4 to C5.
    Sw5,
    /// Selector 3: C#5 to E5.
    Sw6,
    /// Selector 4: F5 to G5.
    Sw7,
    /// Selector 5: G#5 to C6.
    Sw8,
}

impl Octave {
    /// All six labels from lowest to highest range.
    pub const ALL: [Self; 6] = [
        Self::None,
        Self::Sw4,
        Self::Sw5,
        Self::Sw6,
        Self::Sw7,
        Self::Sw8,
    ];

    /// Maps an octave index (0 = none, 1..=5 = selector) to its label.
    ///
    /// Out-of-range indices map to [`Octave::None`].
    pub const fn from_index(index: usize) -> Self {
        match index {
            1 => Self::Sw4,
            2 => Self::Sw5,
            3 => Self::Sw6,
            4 => Self::Sw7,
            5 => Self::Sw8,
            _ => Self::None,
        }
    }

    /// Resolves the selector lines, first pressed selector wins.
    ///
    /// The priority order is inherited from the instrument's wiring and is
    /// not a musical requirement.
    ///
    /// ```rust
    /// use tromba_core::Octave;
    ///
    /// assert_eq!(Octave::from_selectors([false; 5]), Octave::None);
    /// assert_eq!(Octave::from_selectors([false, true, false, true, false]), Octave::Sw5);
    /// ```
    pub const fn from_selectors(selectors: [bool; OCTAVE_SELECTORS]) -> Self {
        let mut i = 0;
        while i < OCTAVE_SELECTORS {
            if selectors[i] {
                return Self::from_index(i + 1);
            }
            i += 1;
        }
        Self::None
    }

    /// Returns the octave index (0 = none, 1..=5 = selector).
    #[inline]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Sw4 => "SW4",
            Self::Sw5 => "SW5",
            Self::Sw6 => "SW6",
            Self::Sw7 => "SW7",
            Self::Sw8 => "SW8",
        }
    }

    /// Parses a label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|octave| octave.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Octave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One poll cycle's worth of instrument input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    /// Valve levels.
    pub valves: ValveState,
    /// Resolved octave selection.
    pub octave: Octave,
    /// Sound enable switch.
    pub sound_enabled: bool,
}

impl InputSnapshot {
    /// Builds a snapshot from raw line levels.
    pub const fn from_lines(
        valves: [bool; 3],
        selectors: [bool; OCTAVE_SELECTORS],
        sound_enabled: bool,
    ) -> Self {
        Self {
            valves: ValveState::new(valves[0], valves[1], valves[2]),
            octave: Octave::from_selectors(selectors),
            sound_enabled,
        }
    }
}
