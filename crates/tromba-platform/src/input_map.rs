//! Line-to-role mapping.
//!
//! [`InputMap`] is a fixed-capacity table that tells the poll loop which
//! input line is which valve, octave selector, or the sound switch, and
//! turns a controller's line levels into an [`InputSnapshot`].
//!
//! # Example
//!
//! ```rust
//! use tromba_platform::{ControlId, InputMap, InputRole};
//!
//! let mut map = InputMap::<9>::new();
//! assert!(map.bind(ControlId::virtual_line(0), InputRole::Valve(1)));
//! assert_eq!(map.role_of(ControlId::virtual_line(0)), Some(InputRole::Valve(1)));
//! ```

use tromba_core::{InputSnapshot, OCTAVE_SELECTORS};

use crate::{ControlId, PlatformController};

/// Number of lines the instrument uses: 3 valves, 5 selectors, 1 switch.
pub const STANDARD_LINES: usize = 3 + OCTAVE_SELECTORS + 1;

/// GPIO lines of the reference board.
const GPIO_VALVES: [u8; 3] = [19, 21, 22];
const GPIO_SELECTORS: [u8; OCTAVE_SELECTORS] = [18, 5, 17, 16, 4];
const GPIO_SOUND_ENABLE: u8 = 15;

/// What an input line does on the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputRole {
    /// Valve 1..=3.
    Valve(u8),
    /// Octave selector 1..=5; selector 1 has the highest priority.
    OctaveSelector(u8),
    /// Sound enable switch.
    SoundEnable,
}

impl InputRole {
    /// All roles of the instrument, valves first.
    pub const ALL: [Self; STANDARD_LINES] = [
        Self::Valve(1),
        Self::Valve(2),
        Self::Valve(3),
        Self::OctaveSelector(1),
        Self::OctaveSelector(2),
        Self::OctaveSelector(3),
        Self::OctaveSelector(4),
        Self::OctaveSelector(5),
        Self::SoundEnable,
    ];

    /// Returns `true` if the role's index is in range.
    pub const fn is_valid(&self) -> bool {
        match self {
            Self::Valve(n) => *n >= 1 && *n <= 3,
            Self::OctaveSelector(n) => *n >= 1 && *n as usize <= OCTAVE_SELECTORS,
            Self::SoundEnable => true,
        }
    }
}

/// A single binding from line to role.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Binding {
    control_id: ControlId,
    role: InputRole,
}

/// Maps input lines to instrument roles.
///
/// Each line has at most one role and each role at most one line.
///
/// # Type Parameter
///
/// - `N`: Maximum number of bindings (compile-time constant for no_std support)
#[derive(Debug, Clone)]
pub struct InputMap<const N: usize = STANDARD_LINES> {
    bindings: [Option<Binding>; N],
    count: usize,
}

impl<const N: usize> InputMap<N> {
    /// Creates an empty map.
    pub const fn new() -> Self {
        Self {
            bindings: [None; N],
            count: 0,
        }
    }

    /// Returns the number of bindings.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if nothing is bound.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the maximum number of bindings.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Binds a line to a role.
    ///
    /// Any previous binding of the same line or the same role is replaced.
    /// Returns `false` if the role is out of range or the map is full.
    pub fn bind(&mut self, control_id: ControlId, role: InputRole) -> bool {
        if !role.is_valid() {
            return false;
        }

        for slot in self.bindings.iter_mut() {
            if let Some(b) = slot
                && b.role == role
                && b.control_id != control_id
            {
                *slot = None;
                self.count -= 1;
            }
        }

        for b in self.bindings.iter_mut().flatten() {
            if b.control_id == control_id {
                b.role = role;
                return true;
            }
        }

        for slot in self.bindings.iter_mut() {
            if slot.is_none() {
                *slot = Some(Binding { control_id, role });
                self.count += 1;
                return true;
            }
        }

        false
    }

    /// Removes the binding for a line.
    ///
    /// Returns `true` if a binding was removed.
    pub fn unbind(&mut self, control_id: ControlId) -> bool {
        for slot in self.bindings.iter_mut() {
            if let Some(b) = slot
                && b.control_id == control_id
            {
                *slot = None;
                self.count -= 1;
                return true;
            }
        }
        false
    }

    /// Role bound to a line.
    #[inline]
    pub fn role_of(&self, control_id: ControlId) -> Option<InputRole> {
        self.bindings
            .iter()
            .flatten()
            .find(|b| b.control_id == control_id)
            .map(|b| b.role)
    }

    /// Line bound to a role.
    #[inline]
    pub fn control_for(&self, role: InputRole) -> Option<ControlId> {
        self.bindings
            .iter()
            .flatten()
            .find(|b| b.role == role)
            .map(|b| b.control_id)
    }

    /// Iterates over `(line, role)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ControlId, InputRole)> + '_ {
        self.bindings
            .iter()
            .flatten()
            .map(|b| (b.control_id, b.role))
    }

    /// Returns `true` if every instrument role has a line.
    pub fn is_complete(&self) -> bool {
        InputRole::ALL
            .iter()
            .all(|role| self.control_for(*role).is_some())
    }

    /// Clears all bindings.
    pub fn clear(&mut self) {
        self.bindings = [None; N];
        self.count = 0;
    }

    /// Reads every bound line and builds the poll-cycle snapshot.
    ///
    /// Unbound roles and unreadable lines read as released.
    pub fn snapshot<C: PlatformController + ?Sized>(&self, controller: &C) -> InputSnapshot {
        let mut valves = [false; 3];
        let mut selectors = [false; OCTAVE_SELECTORS];
        let mut sound_enabled = false;

        for b in self.bindings.iter().flatten() {
            let level = controller
                .read_control(b.control_id)
                .is_some_and(|s| s.level);
            match b.role {
                InputRole::Valve(n) => valves[usize::from(n) - 1] = level,
                InputRole::OctaveSelector(n) => selectors[usize::from(n) - 1] = level,
                InputRole::SoundEnable => sound_enabled = level,
            }
        }

        InputSnapshot::from_lines(valves, selectors, sound_enabled)
    }
}

impl InputMap<STANDARD_LINES> {
    /// Binds the nine roles to the given lines.
    pub fn from_lines(
        valves: [ControlId; 3],
        selectors: [ControlId; OCTAVE_SELECTORS],
        sound_enable: ControlId,
    ) -> Self {
        let mut map = Self::new();
        let lines = valves.into_iter().chain(selectors).chain([sound_enable]);
        for (id, role) in lines.zip(InputRole::ALL) {
            map.bind(id, role);
        }
        map
    }

    /// The reference board's wiring: valves on GPIO 19/21/22, selectors on
    /// 18/5/17/16/4, sound enable on 15.
    pub fn gpio_layout() -> Self {
        Self::from_gpio(GPIO_VALVES, GPIO_SELECTORS, GPIO_SOUND_ENABLE)
    }

    /// Binds the nine roles to hardware GPIO numbers.
    pub fn from_gpio(valves: [u8; 3], selectors: [u8; OCTAVE_SELECTORS], sound_enable: u8) -> Self {
        Self::from_lines(
            valves.map(ControlId::hardware),
            selectors.map(ControlId::hardware),
            ControlId::hardware(sound_enable),
        )
    }

    /// Binds the nine roles to virtual lines 0..=8 in role order.
    pub fn virtual_layout() -> Self {
        Self::from_lines(
            [0, 1, 2].map(ControlId::virtual_line),
            [3, 4, 5, 6, 7].map(ControlId::virtual_line),
            ControlId::virtual_line(8),
        )
    }
}

impl<const N: usize> Default for InputMap<N> {
    fn default() -> Self {
        Self::new()
    }
}
