//! Tromba Platform - input lines, poll loop, and status reporting
//!
//! This crate sits between the hardware (or a simulation of it) and
//! `tromba-core`. It reads digital input lines through a
//! [`PlatformController`], maps them onto instrument roles with an
//! [`InputMap`], and runs the poll-rate half of the instrument in
//! [`PollLoop`].
//!
//! # Core Abstractions
//!
//! - [`ControlId`] - Namespaced line identifier (hardware GPIO, virtual)
//! - [`ControlState`] - Current line level with change flag
//! - [`PlatformController`] - Trait for anything that can report line levels
//! - [`InputMap`] / [`InputRole`] - Which line is which valve or selector
//! - [`VirtualController`] - In-memory controller for tests and scripts
//! - [`PollLoop`] - One poll cycle: read, resolve, write tone state, report
//! - [`Status`] / [`StatusSink`] - What the display and log collaborators see
//!
//! # Control ID Namespaces
//!
//! - `0x00XX` - Hardware lines; the index is the GPIO number
//! - `0x01XX` - Virtual lines (keyboard, scripted input)
//!
//! # Line Levels
//!
//! Controllers report *logical* levels: `true` means pressed. Debouncing
//! and pull-up inversion belong to the controller implementation.
//!
//! # Example
//!
//! ```rust
//! use tromba_core::{Octave, SynthesisState, ValveState};
//! use tromba_platform::{InputMap, NullSink, PollLoop, VirtualController};
//!
//! let map = InputMap::gpio_layout();
//! let mut controller = VirtualController::for_map(&map);
//! controller.set_fingering(&map, ValveState::new(true, false, true), Octave::Sw5, true);
//!
//! let mut state = SynthesisState::new();
//! let (writer, _reader) = state.split();
//! let mut poll = PollLoop::new(map, writer, NullSink);
//!
//! let status = poll.poll_once(&mut controller);
//! assert_eq!(status.resolution.note.unwrap().name, "A4");
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod input_map;
pub mod poll;
pub mod status;
pub mod virtual_controller;

pub use input_map::{InputMap, InputRole, STANDARD_LINES};
pub use poll::PollLoop;
pub use status::{NullSink, Screen, Status, StatusSink, ValveGlyphs};
pub use virtual_controller::VirtualController;

/// Namespace identifiers for control sources.
pub mod namespace {
    /// Hardware lines (GPIO pins on the device).
    pub const HARDWARE: u16 = 0x0000;
    /// Virtual lines (keyboard, scripts, tests).
    pub const VIRTUAL: u16 = 0x0100;
}

/// A namespaced input line identifier.
///
/// The high byte is the namespace, the low byte the line index within it.
///
/// # Example
///
/// ```rust
/// use tromba_platform::ControlId;
///
/// let valve1 = ControlId::hardware(19);
/// assert_eq!(valve1.raw(), 0x0013);
/// assert!(valve1.is_hardware());
///
/// let key = ControlId::virtual_line(3);
/// assert_eq!(key.raw(), 0x0103);
/// assert!(key.is_virtual());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u16);

impl ControlId {
    /// Creates a ControlId from a raw 16-bit value.
    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// Creates a hardware line ID (namespace 0x00XX).
    #[inline]
    pub const fn hardware(gpio: u8) -> Self {
        Self(namespace::HARDWARE | gpio as u16)
    }

    /// Creates a virtual line ID (namespace 0x01XX).
    #[inline]
    pub const fn virtual_line(index: u8) -> Self {
        Self(namespace::VIRTUAL | index as u16)
    }

    /// Returns the raw 16-bit value.
    #[inline]
    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// Returns the namespace portion (high byte).
    #[inline]
    pub const fn namespace(&self) -> u16 {
        self.0 & 0xFF00
    }

    /// Returns the index within the namespace (low byte).
    #[inline]
    pub const fn index(&self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// Returns true if this is a hardware line.
    #[inline]
    pub const fn is_hardware(&self) -> bool {
        self.namespace() == namespace::HARDWARE
    }

    /// Returns true if this is a virtual line.
    #[inline]
    pub const fn is_virtual(&self) -> bool {
        self.namespace() == namespace::VIRTUAL
    }
}

/// Current level of a digital input line.
///
/// # Example
///
/// ```rust
/// use tromba_platform::ControlState;
///
/// let mut state = ControlState::new(false);
/// state.set(true);
/// assert!(state.level && state.changed);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    /// Logical level: `true` = pressed.
    pub level: bool,
    /// True if the level changed since the flag was last cleared.
    pub changed: bool,
}

impl ControlState {
    /// Creates a state with the given level (not marked as changed).
    #[inline]
    pub const fn new(level: bool) -> Self {
        Self {
            level,
            changed: false,
        }
    }

    /// Creates a state marked as changed.
    #[inline]
    pub const fn changed(level: bool) -> Self {
        Self {
            level,
            changed: true,
        }
    }

    /// Clears the changed flag.
    #[inline]
    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    /// Sets a new level, marking the state changed if it differs.
    #[inline]
    pub fn set(&mut self, level: bool) {
        if self.level != level {
            self.level = level;
            self.changed = true;
        }
    }
}

/// Trait for platform-specific input implementations.
///
/// Implement this for a board's GPIO block, a keyboard, or a test fixture.
///
/// # Thread Safety
///
/// This trait does not require thread safety. A controller is owned by the
/// poll schedule.
pub trait PlatformController {
    /// Returns the total number of lines on this platform.
    fn control_count(&self) -> usize;

    /// Returns the line ID at the given index.
    ///
    /// Returns `None` if `index >= control_count()`.
    fn control_id(&self, index: usize) -> Option<ControlId>;

    /// Reads the current state of a line.
    ///
    /// Returns `None` if the line is not recognized or not readable.
    fn read_control(&self, id: ControlId) -> Option<ControlState>;

    /// Samples the hardware. Called at the start of every poll cycle.
    fn poll(&mut self) {}

    /// Called at the end of every poll cycle, after all lines were read.
    fn flush(&mut self) {}
}
