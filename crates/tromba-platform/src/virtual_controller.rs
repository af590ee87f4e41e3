//! In-memory controller.
//!
//! [`VirtualController`] holds line levels set by software: scripted
//! performances, keyboard input, and tests. It reports the lines it was
//! created with and nothing else.

use tromba_core::{OCTAVE_SELECTORS, Octave, ValveState};

use crate::{ControlId, ControlState, InputMap, InputRole, PlatformController};

/// A fixed set of software-driven input lines.
///
/// # Example
///
/// ```rust
/// use tromba_platform::{ControlId, PlatformController, VirtualController};
///
/// let line = ControlId::virtual_line(0);
/// let mut controller = VirtualController::<4>::new(&[line]);
/// controller.set_level(line, true);
/// assert!(controller.read_control(line).unwrap().level);
/// ```
#[derive(Debug, Clone)]
pub struct VirtualController<const N: usize = { crate::STANDARD_LINES }> {
    lines: [Option<(ControlId, ControlState)>; N],
    count: usize,
}

impl<const N: usize> VirtualController<N> {
    /// Creates a controller with the given lines, all released.
    ///
    /// Lines beyond capacity and duplicates are ignored.
    pub fn new(ids: &[ControlId]) -> Self {
        let mut controller = Self {
            lines: [None; N],
            count: 0,
        };
        for &id in ids {
            if controller.count == N || controller.position(id).is_some() {
                continue;
            }
            controller.lines[controller.count] = Some((id, ControlState::default()));
            controller.count += 1;
        }
        controller
    }

    /// Creates a controller with one line per binding in `map`.
    pub fn for_map(map: &InputMap<N>) -> Self {
        let mut controller = Self::new(&[]);
        for (id, _) in map.iter() {
            if controller.count < N {
                controller.lines[controller.count] = Some((id, ControlState::default()));
                controller.count += 1;
            }
        }
        controller
    }

    fn position(&self, id: ControlId) -> Option<usize> {
        self.lines[..self.count]
            .iter()
            .position(|l| matches!(l, Some((line, _)) if *line == id))
    }

    /// Sets a line's level. Returns `false` for an unknown line.
    pub fn set_level(&mut self, id: ControlId, level: bool) -> bool {
        match self.position(id) {
            Some(i) => {
                if let Some((_, state)) = &mut self.lines[i] {
                    state.set(level);
                }
                true
            }
            None => false,
        }
    }

    /// Sets the level of the line bound to `role` in `map`.
    pub fn set_role<const M: usize>(
        &mut self,
        map: &InputMap<M>,
        role: InputRole,
        level: bool,
    ) -> bool {
        map.control_for(role).is_some_and(|id| self.set_level(id, level))
    }

    /// Presses the valves in `valves`, selects `octave`, and sets the sound
    /// switch, releasing everything else.
    ///
    /// [`Octave::None`] releases all selectors; any other octave presses only
    /// its own selector.
    pub fn set_fingering<const M: usize>(
        &mut self,
        map: &InputMap<M>,
        valves: ValveState,
        octave: Octave,
        sound_enabled: bool,
    ) {
        self.set_role(map, InputRole::Valve(1), valves.valve1);
        self.set_role(map, InputRole::Valve(2), valves.valve2);
        self.set_role(map, InputRole::Valve(3), valves.valve3);
        for (selector, n) in (1u8..).zip(1..=OCTAVE_SELECTORS) {
            self.set_role(map, InputRole::OctaveSelector(selector), octave.index() == n);
        }
        self.set_role(map, InputRole::SoundEnable, sound_enabled);
    }

    /// Releases every line.
    pub fn release_all(&mut self) {
        for (_, state) in self.lines.iter_mut().flatten() {
            state.set(false);
        }
    }

    /// Returns `true` if any line changed since the last flush.
    pub fn any_changed(&self) -> bool {
        self.lines.iter().flatten().any(|(_, s)| s.changed)
    }
}

impl<const N: usize> PlatformController for VirtualController<N> {
    fn control_count(&self) -> usize {
        self.count
    }

    fn control_id(&self, index: usize) -> Option<ControlId> {
        if index < self.count {
            self.lines[index].map(|(id, _)| id)
        } else {
            None
        }
    }

    fn read_control(&self, id: ControlId) -> Option<ControlState> {
        self.position(id)
            .and_then(|i| self.lines[i].map(|(_, state)| state))
    }

    fn flush(&mut self) {
        for (_, state) in self.lines.iter_mut().flatten() {
            state.clear_changed();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ignores_duplicates() {
        let a = ControlId::virtual_line(0);
        let b = ControlId::virtual_line(1);
        let controller = VirtualController::<4>::new(&[a, b, a]);
        assert_eq!(controller.control_count(), 2);
        assert_eq!(controller.control_id(1), Some(b));
        assert_eq!(controller.control_id(2), None);
    }

    #[test]
    fn test_new_respects_capacity() {
        let ids: [ControlId; 3] = [0, 1, 2].map(ControlId::virtual_line);
        let controller = VirtualController::<2>::new(&ids);
        assert_eq!(controller.control_count(), 2);
        assert!(controller.read_control(ids[2]).is_none());
    }

    #[test]
    fn test_set_level_and_flush() {
        let line = ControlId::virtual_line(3);
        let mut controller = VirtualController::<2>::new(&[line]);
        assert!(controller.set_level(line, true));
        assert!(controller.any_changed());
        let state = controller.read_control(line).unwrap();
        assert!(state.level && state.changed);

        controller.flush();
        assert!(!controller.any_changed());
        assert!(controller.read_control(line).unwrap().level);
        assert!(!controller.set_level(ControlId::virtual_line(9), true));
    }

    #[test]
    fn test_for_map_covers_all_lines() {
        let map = InputMap::gpio_layout();
        let controller = VirtualController::for_map(&map);
        assert_eq!(controller.control_count(), map.len());
        for (id, _) in map.iter() {
            assert_eq!(controller.read_control(id), Some(ControlState::default()));
        }
    }

    #[test]
    fn test_set_fingering_round_trips_through_snapshot() {
        let map = InputMap::gpio_layout();
        let mut controller = VirtualController::for_map(&map);
        for octave in Octave::ALL {
            let valves = ValveState::new(false, true, true);
            controller.set_fingering(&map, valves, octave, true);
            let snap = map.snapshot(&controller);
            assert_eq!(snap.valves, valves);
            assert_eq!(snap.octave, octave);
            assert!(snap.sound_enabled);
        }
    }

    #[test]
    fn test_release_all() {
        let map = InputMap::virtual_layout();
        let mut controller = VirtualController::for_map(&map);
        controller.set_fingering(&map, ValveState::new(true, true, true), Octave::Sw4, true);
        controller.release_all();
        assert_eq!(map.snapshot(&controller), tromba_core::InputSnapshot::default());
    }
}
