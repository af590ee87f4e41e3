//! The poll schedule.
//!
//! [`PollLoop::poll_once`] is one cycle: sample the controller, take a
//! snapshot through the [`InputMap`], resolve it, publish the result to the
//! synthesizer through the [`ToneWriter`], and report a [`Status`].
//!
//! The loop owns the only [`ToneWriter`], so it is the sole writer of the
//! tone state. Timing between cycles is up to the caller.

use tromba_core::{InputSnapshot, Resolver, ToneWriter};

use crate::{InputMap, PlatformController, STANDARD_LINES, Status, StatusSink};

/// One instrument's poll-rate state.
pub struct PollLoop<'a, S: StatusSink, const N: usize = STANDARD_LINES> {
    resolver: Resolver,
    tone: ToneWriter<'a>,
    map: InputMap<N>,
    sink: S,
    last: Option<Status>,
}

impl<'a, S: StatusSink, const N: usize> PollLoop<'a, S, N> {
    /// Creates a loop over the standard chart.
    pub fn new(map: InputMap<N>, tone: ToneWriter<'a>, sink: S) -> Self {
        Self::with_resolver(Resolver::standard(), map, tone, sink)
    }

    /// Creates a loop with a custom resolver.
    pub fn with_resolver(
        resolver: Resolver,
        map: InputMap<N>,
        tone: ToneWriter<'a>,
        sink: S,
    ) -> Self {
        Self {
            resolver,
            tone,
            map,
            sink,
            last: None,
        }
    }

    /// Input map in use.
    pub fn map(&self) -> &InputMap<N> {
        &self.map
    }

    /// Status sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable status sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Status of the most recent cycle.
    pub fn last_status(&self) -> Option<&Status> {
        self.last.as_ref()
    }

    /// Runs one poll cycle against `controller`.
    pub fn poll_once<C: PlatformController + ?Sized>(&mut self, controller: &mut C) -> Status {
        controller.poll();
        let snapshot = self.map.snapshot(controller);
        let status = self.apply(snapshot);
        controller.flush();
        status
    }

    /// Resolves a snapshot and publishes it, without touching a controller.
    ///
    /// The enable flag is always written. The frequency is the note's pitch,
    /// or 0 Hz for an unplayable combination so the synthesizer goes silent
    /// instead of holding the previous note.
    pub fn apply(&mut self, snapshot: InputSnapshot) -> Status {
        let resolution = self.resolver.resolve_snapshot(&snapshot);
        self.tone.set_enabled(snapshot.sound_enabled);
        self.tone.set_frequency(resolution.frequency_hz());

        let status = Status::new(resolution, snapshot.sound_enabled);
        let changed = self.last != Some(status);

        #[cfg(feature = "tracing")]
        if changed {
            match resolution.note {
                Some(note) => tracing::debug!(
                    note = note.name,
                    frequency_hz = note.frequency_hz,
                    fingering = resolution.fingering.value(),
                    octave = resolution.octave.label(),
                    sound = snapshot.sound_enabled,
                    "note resolved"
                ),
                None => tracing::debug!(
                    fingering = resolution.fingering.value(),
                    octave = resolution.octave.label(),
                    "no note for combination"
                ),
            }
        }

        self.sink.report(&status, changed);
        self.last = Some(status);
        status
    }
}

impl<S: StatusSink + core::fmt::Debug, const N: usize> core::fmt::Debug for PollLoop<'_, S, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PollLoop")
            .field("map", &self.map)
            .field("sink", &self.sink)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NullSink, VirtualController};
    use tromba_core::{Octave, SynthesisState, ValveState};

    #[test]
    fn test_poll_writes_tone_state() {
        let mut state = SynthesisState::new();
        let map = InputMap::gpio_layout();
        let mut controller = VirtualController::for_map(&map);
        controller.set_fingering(&map, ValveState::OPEN, Octave::None, true);

        {
            let (writer, _) = state.split();
            let mut poll = PollLoop::new(map, writer, NullSink);
            let status = poll.poll_once(&mut controller);
            assert_eq!(status.resolution.note.unwrap().name, "C4");
        }
        assert_eq!(state.frequency(), 261.6);
        assert!(state.enabled());
    }

    #[test]
    fn test_invalid_combination_writes_zero() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        let map = InputMap::gpio_layout();
        let mut controller = VirtualController::for_map(&map);
        let mut poll = PollLoop::new(map.clone(), writer, NullSink);

        controller.set_fingering(&map, ValveState::new(true, false, true), Octave::Sw5, true);
        poll.poll_once(&mut controller);
        assert_eq!(reader.frequency(), 440.0);

        controller.set_fingering(&map, ValveState::new(true, true, true), Octave::Sw8, true);
        let status = poll.poll_once(&mut controller);
        assert!(!status.resolution.is_valid());
        assert_eq!(reader.frequency(), 0.0);
        assert!(reader.enabled());
    }

    #[test]
    fn test_sound_switch_written_every_cycle() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        let map = InputMap::gpio_layout();
        let mut controller = VirtualController::for_map(&map);
        let mut poll = PollLoop::new(map.clone(), writer, NullSink);

        controller.set_fingering(&map, ValveState::OPEN, Octave::None, true);
        poll.poll_once(&mut controller);
        assert!(reader.enabled());

        controller.set_fingering(&map, ValveState::OPEN, Octave::None, false);
        let status = poll.poll_once(&mut controller);
        assert!(!reader.enabled());
        assert_eq!(reader.frequency(), 261.6);
        assert!(!status.is_sounding());
    }

    #[test]
    fn test_changed_flag() {
        let mut reports = Vec::new();
        let mut state = SynthesisState::new();
        let (writer, _) = state.split();
        let map = InputMap::gpio_layout();
        let mut controller = VirtualController::for_map(&map);
        {
            let mut poll = PollLoop::new(map.clone(), writer, |_: &Status, changed: bool| {
                reports.push(changed);
            });
            poll.poll_once(&mut controller);
            poll.poll_once(&mut controller);
            controller.set_fingering(&map, ValveState::OPEN, Octave::Sw4, false);
            poll.poll_once(&mut controller);
            assert!(poll.last_status().is_some());
        }
        assert_eq!(reports, [true, false, true]);
    }

    #[test]
    fn test_poll_flushes_controller() {
        let mut state = SynthesisState::new();
        let (writer, _) = state.split();
        let map = InputMap::gpio_layout();
        let mut controller = VirtualController::for_map(&map);
        let mut poll = PollLoop::new(map.clone(), writer, NullSink);
        controller.set_fingering(&map, ValveState::new(true, true, false), Octave::Sw7, true);
        assert!(controller.any_changed());
        poll.poll_once(&mut controller);
        assert!(!controller.any_changed());
    }

    #[test]
    fn test_apply_without_controller() {
        let mut state = SynthesisState::new();
        let (writer, reader) = state.split();
        let mut poll = PollLoop::new(InputMap::gpio_layout(), writer, NullSink);
        let snap = InputSnapshot::from_lines(
            [false, true, false],
            [false, false, false, false, true],
            true,
        );
        let status = poll.apply(snap);
        assert_eq!(status.resolution.note.unwrap().name, "C6");
        assert_eq!(reader.frequency(), 1047.0);
    }
}
