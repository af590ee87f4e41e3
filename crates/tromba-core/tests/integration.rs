//! Integration tests for tromba-core.
//!
//! Exercises the resolver against the full input space and runs the
//! synthesizer on resolved notes, measuring periodicity and zero crossings.

use tromba_core::{
    FingeringCode, InputSnapshot, NoteChart, Octave, OutputSample, Resolver, SynthesisState,
    Synthesizer, ValveState, resolve,
};

const SR: u32 = 44_100;
const TAU: f32 = core::f32::consts::TAU;

/// Every one of the 8 valve combinations.
fn all_valves() -> impl Iterator<Item = ValveState> {
    (0u8..8).map(|bits| ValveState::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0))
}

/// Every one of the 32 selector combinations.
fn all_selectors() -> impl Iterator<Item = [bool; 5]> {
    (0u8..32).map(|bits| core::array::from_fn(|i| bits & (1 << i) != 0))
}

/// Circular distance between two phases.
fn phase_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % TAU;
    d.min(TAU - d)
}

/// Upward zero crossings of a unit-range signal, as sample indices.
fn upward_crossings(signal: &[f32]) -> Vec<usize> {
    signal
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] < 0.0 && w[1] >= 0.0)
        .map(|(i, _)| i + 1)
        .collect()
}

// ---------------------------------------------------------------------------
// 1. Resolver totality
// ---------------------------------------------------------------------------

#[test]
fn fingering_codes_cover_table_exactly_once() {
    let mut codes: Vec<u8> = all_valves().map(|v| v.fingering().value()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec![0, 1, 2, 3, 12, 13, 23, 123]);
}

#[test]
fn spot_check_valve_two_and_three() {
    let code = ValveState::new(false, true, true).fingering();
    assert_eq!(code.value(), 23);
}

#[test]
fn octave_resolution_respects_priority_for_all_selector_states() {
    for selectors in all_selectors() {
        let octave = Octave::from_selectors(selectors);
        match selectors.iter().position(|&s| s) {
            Some(first) => assert_eq!(octave.index(), first + 1, "{selectors:?}"),
            None => assert_eq!(octave, Octave::None),
        }
    }
}

#[test]
fn resolver_is_idempotent_over_whole_input_space() {
    let resolver = Resolver::standard();
    for valves in all_valves() {
        for selectors in all_selectors() {
            let snap = InputSnapshot::from_lines(
                [valves.valve1, valves.valve2, valves.valve3],
                selectors,
                true,
            );
            let first = resolver.resolve_snapshot(&snap);
            let second = resolver.resolve_snapshot(&snap);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn missing_pairs_never_fall_back_to_a_note() {
    let chart = NoteChart::standard();
    let mut missing = 0;
    for code in FingeringCode::ALL {
        for octave in Octave::ALL {
            let v = code.valves();
            let note = resolve(v.valve1, v.valve2, v.valve3, octave.index());
            match chart.lookup(code, octave) {
                Some(expected) => assert_eq!(note, Some(expected)),
                None => {
                    assert!(note.is_none(), "{code}/{octave} should be unplayable");
                    missing += 1;
                }
            }
        }
    }
    // 8 codes x 6 octaves, 31 charted.
    assert_eq!(missing, 48 - 31);
}

// ---------------------------------------------------------------------------
// 2. Synthesizer behavior
// ---------------------------------------------------------------------------

#[test]
fn disabled_synth_emits_only_silence() {
    let mut state = SynthesisState::new();
    let (writer, reader) = state.split();
    writer.set_frequency(440.0);
    writer.set_enabled(false);
    let mut synth = Synthesizer::new(reader, SR);
    for _ in 0..SR {
        assert_eq!(synth.tick::<u8>(), u8::SILENCE);
        assert_eq!(synth.phase(), 0.0);
    }
}

#[test]
fn a440_returns_to_start_phase_after_one_period() {
    let mut state = SynthesisState::new();
    let (writer, reader) = state.split();
    writer.set_frequency(440.0);
    writer.set_enabled(true);
    let mut synth = Synthesizer::new(reader, SR);

    let increment = synth.phase_increment(440.0);
    let start = synth.phase();
    let period = (SR as f32 / 440.0).round() as usize;
    for _ in 0..period {
        synth.tick::<u8>();
    }
    let d = phase_distance(synth.phase(), start);
    assert!(d <= increment, "drift {d} exceeds one increment {increment}");
}

#[test]
fn phase_stays_in_range_across_chart() {
    let chart = NoteChart::standard();
    let mut state = SynthesisState::new();
    let (writer, reader) = state.split();
    writer.set_enabled(true);
    let mut synth = Synthesizer::new(reader, SR);

    for note in chart.entries() {
        writer.set_frequency(note.frequency_hz);
        for _ in 0..4096 {
            synth.tick::<u8>();
            let p = synth.phase();
            assert!((0.0..TAU).contains(&p), "{}: phase {p}", note.name);
        }
    }
}

#[test]
fn first_sample_of_tone_is_near_silence() {
    let mut state = SynthesisState::new();
    let (writer, reader) = state.split();
    writer.set_frequency(185.0);
    writer.set_enabled(true);
    let mut synth = Synthesizer::new(reader, SR);
    let first: u8 = synth.tick();
    assert!(first.abs_diff(u8::SILENCE) <= 4, "first sample {first}");
}

#[test]
fn frequency_change_keeps_phase_continuous() {
    let mut state = SynthesisState::new();
    let (writer, reader) = state.split();
    writer.set_frequency(261.6);
    writer.set_enabled(true);
    let mut synth = Synthesizer::new(reader, SR);
    for _ in 0..1000 {
        synth.tick::<f32>();
    }
    let before = synth.phase();
    writer.set_frequency(392.0);
    synth.tick::<f32>();
    let step = phase_distance(synth.phase(), before);
    assert!((step - synth.phase_increment(392.0)).abs() < 1e-4);
}

// ---------------------------------------------------------------------------
// 3. End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn open_valves_lowest_octave_plays_c4() {
    let note = resolve(false, false, false, 0).expect("C4 is charted");
    assert_eq!(note.name, "C4");
    assert_eq!(note.frequency_hz, 261.6);

    let mut state = SynthesisState::new();
    let (writer, reader) = state.split();
    writer.set_frequency(note.frequency_hz);
    writer.set_enabled(true);
    let mut synth = Synthesizer::new(reader, SR);

    let mut signal = vec![0.0f32; SR as usize];
    synth.fill(&mut signal);

    let crossings = upward_crossings(&signal);
    assert!(crossings.len() > 200);
    let spans: Vec<usize> = crossings.windows(2).map(|w| w[1] - w[0]).collect();
    for &span in &spans {
        assert!((168..=169).contains(&span), "crossing span {span}");
    }
    let mean = (crossings[crossings.len() - 1] - crossings[0]) as f32 / spans.len() as f32;
    assert!((mean - 168.6).abs() < 0.1, "mean period {mean}");
}

#[test]
fn all_valves_top_octave_is_silent() {
    let resolver = Resolver::standard();
    let res = resolver.resolve_parts(ValveState::new(true, true, true), Octave::Sw8);
    assert_eq!(res.fingering.value(), 123);
    assert!(res.note.is_none());

    let mut state = SynthesisState::new();
    let (writer, reader) = state.split();
    writer.set_frequency(res.frequency_hz());
    writer.set_enabled(true);
    let mut synth = Synthesizer::new(reader, SR);
    for _ in 0..1000 {
        assert_eq!(synth.tick::<u8>(), u8::SILENCE);
    }
}
