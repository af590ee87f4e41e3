//! Tromba Core - fingering resolution and tone synthesis
//!
//! This crate is the real-time heart of a valve-and-octave wind controller:
//! three valve switches and five octave selectors pick a note from a fixed
//! chart, and a phase-accumulator oscillator renders that note one sample per
//! timer tick.
//!
//! # Core Components
//!
//! ## Resolution
//!
//! - [`ValveState`] / [`FingeringCode`] - Valve levels and their trumpet code
//! - [`Octave`] - The six octave labels, with selector priority
//! - [`NoteChart`] / [`NoteEntry`] - The static note table
//! - [`Resolver`] / [`Resolution`] - Pure inputs-to-note mapping
//!
//! ```rust
//! use tromba_core::{Octave, Resolver, ValveState};
//!
//! let res = Resolver::standard().resolve_parts(ValveState::new(true, true, false), Octave::Sw8);
//! assert_eq!(res.fingering.value(), 12);
//! assert_eq!(res.note.unwrap().name, "A#5");
//! ```
//!
//! ## Synthesis
//!
//! - [`SynthesisState`] - Frequency and enable flag shared across schedules
//! - [`ToneWriter`] / [`ToneReader`] - Single-writer handles onto that state
//! - [`Synthesizer`] - Sine oscillator, one [`tick`](Synthesizer::tick) per sample
//! - [`OutputSample`] - Quantization to `u8` (DAC), `i16` (PCM) or `f32`
//!
//! # Schedules
//!
//! Two contexts run concurrently without locks. The poll schedule reads
//! inputs, resolves them, and writes through the [`ToneWriter`]. The sample
//! schedule calls [`Synthesizer::tick`] at the sample rate. Each shared field
//! has exactly one writer, so atomic loads and stores are the only
//! synchronization needed.
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! tromba-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod chart;
pub mod fingering;
pub mod resolve;
pub mod sample;
pub mod state;
pub mod synth;

pub use chart::{NoteChart, NoteEntry, OctaveRange, STANDARD_CHART};
pub use fingering::{FingeringCode, InputSnapshot, OCTAVE_SELECTORS, Octave, ValveState};
pub use resolve::{Resolution, Resolver, resolve};
pub use sample::OutputSample;
pub use state::{SynthesisState, ToneReader, ToneWriter};
pub use synth::{DEFAULT_SAMPLE_RATE, Synthesizer};
