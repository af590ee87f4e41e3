//! Offline rendering command.
//!
//! Plays a fingering script through a virtual controller and writes the
//! synthesizer output to a WAV file. Both schedules run on the sample clock:
//! the poll cycle fires every `samples_per_poll` samples, and the synthesizer
//! produces the samples in between. A step shorter than one poll interval
//! can therefore be missed entirely, exactly as a quick flick of the valves
//! would be on the instrument.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use tromba_config::InstrumentConfig;
use tromba_core::{OutputSample, SynthesisState, Synthesizer};
use tromba_io::{WavSample, WavSpec, write_wav};
use tromba_platform::{InputMap, PollLoop, Status, StatusSink, VirtualController};

use super::common::load_config;
use crate::script::{Step, parse_script, total_ms};

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    output: PathBuf,

    /// Fingering script, e.g. "-/none/250,13/sw4/250,0/sw5/500"
    #[arg(short, long, allow_hyphen_values = true)]
    script: String,

    /// Configuration file (defaults to the user's instrument.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Poll interval in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u32>,

    /// Sample format of the WAV file
    #[arg(short, long, value_enum, default_value_t = SampleFormat::I16)]
    format: SampleFormat,

    /// Start with the sound switch off; steps ending in /on override it
    #[arg(long)]
    mute: bool,

    /// Do not print the status transcript
    #[arg(short, long)]
    quiet: bool,
}

/// WAV sample encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SampleFormat {
    /// Unsigned 8-bit, centered on 128 like the DAC
    U8,
    /// Signed 16-bit PCM
    I16,
    /// 32-bit float
    F32,
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::F32 => "f32",
        })
    }
}

/// Status changes, stamped with the sample they happened at.
#[derive(Debug, Default)]
struct Transcript {
    clock: usize,
    entries: Vec<(usize, Status)>,
}

impl StatusSink for Transcript {
    fn report(&mut self, status: &Status, changed: bool) {
        if changed {
            self.entries.push((self.clock, *status));
        }
    }
}

/// Output of [`render_steps`].
#[derive(Debug)]
pub struct Rendered<S> {
    /// Mono samples.
    pub samples: Vec<S>,
    /// Status changes as `(sample index, status)`.
    pub transcript: Vec<(usize, Status)>,
}

fn samples_at(ms: u64, sample_rate: u32) -> usize {
    (ms * u64::from(sample_rate) / 1_000) as usize
}

/// Renders `steps` through the poll loop and synthesizer.
///
/// `sound_default` is the sound switch for steps without an override.
pub fn render_steps<S: OutputSample>(
    steps: &[Step],
    sample_rate: u32,
    samples_per_poll: usize,
    sound_default: bool,
) -> Rendered<S> {
    let ends: Vec<usize> = steps
        .iter()
        .scan(0u64, |ms, step| {
            *ms += u64::from(step.duration_ms);
            Some(samples_at(*ms, sample_rate))
        })
        .collect();
    let mut samples = vec![S::SILENCE; ends.last().copied().unwrap_or(0)];

    let map = InputMap::virtual_layout();
    let mut controller = VirtualController::for_map(&map);
    let mut state = SynthesisState::new();
    let (writer, reader) = state.split();
    let mut synth = Synthesizer::new(reader, sample_rate);
    let mut poll = PollLoop::new(map, writer, Transcript::default());

    let spp = samples_per_poll.max(1);
    for (block_index, block) in samples.chunks_mut(spp).enumerate() {
        let start = block_index * spp;
        let current = ends
            .partition_point(|&end| end <= start)
            .min(steps.len() - 1);
        let fingering = steps[current].fingering;

        controller.set_fingering(
            poll.map(),
            fingering.valves,
            fingering.octave,
            fingering.sound_or(sound_default),
        );
        poll.sink_mut().clock = start;
        poll.poll_once(&mut controller);
        synth.fill(block);
    }

    Rendered {
        samples,
        transcript: std::mem::take(&mut poll.sink_mut().entries),
    }
}

fn render_to<S: WavSample>(
    path: &Path,
    steps: &[Step],
    config: &InstrumentConfig,
    sound_default: bool,
) -> anyhow::Result<Vec<(usize, Status)>> {
    let rendered: Rendered<S> = render_steps(
        steps,
        config.sample_rate,
        config.samples_per_poll(),
        sound_default,
    );
    write_wav(path, &rendered.samples, WavSpec::mono::<S>(config.sample_rate))?;
    tracing::info!(
        path = %path.display(),
        samples = rendered.samples.len(),
        "performance written"
    );
    Ok(rendered.transcript)
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let steps = parse_script(&args.script)?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(sample_rate) = args.sample_rate {
        config.sample_rate = sample_rate;
    }
    if let Some(poll_interval_ms) = args.poll_interval_ms {
        config.poll_interval_ms = poll_interval_ms;
    }
    config.validate()?;

    println!(
        "Rendering {} step(s), {:.3}s",
        steps.len(),
        total_ms(&steps) as f64 / 1_000.0
    );
    println!("  Sample rate: {} Hz", config.sample_rate);
    println!(
        "  Poll interval: {} ms ({} samples)",
        config.poll_interval_ms,
        config.samples_per_poll()
    );
    println!("  Format: {}", args.format);

    let sound = !args.mute;
    let transcript = match args.format {
        SampleFormat::U8 => render_to::<u8>(&args.output, &steps, &config, sound)?,
        SampleFormat::I16 => render_to::<i16>(&args.output, &steps, &config, sound)?,
        SampleFormat::F32 => render_to::<f32>(&args.output, &steps, &config, sound)?,
    };

    if !args.quiet {
        println!();
        let rate = f64::from(config.sample_rate);
        for (at, status) in &transcript {
            println!("[{:>8.3}s] {status}", *at as f64 / rate);
        }
    }

    println!("\nWrote {}", args.output.display());
    Ok(())
}
