//! Live play command.
//!
//! The audio device clocks the synthesizer; the main thread runs the poll
//! loop against a virtual controller that mirrors the configured wiring.
//! Fingerings typed on stdin move the virtual valves and selectors.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use clap::Args;
use static_cell::StaticCell;
use tromba_core::{Octave, SynthesisState, Synthesizer, ValveState};
use tromba_io::backend::fill_frames;
use tromba_io::{AudioBackend, BackendStreamConfig, CpalBackend};
use tromba_platform::{PollLoop, Status, VirtualController};

use super::common::load_config;
use crate::script::{Fingering, ScriptError, parse_fingering};

/// Shared between the poll loop and the audio callback for the whole run.
static TONE: StaticCell<SynthesisState> = StaticCell::new();

#[derive(Args)]
pub struct PlayArgs {
    /// Configuration file (defaults to the user's instrument.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output device name (partial match)
    #[arg(short, long)]
    device: Option<String>,

    /// Start with the sound switch off
    #[arg(long)]
    mute: bool,

    /// Print the display screen on every change
    #[arg(long)]
    screen: bool,
}

/// One line of keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Hold(Fingering),
    Sound(bool),
    Quit,
}

fn parse_input(line: &str) -> Result<Option<Input>, ScriptError> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "q" | "quit" | "exit" => Ok(Some(Input::Quit)),
        "on" => Ok(Some(Input::Sound(true))),
        "off" => Ok(Some(Input::Sound(false))),
        _ => parse_fingering(line).map(|f| Some(Input::Hold(f))),
    }
}

/// What the player is currently holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Hands {
    valves: ValveState,
    octave: Octave,
    sound: bool,
}

impl Hands {
    fn new(sound: bool) -> Self {
        Self {
            valves: ValveState::OPEN,
            octave: Octave::None,
            sound,
        }
    }

    /// Applies one input; returns `false` on quit.
    fn apply(&mut self, input: Input) -> bool {
        match input {
            Input::Hold(fingering) => {
                self.valves = fingering.valves;
                self.octave = fingering.octave;
                self.sound = fingering.sound_or(self.sound);
            }
            Input::Sound(sound) => self.sound = sound,
            Input::Quit => return false,
        }
        true
    }
}

fn spawn_stdin_reader(tx: mpsc::Sender<Input>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_input(&line) {
                Ok(Some(input)) => {
                    if tx.send(input).is_err() {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => eprintln!("  {e}"),
            }
        }
        let _ = tx.send(Input::Quit);
    });
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    let backend = CpalBackend::new();
    let stream_config = BackendStreamConfig {
        sample_rate: config.sample_rate,
        buffer_size: config.output.buffer_size,
        channels: config.output.channels,
        device_name: args.device.or_else(|| config.output.device.clone()),
    };
    let sample_rate = backend.actual_sample_rate(&stream_config);

    let state = TONE.init(SynthesisState::new());
    let (writer, reader) = state.split();
    let mut synth = Synthesizer::new(reader, sample_rate);
    let channels = stream_config.channels;

    let stream = backend.build_output_stream(
        &stream_config,
        Box::new(move |buffer: &mut [f32]| {
            fill_frames(buffer, channels, || synth.tick::<f32>());
        }),
        Box::new(|err: &str| tracing::error!(error = err, "audio stream error")),
    )?;

    println!(
        "Playing on {}",
        stream_config
            .device_name
            .as_deref()
            .unwrap_or("default output")
    );
    println!("  Sample rate: {sample_rate} Hz");
    println!("  Poll interval: {} ms", config.poll_interval_ms);
    println!();
    println!("Type a fingering and press Enter: valves[/octave][/on|off]");
    println!("  e.g. '13/sw5' for A4, '-' for open, 'off' to mute, 'q' to quit");
    println!("\nPress Ctrl+C to stop...\n");

    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        println!("\nStopping...");
        r.store(false, Ordering::SeqCst);
    })?;

    let (tx, rx) = mpsc::channel();
    spawn_stdin_reader(tx);

    let map = config.input_map();
    let mut controller = VirtualController::for_map(&map);
    let show_screen = args.screen;
    let mut poll = PollLoop::new(map, writer, move |status: &Status, changed: bool| {
        if changed {
            println!("{status}");
            if show_screen {
                println!("{}\n", status.screen());
            }
        }
    });

    let interval = Duration::from_millis(u64::from(config.poll_interval_ms));
    let mut hands = Hands::new(!args.mute);
    while running.load(Ordering::SeqCst) {
        loop {
            match rx.try_recv() {
                Ok(input) => {
                    if !hands.apply(input) {
                        running.store(false, Ordering::SeqCst);
                        break;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    running.store(false, Ordering::SeqCst);
                    break;
                }
            }
        }

        controller.set_fingering(poll.map(), hands.valves, hands.octave, hands.sound);
        poll.poll_once(&mut controller);
        std::thread::sleep(interval);
    }

    drop(stream);
    println!("Done!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_commands() {
        assert_eq!(parse_input("  "), Ok(None));
        assert_eq!(parse_input("q"), Ok(Some(Input::Quit)));
        assert_eq!(parse_input("QUIT"), Ok(Some(Input::Quit)));
        assert_eq!(parse_input("off"), Ok(Some(Input::Sound(false))));
        assert_eq!(parse_input("On"), Ok(Some(Input::Sound(true))));
    }

    #[test]
    fn test_parse_input_fingering() {
        let Ok(Some(Input::Hold(f))) = parse_input("13/sw5") else {
            panic!("expected a fingering");
        };
        assert_eq!(f.valves, ValveState::new(true, false, true));
        assert_eq!(f.octave, Octave::Sw5);
        assert!(parse_input("7").is_err());
    }

    #[test]
    fn test_hands_keep_sound_unless_overridden() {
        let mut hands = Hands::new(true);
        assert!(hands.apply(parse_input("2/sw4").unwrap().unwrap()));
        assert_eq!(hands.octave, Octave::Sw4);
        assert!(hands.sound);

        assert!(hands.apply(Input::Sound(false)));
        assert!(hands.apply(parse_input("-").unwrap().unwrap()));
        assert_eq!(hands, Hands::new(false));

        assert!(hands.apply(parse_input("1/none/on").unwrap().unwrap()));
        assert!(hands.sound);
        assert!(!hands.apply(Input::Quit));
    }
}
