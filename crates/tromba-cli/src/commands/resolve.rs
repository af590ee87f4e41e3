//! Single fingering resolution command.

use clap::Args;
use serde::Serialize;
use tromba_core::{Octave, Resolver, ValveState};
use tromba_platform::Status;

use crate::script::{parse_octave, parse_valves};

#[derive(Args)]
pub struct ResolveArgs {
    /// Pressed valves: '-' for open, otherwise digits 1-3 (e.g. 13)
    #[arg(value_parser = parse_valves, allow_hyphen_values = true)]
    valves: ValveState,

    /// Octave selector (none, sw4 .. sw8)
    #[arg(short, long, default_value = "none", value_parser = parse_octave)]
    octave: Octave,

    /// Resolve with the sound switch off
    #[arg(long)]
    mute: bool,

    /// Also print the display screen
    #[arg(long)]
    screen: bool,

    /// Print the result as JSON
    #[arg(long, conflicts_with = "screen")]
    json: bool,
}

#[derive(Serialize)]
struct ResolveReport {
    note: Option<&'static str>,
    frequency_hz: f32,
    fingering: u8,
    octave: &'static str,
    sound: bool,
    sounding: bool,
}

impl From<&Status> for ResolveReport {
    fn from(status: &Status) -> Self {
        let r = &status.resolution;
        Self {
            note: r.note.map(|n| n.name),
            frequency_hz: r.frequency_hz(),
            fingering: r.fingering.value(),
            octave: r.octave.label(),
            sound: status.sound_enabled,
            sounding: status.is_sounding(),
        }
    }
}

pub fn run(args: &ResolveArgs) -> anyhow::Result<()> {
    let resolution = Resolver::standard().resolve_parts(args.valves, args.octave);
    let status = Status::new(resolution, !args.mute);
    tracing::debug!(valid = resolution.is_valid(), "resolved");

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&ResolveReport::from(&status))?
        );
        return Ok(());
    }

    println!("{status}");
    if args.screen {
        println!();
        println!("{}", status.screen());
    }
    Ok(())
}
