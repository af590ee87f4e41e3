//! Note chart listing command.

use clap::Args;
use serde::Serialize;
use tromba_core::{NoteChart, NoteEntry, Octave};
use tromba_platform::ValveGlyphs;

use crate::script::parse_octave;

#[derive(Args)]
pub struct ChartArgs {
    /// Only list one octave range (none, sw4 .. sw8)
    #[arg(short, long, value_parser = parse_octave)]
    octave: Option<Octave>,

    /// Print the chart as JSON
    #[arg(long)]
    json: bool,
}

/// JSON row for one chart entry.
#[derive(Serialize)]
struct ChartRow {
    note: &'static str,
    fingering: u8,
    valves: String,
    octave: &'static str,
    frequency_hz: f32,
}

impl From<&NoteEntry> for ChartRow {
    fn from(entry: &NoteEntry) -> Self {
        Self {
            note: entry.name,
            fingering: entry.fingering.value(),
            valves: ValveGlyphs(entry.fingering.valves()).to_string(),
            octave: entry.octave.label(),
            frequency_hz: entry.frequency_hz,
        }
    }
}

/// Entries of `octave`, lowest pitch first.
fn sorted(chart: &NoteChart, octave: Octave) -> Vec<&'static NoteEntry> {
    let mut entries: Vec<_> = chart.in_octave(octave).collect();
    entries.sort_by(|a, b| a.frequency_hz.total_cmp(&b.frequency_hz));
    entries
}

pub fn run(args: &ChartArgs) -> anyhow::Result<()> {
    let chart = NoteChart::standard();
    let octaves: Vec<Octave> = match args.octave {
        Some(octave) => vec![octave],
        None => Octave::ALL.to_vec(),
    };

    if args.json {
        let rows: Vec<ChartRow> = octaves
            .iter()
            .flat_map(|&octave| sorted(&chart, octave))
            .map(ChartRow::from)
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Note Chart");
    println!("==========\n");

    for octave in octaves {
        match chart.range(octave) {
            Some(range) => println!(
                "{} ({} - {})",
                octave, range.lowest.name, range.highest.name
            ),
            None => println!("{octave} (no notes)"),
        }
        for entry in sorted(&chart, octave) {
            println!(
                "  {:<4} {} [{:>3}]  {:>7.1} Hz",
                entry.name,
                ValveGlyphs(entry.fingering.valves()),
                entry.fingering.value(),
                entry.frequency_hz
            );
        }
        println!();
    }

    if let Some((low, high)) = chart.frequency_bounds() {
        println!("{} notes, {low:.1} Hz to {high:.1} Hz", chart.len());
    }

    Ok(())
}
