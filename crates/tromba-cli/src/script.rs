//! Fingering scripts.
//!
//! A script is a comma-separated list of steps, each held for a duration:
//!
//! ```text
//! valves/octave/ms[/on|off]
//! ```
//!
//! `valves` is `-` (or `0`) for open, otherwise the pressed valve numbers in
//! any order (`13`, `231`). `octave` is a selector label (`none`, `sw4` ..
//! `sw8`, case-insensitive). The optional sound field overrides the sound
//! switch for that step.
//!
//! ```text
//! -/none/250, 13/sw4/250, 0/sw5/500/off
//! ```

use std::fmt;

use tromba_core::{Octave, ValveState};

/// Errors from parsing fingerings and scripts.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScriptError {
    /// The script contained no steps.
    #[error("script is empty")]
    Empty,

    /// The valve field was not `-`, `0`, or a set of valve numbers.
    #[error("invalid valves '{0}' (expected '-' or digits 1-3, e.g. '13')")]
    InvalidValves(String),

    /// The octave field was not a selector label.
    #[error("invalid octave '{0}' (expected none, sw4, sw5, sw6, sw7 or sw8)")]
    InvalidOctave(String),

    /// The duration was not a positive integer.
    #[error("invalid duration '{0}' (expected milliseconds > 0)")]
    InvalidDuration(String),

    /// The sound field was not `on` or `off`.
    #[error("invalid sound switch '{0}' (expected on or off)")]
    InvalidSound(String),

    /// A required field was missing.
    #[error("missing {0}")]
    Missing(&'static str),

    /// Extra fields after the last recognised one.
    #[error("unexpected field '{0}'")]
    Unexpected(String),

    /// An error inside one step of a script.
    #[error("step {index}: {source}")]
    AtStep {
        /// One-based step number.
        index: usize,
        /// The underlying error.
        #[source]
        source: Box<ScriptError>,
    },
}

/// Valves, octave and an optional sound switch override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingering {
    /// Pressed valves.
    pub valves: ValveState,
    /// Selected octave.
    pub octave: Octave,
    /// Sound switch override.
    pub sound: Option<bool>,
}

impl Fingering {
    /// Sound switch state, falling back to `default` when not overridden.
    pub fn sound_or(&self, default: bool) -> bool {
        self.sound.unwrap_or(default)
    }
}

impl fmt::Display for Fingering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.valves.fingering(), self.octave)?;
        match self.sound {
            Some(true) => f.write_str("/on"),
            Some(false) => f.write_str("/off"),
            None => Ok(()),
        }
    }
}

/// One timed step of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// What is held.
    pub fingering: Fingering,
    /// How long it is held.
    pub duration_ms: u32,
}

/// Parses a valve field.
pub fn parse_valves(s: &str) -> Result<ValveState, ScriptError> {
    let s = s.trim();
    if s == "-" || s == "0" {
        return Ok(ValveState::OPEN);
    }
    if s.is_empty() {
        return Err(ScriptError::Missing("valves"));
    }

    let mut pressed = [false; 3];
    for c in s.chars() {
        let slot = match c {
            '1' => 0,
            '2' => 1,
            '3' => 2,
            _ => return Err(ScriptError::InvalidValves(s.to_string())),
        };
        if pressed[slot] {
            return Err(ScriptError::InvalidValves(s.to_string()));
        }
        pressed[slot] = true;
    }
    Ok(ValveState::new(pressed[0], pressed[1], pressed[2]))
}

/// Parses an octave label.
pub fn parse_octave(s: &str) -> Result<Octave, ScriptError> {
    let s = s.trim();
    Octave::from_label(s).ok_or_else(|| ScriptError::InvalidOctave(s.to_string()))
}

fn parse_sound(s: &str) -> Result<bool, ScriptError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(ScriptError::InvalidSound(s.trim().to_string())),
    }
}

fn parse_duration(s: &str) -> Result<u32, ScriptError> {
    let s = s.trim();
    match s.parse::<u32>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ScriptError::InvalidDuration(s.to_string())),
    }
}

/// Parses `valves[/octave][/on|off]`; the octave defaults to none.
pub fn parse_fingering(s: &str) -> Result<Fingering, ScriptError> {
    let mut fields = s.split('/');
    let valves = parse_valves(fields.next().unwrap_or_default())?;
    let octave = fields.next().map_or(Ok(Octave::None), parse_octave)?;
    let sound = fields.next().map(parse_sound).transpose()?;
    if let Some(extra) = fields.next() {
        return Err(ScriptError::Unexpected(extra.trim().to_string()));
    }
    Ok(Fingering {
        valves,
        octave,
        sound,
    })
}

/// Parses one `valves/octave/ms[/on|off]` step.
pub fn parse_step(s: &str) -> Result<Step, ScriptError> {
    let fields: Vec<&str> = s.split('/').collect();
    let (valves, octave, duration, sound) = match fields.as_slice() {
        [valves, octave, duration] => (valves, octave, duration, None),
        [valves, octave, duration, sound] => (valves, octave, duration, Some(sound)),
        [_, _, _, _, extra, ..] => return Err(ScriptError::Unexpected(extra.trim().to_string())),
        [_] => return Err(ScriptError::Missing("octave")),
        _ => return Err(ScriptError::Missing("duration")),
    };
    Ok(Step {
        fingering: Fingering {
            valves: parse_valves(valves)?,
            octave: parse_octave(octave)?,
            sound: sound.map(|s| parse_sound(s)).transpose()?,
        },
        duration_ms: parse_duration(duration)?,
    })
}

/// Parses a comma-separated script. Blank steps are skipped.
pub fn parse_script(s: &str) -> Result<Vec<Step>, ScriptError> {
    let steps = s
        .split(',')
        .map(str::trim)
        .filter(|step| !step.is_empty())
        .enumerate()
        .map(|(i, step)| {
            parse_step(step).map_err(|e| ScriptError::AtStep {
                index: i + 1,
                source: Box::new(e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if steps.is_empty() {
        return Err(ScriptError::Empty);
    }
    Ok(steps)
}

/// Total script length in milliseconds.
pub fn total_ms(steps: &[Step]) -> u64 {
    steps.iter().map(|s| u64::from(s.duration_ms)).sum()
}
