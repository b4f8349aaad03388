// interval-coach-lib/src/cue.rs
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::process::{Child, Command, Stdio};
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to write cue to terminal: {0}")]
    Terminal(#[from] io::Error),
    #[error("Failed to spawn cue command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Cue command is empty.")]
    EmptyCommand,
}

/// Which player the app builds from config.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CueKind {
    #[default]
    Bell,
    Command,
    Silent,
}

/// Plays the short countdown cue. Callers treat failures as droppable.
pub trait CuePlayer {
    fn play_cue(&mut self) -> Result<(), Error>;
}

/// Rings the terminal bell on stdout.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl CuePlayer for TerminalBell {
    fn play_cue(&mut self) -> Result<(), Error> {
        let mut out = io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// Spawns an external program (e.g. `paplay beep.oga`) and does not wait for it.
#[derive(Debug)]
pub struct CommandCue {
    argv: Vec<String>,
    running: Vec<Child>,
}

impl CommandCue {
    /// # Errors
    /// Returns `Error::EmptyCommand` if `argv` has no program.
    pub fn new(argv: Vec<String>) -> Result<Self, Error> {
        if argv.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(Error::EmptyCommand);
        }
        Ok(Self {
            argv,
            running: Vec::new(),
        })
    }
}

impl CuePlayer for CommandCue {
    fn play_cue(&mut self) -> Result<(), Error> {
        // Reap finished cues so children don't pile up as zombies
        self.running
            .retain_mut(|child| matches!(child.try_wait(), Ok(None)));

        let (program, args) = self.argv.split_first().ok_or(Error::EmptyCommand)?;
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.clone(),
                source,
            })?;
        self.running.push(child);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play_cue(&mut self) -> Result<(), Error> {
        Ok(())
    }
}
