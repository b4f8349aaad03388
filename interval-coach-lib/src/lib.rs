// interval-coach-lib/src/lib.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

// --- Declare modules ---
mod clock;
mod config;
pub mod cue;
mod plan;
mod sequencer;

// --- Expose public types ---
pub use clock::TickClock;
pub use config::{
    get_config_path as get_config_path_util,
    get_log_path as get_log_path_util,
    load_config as load_config_util,
    parse_color,
    parse_cue_kind,
    save_config as save_config_util,
    Config,
    Error as ConfigError,
    DEFAULT_CUE_COMMAND,
    StandardColor,
    Theme,
};
pub use cue::{CommandCue, CueKind, CuePlayer, Error as CueError, Silent, TerminalBell};
pub use plan::{
    format_clock, Error as PlanError, Exercise, Section, WorkoutPlan, REST_DURATION_SECS,
};
pub use sequencer::{Phase, SequencerState, Snapshot, TickOutcome, WorkoutSequencer};

/// Holds configuration and the workout plan; hands out sequencers.
pub struct AppService {
    pub config: Config,
    pub config_path: PathBuf,
    pub plan: WorkoutPlan,
}

impl AppService {
    /// Loads (or creates) the config file and the built-in plan.
    /// # Errors
    /// Fails if the config directory cannot be determined or the file cannot be read/parsed.
    pub fn initialize() -> Result<Self> {
        let config_path =
            config::get_config_path().context("Failed to determine configuration file path")?;
        let config = config::load_config(&config_path)
            .with_context(|| format!("Failed to load config from {config_path:?}"))?;

        Ok(Self {
            config,
            config_path,
            plan: WorkoutPlan::builtin(),
        })
    }

    pub fn get_config_path(&self) -> &Path {
        &self.config_path
    }

    /// Saves the current configuration state.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn save_config(&self) -> Result<(), ConfigError> {
        config::save_config(&self.config_path, &self.config)
    }

    /// Sets whether new sessions start with sound on.
    /// # Errors
    /// Returns `ConfigError` if saving fails.
    pub fn set_sound_default(&mut self, enabled: bool) -> Result<(), ConfigError> {
        self.config.sound_enabled = enabled;
        self.save_config()
    }

    /// Chooses the cue player. `command` replaces the stored command when given.
    /// # Errors
    /// - `ConfigError::EmptyCueCommand` if `kind` is `Command` and no command would be set.
    /// - `ConfigError` variants if saving fails.
    pub fn set_cue(
        &mut self,
        kind: CueKind,
        command: Option<Vec<String>>,
    ) -> Result<(), ConfigError> {
        let new_command = command.unwrap_or_else(|| self.config.cue_command.clone());
        if kind == CueKind::Command && new_command.first().map_or(true, |p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyCueCommand);
        }
        self.config.cue = kind;
        self.config.cue_command = new_command;
        self.save_config()
    }

    /// Sets the accent color used by table headers and the TUI.
    /// # Errors
    /// - `ConfigError::InvalidColor` if the name is not a known color.
    /// - `ConfigError` variants if saving fails.
    pub fn set_accent_color(&mut self, color_name: &str) -> Result<StandardColor, ConfigError> {
        let color = parse_color(color_name.trim())?;
        self.config.theme.accent_color = format!("{color:?}");
        self.save_config()?;
        Ok(color)
    }

    /// Builds the cue player the config asks for. A broken command setup
    /// falls back to the terminal bell.
    pub fn build_cue_player(&self) -> Box<dyn CuePlayer + Send> {
        match self.config.cue {
            CueKind::Bell => Box::new(TerminalBell),
            CueKind::Silent => Box::new(Silent),
            CueKind::Command => match CommandCue::new(self.config.cue_command.clone()) {
                Ok(player) => Box::new(player),
                Err(e) => {
                    warn!("Invalid cue command ({e}), falling back to terminal bell");
                    Box::new(TerminalBell)
                }
            },
        }
    }

    /// A fresh sequencer over the plan using the configured cue player.
    pub fn new_sequencer(&self) -> WorkoutSequencer {
        self.new_sequencer_with_player(self.build_cue_player())
    }

    pub fn new_sequencer_with_player(
        &self,
        cue_player: Box<dyn CuePlayer + Send>,
    ) -> WorkoutSequencer {
        WorkoutSequencer::new(self.plan.clone(), cue_player, self.config.sound_enabled)
    }
}
