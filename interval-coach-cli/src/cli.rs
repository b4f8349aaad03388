// src/cli.rs
use clap::{Command, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "A guided interval timer for a fixed workout", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueKindCli {
    Bell,
    Command,
    Silent,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the workout plan and its estimated length
    Plan,
    /// Run the workout in this terminal (line mode)
    Run {
        /// Start with sound cues off, regardless of config
        #[arg(short, long)]
        mute: bool,
    },
    /// Show the path to the config file
    ConfigPath,
    /// Set whether sessions start with sound cues on
    SetSound {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Choose how the countdown cue is played
    SetCue {
        #[arg(value_enum)]
        kind: CueKindCli,
        /// Program and arguments to run for each cue (used with 'command')
        #[arg(long, num_args = 1.., allow_hyphen_values = true, value_name = "PROGRAM")]
        command: Option<Vec<String>>,
    },
    /// Set the accent color (e.g. Yellow, Cyan, DarkGreen)
    SetColor { color: String },
    /// Generate shell completion script
    GenerateCompletion {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Function to parse CLI arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

// Command structure for completion generation
pub fn build_cli_command() -> Command {
    Cli::command()
}
