//src/main.rs
use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use std::io::stdout;
use tracing_subscriber::EnvFilter;

use interval_coach_cli::{cli, runner};
use interval_coach_lib::{format_clock, AppService, CueKind, WorkoutPlan};

fn main() -> Result<()> {
    // --- Check for completion generation request FIRST ---
    let cli_args = cli::parse_args(); // Parse arguments once

    if let cli::Commands::GenerateCompletion { shell } = cli_args.command {
        let mut cmd = cli::build_cli_command(); // Get the command structure
        let bin_name = cmd.get_name().to_string(); // Get the binary name

        eprintln!("Generating completion script for {shell}..."); // Print to stderr
        clap_complete::generate(shell, &mut cmd, bin_name, &mut stdout()); // Print script to stdout
        return Ok(()); // Exit after generating script
    }

    // Initialize the application service (loads config)
    let mut service = AppService::initialize().context("Failed to initialize application service")?;
    init_tracing(&service.config.log_level);

    match cli_args.command {
        cli::Commands::GenerateCompletion { .. } => {
            unreachable!("Completion generation should have exited already");
        }
        cli::Commands::Plan => print_plan_table(&service.plan, header_color(&service)),
        cli::Commands::Run { mute } => runner::run_workout(&service, mute)?,
        cli::Commands::ConfigPath => println!("{}", service.get_config_path().display()),
        cli::Commands::SetSound { state } => {
            let enabled = state == cli::Toggle::On;
            match service.set_sound_default(enabled) {
                Ok(()) => println!(
                    "Sound cues will be {} when a workout starts.",
                    if enabled { "on" } else { "off" }
                ),
                Err(e) => bail!("Error saving sound setting: {}", e),
            }
        }
        cli::Commands::SetCue { kind, command } => {
            let kind = cli_kind_to_lib_kind(kind);
            match service.set_cue(kind, command) {
                Ok(()) => {
                    println!("Countdown cue set to '{kind}'.");
                    if kind == CueKind::Command {
                        println!("Command: {}", service.config.cue_command.join(" "));
                    }
                }
                Err(e) => bail!("Error setting cue: {}", e),
            }
        }
        cli::Commands::SetColor { color } => match service.set_accent_color(&color) {
            Ok(parsed) => println!("Accent color set to {parsed:?}."),
            Err(e) => bail!("Error setting color: {}", e),
        },
    }

    Ok(())
}

// RUST_LOG wins over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "interval_coach_lib={log_level},interval_coach_cli={log_level},ic={log_level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

const fn cli_kind_to_lib_kind(kind: cli::CueKindCli) -> CueKind {
    match kind {
        cli::CueKindCli::Bell => CueKind::Bell,
        cli::CueKindCli::Command => CueKind::Command,
        cli::CueKindCli::Silent => CueKind::Silent,
    }
}

fn header_color(service: &AppService) -> Color {
    Color::from(service.config.theme.accent())
}

fn print_plan_table(plan: &WorkoutPlan, header_color: Color) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Section").fg(header_color),
            Cell::new("Exercise").fg(header_color),
            Cell::new("Time / Set").fg(header_color),
            Cell::new("Sets").fg(header_color),
            Cell::new("Reps").fg(header_color),
        ]);

    for section in plan.sections() {
        for (i, exercise) in section.exercises.iter().enumerate() {
            let section_cell = if i == 0 {
                format!("{} ({})", section.name, section.duration_label)
            } else {
                String::new()
            };
            table.add_row(vec![
                Cell::new(section_cell),
                Cell::new(format!(
                    "{} {}",
                    exercise.icon.as_deref().unwrap_or(" "),
                    exercise.name
                )),
                Cell::new(format_clock(exercise.duration_secs)),
                Cell::new(exercise.sets.to_string()),
                Cell::new(exercise.reps.as_deref().unwrap_or("-")),
            ]);
        }
    }

    println!("{table}");
    println!(
        "Estimated total: {} (including rests)",
        format_clock(u32::try_from(plan.total_seconds()).unwrap_or(u32::MAX))
    );
}
