// src/runner.rs
// Line-mode display surface: stdin commands in, one status line out.
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::io::{stdin, stdout, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use interval_coach_lib::{
    format_clock, AppService, Phase, Snapshot, TickClock, TickOutcome, WorkoutSequencer,
};

// Wake-up interval while the clock is disarmed
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCommand {
    StartOrPause,
    Pause,
    Skip,
    Reset,
    Sound,
    Help,
    Quit,
    Unknown,
}

pub fn parse_command(line: &str) -> RunCommand {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "start" => RunCommand::StartOrPause,
        "p" | "pause" | "resume" => RunCommand::Pause,
        "s" | "n" | "skip" => RunCommand::Skip,
        "r" | "reset" => RunCommand::Reset,
        "m" | "sound" | "mute" => RunCommand::Sound,
        "?" | "h" | "help" => RunCommand::Help,
        "q" | "quit" | "exit" => RunCommand::Quit,
        _ => RunCommand::Unknown,
    }
}

fn print_help() {
    println!();
    println!("  Enter  start / pause / resume");
    println!("  p      pause / resume");
    println!("  s      skip the rest of this phase");
    println!("  r      reset the workout");
    println!("  m      sound cues on/off");
    println!("  q      quit");
}

// Forwards stdin lines so the main loop stays the only writer
fn spawn_input_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// One status line for the active phase.
pub fn status_line(snapshot: &Snapshot<'_>) -> String {
    let section = snapshot.current_section.map_or("", |s| s.name.as_str());
    let exercise = snapshot.current_exercise;
    let name = exercise.map_or("", |e| e.name.as_str());
    let mut line = match snapshot.phase {
        Phase::Exercising => {
            let icon = exercise.and_then(|e| e.icon.as_deref()).unwrap_or("");
            let mut text = format!("{section} | {icon} {name}");
            if let Some(e) = exercise {
                if e.sets > 1 {
                    text.push_str(&format!(" (set {} of {})", snapshot.current_set, e.sets));
                }
                if let Some(reps) = &e.reps {
                    text.push_str(&format!(" x {reps}"));
                }
            }
            text
        }
        Phase::Resting => format!("{section} | REST - get ready for: {name}"),
        Phase::Ready => "Ready".to_string(),
        Phase::Complete => "Complete".to_string(),
    };
    line.push_str(&format!(
        "  {}  [{:>3.0}%]",
        format_clock(snapshot.time_left),
        snapshot.progress_percent
    ));
    if snapshot.paused {
        line.push_str("  PAUSED");
    }
    if !snapshot.sound_enabled {
        line.push_str("  (muted)");
    }
    line
}

fn redraw(sequencer: &WorkoutSequencer) {
    let snapshot = sequencer.snapshot();
    if snapshot.phase.is_active() {
        print!("\r\x1b[2K{}", status_line(&snapshot));
        let _ = stdout().flush();
    }
}

fn print_ready(service: &AppService) {
    println!("Today's workout:");
    for section in service.plan.sections() {
        println!("  {} ({})", section.name, section.duration_label);
        for exercise in &section.exercises {
            println!("    {}", exercise.summary());
        }
    }
    println!("Press Enter to start, '?' for keys.");
}

fn print_complete(started_at: Option<DateTime<Local>>) {
    println!();
    println!("Workout complete! Great job!");
    if let Some(started) = started_at {
        let elapsed = Local::now().signed_duration_since(started);
        println!(
            "Started {}, finished in {}.",
            started.format("%H:%M"),
            format_clock(u32::try_from(elapsed.num_seconds().max(0)).unwrap_or(u32::MAX))
        );
    }
    println!("Press 'r' to start over or 'q' to quit.");
}

/// Runs the workout until the user quits or stdin closes outside a workout.
pub fn run_workout(service: &AppService, mute: bool) -> Result<()> {
    let mut sequencer = service.new_sequencer();
    if mute && sequencer.state().sound_enabled {
        sequencer.toggle_sound();
    }
    let mut clock = TickClock::new();
    let input = spawn_input_reader();
    let mut input_open = true;
    let mut started_at: Option<DateTime<Local>> = None;
    let mut last_phase = Phase::Ready;

    print_ready(service);

    loop {
        let timeout = clock
            .time_until_next(Instant::now())
            .unwrap_or(IDLE_POLL);

        let command = if input_open {
            match input.recv_timeout(timeout) {
                Ok(line) => Some(parse_command(&line)),
                Err(RecvTimeoutError::Timeout) => None,
                Err(RecvTimeoutError::Disconnected) => {
                    debug!("stdin closed");
                    input_open = false;
                    None
                }
            }
        } else {
            if !sequencer.is_running() {
                break; // Nothing left that could change state
            }
            thread::sleep(timeout);
            None
        };

        match command {
            Some(RunCommand::StartOrPause) => {
                if sequencer.state().phase == Phase::Ready {
                    sequencer.start();
                    started_at = Some(Local::now());
                } else if sequencer.state().phase.is_active() {
                    sequencer.toggle_pause();
                }
            }
            Some(RunCommand::Pause) if sequencer.state().phase.is_active() => {
                sequencer.toggle_pause();
            }
            Some(RunCommand::Skip) => sequencer.skip(),
            Some(RunCommand::Reset) => {
                sequencer.reset();
                started_at = None;
                println!();
                print_ready(service);
            }
            Some(RunCommand::Sound) => {
                sequencer.toggle_sound();
                info!(sound = sequencer.state().sound_enabled, "Sound toggled");
            }
            Some(RunCommand::Help) => print_help(),
            Some(RunCommand::Quit) => break,
            Some(RunCommand::Unknown) => println!("Unknown command, '?' for help."),
            Some(RunCommand::Pause) | None => {}
        }

        for outcome in clock.poll(&mut sequencer, Instant::now()) {
            if outcome == TickOutcome::Advanced {
                debug!(phase = %sequencer.state().phase, "Phase advanced");
            }
        }

        let phase = sequencer.state().phase;
        if phase != last_phase {
            if phase.is_active() {
                println!();
            }
            if phase == Phase::Complete {
                print_complete(started_at);
            }
            last_phase = phase;
        }
        redraw(&sequencer);
    }

    println!();
    stdout().flush().context("Failed to flush terminal")?;
    Ok(())
}
