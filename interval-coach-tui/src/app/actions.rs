// interval-coach-tui/src/app/actions.rs
use super::state::{ActiveModal, App};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use interval_coach_lib::Phase;
use std::time::Instant;
use tracing::info;

// Make handle_key_event a method on App
impl App {
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        // Handle based on active modal first
        if self.active_modal != ActiveModal::None {
            self.handle_modal_input(key);
            return Ok(());
        }

        let phase = self.sequencer.state().phase;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.active_modal = ActiveModal::Help,
            KeyCode::Char('m') => {
                self.sequencer.toggle_sound();
                info!(sound = self.sequencer.state().sound_enabled, "Sound toggled");
            }
            KeyCode::Char(' ') | KeyCode::Enter => match phase {
                Phase::Ready => self.start_workout(),
                Phase::Exercising | Phase::Resting => self.sequencer.toggle_pause(),
                Phase::Complete => self.reset_workout(),
            },
            KeyCode::Char('p') if phase.is_active() => self.sequencer.toggle_pause(),
            KeyCode::Char('s') | KeyCode::Char('n') => {
                if phase.is_active() {
                    self.sequencer.skip();
                } else {
                    self.set_error("Nothing to skip".to_string());
                }
            }
            KeyCode::Char('r') => {
                if phase.is_active() {
                    // Mid-workout resets lose progress, so ask first
                    self.active_modal = ActiveModal::ConfirmReset;
                } else {
                    self.reset_workout();
                }
            }
            _ => {}
        }

        // Arm or disarm the clock right away so the first tick is a full second out
        self.clock.poll(&mut self.sequencer, Instant::now());
        self.note_completion();
        Ok(())
    }

    fn handle_modal_input(&mut self, key: KeyEvent) {
        match self.active_modal {
            ActiveModal::Help => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
                    self.active_modal = ActiveModal::None;
                }
                _ => {} // Ignore other keys in help
            },
            ActiveModal::ConfirmReset => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.active_modal = ActiveModal::None;
                    self.reset_workout();
                }
                KeyCode::Char('n') | KeyCode::Esc => self.active_modal = ActiveModal::None,
                _ => {}
            },
            ActiveModal::None => {}
        }
    }

    fn start_workout(&mut self) {
        self.sequencer.start();
        self.started_at = Some(Local::now());
        self.finished_at = None;
    }

    fn reset_workout(&mut self) {
        self.sequencer.reset();
        self.started_at = None;
        self.finished_at = None;
        info!("Workout reset from TUI");
    }
}
