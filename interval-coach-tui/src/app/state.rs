// interval-coach-tui/src/app/state.rs
use chrono::{DateTime, Local};
use ratatui::style::Color;
use std::time::{Duration, Instant};
use interval_coach_lib::{AppService, Phase, StandardColor, TickClock, TickOutcome, WorkoutSequencer};
use tracing::debug;

const ERROR_DISPLAY_TIME: Duration = Duration::from_secs(5);

// Represents the state of active modals
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveModal {
    None,
    Help,
    ConfirmReset,
}

// Holds the application state
pub struct App {
    pub service: AppService, // Config and plan from the library
    pub sequencer: WorkoutSequencer,
    pub clock: TickClock,
    pub should_quit: bool,
    pub active_modal: ActiveModal,
    pub last_error: Option<String>, // To display errors
    pub accent: Color,

    pub started_at: Option<DateTime<Local>>,
    pub finished_at: Option<DateTime<Local>>,

    // For debouncing error messages
    error_clear_time: Option<Instant>,
}

impl App {
    pub fn new(service: AppService) -> Self {
        let sequencer = service.new_sequencer();
        let accent = to_ratatui_color(service.config.theme.accent());
        Self {
            service,
            sequencer,
            clock: TickClock::new(),
            should_quit: false,
            active_modal: ActiveModal::None,
            last_error: None,
            accent,
            started_at: None,
            finished_at: None,
            error_clear_time: None,
        }
    }

    /// Delivers due clock ticks and expires old errors. Called every loop turn.
    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now());
    }

    pub fn on_tick_at(&mut self, now: Instant) {
        // Clear error message after a delay
        if let Some(clear_time) = self.error_clear_time {
            if now >= clear_time {
                self.last_error = None;
                self.error_clear_time = None;
            }
        }

        let outcomes = self.clock.poll(&mut self.sequencer, now);
        if outcomes.contains(&TickOutcome::Advanced) {
            debug!(phase = %self.sequencer.state().phase, "Phase advanced");
        }
        self.note_completion();
    }

    pub(crate) fn note_completion(&mut self) {
        if self.sequencer.state().phase == Phase::Complete && self.finished_at.is_none() {
            self.finished_at = Some(Local::now());
        }
    }

    pub(crate) fn set_error(&mut self, msg: String) {
        self.last_error = Some(msg);
        self.error_clear_time = Some(Instant::now() + ERROR_DISPLAY_TIME);
    }
}

// Helper to convert the configured color into a ratatui color
pub const fn to_ratatui_color(color: StandardColor) -> Color {
    match color {
        StandardColor::Black => Color::Black,
        StandardColor::Red => Color::LightRed,
        StandardColor::Green => Color::LightGreen,
        StandardColor::Yellow => Color::Yellow,
        StandardColor::Blue => Color::LightBlue,
        StandardColor::Magenta => Color::LightMagenta,
        StandardColor::Cyan => Color::LightCyan,
        StandardColor::White => Color::White,
        StandardColor::DarkGrey => Color::DarkGray,
        StandardColor::DarkRed => Color::Red,
        StandardColor::DarkGreen => Color::Green,
        StandardColor::DarkYellow => Color::Rgb(175, 135, 0),
        StandardColor::DarkBlue => Color::Blue,
        StandardColor::DarkMagenta => Color::Magenta,
        StandardColor::DarkCyan => Color::Cyan,
        StandardColor::Grey => Color::Gray,
    }
}
