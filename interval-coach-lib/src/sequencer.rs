// interval-coach-lib/src/sequencer.rs
use crate::cue::CuePlayer;
use crate::plan::{Exercise, Section, WorkoutPlan, REST_DURATION_SECS};
use strum_macros::Display;
use tracing::{debug, info};

/// Seconds left at which a countdown cue is signalled.
const CUE_SECONDS: [u32; 3] = [3, 2, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Phase {
    Ready,
    Exercising,
    Resting,
    Complete,
}

impl Phase {
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Exercising | Self::Resting)
    }
}

/// Everything the sequencer mutates. Replaced field-by-field only inside
/// `WorkoutSequencer` methods, so each call leaves one consistent state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerState {
    pub phase: Phase,
    pub section_index: usize,
    pub exercise_index: usize,
    pub current_set: u32, // 1-based
    pub time_left: u32,
    pub paused: bool,
    pub sound_enabled: bool,
}

impl SequencerState {
    pub const fn initial(sound_enabled: bool) -> Self {
        Self {
            phase: Phase::Ready,
            section_index: 0,
            exercise_index: 0,
            current_set: 1,
            time_left: 0,
            paused: false,
            sound_enabled,
        }
    }
}

/// What a single `tick()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (ready, complete or paused).
    Idle,
    /// Countdown decremented. `cue` is true when a cue was sent to the player.
    Counted { cue: bool },
    /// Time had run out and the phase advanced.
    Advanced,
}

/// Read-only view of the sequencer for display surfaces.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub section_index: usize,
    pub exercise_index: usize,
    pub current_set: u32,
    pub time_left: u32,
    pub paused: bool,
    pub sound_enabled: bool,
    pub total_sections: usize,
    /// Length of the running phase; 0 outside Exercising/Resting.
    pub phase_duration: u32,
    pub progress_percent: f64,
    pub current_section: Option<&'a Section>,
    pub current_exercise: Option<&'a Exercise>,
}

impl Snapshot<'_> {
    /// Fraction of the current phase already elapsed, in `[0, 1]`.
    pub fn phase_fraction(&self) -> f64 {
        if self.phase_duration == 0 {
            return 0.0;
        }
        let elapsed = self.phase_duration.saturating_sub(self.time_left);
        f64::from(elapsed) / f64::from(self.phase_duration)
    }
}

pub struct WorkoutSequencer {
    plan: WorkoutPlan,
    state: SequencerState,
    cue_player: Box<dyn CuePlayer + Send>,
}

impl WorkoutSequencer {
    pub fn new(plan: WorkoutPlan, cue_player: Box<dyn CuePlayer + Send>, sound_enabled: bool) -> Self {
        Self {
            plan,
            state: SequencerState::initial(sound_enabled),
            cue_player,
        }
    }

    pub const fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub const fn state(&self) -> &SequencerState {
        &self.state
    }

    /// True while the clock should deliver ticks.
    pub const fn is_running(&self) -> bool {
        self.state.phase.is_active() && !self.state.paused
    }

    pub fn start(&mut self) {
        if self.state.phase != Phase::Ready {
            debug!("start() ignored in phase {}", self.state.phase);
            return;
        }
        self.state.phase = Phase::Exercising;
        self.state.section_index = 0;
        self.state.exercise_index = 0;
        self.state.current_set = 1;
        self.state.time_left = self.plan.first_exercise().duration_secs;
        info!("Workout started");
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        if self.state.time_left == 0 {
            self.advance_phase();
            return TickOutcome::Advanced;
        }

        self.state.time_left -= 1;
        let cue = CUE_SECONDS.contains(&self.state.time_left) && self.state.sound_enabled;
        if cue {
            self.signal_cue();
        }
        TickOutcome::Counted { cue }
    }

    pub fn toggle_pause(&mut self) {
        self.state.paused = !self.state.paused;
        debug!(paused = self.state.paused, "Pause toggled");
    }

    /// Ends the current phase immediately.
    pub fn skip(&mut self) {
        if self.state.phase.is_active() {
            self.advance_phase();
        }
    }

    pub fn reset(&mut self) {
        self.state = SequencerState::initial(self.state.sound_enabled);
        info!("Workout reset");
    }

    pub fn toggle_sound(&mut self) {
        self.state.sound_enabled = !self.state.sound_enabled;
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        let active = state.phase.is_active();
        let current_section = if active {
            self.plan.section(state.section_index)
        } else {
            None
        };
        let current_exercise = if active {
            self.plan.exercise(state.section_index, state.exercise_index)
        } else {
            None
        };
        let phase_duration = match state.phase {
            Phase::Exercising => current_exercise.map_or(0, |e| e.duration_secs),
            Phase::Resting => REST_DURATION_SECS,
            Phase::Ready | Phase::Complete => 0,
        };

        Snapshot {
            phase: state.phase,
            section_index: state.section_index,
            exercise_index: state.exercise_index,
            current_set: state.current_set,
            time_left: state.time_left,
            paused: state.paused,
            sound_enabled: state.sound_enabled,
            total_sections: self.plan.sections().len(),
            phase_duration,
            progress_percent: self.progress_percent(),
            current_section,
            current_exercise,
        }
    }

    /// Exercises after the current one in the same section, at most `count`.
    pub fn up_next(&self, count: usize) -> &[Exercise] {
        if !self.state.phase.is_active() {
            return &[];
        }
        let Some(section) = self.plan.section(self.state.section_index) else {
            return &[];
        };
        let start = (self.state.exercise_index + 1).min(section.exercises.len());
        let end = (start + count).min(section.exercises.len());
        &section.exercises[start..end]
    }

    // Coarse on purpose: weights the exercise index within a section and
    // ignores sets, so sections of different lengths give an uneven curve.
    fn progress_percent(&self) -> f64 {
        match self.state.phase {
            Phase::Ready => 0.0,
            Phase::Complete => 100.0,
            Phase::Exercising | Phase::Resting => {
                let total_sections = self.plan.sections().len();
                let exercises_in_section = self
                    .plan
                    .section(self.state.section_index)
                    .map_or(0, |s| s.exercises.len());
                if total_sections == 0 || exercises_in_section == 0 {
                    return 0.0;
                }
                let section_part = self.state.section_index as f64 * 100.0;
                let exercise_part =
                    self.state.exercise_index as f64 / exercises_in_section as f64 * 100.0;
                (section_part + exercise_part) / total_sections as f64
            }
        }
    }

    fn advance_phase(&mut self) {
        match self.state.phase {
            Phase::Exercising => self.finish_exercise_phase(),
            Phase::Resting => self.finish_rest_phase(),
            Phase::Ready | Phase::Complete => {}
        }
    }

    // Order matters: remaining sets, then remaining exercises, then sections.
    fn finish_exercise_phase(&mut self) {
        let state = &mut self.state;
        let Some(section) = self.plan.section(state.section_index) else {
            state.phase = Phase::Complete;
            state.time_left = 0;
            return;
        };
        let sets = section
            .exercises
            .get(state.exercise_index)
            .map_or(1, |e| e.sets);
        let last_exercise = section.exercises.len().saturating_sub(1);
        let last_section = self.plan.sections().len().saturating_sub(1);

        if state.current_set < sets {
            state.current_set += 1;
        } else if state.exercise_index < last_exercise {
            state.exercise_index += 1;
            state.current_set = 1;
        } else if state.section_index < last_section {
            state.section_index += 1;
            state.exercise_index = 0;
            state.current_set = 1;
        } else {
            state.phase = Phase::Complete;
            state.time_left = 0;
            info!("Workout complete");
            return;
        }

        state.phase = Phase::Resting;
        state.time_left = REST_DURATION_SECS;
        debug!(
            section = state.section_index,
            exercise = state.exercise_index,
            set = state.current_set,
            "Resting"
        );
    }

    fn finish_rest_phase(&mut self) {
        match self
            .plan
            .exercise(self.state.section_index, self.state.exercise_index)
        {
            Some(exercise) => {
                self.state.phase = Phase::Exercising;
                self.state.time_left = exercise.duration_secs;
                debug!(exercise = %exercise.name, set = self.state.current_set, "Exercising");
            }
            None => {
                self.state.phase = Phase::Complete;
                self.state.time_left = 0;
            }
        }
    }

    // Fire-and-forget: a failed cue is dropped.
    fn signal_cue(&mut self) {
        if let Err(e) = self.cue_player.play_cue() {
            debug!("Sound cue dropped: {e}");
        }
    }
}
