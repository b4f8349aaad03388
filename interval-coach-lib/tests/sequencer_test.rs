use anyhow::Result;
use interval_coach_lib::{
    CueError, CuePlayer, Exercise, Phase, Section, SequencerState, TickClock, TickOutcome,
    WorkoutPlan, WorkoutSequencer, REST_DURATION_SECS,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

// Counts every cue it is asked to play
struct RecordingCue {
    played: Arc<AtomicUsize>,
}

impl CuePlayer for RecordingCue {
    fn play_cue(&mut self) -> Result<(), CueError> {
        self.played.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// Always fails, like a busy audio device
struct FailingCue {
    attempts: Arc<AtomicUsize>,
}

impl CuePlayer for FailingCue {
    fn play_cue(&mut self) -> Result<(), CueError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(CueError::EmptyCommand)
    }
}

fn single_exercise_plan(duration_secs: u32, sets: u32) -> Result<WorkoutPlan> {
    Ok(WorkoutPlan::new(vec![Section::new(
        "ONLY",
        "1 Minute",
        vec![Exercise::new("Burpees", duration_secs).with_sets(sets)],
    )])?)
}

fn two_by_two_plan() -> Result<WorkoutPlan> {
    Ok(WorkoutPlan::new(vec![
        Section::new(
            "A",
            "1 Minute",
            vec![Exercise::new("A1", 20), Exercise::new("A2", 25)],
        ),
        Section::new(
            "B",
            "1 Minute",
            vec![Exercise::new("B1", 30), Exercise::new("B2", 35)],
        ),
    ])?)
}

// Helper to build a sequencer with sound on and a recording cue player
fn create_test_sequencer(plan: WorkoutPlan) -> (WorkoutSequencer, Arc<AtomicUsize>) {
    let played = Arc::new(AtomicUsize::new(0));
    let player = RecordingCue {
        played: Arc::clone(&played),
    };
    (WorkoutSequencer::new(plan, Box::new(player), true), played)
}

fn tick_n(sequencer: &mut WorkoutSequencer, n: u32) {
    for _ in 0..n {
        sequencer.tick();
    }
}

fn assert_position(sequencer: &WorkoutSequencer, phase: Phase, set: u32, time_left: u32) {
    let state = sequencer.state();
    assert_eq!(state.phase, phase);
    assert_eq!(state.current_set, set);
    assert_eq!(state.time_left, time_left);
}

#[test]
fn test_new_sequencer_is_ready() -> Result<()> {
    let (sequencer, _) = create_test_sequencer(single_exercise_plan(10, 1)?);
    assert_eq!(sequencer.state(), &SequencerState::initial(true));
    assert!(!sequencer.is_running());
    Ok(())
}

#[test]
fn test_start_loads_first_exercise() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(two_by_two_plan()?);
    sequencer.start();

    let snapshot = sequencer.snapshot();
    assert_eq!(snapshot.phase, Phase::Exercising);
    assert_eq!(snapshot.time_left, 20);
    assert_eq!(snapshot.phase_duration, 20);
    assert_eq!(snapshot.current_exercise.map(|e| e.name.as_str()), Some("A1"));
    assert_eq!(snapshot.current_section.map(|s| s.name.as_str()), Some("A"));
    assert!(sequencer.is_running());
    Ok(())
}

#[test]
fn test_start_outside_ready_is_ignored() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(two_by_two_plan()?);
    sequencer.start();
    tick_n(&mut sequencer, 5);
    sequencer.skip(); // Resting before A2

    let before = sequencer.state().clone();
    sequencer.start();
    assert_eq!(sequencer.state(), &before);
    Ok(())
}

#[test]
fn test_tick_in_ready_is_idle() -> Result<()> {
    let (mut sequencer, played) = create_test_sequencer(single_exercise_plan(10, 1)?);
    assert_eq!(sequencer.tick(), TickOutcome::Idle);
    sequencer.skip();
    assert_eq!(sequencer.state(), &SequencerState::initial(true));
    assert_eq!(played.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn test_final_set_goes_straight_to_complete() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(single_exercise_plan(10, 2)?);
    sequencer.start();
    assert_position(&sequencer, Phase::Exercising, 1, 10);

    tick_n(&mut sequencer, 10);
    assert_position(&sequencer, Phase::Exercising, 1, 0);
    assert_eq!(sequencer.tick(), TickOutcome::Advanced);
    assert_position(&sequencer, Phase::Resting, 2, REST_DURATION_SECS);

    tick_n(&mut sequencer, 15);
    assert_eq!(sequencer.tick(), TickOutcome::Advanced);
    assert_position(&sequencer, Phase::Exercising, 2, 10);

    tick_n(&mut sequencer, 10);
    assert_eq!(sequencer.tick(), TickOutcome::Advanced);
    assert_position(&sequencer, Phase::Complete, 2, 0);

    // Complete is terminal
    assert_eq!(sequencer.tick(), TickOutcome::Idle);
    sequencer.skip();
    sequencer.start();
    assert_eq!(sequencer.state().phase, Phase::Complete);
    Ok(())
}

#[test]
fn test_advance_moves_to_next_exercise_then_section() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(two_by_two_plan()?);
    sequencer.start();

    sequencer.skip();
    let state = sequencer.state();
    assert_eq!(
        (state.phase, state.section_index, state.exercise_index, state.current_set),
        (Phase::Resting, 0, 1, 1)
    );

    sequencer.skip();
    assert_position(&sequencer, Phase::Exercising, 1, 25);

    sequencer.skip();
    let state = sequencer.state();
    assert_eq!(
        (state.phase, state.section_index, state.exercise_index),
        (Phase::Resting, 1, 0)
    );

    sequencer.skip();
    assert_position(&sequencer, Phase::Exercising, 1, 30);
    Ok(())
}

#[test]
fn test_cues_fire_on_last_three_seconds() -> Result<()> {
    let (mut sequencer, played) = create_test_sequencer(single_exercise_plan(10, 1)?);
    sequencer.start();

    let mut cue_times = Vec::new();
    for _ in 0..10 {
        if let TickOutcome::Counted { cue: true } = sequencer.tick() {
            cue_times.push(sequencer.state().time_left);
        }
    }
    assert_eq!(cue_times, vec![3, 2, 1]);
    assert_eq!(played.load(Ordering::SeqCst), 3);

    // Advancing from zero never cues
    sequencer.tick();
    assert_eq!(played.load(Ordering::SeqCst), 3);
    Ok(())
}

#[test]
fn test_cues_cover_every_phase() -> Result<()> {
    let (mut sequencer, played) = create_test_sequencer(single_exercise_plan(10, 2)?);
    sequencer.start();
    while sequencer.state().phase != Phase::Complete {
        sequencer.tick();
    }
    // Exercise, rest, exercise
    assert_eq!(played.load(Ordering::SeqCst), 9);
    Ok(())
}

#[test]
fn test_no_cues_while_paused() -> Result<()> {
    let (mut sequencer, played) = create_test_sequencer(single_exercise_plan(4, 1)?);
    sequencer.start();
    sequencer.toggle_pause();

    for _ in 0..20 {
        assert_eq!(sequencer.tick(), TickOutcome::Idle);
    }
    assert_eq!(sequencer.state().time_left, 4);
    assert_eq!(played.load(Ordering::SeqCst), 0);

    sequencer.toggle_pause();
    tick_n(&mut sequencer, 4);
    assert_eq!(played.load(Ordering::SeqCst), 3);
    Ok(())
}

#[test]
fn test_no_cues_when_sound_disabled() -> Result<()> {
    let (mut sequencer, played) = create_test_sequencer(single_exercise_plan(5, 1)?);
    sequencer.toggle_sound();
    sequencer.start();

    for _ in 0..5 {
        assert!(matches!(sequencer.tick(), TickOutcome::Counted { cue: false }));
    }
    assert_eq!(played.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn test_failing_cue_is_swallowed() -> Result<()> {
    let attempts = Arc::new(AtomicUsize::new(0));
    let player = FailingCue {
        attempts: Arc::clone(&attempts),
    };
    let mut sequencer = WorkoutSequencer::new(single_exercise_plan(5, 1)?, Box::new(player), true);
    sequencer.start();

    tick_n(&mut sequencer, 5);
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_position(&sequencer, Phase::Exercising, 1, 0);
    Ok(())
}

#[test]
fn test_skip_rest_uses_exercise_duration() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(single_exercise_plan(40, 3)?);
    sequencer.start();
    sequencer.skip();
    assert_position(&sequencer, Phase::Resting, 2, 15);

    sequencer.skip();
    assert_position(&sequencer, Phase::Exercising, 2, 40);
    Ok(())
}

#[test]
fn test_toggle_pause_twice_changes_nothing() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(two_by_two_plan()?);
    sequencer.start();
    tick_n(&mut sequencer, 7);

    let before = sequencer.state().clone();
    sequencer.toggle_pause();
    assert!(sequencer.state().paused);
    assert!(!sequencer.is_running());
    sequencer.toggle_pause();
    assert_eq!(sequencer.state(), &before);
    Ok(())
}

#[test]
fn test_toggle_sound_only_touches_sound() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(two_by_two_plan()?);
    sequencer.start();
    let before = sequencer.state().clone();

    sequencer.toggle_sound();
    let after = sequencer.state();
    assert!(!after.sound_enabled);
    assert_eq!(
        SequencerState {
            sound_enabled: true,
            ..after.clone()
        },
        before
    );
    Ok(())
}

#[test]
fn test_reset_restores_initial_state_but_keeps_sound() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(two_by_two_plan()?);
    sequencer.toggle_sound();
    sequencer.start();
    tick_n(&mut sequencer, 3);
    sequencer.skip();
    sequencer.skip();
    sequencer.toggle_pause();

    sequencer.reset();
    assert_eq!(sequencer.state(), &SequencerState::initial(false));

    // Works from Complete too
    sequencer.start();
    while sequencer.state().phase != Phase::Complete {
        sequencer.skip();
    }
    sequencer.reset();
    assert_eq!(sequencer.state(), &SequencerState::initial(false));
    Ok(())
}

#[test]
fn test_progress_percent() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(two_by_two_plan()?);
    assert_eq!(sequencer.snapshot().progress_percent, 0.0);

    sequencer.start();
    let mut seen = vec![sequencer.snapshot().progress_percent];
    while sequencer.state().phase != Phase::Complete {
        sequencer.skip();
        seen.push(sequencer.snapshot().progress_percent);
    }

    // (section, exercise): (0,0) (0,1) (0,1) (1,0) (1,0) (1,1) (1,1) then complete
    let expected = [0.0, 25.0, 25.0, 50.0, 50.0, 75.0, 75.0, 100.0];
    assert_eq!(seen.len(), expected.len());
    for (got, want) in seen.iter().zip(expected) {
        assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
    }
    Ok(())
}

#[test]
fn test_snapshot_lookups_absent_outside_workout() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(single_exercise_plan(5, 1)?);
    let snapshot = sequencer.snapshot();
    assert!(snapshot.current_section.is_none());
    assert!(snapshot.current_exercise.is_none());
    assert_eq!(snapshot.phase_fraction(), 0.0);

    sequencer.start();
    sequencer.skip();
    assert_eq!(sequencer.state().phase, Phase::Complete);
    let snapshot = sequencer.snapshot();
    assert!(snapshot.current_section.is_none());
    assert!(snapshot.current_exercise.is_none());
    assert_eq!(snapshot.phase_duration, 0);
    Ok(())
}

#[test]
fn test_builtin_walkthrough_keeps_invariants() {
    let (mut sequencer, _) = create_test_sequencer(WorkoutPlan::builtin());
    sequencer.start();

    let mut skips = 0;
    let mut last_exercise = (0, 0);
    while sequencer.state().phase != Phase::Complete {
        let snapshot = sequencer.snapshot();
        let exercise = snapshot
            .current_exercise
            .expect("cursor must point at an exercise while active");
        assert!(snapshot.current_section.is_some());
        assert!(snapshot.current_set >= 1 && snapshot.current_set <= exercise.sets);
        assert!(snapshot.time_left <= snapshot.phase_duration);
        assert!(snapshot.progress_percent >= 0.0 && snapshot.progress_percent < 100.0);

        let position = (snapshot.section_index, snapshot.exercise_index);
        if position != last_exercise {
            assert_eq!(snapshot.current_set, 1);
            last_exercise = position;
        }

        sequencer.skip();
        skips += 1;
    }
    // 20 exercise phases separated by 19 rests
    assert_eq!(skips, 39);
}

#[test]
fn test_time_left_never_exceeds_phase_duration_while_ticking() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(two_by_two_plan()?);
    sequencer.start();
    while sequencer.state().phase != Phase::Complete {
        sequencer.tick();
        let snapshot = sequencer.snapshot();
        assert!(snapshot.time_left <= snapshot.phase_duration);
        assert!((0.0..=1.0).contains(&snapshot.phase_fraction()));
    }
    Ok(())
}

#[test]
fn test_up_next_lists_rest_of_section() {
    let (mut sequencer, _) = create_test_sequencer(WorkoutPlan::builtin());
    assert!(sequencer.up_next(2).is_empty());

    sequencer.start();
    let names: Vec<&str> = sequencer.up_next(2).iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["High Knees", "Butt Kicks"]);

    // Move to the last warm-up exercise
    for _ in 0..10 {
        sequencer.skip();
    }
    assert_eq!(sequencer.state().exercise_index, 5);
    assert!(sequencer.up_next(2).is_empty());
}

#[test]
fn test_clock_delivers_ticks_only_while_running() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(single_exercise_plan(100, 1)?);
    let mut clock = TickClock::new();
    let t0 = Instant::now();

    assert!(clock.poll(&mut sequencer, t0 + Duration::from_secs(5)).is_empty());
    assert!(!clock.is_armed());

    sequencer.start();
    assert!(clock.poll(&mut sequencer, t0).is_empty());
    assert_eq!(clock.time_until_next(t0), Some(Duration::from_secs(1)));

    assert_eq!(clock.poll(&mut sequencer, t0 + Duration::from_secs(1)).len(), 1);
    assert_eq!(
        clock.poll(&mut sequencer, t0 + Duration::from_millis(3500)).len(),
        2
    );
    assert_eq!(sequencer.state().time_left, 97);

    sequencer.toggle_pause();
    assert!(clock
        .poll(&mut sequencer, t0 + Duration::from_secs(10))
        .is_empty());
    assert!(!clock.is_armed());
    assert_eq!(sequencer.state().time_left, 97);

    // Resuming waits a full interval
    sequencer.toggle_pause();
    let resumed = t0 + Duration::from_secs(20);
    assert!(clock.poll(&mut sequencer, resumed).is_empty());
    assert_eq!(
        clock.poll(&mut sequencer, resumed + Duration::from_secs(1)).len(),
        1
    );
    assert_eq!(sequencer.state().time_left, 96);
    Ok(())
}

#[test]
fn test_clock_limits_catch_up() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(single_exercise_plan(100, 1)?);
    let mut clock = TickClock::new();
    let t0 = Instant::now();

    sequencer.start();
    clock.poll(&mut sequencer, t0);
    let late = t0 + Duration::from_secs(60);
    assert_eq!(clock.poll(&mut sequencer, late).len(), 5);
    assert_eq!(clock.time_until_next(late), Some(Duration::from_secs(1)));
    assert_eq!(sequencer.state().time_left, 95);
    Ok(())
}

#[test]
fn test_clock_disarms_on_complete() -> Result<()> {
    let (mut sequencer, _) = create_test_sequencer(single_exercise_plan(2, 1)?);
    let mut clock = TickClock::new();
    let t0 = Instant::now();

    sequencer.start();
    clock.poll(&mut sequencer, t0);
    let outcomes = clock.poll(&mut sequencer, t0 + Duration::from_secs(3));
    assert_eq!(outcomes.last(), Some(&TickOutcome::Advanced));
    assert_eq!(sequencer.state().phase, Phase::Complete);
    assert!(!clock.is_armed());
    Ok(())
}
