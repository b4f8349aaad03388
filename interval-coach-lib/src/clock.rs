// interval-coach-lib/src/clock.rs
use crate::sequencer::{TickOutcome, WorkoutSequencer};
use std::time::{Duration, Instant};

/// Ticks delivered in one poll before the clock gives up catching up
/// (e.g. after the machine was suspended) and re-arms from `now`.
const MAX_CATCH_UP_TICKS: usize = 5;

/// Turns wall-clock time into one-second ticks for a `WorkoutSequencer`.
///
/// The driver loop calls [`TickClock::poll`] whenever it wakes up. The clock
/// is disarmed while the sequencer is not running, so pausing never
/// accumulates a backlog and resuming waits a full interval for the next tick.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TickClock {
    pub const fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub const fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub const fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Delivers every tick due at `now` and returns what each one did.
    pub fn poll(&mut self, sequencer: &mut WorkoutSequencer, now: Instant) -> Vec<TickOutcome> {
        if !sequencer.is_running() {
            self.next_due = None;
            return Vec::new();
        }

        let mut due = *self.next_due.get_or_insert(now + self.interval);
        let mut outcomes = Vec::new();
        while now >= due && sequencer.is_running() {
            if outcomes.len() == MAX_CATCH_UP_TICKS {
                due = now + self.interval;
                break;
            }
            outcomes.push(sequencer.tick());
            due += self.interval;
        }

        self.next_due = if sequencer.is_running() { Some(due) } else { None };
        outcomes
    }

    /// How long the driver may sleep before the next tick is due.
    /// `None` when disarmed.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
