//! Repeating reminder timer.
//!
//! Like the rest of the core, the scheduler has no internal thread: the
//! caller passes the current time into [`ReminderScheduler::tick`] at
//! whatever cadence it likes, and the scheduler decides whether a period
//! has elapsed.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start(valid interval)--> Active --stop()--> Idle
//! ```
//!
//! `start` while Active and `stop` while Idle are no-ops, so there is never
//! more than one armed timer. Reaching the goal does not stop reminders;
//! ticks are skipped while the goal-met predicate holds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interval::validate_interval;
use crate::error::ReminderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderState {
    Idle,
    Active,
}

/// What a call to [`ReminderScheduler::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No timer armed.
    Idle,
    /// Timer armed but the period has not elapsed yet.
    NotDue,
    /// Period elapsed while the goal was met; nothing fired.
    Skipped,
    /// Period elapsed and `on_fire` ran.
    Fired,
}

#[derive(Debug, Clone)]
struct ArmedTimer {
    interval_minutes: u32,
    period_ms: u64,
    next_due_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ReminderScheduler {
    timer: Option<ArmedTimer>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self { timer: None }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ReminderState {
        if self.timer.is_some() {
            ReminderState::Active
        } else {
            ReminderState::Idle
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn interval_minutes(&self) -> Option<u32> {
        self.timer.as_ref().map(|t| t.interval_minutes)
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.timer.as_ref().map(|t| t.next_due_ms)
    }

    /// Human-readable status line.
    pub fn status_line(&self) -> String {
        match self.interval_minutes() {
            Some(minutes) => format!("⏰ Reminding every {minutes} minute(s)"),
            None => "Set a custom reminder interval".to_string(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the timer. Returns `Ok(true)` on the Idle -> Active transition and
    /// `Ok(false)` when a timer was already running (the existing timer is
    /// kept untouched).
    pub fn start(&mut self, interval_minutes: i64, now_ms: u64) -> Result<bool, ReminderError> {
        let interval_minutes = validate_interval(interval_minutes)?;
        if self.timer.is_some() {
            return Ok(false);
        }
        let period_ms = u64::from(interval_minutes) * 60_000;
        self.timer = Some(ArmedTimer {
            interval_minutes,
            period_ms,
            next_due_ms: now_ms.saturating_add(period_ms),
        });
        debug!(interval_minutes, "reminder timer armed");
        Ok(true)
    }

    /// Cancel the timer. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        let was_active = self.timer.take().is_some();
        if was_active {
            debug!("reminder timer cancelled");
        }
        was_active
    }

    /// Advance the timer to `now_ms`.
    ///
    /// When at least one period has elapsed, `is_goal_met` is consulted once
    /// and `on_fire` runs only if it returns false. Periods missed between
    /// ticks are coalesced into a single firing. After [`stop`](Self::stop)
    /// this always returns [`TickOutcome::Idle`] without calling either
    /// closure.
    pub fn tick<P, F>(&mut self, now_ms: u64, is_goal_met: P, on_fire: F) -> TickOutcome
    where
        P: FnOnce() -> bool,
        F: FnOnce(),
    {
        let Some(timer) = self.timer.as_mut() else {
            return TickOutcome::Idle;
        };
        if now_ms < timer.next_due_ms {
            return TickOutcome::NotDue;
        }

        let missed = (now_ms - timer.next_due_ms) / timer.period_ms;
        timer.next_due_ms = timer
            .next_due_ms
            .saturating_add((missed + 1).saturating_mul(timer.period_ms));
        if missed > 0 {
            debug!(missed, "coalescing missed reminder periods");
        }

        if is_goal_met() {
            debug!("goal met, reminder skipped");
            return TickOutcome::Skipped;
        }
        on_fire();
        TickOutcome::Fired
    }
}
