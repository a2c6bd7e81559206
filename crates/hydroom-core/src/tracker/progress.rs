//! Daily consumption counter.
//!
//! The tracker is the only owner of the glass count. It is a saturating
//! counter bounded by the daily goal:
//!
//! ```text
//! 0 -> 1 -> ... -> goal   (increment, no-op once at goal)
//! any -> 0                (reset)
//! ```
//!
//! Persisted progress only survives for the calendar day it was written on;
//! [`ProgressTracker::load_from_record`] discards anything else.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::messages;
use crate::clock::DayStamp;
use crate::storage::ProgressRecord;

/// Glasses per calendar day.
pub const DAILY_GOAL: u32 = 8;

/// Result of a single increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Increment {
    /// Count after the call.
    pub count: u32,
    /// True only on the call that moved the count onto the goal.
    pub goal_just_reached: bool,
    /// False when the tracker was already at the goal.
    pub changed: bool,
}

/// Point-in-time view of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub glasses_consumed: u32,
    pub daily_goal: u32,
    /// 0.0 ..= 100.0
    pub percentage: f64,
    pub remaining: u32,
}

impl Snapshot {
    pub fn is_complete(&self) -> bool {
        self.glasses_consumed >= self.daily_goal
    }

    /// `"63% Complete"`
    pub fn percentage_label(&self) -> String {
        format!("{}% Complete", self.percentage.round() as u32)
    }

    /// Label for the add-glass action.
    pub fn action_label(&self) -> &'static str {
        if self.is_complete() {
            "✅ Goal Achieved!"
        } else {
            "+1 Glass 🥤"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTracker {
    glasses_consumed: u32,
    daily_goal: u32,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            glasses_consumed: 0,
            daily_goal: DAILY_GOAL,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn glasses_consumed(&self) -> u32 {
        self.glasses_consumed
    }

    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    pub fn is_goal_met(&self) -> bool {
        self.glasses_consumed >= self.daily_goal
    }

    pub fn snapshot(&self) -> Snapshot {
        let ratio = if self.daily_goal == 0 {
            1.0
        } else {
            self.glasses_consumed as f64 / self.daily_goal as f64
        };
        Snapshot {
            glasses_consumed: self.glasses_consumed,
            daily_goal: self.daily_goal,
            percentage: ratio.min(1.0) * 100.0,
            remaining: self.daily_goal.saturating_sub(self.glasses_consumed),
        }
    }

    /// Motivational message for `count`. Counts past the goal get the
    /// fallback even if the table happens to be longer.
    pub fn message_for(&self, count: u32) -> &'static str {
        if count > self.daily_goal {
            return messages::FALLBACK_MESSAGE;
        }
        messages::message_for(count)
    }

    /// Record to persist for the current state.
    pub fn to_record(&self, today: &DayStamp) -> ProgressRecord {
        ProgressRecord {
            date: today.as_str().to_string(),
            glasses: i64::from(self.glasses_consumed),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn increment(&mut self) -> Increment {
        if self.glasses_consumed >= self.daily_goal {
            return Increment {
                count: self.glasses_consumed,
                goal_just_reached: false,
                changed: false,
            };
        }
        self.glasses_consumed += 1;
        Increment {
            count: self.glasses_consumed,
            goal_just_reached: self.glasses_consumed == self.daily_goal,
            changed: true,
        }
    }

    pub fn reset(&mut self) {
        self.glasses_consumed = 0;
    }

    /// Adopt persisted progress if it was written today; otherwise start
    /// the day at zero. Out-of-range counts are clamped into `0..=goal`.
    pub fn load_from_record(&mut self, record: Option<&ProgressRecord>, today: &DayStamp) {
        self.glasses_consumed = match record {
            Some(record) if record.date == today.as_str() => {
                record.glasses.clamp(0, i64::from(self.daily_goal)) as u32
            }
            Some(record) => {
                debug!(stored = %record.date, today = %today, "discarding progress from another day");
                0
            }
            None => 0,
        };
    }
}
