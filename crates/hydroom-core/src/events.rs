use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::collaborators::Permission;

/// Every controller trigger produces an Event.
/// The CLI prints them as JSON; the interactive session logs them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GlassAdded {
        glasses_consumed: u32,
        daily_goal: u32,
        goal_just_reached: bool,
        message: String,
        at: DateTime<Utc>,
    },
    /// Add-glass request while already at the goal; nothing changed.
    GoalAlreadyMet {
        glasses_consumed: u32,
        at: DateTime<Utc>,
    },
    RemindersStarted {
        interval_minutes: u32,
        at: DateTime<Utc>,
    },
    RemindersStopped {
        at: DateTime<Utc>,
    },
    ReminderFired {
        remaining: u32,
        message: String,
        /// Whether a system notification was also sent.
        system: bool,
        at: DateTime<Utc>,
    },
    /// Reminder period elapsed while the goal was met.
    ReminderSkipped {
        at: DateTime<Utc>,
    },
    ProgressReset {
        /// Whether an active reminder timer was stopped by the reset.
        reminders_stopped: bool,
        at: DateTime<Utc>,
    },
    ResetCancelled {
        at: DateTime<Utc>,
    },
    SoundToggled {
        enabled: bool,
        at: DateTime<Utc>,
    },
    VolumeChanged {
        volume: f32,
        at: DateTime<Utc>,
    },
    PermissionResolved {
        permission: Permission,
        at: DateTime<Utc>,
    },
    /// The permission request itself failed; permission stays undecided.
    PermissionFailed {
        reason: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        glasses_consumed: u32,
        daily_goal: u32,
        percentage: f64,
        remaining: u32,
        goal_met: bool,
        reminder_active: bool,
        reminder_interval_minutes: Option<u32>,
        sound_enabled: bool,
        permission: Permission,
        at: DateTime<Utc>,
    },
}
