//! Side-effect boundaries of the app.
//!
//! The controller decides *when* something is shown, played or asked and
//! with *what* parameters; implementations of these traits decide *how*.
//! None of these calls can fail the triggering action; a failed permission
//! request is reported to the user and otherwise ignored.

use serde::{Deserialize, Serialize};

use crate::error::NotificationError;
use crate::tracker::Snapshot;

/// System notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    /// Not asked yet.
    Default,
    Granted,
    Denied,
}

/// Extra parameters for system-level notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemNotificationOptions {
    /// Notifications sharing a tag replace each other.
    pub tag: Option<String>,
    /// Alert again when replacing a notification with the same tag.
    pub renotify: bool,
    /// Stay visible until the user interacts.
    pub require_interaction: bool,
    /// Vibration pattern in milliseconds (on, off, on, ...).
    pub vibrate: Vec<u32>,
}

impl SystemNotificationOptions {
    /// Options used for hydration reminders.
    pub fn reminder() -> Self {
        Self {
            tag: Some("water-reminder".to_string()),
            renotify: true,
            require_interaction: true,
            vibrate: vec![200, 100, 200],
        }
    }
}

pub trait NotificationGateway {
    /// Transient message inside the app.
    fn notify_in_app(&mut self, title: &str, message: &str);

    /// OS-level notification. Only called after permission was granted.
    fn notify_system(&mut self, title: &str, message: &str, options: &SystemNotificationOptions);

    /// Current permission without prompting.
    fn permission(&self) -> Permission;

    /// Ask for permission. `Ok(None)` means the answer arrives later; the
    /// host then reports it through `AppController::permission_resolved`.
    ///
    /// # Errors
    /// Returns [`NotificationError::PermissionRequest`] when the platform
    /// could not ask at all.
    fn request_permission(&mut self) -> Result<Option<Permission>, NotificationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundId {
    AddGlass,
    Reminder,
    GoalCompleted,
}

impl SoundId {
    /// Level used until the user picks a master volume.
    pub fn default_volume(self) -> f32 {
        match self {
            SoundId::AddGlass => 0.5,
            SoundId::Reminder => 0.7,
            SoundId::GoalCompleted => 0.6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoundId::AddGlass => "add-glass",
            SoundId::Reminder => "reminder",
            SoundId::GoalCompleted => "goal-completed",
        }
    }
}

pub trait SoundPlayer {
    /// `volume` is in `0.0..=1.0`. Never called while sound is disabled.
    fn play(&mut self, sound: SoundId, volume: f32);
}

pub trait Renderer {
    /// Called after every state change.
    fn render(&mut self, snapshot: &Snapshot);

    /// Show a transient motivational message.
    fn show_message(&mut self, _message: &str) {}

    /// Hide any visible motivational message.
    fn clear_message(&mut self) {}

    /// One-off goal celebration.
    fn celebrate(&mut self) {}

    /// Reminder status line changed.
    fn reminder_status(&mut self, _status: &str) {}
}

/// Explicit confirmation for destructive actions.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}
