//! Orchestration of tracker, scheduler and collaborators.
//!
//! [`AppController::start`] performs the startup load before returning, so
//! no other trigger can observe a tracker that has not seen persisted
//! progress yet. Every trigger then runs to completion synchronously:
//!
//! ```text
//! add_glass / reset      -> tracker -> store.save + render/sound/notify
//! tick (host interval)   -> scheduler -> reminder notification (goal unmet)
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::sound::SoundSettings;
use crate::clock::Clock;
use crate::collaborators::{
    Confirm, NotificationGateway, Permission, Renderer, SoundId, SoundPlayer,
    SystemNotificationOptions,
};
use crate::error::ReminderError;
use crate::events::Event;
use crate::reminder::{parse_interval, ReminderScheduler, TickOutcome};
use crate::storage::ProgressStore;
use crate::tracker::{ProgressTracker, Snapshot};

const REMINDER_TITLE: &str = "💧 Hydration Reminder";
const INVALID_INTERVAL_MESSAGE: &str = "Please enter a valid interval between 1 and 240 minutes.";
const RESET_QUESTION: &str = "Are you sure you want to reset your daily progress?";

/// Everything the controller talks to.
pub struct Collaborators {
    pub store: Box<dyn ProgressStore>,
    pub gateway: Box<dyn NotificationGateway>,
    pub sound: Box<dyn SoundPlayer>,
    pub renderer: Box<dyn Renderer>,
    pub confirm: Box<dyn Confirm>,
    pub clock: Box<dyn Clock>,
}

pub struct AppController {
    tracker: ProgressTracker,
    scheduler: ReminderScheduler,
    sound: SoundSettings,
    permission: Permission,
    deps: Collaborators,
}

/// Reminder text for the given number of glasses left.
pub fn reminder_message(remaining: u32) -> String {
    if remaining > 1 {
        format!("Time to drink water! {remaining} glasses remaining.")
    } else {
        format!("Almost there! Just {remaining} more glass to go!")
    }
}

impl AppController {
    /// Build the controller and load today's progress.
    pub fn start(deps: Collaborators, sound: SoundSettings) -> Self {
        let permission = deps.gateway.permission();
        let mut app = Self {
            tracker: ProgressTracker::new(),
            scheduler: ReminderScheduler::new(),
            sound,
            permission,
            deps,
        };
        app.load_progress();
        app
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tracker.snapshot()
    }

    pub fn permission(&self) -> Permission {
        self.permission
    }

    pub fn sound_settings(&self) -> SoundSettings {
        self.sound
    }

    /// Full state dump, also written to the debug log.
    pub fn state_snapshot(&self) -> Event {
        let snap = self.tracker.snapshot();
        debug!(
            glasses = snap.glasses_consumed,
            goal = snap.daily_goal,
            percentage = snap.percentage,
            reminder_active = self.scheduler.is_active(),
            "app state"
        );
        Event::StateSnapshot {
            glasses_consumed: snap.glasses_consumed,
            daily_goal: snap.daily_goal,
            percentage: snap.percentage,
            remaining: snap.remaining,
            goal_met: snap.is_complete(),
            reminder_active: self.scheduler.is_active(),
            reminder_interval_minutes: self.scheduler.interval_minutes(),
            sound_enabled: self.sound.enabled,
            permission: self.permission,
            at: self.now(),
        }
    }

    // ── Triggers ─────────────────────────────────────────────────────

    pub fn add_glass(&mut self) -> Event {
        let inc = self.tracker.increment();
        if !inc.changed {
            debug!("goal already met, add ignored");
            return Event::GoalAlreadyMet {
                glasses_consumed: inc.count,
                at: self.now(),
            };
        }

        self.persist();
        let snapshot = self.tracker.snapshot();
        self.deps.renderer.render(&snapshot);
        let message = self.tracker.message_for(inc.count);
        self.deps.renderer.show_message(message);
        self.play(SoundId::AddGlass);

        if inc.goal_just_reached {
            self.celebrate();
        }

        Event::GlassAdded {
            glasses_consumed: inc.count,
            daily_goal: snapshot.daily_goal,
            goal_just_reached: inc.goal_just_reached,
            message: message.to_string(),
            at: self.now(),
        }
    }

    /// Start reminders at `interval_raw` minutes, or stop them if running.
    ///
    /// # Errors
    /// Returns [`ReminderError::InvalidInterval`] after showing a validation
    /// message; nothing else changes in that case.
    pub fn toggle_reminder(&mut self, interval_raw: &str) -> Result<Event, ReminderError> {
        if self.scheduler.is_active() {
            return Ok(self.stop_reminders());
        }

        let minutes = match parse_interval(interval_raw) {
            Ok(minutes) => minutes,
            Err(err) => {
                warn!(input = interval_raw, "rejected reminder interval");
                self.deps
                    .gateway
                    .notify_in_app("⚠️ Invalid Interval", INVALID_INTERVAL_MESSAGE);
                return Err(err);
            }
        };

        let now = self.deps.clock.now_ms();
        self.scheduler.start(i64::from(minutes), now)?;
        info!(interval_minutes = minutes, "reminders started");
        self.deps
            .renderer
            .reminder_status(&self.scheduler.status_line());
        self.deps.gateway.notify_in_app(
            "⏰ Reminders Active",
            &format!("You'll be reminded every {minutes} minute(s)"),
        );
        Ok(Event::RemindersStarted {
            interval_minutes: minutes,
            at: self.now(),
        })
    }

    /// Advance the reminder timer to the clock's current time.
    ///
    /// Hosts call this on their own cadence; it returns `None` unless a
    /// reminder period elapsed.
    pub fn tick(&mut self) -> Option<Event> {
        let now = self.deps.clock.now_ms();
        let at = self.now();
        let Self {
            tracker,
            scheduler,
            sound,
            permission,
            deps,
        } = self;
        let tracker = &*tracker;

        let mut dispatched = None;
        let outcome = scheduler.tick(
            now,
            || tracker.is_goal_met(),
            || {
                let remaining = tracker.snapshot().remaining;
                dispatched = Some(dispatch_reminder(remaining, deps, sound, *permission));
            },
        );

        match outcome {
            TickOutcome::Fired => dispatched.map(|(remaining, message, system)| {
                Event::ReminderFired {
                    remaining,
                    message,
                    system,
                    at,
                }
            }),
            TickOutcome::Skipped => Some(Event::ReminderSkipped { at }),
            TickOutcome::Idle | TickOutcome::NotDue => None,
        }
    }

    /// Reset today's progress after confirmation. Also stops reminders.
    pub fn reset(&mut self) -> Event {
        if !self.deps.confirm.confirm(RESET_QUESTION) {
            debug!("reset cancelled");
            return Event::ResetCancelled { at: self.now() };
        }

        self.tracker.reset();
        self.deps.renderer.render(&self.tracker.snapshot());
        self.persist();
        let reminders_stopped = self.scheduler.stop();
        if reminders_stopped {
            self.deps
                .renderer
                .reminder_status(&self.scheduler.status_line());
        }
        info!(reminders_stopped, "progress reset");
        self.deps.gateway.notify_in_app(
            "🔄 Progress Reset",
            "Start fresh with your hydration journey!",
        );
        self.deps.renderer.clear_message();

        Event::ProgressReset {
            reminders_stopped,
            at: self.now(),
        }
    }

    /// Ask for system notification permission if it was never decided.
    /// Returns `None` when already decided or the answer comes later. A
    /// failed request leaves the permission undecided.
    pub fn request_notifications(&mut self) -> Option<Event> {
        self.permission = self.deps.gateway.permission();
        if self.permission != Permission::Default {
            return None;
        }
        self.deps.gateway.notify_in_app(
            "🔔 Enable Notifications",
            "Allow notifications to receive reminders in the background",
        );
        match self.deps.gateway.request_permission() {
            Ok(answer) => Some(self.permission_resolved(answer?)),
            Err(err) => {
                warn!(error = %err, "notification permission request failed");
                self.deps.gateway.notify_in_app(
                    "❌ Notification Error",
                    "Please check your browser settings to enable notifications manually.",
                );
                Some(Event::PermissionFailed {
                    reason: err.to_string(),
                    at: self.now(),
                })
            }
        }
    }

    /// Deliver the outcome of a permission request.
    pub fn permission_resolved(&mut self, permission: Permission) -> Event {
        self.permission = permission;
        match permission {
            Permission::Granted => self.deps.gateway.notify_in_app(
                "✅ Notifications Enabled",
                "You will now receive reminders even when the app is not open.",
            ),
            Permission::Denied => self.deps.gateway.notify_in_app(
                "❌ Notifications Disabled",
                "You will only receive reminders when the app is open.",
            ),
            Permission::Default => debug!("permission request dismissed"),
        }
        Event::PermissionResolved {
            permission,
            at: self.now(),
        }
    }

    pub fn toggle_sound(&mut self, enabled: bool) -> Event {
        self.sound.enabled = enabled;
        let (title, message) = if enabled {
            ("🔊 Sounds Enabled", "You will now hear notification sounds.")
        } else {
            ("🔇 Sounds Disabled", "Sound notifications are now muted.")
        };
        self.deps.gateway.notify_in_app(title, message);
        Event::SoundToggled {
            enabled,
            at: self.now(),
        }
    }

    /// Set the master volume (`0.0..=1.0`, clamped).
    pub fn set_volume(&mut self, level: f32) -> Event {
        let volume = self.sound.set_volume(level);
        Event::VolumeChanged {
            volume,
            at: self.now(),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn now(&self) -> DateTime<Utc> {
        self.deps.clock.now_utc()
    }

    fn load_progress(&mut self) {
        let today = self.deps.clock.today();
        let record = match self.deps.store.load() {
            Ok(record) => record,
            Err(err) => {
                warn!(error = %err, "saved progress unreadable, starting from zero");
                self.deps.gateway.notify_in_app(
                    "⚠️ Progress Unavailable",
                    "Saved progress could not be read. Starting fresh for today.",
                );
                None
            }
        };
        self.tracker.load_from_record(record.as_ref(), &today);
        info!(
            glasses = self.tracker.glasses_consumed(),
            day = %today,
            "progress loaded"
        );
        self.deps.renderer.render(&self.tracker.snapshot());
        self.deps
            .renderer
            .reminder_status(&self.scheduler.status_line());
    }

    fn stop_reminders(&mut self) -> Event {
        self.scheduler.stop();
        info!("reminders stopped");
        self.deps
            .renderer
            .reminder_status(&self.scheduler.status_line());
        self.deps.gateway.notify_in_app(
            "⏹️ Reminders Stopped",
            "You won't be reminded until you start reminders again.",
        );
        Event::RemindersStopped { at: self.now() }
    }

    fn persist(&mut self) {
        let record = self.tracker.to_record(&self.deps.clock.today());
        if let Err(err) = self.deps.store.save(&record) {
            warn!(error = %err, "failed to save progress");
        }
    }

    fn play(&mut self, sound: SoundId) {
        self.sound.play(self.deps.sound.as_mut(), sound);
    }

    fn celebrate(&mut self) {
        info!("daily goal reached");
        self.deps.renderer.celebrate();
        self.play(SoundId::GoalCompleted);
        self.deps.gateway.notify_in_app(
            "🎉 Congratulations!",
            "You've reached your daily hydration goal!",
        );
    }
}

fn dispatch_reminder(
    remaining: u32,
    deps: &mut Collaborators,
    sound: &SoundSettings,
    permission: Permission,
) -> (u32, String, bool) {
    let message = reminder_message(remaining);
    deps.gateway.notify_in_app(REMINDER_TITLE, &message);
    sound.play(deps.sound.as_mut(), SoundId::Reminder);

    let system = permission == Permission::Granted;
    if system {
        deps.gateway
            .notify_system(REMINDER_TITLE, &message, &SystemNotificationOptions::reminder());
    }
    (remaining, message, system)
}
