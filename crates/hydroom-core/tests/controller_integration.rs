//! Integration tests for the app controller.
//!
//! Every collaborator is a recording fake sharing one log, so tests can
//! assert on the exact side effects each trigger produced.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use hydroom_core::{
    AppController, Collaborators, Confirm, DayStamp, Event, ManualClock, MemoryStore,
    NotificationError, NotificationGateway, Permission, ProgressRecord, ProgressStore, Renderer, Snapshot, SoundId,
    SoundPlayer, SoundSettings, SystemNotificationOptions, DAILY_GOAL,
};

// ============================================================================
// Recording collaborators
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    InApp(String, String),
    System(String, String, SystemNotificationOptions),
    PermissionRequested,
    Sound(SoundId, f32),
    Render(u32),
    Message(String),
    ClearMessage,
    Celebrate,
    Status(String),
    Confirm(String),
}

type Log = Rc<RefCell<Vec<Call>>>;

struct FakeGateway {
    log: Log,
    permission: Permission,
    answer: Result<Option<Permission>, NotificationError>,
}

impl NotificationGateway for FakeGateway {
    fn notify_in_app(&mut self, title: &str, message: &str) {
        self.log
            .borrow_mut()
            .push(Call::InApp(title.into(), message.into()));
    }

    fn notify_system(&mut self, title: &str, message: &str, options: &SystemNotificationOptions) {
        self.log
            .borrow_mut()
            .push(Call::System(title.into(), message.into(), options.clone()));
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Result<Option<Permission>, NotificationError> {
        self.log.borrow_mut().push(Call::PermissionRequested);
        if let Ok(Some(answer)) = self.answer {
            self.permission = answer;
        }
        self.answer.clone()
    }
}

struct FakeSound(Log);

impl SoundPlayer for FakeSound {
    fn play(&mut self, sound: SoundId, volume: f32) {
        self.0.borrow_mut().push(Call::Sound(sound, volume));
    }
}

struct FakeRenderer(Log);

impl Renderer for FakeRenderer {
    fn render(&mut self, snapshot: &Snapshot) {
        self.0
            .borrow_mut()
            .push(Call::Render(snapshot.glasses_consumed));
    }

    fn show_message(&mut self, message: &str) {
        self.0.borrow_mut().push(Call::Message(message.into()));
    }

    fn clear_message(&mut self) {
        self.0.borrow_mut().push(Call::ClearMessage);
    }

    fn celebrate(&mut self) {
        self.0.borrow_mut().push(Call::Celebrate);
    }

    fn reminder_status(&mut self, status: &str) {
        self.0.borrow_mut().push(Call::Status(status.into()));
    }
}

struct FakeConfirm {
    log: Log,
    answer: Rc<RefCell<bool>>,
}

impl Confirm for FakeConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        self.log.borrow_mut().push(Call::Confirm(question.into()));
        *self.answer.borrow()
    }
}

struct Harness {
    app: AppController,
    log: Log,
    clock: ManualClock,
    store: MemoryStore,
    confirm_answer: Rc<RefCell<bool>>,
}

impl Harness {
    fn new(store: MemoryStore) -> Self {
        Self::with(store, Permission::Default, Some(Permission::Granted))
    }

    fn with(store: MemoryStore, permission: Permission, answer: Option<Permission>) -> Self {
        Self::build(store, permission, Ok(answer))
    }

    fn build(
        store: MemoryStore,
        permission: Permission,
        answer: Result<Option<Permission>, NotificationError>,
    ) -> Self {
        let log: Log = Rc::default();
        let clock = ManualClock::new(today_date());
        let confirm_answer = Rc::new(RefCell::new(true));
        let deps = Collaborators {
            store: Box::new(store.clone()),
            gateway: Box::new(FakeGateway {
                log: log.clone(),
                permission,
                answer,
            }),
            sound: Box::new(FakeSound(log.clone())),
            renderer: Box::new(FakeRenderer(log.clone())),
            confirm: Box::new(FakeConfirm {
                log: log.clone(),
                answer: confirm_answer.clone(),
            }),
            clock: Box::new(clock.clone()),
        };
        let app = AppController::start(deps, SoundSettings::default());
        Self {
            app,
            log,
            clock,
            store,
            confirm_answer,
        }
    }

    fn take_log(&self) -> Vec<Call> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    fn in_app_titles(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::InApp(title, _) => Some(title.clone()),
                _ => None,
            })
            .collect()
    }

    fn stored(&self) -> ProgressRecord {
        self.store.load().unwrap().expect("record saved")
    }
}

fn today_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn today() -> DayStamp {
    DayStamp::from_date(today_date())
}

fn yesterday() -> DayStamp {
    DayStamp::from_date(today_date().pred_opt().unwrap())
}

fn seeded(date: &DayStamp, glasses: i64) -> MemoryStore {
    MemoryStore::with_raw(format!(
        r#"{{"date":"{}","glasses":{}}}"#,
        date.as_str(),
        glasses
    ))
}

// ============================================================================
// Startup
// ============================================================================

#[test]
fn startup_adopts_todays_progress_and_renders() {
    let h = Harness::new(seeded(&today(), 5));
    assert_eq!(h.app.snapshot().glasses_consumed, 5);
    let log = h.take_log();
    assert_eq!(log[0], Call::Render(5));
    assert_eq!(
        log[1],
        Call::Status("Set a custom reminder interval".into())
    );
}

#[test]
fn startup_discards_previous_day() {
    let h = Harness::new(seeded(&yesterday(), 5));
    assert_eq!(h.app.snapshot().glasses_consumed, 0);
}

#[test]
fn startup_without_record_starts_at_zero() {
    let h = Harness::new(MemoryStore::new());
    assert_eq!(h.app.snapshot().glasses_consumed, 0);
    assert!(h.in_app_titles().is_empty());
}

#[test]
fn startup_with_corrupt_record_degrades_to_zero() {
    let h = Harness::new(MemoryStore::with_raw("{definitely not json"));
    assert_eq!(h.app.snapshot().glasses_consumed, 0);
    assert_eq!(h.in_app_titles(), vec!["⚠️ Progress Unavailable"]);
}

#[test]
fn startup_with_partial_record_uses_defaults() {
    let store = MemoryStore::with_raw(format!(r#"{{"date":"{}"}}"#, today().as_str()));
    let h = Harness::new(store);
    assert_eq!(h.app.snapshot().glasses_consumed, 0);
}

// ============================================================================
// Add glass
// ============================================================================

#[test]
fn add_glass_persists_renders_and_plays() {
    let mut h = Harness::new(MemoryStore::new());
    h.take_log();

    let event = h.app.add_glass();
    match event {
        Event::GlassAdded {
            glasses_consumed,
            goal_just_reached,
            ref message,
            ..
        } => {
            assert_eq!(glasses_consumed, 1);
            assert!(!goal_just_reached);
            assert_eq!(message, "💪 Great start! Keep it up!");
        }
        other => panic!("Expected GlassAdded, got {other:?}"),
    }

    assert_eq!(
        h.take_log(),
        vec![
            Call::Render(1),
            Call::Message("💪 Great start! Keep it up!".into()),
            Call::Sound(SoundId::AddGlass, 0.5),
        ]
    );
    assert_eq!(
        h.stored(),
        ProgressRecord {
            date: today().as_str().to_string(),
            glasses: 1
        }
    );
}

#[test]
fn eight_adds_reach_goal_and_celebrate_once() {
    let mut h = Harness::new(MemoryStore::new());
    let mut reached = 0;
    for _ in 0..DAILY_GOAL {
        if let Event::GlassAdded {
            goal_just_reached: true,
            ..
        } = h.app.add_glass()
        {
            reached += 1;
        }
    }
    assert_eq!(reached, 1);

    let snap = h.app.snapshot();
    assert_eq!(snap.glasses_consumed, 8);
    assert_eq!(snap.percentage, 100.0);
    assert_eq!(snap.remaining, 0);

    let log = h.take_log();
    let celebrations = log.iter().filter(|c| **c == Call::Celebrate).count();
    assert_eq!(celebrations, 1);
    assert!(log.contains(&Call::Sound(SoundId::GoalCompleted, 0.6)));
    assert!(log.contains(&Call::InApp(
        "🎉 Congratulations!".into(),
        "You've reached your daily hydration goal!".into()
    )));

    // Extra adds are silent no-ops.
    assert!(matches!(
        h.app.add_glass(),
        Event::GoalAlreadyMet {
            glasses_consumed: 8,
            ..
        }
    ));
    assert!(h.take_log().is_empty());
    assert_eq!(h.stored().glasses, 8);
}

#[test]
fn muted_sound_plays_nothing() {
    let mut h = Harness::new(MemoryStore::new());
    h.app.toggle_sound(false);
    h.take_log();
    h.app.add_glass();
    assert!(!h
        .take_log()
        .iter()
        .any(|c| matches!(c, Call::Sound(..))));
}

#[test]
fn master_volume_applies_to_every_sound() {
    let mut h = Harness::new(MemoryStore::new());
    assert!(matches!(
        h.app.set_volume(2.0),
        Event::VolumeChanged { volume, .. } if volume == 1.0
    ));
    h.app.set_volume(0.25);
    h.take_log();
    h.app.add_glass();
    assert!(h.take_log().contains(&Call::Sound(SoundId::AddGlass, 0.25)));
}

#[test]
fn save_failure_does_not_block_add() {
    let store = MemoryStore::new();
    store.fail_writes(true);
    let mut h = Harness::new(store);
    assert!(matches!(h.app.add_glass(), Event::GlassAdded { .. }));
    assert_eq!(h.app.snapshot().glasses_consumed, 1);
    assert!(h.store.raw().is_none());
}

// ============================================================================
// Reminders
// ============================================================================

#[test]
fn invalid_interval_surfaces_message_and_stays_idle() {
    let mut h = Harness::new(MemoryStore::new());
    for raw in ["0", "241", "abc", ""] {
        h.take_log();
        assert!(h.app.toggle_reminder(raw).is_err());
        assert!(!h.app.scheduler().is_active());
        assert_eq!(
            h.take_log(),
            vec![Call::InApp(
                "⚠️ Invalid Interval".into(),
                "Please enter a valid interval between 1 and 240 minutes.".into()
            )]
        );
    }
}

#[test]
fn toggle_starts_then_stops() {
    let mut h = Harness::new(MemoryStore::new());
    h.take_log();

    let event = h.app.toggle_reminder("60").unwrap();
    assert!(matches!(
        event,
        Event::RemindersStarted {
            interval_minutes: 60,
            ..
        }
    ));
    assert!(h.app.scheduler().is_active());
    assert_eq!(
        h.take_log(),
        vec![
            Call::Status("⏰ Reminding every 60 minute(s)".into()),
            Call::InApp(
                "⏰ Reminders Active".into(),
                "You'll be reminded every 60 minute(s)".into()
            ),
        ]
    );

    assert!(matches!(
        h.app.toggle_reminder("60").unwrap(),
        Event::RemindersStopped { .. }
    ));
    assert!(!h.app.scheduler().is_active());
    assert_eq!(h.in_app_titles(), vec!["⏹️ Reminders Stopped"]);
}

#[test]
fn reminder_fires_with_plural_message_in_app_only_without_permission() {
    let mut h = Harness::with(MemoryStore::new(), Permission::Default, None);
    h.app.toggle_reminder("10").unwrap();
    h.take_log();

    h.clock.advance_minutes(9);
    assert!(h.app.tick().is_none());

    h.clock.advance_minutes(1);
    let event = h.app.tick().expect("reminder due");
    match event {
        Event::ReminderFired {
            remaining,
            ref message,
            system,
            ..
        } => {
            assert_eq!(remaining, 8);
            assert_eq!(message, "Time to drink water! 8 glasses remaining.");
            assert!(!system);
        }
        other => panic!("Expected ReminderFired, got {other:?}"),
    }
    assert_eq!(
        h.take_log(),
        vec![
            Call::InApp(
                "💧 Hydration Reminder".into(),
                "Time to drink water! 8 glasses remaining.".into()
            ),
            Call::Sound(SoundId::Reminder, 0.7),
        ]
    );
}

#[test]
fn reminder_uses_system_notification_when_granted() {
    let mut h = Harness::new(MemoryStore::new());
    assert!(matches!(
        h.app.request_notifications(),
        Some(Event::PermissionResolved {
            permission: Permission::Granted,
            ..
        })
    ));
    for _ in 0..7 {
        h.app.add_glass();
    }
    h.app.toggle_reminder("1").unwrap();
    h.take_log();

    h.clock.advance_minutes(1);
    assert!(matches!(
        h.app.tick(),
        Some(Event::ReminderFired {
            remaining: 1,
            system: true,
            ..
        })
    ));
    let log = h.take_log();
    let message = "Almost there! Just 1 more glass to go!".to_string();
    assert!(log.contains(&Call::InApp("💧 Hydration Reminder".into(), message.clone())));
    assert!(log.contains(&Call::System(
        "💧 Hydration Reminder".into(),
        message,
        SystemNotificationOptions::reminder()
    )));
}

#[test]
fn reminders_skip_but_keep_running_once_goal_met() {
    let mut h = Harness::new(MemoryStore::new());
    h.app.toggle_reminder("5").unwrap();
    for _ in 0..DAILY_GOAL {
        h.app.add_glass();
    }
    h.take_log();

    h.clock.advance_minutes(5);
    assert!(matches!(h.app.tick(), Some(Event::ReminderSkipped { .. })));
    assert!(h.app.scheduler().is_active());
    assert!(h.take_log().is_empty());
}

#[test]
fn tick_after_stop_never_notifies() {
    let mut h = Harness::new(MemoryStore::new());
    h.app.toggle_reminder("1").unwrap();
    h.clock.advance_minutes(1);
    h.app.toggle_reminder("1").unwrap();
    h.take_log();

    h.clock.advance_minutes(30);
    assert!(h.app.tick().is_none());
    assert!(h.take_log().is_empty());
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn reset_clears_progress_and_stops_reminders() {
    let mut h = Harness::new(seeded(&today(), 6));
    h.app.toggle_reminder("30").unwrap();
    h.take_log();

    let event = h.app.reset();
    assert!(matches!(
        event,
        Event::ProgressReset {
            reminders_stopped: true,
            ..
        }
    ));
    assert_eq!(h.app.snapshot().glasses_consumed, 0);
    assert!(!h.app.scheduler().is_active());
    assert_eq!(h.stored().glasses, 0);

    let log = h.take_log();
    assert_eq!(
        log[0],
        Call::Confirm("Are you sure you want to reset your daily progress?".into())
    );
    assert!(log.contains(&Call::InApp(
        "🔄 Progress Reset".into(),
        "Start fresh with your hydration journey!".into()
    )));
    assert_eq!(log.last(), Some(&Call::ClearMessage));
}

#[test]
fn declined_reset_changes_nothing() {
    let mut h = Harness::new(seeded(&today(), 3));
    h.app.toggle_reminder("30").unwrap();
    *h.confirm_answer.borrow_mut() = false;

    assert!(matches!(h.app.reset(), Event::ResetCancelled { .. }));
    assert_eq!(h.app.snapshot().glasses_consumed, 3);
    assert!(h.app.scheduler().is_active());
    assert_eq!(h.stored().glasses, 3);
}

#[test]
fn add_after_goal_reset_celebrates_again() {
    let mut h = Harness::new(MemoryStore::new());
    for _ in 0..DAILY_GOAL {
        h.app.add_glass();
    }
    h.app.reset();
    for _ in 0..DAILY_GOAL {
        h.app.add_glass();
    }
    let celebrations = h
        .take_log()
        .iter()
        .filter(|c| **c == Call::Celebrate)
        .count();
    assert_eq!(celebrations, 2);
}

// ============================================================================
// Permission and sound feedback
// ============================================================================

#[test]
fn denied_permission_keeps_in_app_notifications() {
    let mut h = Harness::with(MemoryStore::new(), Permission::Default, Some(Permission::Denied));
    h.take_log();
    h.app.request_notifications();
    assert_eq!(
        h.in_app_titles(),
        vec!["🔔 Enable Notifications", "❌ Notifications Disabled"]
    );
    assert_eq!(h.app.permission(), Permission::Denied);

    h.app.toggle_reminder("1").unwrap();
    h.take_log();
    h.clock.advance_minutes(1);
    assert!(matches!(
        h.app.tick(),
        Some(Event::ReminderFired { system: false, .. })
    ));
    assert!(!h
        .take_log()
        .iter()
        .any(|c| matches!(c, Call::System(..))));
}

#[test]
fn asynchronous_permission_answer_is_delivered_later() {
    let mut h = Harness::with(MemoryStore::new(), Permission::Default, None);
    assert!(h.app.request_notifications().is_none());
    assert_eq!(h.app.permission(), Permission::Default);

    h.app.permission_resolved(Permission::Granted);
    assert_eq!(h.app.permission(), Permission::Granted);
    assert!(h
        .in_app_titles()
        .contains(&"✅ Notifications Enabled".to_string()));
}

#[test]
fn decided_permission_is_not_requested_again() {
    let mut h = Harness::with(MemoryStore::new(), Permission::Granted, None);
    h.take_log();
    assert!(h.app.request_notifications().is_none());
    assert!(h.take_log().is_empty());
}

#[test]
fn toggle_sound_gives_feedback() {
    let mut h = Harness::new(MemoryStore::new());
    h.take_log();
    h.app.toggle_sound(false);
    h.app.toggle_sound(true);
    assert_eq!(
        h.in_app_titles(),
        vec!["🔇 Sounds Disabled", "🔊 Sounds Enabled"]
    );
}

#[test]
fn state_snapshot_reports_everything() {
    let mut h = Harness::new(seeded(&today(), 2));
    h.app.toggle_reminder("15").unwrap();
    match h.app.state_snapshot() {
        Event::StateSnapshot {
            glasses_consumed,
            percentage,
            remaining,
            goal_met,
            reminder_active,
            reminder_interval_minutes,
            sound_enabled,
            ..
        } => {
            assert_eq!(glasses_consumed, 2);
            assert_eq!(percentage, 25.0);
            assert_eq!(remaining, 6);
            assert!(!goal_met);
            assert!(reminder_active);
            assert_eq!(reminder_interval_minutes, Some(15));
            assert!(sound_enabled);
        }
        other => panic!("Expected StateSnapshot, got {other:?}"),
    }
}

#[test]
fn saves_stamp_the_current_day() {
    let mut h = Harness::new(seeded(&today(), 2));
    h.clock
        .set_today(today_date().succ_opt().unwrap());
    h.app.add_glass();
    assert_eq!(
        h.stored().date,
        DayStamp::from_date(today_date().succ_opt().unwrap()).as_str()
    );
}

#[test]
fn failed_permission_request_shows_error_and_stays_undecided() {
    let mut h = Harness::build(
        MemoryStore::new(),
        Permission::Default,
        Err(NotificationError::PermissionRequest("blocked".into())),
    );
    h.take_log();
    match h.app.request_notifications() {
        Some(Event::PermissionFailed { reason, .. }) => assert!(reason.contains("blocked")),
        other => panic!("Expected PermissionFailed, got {other:?}"),
    }
    assert_eq!(
        h.in_app_titles(),
        vec!["🔔 Enable Notifications", "❌ Notification Error"]
    );
    assert_eq!(h.app.permission(), Permission::Default);
}

#[test]
fn event_timestamps_come_from_the_clock() {
    let mut h = Harness::new(MemoryStore::new());
    h.clock.advance_ms(90_000);
    match h.app.add_glass() {
        Event::GlassAdded { at, .. } => assert_eq!(at.timestamp_millis(), 90_000),
        other => panic!("Expected GlassAdded, got {other:?}"),
    }

    h.app.toggle_reminder("1").unwrap();
    h.clock.advance_minutes(1);
    match h.app.tick() {
        Some(Event::ReminderFired { at, .. }) => assert_eq!(at.timestamp_millis(), 150_000),
        other => panic!("Expected ReminderFired, got {other:?}"),
    }
}
