//! # Hydroom Core Library
//!
//! This library provides the core logic for the Hydroom water tracker: a
//! daily glass counter with a fixed goal, a repeating reminder timer, and
//! the controller that ties them to storage, notifications, sound and
//! rendering. The CLI binary is a thin terminal layer over the same core.
//!
//! ## Architecture
//!
//! - **Progress Tracker**: Saturating counter with day-rollover rules
//! - **Reminder Scheduler**: Wall-clock-driven repeating timer; the caller
//!   invokes `tick()` periodically, there is no internal thread
//! - **Storage**: SQLite key-value progress record and TOML configuration
//! - **Collaborators**: Traits for notifications, sound, rendering and
//!   confirmation prompts
//!
//! ## Key Components
//!
//! - [`ProgressTracker`]: Glass count and goal completion
//! - [`ReminderScheduler`]: Idle/Active reminder state machine
//! - [`AppController`]: Reacts to user actions and timer ticks
//! - [`Database`]: Progress persistence
//! - [`Config`]: Application configuration management

pub mod app;
pub mod clock;
pub mod collaborators;
pub mod error;
pub mod events;
pub mod reminder;
pub mod storage;
pub mod tracker;

pub use app::{reminder_message, AppController, Collaborators, SoundSettings};
pub use clock::{Clock, DayStamp, ManualClock, SystemClock};
pub use collaborators::{
    Confirm, NotificationGateway, Permission, Renderer, SoundId, SoundPlayer,
    SystemNotificationOptions,
};
pub use error::{ConfigError, CoreError, NotificationError, PersistenceError, ReminderError};
pub use events::Event;
pub use reminder::{parse_interval, ReminderScheduler, ReminderState, TickOutcome};
pub use storage::{Config, Database, MemoryStore, ProgressRecord, ProgressStore};
pub use tracker::{message_for, Increment, ProgressTracker, Snapshot, DAILY_GOAL};
