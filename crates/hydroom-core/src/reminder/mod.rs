mod interval;
mod scheduler;

pub use interval::{parse_interval, validate_interval, MAX_INTERVAL_MINUTES, MIN_INTERVAL_MINUTES};
pub use scheduler::{ReminderScheduler, ReminderState, TickOutcome};
