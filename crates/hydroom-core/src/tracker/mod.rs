mod messages;
mod progress;

pub use messages::{message_for, FALLBACK_MESSAGE, MOTIVATIONAL_MESSAGES};
pub use progress::{Increment, ProgressTracker, Snapshot, DAILY_GOAL};
