//! Wall-clock access for the controller and the reminder scheduler.
//!
//! Nothing in the core reads the system time directly. The controller asks a
//! [`Clock`] for the current instant (to drive reminder ticks) and for the
//! current calendar day (to stamp and validate persisted progress), so tests
//! can substitute [`ManualClock`] and never wait on real time.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Device-local calendar day identifier, compared by equality only.
///
/// Rendered as `Mon Oct 19 2026` so records written by earlier versions of
/// the tracker keep matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayStamp(String);

impl DayStamp {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%a %b %d %Y").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DayStamp {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DayStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// Today's calendar day on this device.
    fn today(&self) -> DayStamp;

    /// `now_ms` as a UTC timestamp, used to stamp events.
    fn now_utc(&self) -> DateTime<Utc> {
        i64::try_from(self.now_ms())
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .unwrap_or_default()
    }
}

/// Real time, local calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn today(&self) -> DayStamp {
        DayStamp::from_date(Local::now().date_naive())
    }
}

/// Hand-driven clock. Clones share the same underlying time, so a test can
/// keep one handle while the controller owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now_ms: Rc<Cell<u64>>,
    today: Rc<RefCell<DayStamp>>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            now_ms: Rc::new(Cell::new(0)),
            today: Rc::new(RefCell::new(DayStamp::from_date(today))),
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get().saturating_add(ms));
    }

    pub fn advance_minutes(&self, minutes: u64) {
        self.advance_ms(minutes * 60_000);
    }

    pub fn set_today(&self, date: NaiveDate) {
        *self.today.borrow_mut() = DayStamp::from_date(date);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    fn today(&self) -> DayStamp {
        self.today.borrow().clone()
    }
}
