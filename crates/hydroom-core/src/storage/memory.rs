use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{ProgressRecord, ProgressStore};
use crate::error::PersistenceError;

/// Volatile store holding the raw JSON text of the record.
///
/// Clones share the same slot, so a caller can keep a handle to inspect
/// what the controller wrote, or seed it with arbitrary (even malformed)
/// content.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    raw: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_raw(raw);
        store
    }

    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.raw.borrow_mut() = Some(raw.into());
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }

    /// Make every subsequent save fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<ProgressRecord>, PersistenceError> {
        self.raw
            .borrow()
            .as_deref()
            .map(ProgressRecord::from_json)
            .transpose()
    }

    fn save(&mut self, record: &ProgressRecord) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Write {
                location: "memory".into(),
                message: "writes disabled".into(),
            });
        }
        *self.raw.borrow_mut() = Some(record.to_json()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_none() {
        assert!(MemoryStore::new().load().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let rec = ProgressRecord {
            date: "Mon Oct 19 2026".into(),
            glasses: 2,
        };
        store.save(&rec).unwrap();
        assert_eq!(store.load().unwrap(), Some(rec));
    }

    #[test]
    fn failing_writes_leave_content() {
        let mut store = MemoryStore::with_raw(r#"{"date":"x","glasses":1}"#);
        store.fail_writes(true);
        assert!(store.save(&ProgressRecord::default()).is_err());
        assert_eq!(store.raw().as_deref(), Some(r#"{"date":"x","glasses":1}"#));
    }
}
