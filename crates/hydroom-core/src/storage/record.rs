//! The persisted progress record and the store contract.

use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Storage key for the single progress record, shared with the web tracker.
pub const PROGRESS_KEY: &str = "waterTrackerProgress";

/// One day's progress as stored on disk: `{"date": "...", "glasses": n}`.
///
/// Missing fields default instead of failing, so older or partial records
/// still load (and then fail the date check).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProgressRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub glasses: i64,
}

impl ProgressRecord {
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Durable storage for the progress record.
pub trait ProgressStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<ProgressRecord>, PersistenceError>;

    fn save(&mut self, record: &ProgressRecord) -> Result<(), PersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let rec = ProgressRecord::from_json("{}").unwrap();
        assert_eq!(rec, ProgressRecord::default());

        let rec = ProgressRecord::from_json(r#"{"date":"Mon Oct 19 2026"}"#).unwrap();
        assert_eq!(rec.glasses, 0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let rec =
            ProgressRecord::from_json(r#"{"date":"Mon Oct 19 2026","glasses":3,"extra":true}"#)
                .unwrap();
        assert_eq!(rec.glasses, 3);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            ProgressRecord::from_json("{not json"),
            Err(PersistenceError::Parse(_))
        ));
    }

    #[test]
    fn serializes_with_legacy_field_names() {
        let rec = ProgressRecord {
            date: "Mon Oct 19 2026".into(),
            glasses: 4,
        };
        let json: serde_json::Value = serde_json::from_str(&rec.to_json().unwrap()).unwrap();
        assert_eq!(json["date"], "Mon Oct 19 2026");
        assert_eq!(json["glasses"], 4);
    }
}
