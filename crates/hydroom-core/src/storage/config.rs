//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default reminder interval
//! - Sound preferences
//! - Whether system notifications are allowed
//!
//! Configuration is stored at `~/.config/hydroom/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::ConfigError;
use crate::reminder::validate_interval;

/// Reminder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemindersConfig {
    /// Minutes between reminders when no interval is given explicitly.
    #[serde(default = "default_interval")]
    pub default_interval: u32,
}

/// Sound configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Master volume in percent. When unset each sound keeps its own level.
    #[serde(default)]
    pub volume: Option<u32>,
}

/// Notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Answer given when the session asks for system notification permission.
    #[serde(default = "default_true")]
    pub system_enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub reminders: RemindersConfig,
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_interval() -> u32 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for RemindersConfig {
    fn default() -> Self {
        Self {
            default_interval: default_interval(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: None,
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            system_enabled: true,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn parse_number(key: &str, value: &str) -> Result<serde_json::Value, ConfigError> {
        if let Ok(n) = value.parse::<u64>() {
            return Ok(serde_json::Value::Number(n.into()));
        }
        value
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(serde_json::Value::Number)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("cannot parse '{value}' as number"),
            })
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                // "none" clears optional keys; deserializing rejects it for the rest.
                let new_value = match existing {
                    _ if value.eq_ignore_ascii_case("none") => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => {
                        let parsed =
                            value
                                .parse::<bool>()
                                .map_err(|e| ConfigError::InvalidValue {
                                    key: key.to_string(),
                                    message: e.to_string(),
                                })?;
                        serde_json::Value::Bool(parsed)
                    }
                    serde_json::Value::Number(_) | serde_json::Value::Null => {
                        Self::parse_number(key, value)?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        data_dir()
            .map(|dir| dir.join("config.toml"))
            .map_err(|e| ConfigError::DataDir(e.to_string()))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    ///
    /// An existing file is never overwritten, even when it cannot be read.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string())),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Reject values the rest of the app cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_interval(i64::from(self.reminders.default_interval)).map_err(|e| {
            ConfigError::InvalidValue {
                key: "reminders.default_interval".into(),
                message: e.to_string(),
            }
        })?;
        if let Some(volume) = self.sound.volume {
            if volume > 100 {
                return Err(ConfigError::InvalidValue {
                    key: "sound.volume".into(),
                    message: format!("{volume} is above 100"),
                });
            }
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key in memory. Returns error if key is unknown
    /// or the result fails validation; `self` is left untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Master volume as a `0.0..=1.0` level, if configured.
    pub fn volume_level(&self) -> Option<f32> {
        self.sound.volume.map(|v| v as f32 / 100.0)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
