mod config;
pub mod database;
mod memory;
mod record;

pub use config::{Config, NotificationsConfig, RemindersConfig, SoundConfig};
pub use database::Database;
pub use memory::MemoryStore;
pub use record::{ProgressRecord, ProgressStore, PROGRESS_KEY};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `HYDROOM_DATA_DIR` wins when set. Otherwise `~/.config/hydroom[-dev]/`
/// based on HYDROOM_ENV (set HYDROOM_ENV=dev for a development directory).
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("HYDROOM_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HYDROOM_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("hydroom-dev")
            } else {
                base_dir.join("hydroom")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
