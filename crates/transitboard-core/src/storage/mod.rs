mod config;
pub mod database;
pub mod kv;
pub mod preferences;

pub use config::{Config, LoggingConfig, NotificationsConfig, RefreshConfig, SourceConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryKv};
pub use preferences::{FontSize, Language, PreferenceStore, Preferences, Theme, UiSettings};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/transitboard[-dev]/` based on TRANSITBOARD_ENV.
///
/// Set TRANSITBOARD_ENV=dev to use the development data directory, or
/// TRANSITBOARD_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TRANSITBOARD_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TRANSITBOARD_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("transitboard-dev")
            } else {
                base_dir.join("transitboard")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
