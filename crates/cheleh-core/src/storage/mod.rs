mod config;
pub mod database;
pub mod gateway;

pub use config::{CalendarConfig, Config, StorageConfig, Theme, UiConfig};
pub use database::Database;
pub use gateway::HabitStore;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/cheleh[-dev]/` based on CHELEH_ENV.
///
/// Set CHELEH_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CHELEH_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("cheleh-dev")
    } else {
        base_dir.join("cheleh")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
