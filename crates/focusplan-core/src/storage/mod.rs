mod config;

pub use config::{Config, PlannerConfig, PreferencesConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/focusplan[-dev]/` based on FOCUSPLAN_ENV.
///
/// Set FOCUSPLAN_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focusplan-dev")
    } else {
        base_dir.join("focusplan")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
