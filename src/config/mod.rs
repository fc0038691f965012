//! Configuration management module
//!
//! Handles loading and validation of user preferences: the setup screen
//! defaults, the UI tick rate and the log filter. Preferences are read-only,
//! nothing about a game is ever written back.

use crate::drill::DrillSettings;
use crate::{Result, XDrillsError, APP_NAME, CONFIG_FILE, DEFAULT_LOG_FILTER};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User preferences loaded from `xdrills.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Table preselected on the setup screen
    pub default_multiplier: u32,
    /// Question count preselected on the setup screen
    pub default_difficulty: u32,
    /// Event poll interval of the TUI loop in milliseconds
    pub tick_rate_ms: u64,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for Preferences {
    fn default() -> Self {
        let settings = DrillSettings::default();
        Self {
            default_multiplier: settings.multiplier(),
            default_difficulty: settings.difficulty(),
            tick_rate_ms: 250,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Preferences {
    /// Validate the preference values
    pub fn validate(&self) -> Result<()> {
        self.default_settings()?;

        const MIN_TICK_MS: u64 = 10;
        const MAX_TICK_MS: u64 = 5_000;
        if self.tick_rate_ms < MIN_TICK_MS || self.tick_rate_ms > MAX_TICK_MS {
            return Err(XDrillsError::ConfigError(format!(
                "Tick rate must be between {} and {} ms (got {})",
                MIN_TICK_MS, MAX_TICK_MS, self.tick_rate_ms
            )));
        }

        if self.log_filter.trim().is_empty() {
            return Err(XDrillsError::ConfigError(
                "Log filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings the setup screen starts from
    pub fn default_settings(&self) -> Result<DrillSettings> {
        DrillSettings::new(self.default_multiplier, self.default_difficulty)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Load preferences from the standard config file location.
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load preferences from an explicit path, defaults if it is missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no preferences file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| {
            XDrillsError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let prefs: Self = toml::from_str(&content).map_err(|e| {
            XDrillsError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        prefs.validate()?;
        tracing::debug!(path = %config_path.display(), "preferences loaded");

        Ok(prefs)
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/xdrills/xdrills.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            XDrillsError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
