//! Console settings

use std::path::{Path, PathBuf};

use radar_gauge::GaugeConfig;
use radar_sim::SimulatedRadarConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine settings path")]
    NoConfigDir,

    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings are not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Console settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Arguments used when the console's gauge initializes the radar
    #[serde(default)]
    pub gauge: GaugeConfig,
    /// Initial state of the simulated radar
    #[serde(default)]
    pub radar: SimulatedRadarConfig,
    /// Snapshot file, defaults to `radar.snapshot` in the config directory
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl Settings {
    /// Get the XDG config directory for the console
    /// Uses $XDG_CONFIG_HOME/radar-console, falls back to ~/.config/radar-console
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("radar-console"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("radar-console"))
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location
    ///
    /// Missing or unreadable settings fall back to defaults.
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load settings from a specific file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a specific file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the snapshot file location
    pub fn snapshot_file(&self) -> Option<PathBuf> {
        self.snapshot_path
            .clone()
            .or_else(|| Self::config_dir().map(|p| p.join("radar.snapshot")))
    }
}
