// Page settings and persistence
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::library::{default_tracks, Track};
use crate::mailing::DEFAULT_STORAGE_KEY;
use crate::page::BookContent;
use crate::reveal::DEFAULT_THRESHOLD_PX;

/// Scroll reveal settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    pub threshold_px: f64, // Distance above the viewport bottom edge
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            threshold_px: DEFAULT_THRESHOLD_PX,
        }
    }
}

/// Navigation bar settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    pub solid_after_px: f64,
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            solid_after_px: 60.0,
        }
    }
}

/// Mailing list settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupSettings {
    pub storage_key: String,
    pub confirmation_ms: i64, // How long the confirmation banner stays up
}

impl Default for SignupSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            confirmation_ms: 2500,
        }
    }
}

/// Main page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub version: i32, // Settings schema version for future migrations
    pub reveal: RevealSettings,
    pub nav: NavSettings,
    pub signup: SignupSettings,
    pub book: BookContent,
    pub tracks: Vec<Track>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            version: 1,
            reveal: RevealSettings::default(),
            nav: NavSettings::default(),
            signup: SignupSettings::default(),
            book: BookContent::default(),
            tracks: default_tracks(),
        }
    }
}

impl PageSettings {
    /// Get the settings file path
    pub fn get_settings_path(app_dir: &Path) -> PathBuf {
        app_dir.join("settings.json")
    }

    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load(app_dir: &Path) -> Result<Self, String> {
        let path = Self::get_settings_path(app_dir);

        if !path.exists() {
            tracing::info!("No settings file found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read settings file: {}", e))?;

        let settings: PageSettings = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse settings: {}", e))?;

        tracing::info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, app_dir: &Path) -> Result<(), String> {
        fs::create_dir_all(app_dir)
            .map_err(|e| format!("Failed to create settings directory: {}", e))?;

        let path = Self::get_settings_path(app_dir);
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        fs::write(&path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        tracing::info!(path = %path.display(), "Saved settings");
        Ok(())
    }
}
