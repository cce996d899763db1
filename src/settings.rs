use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;

pub const DEFAULT_MAX_RECENT_FILES: usize = 5;
pub const DEFAULT_RADARE2_PATH: &str = "radare2";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub theme: String,
    pub radare2_path: String,
    pub max_recent_files: usize,
    /// Most recently opened first.
    pub recent_file_list: Vec<PathBuf>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            radare2_path: DEFAULT_RADARE2_PATH.to_string(),
            max_recent_files: DEFAULT_MAX_RECENT_FILES,
            recent_file_list: Vec::new(),
        }
    }
}

/// Location of the settings file. Every read and write goes through here.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/r2launch/settings.json`, creating the directory if needed.
    pub fn default_location() -> Result<Self, SettingsError> {
        let mut path = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        path.push("r2launch");
        fs::create_dir_all(&path).map_err(|source| SettingsError::Write {
            path: path.clone(),
            source,
        })?;
        path.push("settings.json");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Falls back to defaults when the file is missing or unreadable.
    pub fn load(&self) -> AppSettings {
        if let Ok(json) = fs::read_to_string(&self.path) {
            match serde_json::from_str(&json) {
                Ok(settings) => return settings,
                Err(e) => log::warn!("Ignoring malformed settings {}: {}", self.path.display(), e),
            }
        }
        AppSettings::default()
    }

    pub fn save(&self, settings: &AppSettings) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(&self.path, json).map_err(|source| SettingsError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
