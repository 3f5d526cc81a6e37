//! User settings persistence.
//!
//! Settings supply defaults for options the command line leaves out.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::OutputKind;

/// User settings that persist across runs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Output kind when `--format` is not given
    #[serde(default)]
    pub default_format: OutputKind,
    /// Output path when `--output` is not given
    #[serde(default)]
    pub default_output: Option<PathBuf>,
    /// Author written into PDF metadata
    #[serde(default = "default_author")]
    pub author: String,
    /// Always use the Seagate raw value interpretation
    #[serde(default)]
    pub seagate: bool,
}

fn default_version() -> u32 {
    1
}

fn default_author() -> String {
    "smartplot".to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: 1,
            default_format: OutputKind::default(),
            default_output: None,
            author: default_author(),
            seagate: false,
        }
    }
}

impl UserSettings {
    /// Get the config directory path for smartplot
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("smartplot"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|p| p.join("smartplot"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        self.save_to(&path)
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}
