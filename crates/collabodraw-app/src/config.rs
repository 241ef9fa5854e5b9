//! Application configuration.
//!
//! Read from `<config dir>/collabodraw/config.json` on native targets. Every
//! field has a default, so a partial file is fine and a missing file means
//! all defaults.

use collabodraw_core::HexColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse configuration at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    /// Size of the board surface, in board units.
    pub surface_width: u32,
    pub surface_height: u32,
    /// Size of exported images.
    pub export_width: u32,
    pub export_height: u32,
    pub background_color: HexColor,
    pub autosave_interval_secs: u64,
    pub cursor_refresh_secs: u64,
    /// Directory for board files instead of the platform data dir.
    pub storage_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "CollaboDraw".to_string(),
            surface_width: 2000,
            surface_height: 1500,
            export_width: 1920,
            export_height: 1080,
            background_color: HexColor::white(),
            autosave_interval_secs: 30,
            cursor_refresh_secs: 2,
            storage_dir: None,
        }
    }
}

impl AppConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the default config file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// `<config dir>/collabodraw/config.json`
    pub fn default_path() -> Option<PathBuf> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dirs::config_dir().map(|dir| dir.join("collabodraw").join("config.json"))
        }
        #[cfg(target_arch = "wasm32")]
        {
            None
        }
    }
}
