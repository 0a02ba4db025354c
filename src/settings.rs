use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine a config directory")]
    NoConfigDir,
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed settings in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    /// Flip changed digits in current-time mode.
    pub animate_now: bool,
    /// Play a chime when a countdown reaches zero.
    pub chime: bool,
    pub disable_hardware_acceleration: bool,
    /// Toggle the mode on SIGUSR1, for desktop-wide shortcuts.
    pub signal_relay: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            animate_now: false,
            chime: true,
            disable_hardware_acceleration: false,
            signal_relay: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Fixed outer position; `None` pins the window to the top-right corner.
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub always_on_top: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            always_on_top: true,
        }
    }
}

impl WindowSettings {
    pub fn position(&self) -> Option<[f32; 2]> {
        Some([self.x?, self.y?])
    }
}

impl Settings {
    /// `settings.json` in the per-user config directory.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let dirs = crate::project_dirs().ok_or(SettingsError::NoConfigDir)?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Loads settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| SettingsError::Json {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads from `path` or the default location, logging and falling back to
    /// defaults on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_owned(),
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    log::warn!("{}; using default settings", e);
                    return Self::default();
                }
            },
        };
        match Self::load_from(&path) {
            Ok(settings) => {
                log::debug!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }
}
