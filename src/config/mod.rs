use std::fs;
use std::path::{Path, PathBuf};

use directories::UserDirs;
use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

const APP_DIR: &str = ".happybot";
const SETTINGS_FILE: &str = "settings.toml";

// SettingsError — why the settings store could not be used. Always
// recoverable: callers fall back to defaults and log, never surface it.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine home directory")]
    NoHome,
    #[error("no settings path configured")]
    NoPath,
    #[error("settings io: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("settings serialize: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Persisted user settings. The conversation core consumes only the
/// username; theme and font size are presentation hints kept for whatever
/// surface renders the chat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Path to settings.toml - computed, not serialized
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_font_size")]
    pub font_size: String,
}

fn default_username() -> String {
    "Friend".to_string()
}

fn default_font_size() -> String {
    "16px".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            username: default_username(),
            theme: Theme::default(),
            font_size: default_font_size(),
        }
    }
}

impl Settings {
    /// Load from the default location, creating the file on first run.
    /// Any store failure degrades to defaults; this never errors.
    #[must_use]
    pub fn load_or_init() -> Self {
        match Self::default_path() {
            Ok(path) => Self::load_or_init_at(path),
            Err(err) => {
                tracing::warn!(error = %err, "settings store unavailable, using defaults");
                Self::default()
            }
        }
    }

    /// Load from an explicit path, creating the file on first run. An
    /// unreadable or unparsable file yields defaults without overwriting it.
    #[must_use]
    pub fn load_or_init_at(path: PathBuf) -> Self {
        if path.exists() {
            match Self::read_from(&path) {
                Ok(mut settings) => {
                    settings.path = path;
                    settings
                }
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        path = %path.display(),
                        "could not read settings, using defaults"
                    );
                    Self {
                        path,
                        ..Self::default()
                    }
                }
            }
        } else {
            let settings = Self {
                path,
                ..Self::default()
            };
            if let Err(err) = settings.save() {
                tracing::warn!(error = %err, "could not write initial settings");
            }
            settings
        }
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        if self.path.as_os_str().is_empty() {
            return Err(SettingsError::NoPath);
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let rendered = toml::to_string_pretty(self)?;
        fs::write(&self.path, rendered)?;
        Ok(())
    }

    fn read_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn default_path() -> Result<PathBuf, SettingsError> {
        let home = UserDirs::new()
            .ok_or(SettingsError::NoHome)?
            .home_dir()
            .to_path_buf();
        Ok(home.join(APP_DIR).join(SETTINGS_FILE))
    }
}
