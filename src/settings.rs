//! Player settings stored in `~/.dino-runner/settings.json`.

use crate::core::SpeedMode;
use crate::session::SessionOptions;
use crate::skins::SkinId;
use crate::utils::persistence::{load_json_or_default, save_json, save_path, SETTINGS_FILE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub speed_mode: SpeedMode,
    pub audio_cues: bool,
    /// Name of the skin unlocked by the collectable.
    pub alt_skin: Option<String>,
    pub arcade: bool,
    pub dark_mode: bool,
    /// When set, the game is replaced by this notice.
    pub disabled_notice: Option<String>,
    /// Fixed seed for procedural generation; random when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed_mode: SpeedMode::Normal,
            audio_cues: false,
            alt_skin: None,
            arcade: false,
            dark_mode: false,
            disabled_notice: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    UnknownSkin(String),
    /// The classic skin is always the base and cannot be the alternate.
    ClassicAsAlternate,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSkin(name) => write!(f, "unknown skin '{}'", name),
            Self::ClassicAsAlternate => write!(f, "the classic skin cannot be the alternate skin"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl Settings {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match save_path(SETTINGS_FILE) {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!(error = %e, "no settings directory, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let settings: Self = load_json_or_default(path);
        if let Err(e) = settings.validate() {
            tracing::warn!(error = %e, "invalid settings, alternate skin ignored");
            return Self {
                alt_skin: None,
                ..settings
            };
        }
        settings
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        save_json(path, self)
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&save_path(SETTINGS_FILE)?)
    }

    /// Parsed alternate skin.
    pub fn alt_skin_id(&self) -> Result<Option<SkinId>, SettingsError> {
        let Some(name) = self.alt_skin.as_deref() else {
            return Ok(None);
        };
        match SkinId::from_name(name) {
            Some(SkinId::Classic) => Err(SettingsError::ClassicAsAlternate),
            Some(id) => Ok(Some(id)),
            None => Err(SettingsError::UnknownSkin(name.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.alt_skin_id().map(|_| ())
    }

    /// Session options for a canvas of the given width.
    pub fn session_options(&self, width: f64, seed: u64) -> SessionOptions {
        SessionOptions {
            width,
            speed_mode: self.speed_mode,
            audio_cues: self.audio_cues,
            alt_skin: self.alt_skin_id().ok().flatten(),
            arcade: self.arcade,
            dark_mode: self.dark_mode,
            seed: self.seed.unwrap_or(seed),
            ..SessionOptions::default()
        }
    }
}
