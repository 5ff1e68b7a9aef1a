//! Game settings and preferences
//!
//! The preferences blob is the only persisted data: audio levels, gameplay
//! rules, the last selected mode and the high score boards. Stored as JSON.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AudioManager;
use crate::effects::EffectQueue;
use crate::highscores::HighScores;
use crate::sim::{EngineConfig, GameMode, ReloadPolicy};

/// Failure reading or writing the preferences blob
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings I/O error: {}", e),
            SettingsError::Json(e) => write!(f, "malformed settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(e: io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,

    // === Visual Effects ===
    /// Feather and spark bursts on hits
    pub particles: bool,
    /// Crosshair catch-up rate per second, `None` = follow the pointer exactly
    pub crosshair_smoothing: Option<f32>,

    // === Gameplay ===
    /// Mode highlighted in the menu
    pub last_mode: GameMode,
    pub reload_policy: ReloadPolicy,
    /// Ducks that fly off screen cost a life
    pub missed_duck_costs_life: bool,

    pub high_scores: HighScores,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,

            particles: true,
            crosshair_smoothing: None,

            last_mode: GameMode::Normal,
            reload_policy: ReloadPolicy::Manual,
            missed_duck_costs_life: false,

            high_scores: HighScores::new(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Engine tuning derived from the gameplay preferences
    pub fn engine_config(&self, seed: u64) -> EngineConfig {
        EngineConfig {
            seed,
            reload_policy: self.reload_policy,
            missed_duck_costs_life: self.missed_duck_costs_life,
            crosshair_smoothing: self.crosshair_smoothing,
        }
    }

    pub fn apply_audio(&self, audio: &mut AudioManager) {
        audio.set_master_volume(self.master_volume);
        audio.set_sfx_volume(self.sfx_volume);
        audio.set_muted(self.muted);
    }

    pub fn apply_effects(&self, effects: &mut EffectQueue) {
        effects.set_enabled(self.particles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioSink, SoundEffect};
    use crate::highscores::HighScoreEntry;

    #[test]
    fn test_partial_blob_fills_defaults() {
        let settings = Settings::from_json(r#"{"muted": true, "last_mode": "Hard"}"#).unwrap();
        assert!(settings.muted);
        assert_eq!(settings.last_mode, GameMode::Hard);
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.reload_policy, ReloadPolicy::Manual);
        assert!(settings.high_scores.is_empty());
    }

    #[test]
    fn test_malformed_blob_is_json_error() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, SettingsError::Json(_)));
        assert!(err.to_string().starts_with("malformed settings"));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("duck_hunter_settings_{}.json", std::process::id()));
        let mut settings = Settings {
            reload_policy: ReloadPolicy::Auto,
            crosshair_smoothing: Some(12.0),
            ..Default::default()
        };
        settings.high_scores.add_score(
            GameMode::Easy,
            HighScoreEntry {
                score: 1200,
                hits: 9,
                accuracy: 0.75,
                duration: 42.0,
            },
        );
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("duck_hunter_settings_does_not_exist.json");
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }

    #[test]
    fn test_engine_config_and_audio() {
        let settings = Settings {
            missed_duck_costs_life: true,
            muted: true,
            ..Default::default()
        };
        let config = settings.engine_config(7);
        assert_eq!(config.seed, 7);
        assert!(config.missed_duck_costs_life);
        assert_eq!(config.crosshair_smoothing, None);

        let mut audio = AudioManager::new();
        settings.apply_audio(&mut audio);
        audio.play(SoundEffect::ShotFired);
        assert!(audio.drain().is_empty());
    }
}
