//! Game settings and preferences
//!
//! Read once at startup from an optional JSON file and environment
//! overrides. Nothing is written back.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Names the JSON settings file
pub const SETTINGS_PATH_VAR: &str = "BIRD_VOLLEY_SETTINGS";
/// Overrides the RNG seed
pub const SEED_VAR: &str = "BIRD_VOLLEY_SEED";
/// `1`/`true` mutes all audio
pub const MUTE_VAR: &str = "BIRD_VOLLEY_MUTE";

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

    // === Simulation ===
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
    /// Frames to run in headless mode before quitting
    pub headless_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            seed: None,
            headless_frames: 600,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON document. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| ConfigError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, volume) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(ConfigError::Settings(format!(
                    "{} must be within 0.0..=1.0, got {}",
                    name, volume
                )));
            }
        }
        Ok(())
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(SEED_VAR) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::Settings(format!("{}: {}", SEED_VAR, e)))?;
            self.seed = Some(seed);
        }
        if let Some(raw) = lookup(MUTE_VAR) {
            self.muted = matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes");
        }
        Ok(())
    }

    /// Load settings from the file named by `BIRD_VOLLEY_SETTINGS` plus
    /// environment overrides. Bad input is logged and replaced by defaults.
    pub fn load() -> Self {
        let mut settings = match std::env::var(SETTINGS_PATH_VAR) {
            Ok(path) => match std::fs::read_to_string(&path) {
                Ok(json) => match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from {}", path);
                        settings
                    }
                    Err(e) => {
                        log::warn!("Ignoring settings file {}: {}", path, e);
                        Self::default()
                    }
                },
                Err(e) => {
                    log::warn!("Cannot read settings file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        };

        let backup = settings.clone();
        if let Err(e) = settings.apply_overrides(|key| std::env::var(key).ok()) {
            log::warn!("Ignoring environment overrides: {}", e);
            settings = backup;
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 42, "muted": true }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert!(settings.muted);
        assert_eq!(settings.master_volume, Settings::default().master_volume);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(ConfigError::Settings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "sfx_volume": 1.5 }"#),
            Err(ConfigError::Settings(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_overrides(|key| match key {
                SEED_VAR => Some(" 7 ".to_string()),
                MUTE_VAR => Some("TRUE".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(settings.seed, Some(7));
        assert!(settings.muted);

        let err = settings.apply_overrides(|key| (key == SEED_VAR).then(|| "abc".to_string()));
        assert!(err.is_err());
    }
}
