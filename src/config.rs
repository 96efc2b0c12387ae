use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Application configuration for the command-line player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned for sound preset files
    pub preset_dir: String,

    /// Path to the music track, if any
    pub music_file: Option<String>,

    /// Start music as soon as the manager initializes
    pub play_music_on_start: bool,

    /// Whether the music track loops
    pub loop_music: bool,

    /// Global sound effects switch
    pub sound_effects_enabled: bool,

    /// Music volume (0.0-1.0)
    pub music_volume: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preset_dir: "presets".to_string(),
            music_file: None,
            play_music_on_start: true,
            loop_music: true,
            sound_effects_enabled: true,
            music_volume: 1.0,
        }
    }
}

impl Config {
    /// Load configuration from the app's config directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::LoadFailed {
                path: config_path.display().to_string(),
                source: Box::new(e),
            })?;
            let config = serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: config_path.display().to_string(),
                source: Box::new(e),
            })?;
            tracing::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            tracing::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: config_path.display().to_string(),
                source: Box::new(e),
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(e),
        })?;
        fs::write(&config_path, json).map_err(|e| ConfigError::SaveFailed {
            path: config_path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }

    /// Get the config file path (in app's base directory)
    fn config_path() -> Result<PathBuf, ConfigError> {
        let exe_path = env::current_exe().map_err(|_| ConfigError::NoConfigDir)?;
        let exe_dir = exe_path.parent().ok_or(ConfigError::NoConfigDir)?;

        Ok(exe_dir.join("config").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.preset_dir, "presets");
        assert!(config.music_file.is_none());
        assert!(config.play_music_on_start);
        assert!(config.loop_music);
        assert!(config.sound_effects_enabled);
        assert_eq!(config.music_volume, 1.0);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(config.preset_dir, deserialized.preset_dir);
        assert_eq!(config.loop_music, deserialized.loop_music);
        assert_eq!(config.music_volume, deserialized.music_volume);
    }
}
