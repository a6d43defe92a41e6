//! Game tuning settings
//!
//! Injected into a session at construction. Persisted as JSON on disk.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::LandingRule;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Slots per spoke (N)
    pub slots: usize,
    /// Smallest connected group that clears
    pub min_match: usize,

    // === Timing ===
    /// Fall speed in slots per second
    pub fall_speed: f32,
    /// Seconds between automatic spawns (driver only)
    pub spawn_interval: f32,

    // === Rules ===
    /// Where stopped blocks settle
    pub landing_rule: LandingRule,

    // === Layout ===
    /// Radius of the central hexagon
    pub hex_size: f32,
    /// Radial size of one slot
    pub block_size: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            slots: DEFAULT_SLOTS,
            min_match: MIN_MATCH,

            fall_speed: BLOCK_SPEED,
            spawn_interval: SPAWN_INTERVAL,

            landing_rule: LandingRule::SnapToCollision,

            hex_size: HEX_SIZE,
            block_size: BLOCK_SIZE,
        }
    }
}

impl Settings {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.slots == 0 {
            return Err(SettingsError::Invalid("slots must be at least 1".into()));
        }
        if self.min_match == 0 {
            return Err(SettingsError::Invalid("min_match must be at least 1".into()));
        }
        if !self.fall_speed.is_finite() || self.fall_speed <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "fall_speed must be positive, got {}",
                self.fall_speed
            )));
        }
        if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "spawn_interval must be positive, got {}",
                self.spawn_interval
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.slots, 8);
        assert_eq!(settings.min_match, 3);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "slots": 5, "landing_rule": "FirstOpenSlot" }"#)
            .unwrap();
        assert_eq!(settings.slots, 5);
        assert_eq!(settings.landing_rule, LandingRule::FirstOpenSlot);
        assert_eq!(settings.fall_speed, BLOCK_SPEED);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Settings::from_json(r#"{ "slots": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "fall_speed": -1.0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "min_match": 0 }"#),
            Err(SettingsError::Invalid(_))
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("hexfall_settings_{}.json", std::process::id()));
        let settings = Settings {
            slots: 6,
            spawn_interval: 1.5,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/hexfall/settings.json");
        assert!(matches!(Settings::load(path), Err(SettingsError::Io(_))));
    }
}
