//! Game settings
//!
//! Every field defaults to the matching constant in [`crate::consts`]. A JSON
//! file may override any subset; missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::consts::*;
use crate::error::{ConfigError, ConfigResult};
use crate::sim::ShapeKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ball ===
    /// Ball speed (pixels/second)
    pub ball_speed: f32,

    // === Blocks ===
    /// Block descent speed (pixels/second)
    pub block_speed: f32,
    /// Seconds between spawn attempts
    pub spawn_period: f32,
    /// Chance that a lane stays empty on a spawn attempt
    pub spawn_skip_probability: f64,
    /// Kinds drawn from (uniformly) when a lane spawns
    pub spawn_kinds: Vec<ShapeKind>,

    // === Walls ===
    /// Seconds the walls ignore the ball after a bounce
    pub wall_cooldown: f32,

    // === Runtime ===
    /// Frame-rate limiter target
    pub target_fps: i32,
    /// RNG seed; time-based when absent
    pub seed: Option<u64>,
    /// Frames the headless runner simulates before exiting
    pub demo_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ball_speed: BALL_SPEED,

            block_speed: BLOCK_DESCENT_SPEED,
            spawn_period: SPAWN_PERIOD,
            spawn_skip_probability: SPAWN_SKIP_PROBABILITY,
            spawn_kinds: ShapeKind::ALL.to_vec(),

            wall_cooldown: WALL_COOLDOWN,

            target_fps: TARGET_FPS,
            seed: None,
            demo_frames: 30 * TARGET_FPS as u64,
        }
    }
}

fn positive(name: &'static str, value: f64) -> ConfigResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidSetting {
            name,
            value,
            expected: "a positive number",
        })
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&text)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> ConfigResult<()> {
        positive("ball_speed", self.ball_speed as f64)?;
        positive("block_speed", self.block_speed as f64)?;
        positive("spawn_period", self.spawn_period as f64)?;
        if !(0.0..=1.0).contains(&self.spawn_skip_probability) {
            return Err(ConfigError::InvalidSetting {
                name: "spawn_skip_probability",
                value: self.spawn_skip_probability,
                expected: "between 0 and 1",
            });
        }
        if self.spawn_kinds.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "spawn_kinds",
                value: 0.0,
                expected: "a non-empty list",
            });
        }
        if !(self.wall_cooldown >= 0.0 && self.wall_cooldown.is_finite()) {
            return Err(ConfigError::InvalidSetting {
                name: "wall_cooldown",
                value: self.wall_cooldown as f64,
                expected: "zero or positive",
            });
        }
        if self.target_fps <= 0 {
            return Err(ConfigError::InvalidFrameRate(self.target_fps));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.ball_speed, 200.0);
        assert_eq!(settings.block_speed, 25.0);
        assert_eq!(settings.spawn_period, 3.0);
        assert_eq!(settings.target_fps, 180);
        assert_eq!(settings.spawn_kinds.len(), 3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "ball_speed": 320.0, "seed": 42 }"#).unwrap();
        assert_eq!(settings.ball_speed, 320.0);
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.block_speed, 25.0);
    }

    #[test]
    fn test_spawn_kinds_from_json() {
        let settings = Settings::from_json(r#"{ "spawn_kinds": ["rect", "ellipse"] }"#).unwrap();
        assert_eq!(settings.spawn_kinds, vec![ShapeKind::Rectangle, ShapeKind::Ellipse]);
    }

    #[test]
    fn test_unknown_kind_fails_loudly() {
        let err = Settings::from_json(r#"{ "spawn_kinds": ["star"] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "target_fps": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFrameRate(0)));

        let err = Settings::from_json(r#"{ "spawn_skip_probability": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "spawn_skip_probability",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "ball_speed": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { name: "ball_speed", .. }));

        let err = Settings::from_json(r#"{ "spawn_kinds": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { name: "spawn_kinds", .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
