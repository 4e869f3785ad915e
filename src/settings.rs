use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;

pub const DEFAULT_MOVEMENT_SPEED: f32 = 1.0;
pub const DEFAULT_MOVEMENT_ACCELERATION: f32 = 0.15;
pub const DEFAULT_LOOK_SPEED: f32 = 0.005;
pub const DEFAULT_MAX_MOVEMENT_SPEED: f32 = 2.0;

/// Tunable behaviour of [`FirstPersonController`](crate::controller::FirstPersonController).
///
/// Every field has a default, so a settings file only needs the values it
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Master switch for `update()`
    pub enabled: bool,

    pub movement_speed: f32,
    /// Added to the velocity multiplier every frame sprint is held
    pub movement_acceleration: f32,
    /// Degrees of rotation per unit of pointer movement
    pub look_speed: f32,
    /// Cap on the per-frame translation distance
    pub max_movement_speed: f32,

    pub look_vertical: bool,
    pub auto_forward: bool,
    pub active_look: bool,
    /// Request pointer lock on pointer-down
    pub capture_mouse: bool,

    /// Move faster the higher the camera is, between `height_min` and `height_max`
    pub height_speed: bool,
    pub height_coef: f32,
    pub height_min: f32,
    pub height_max: f32,

    /// Restrict the polar angle to `[vertical_min, vertical_max]` (radians)
    pub constrain_vertical: bool,
    pub vertical_min: f32,
    pub vertical_max: f32,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            movement_acceleration: DEFAULT_MOVEMENT_ACCELERATION,
            look_speed: DEFAULT_LOOK_SPEED,
            max_movement_speed: DEFAULT_MAX_MOVEMENT_SPEED,
            look_vertical: true,
            auto_forward: false,
            active_look: true,
            capture_mouse: true,
            height_speed: false,
            height_coef: 1.0,
            height_min: 0.0,
            height_max: 1.0,
            constrain_vertical: false,
            vertical_min: 0.0,
            vertical_max: PI,
        }
    }
}

impl ControllerSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid controller settings JSON")
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .context(format!("Failed to read settings file: {:?}", path))?;

        Self::from_json(&text).context(format!("Failed to parse settings file: {:?}", path))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize controller settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let s = ControllerSettings::default();
        assert!(s.enabled);
        assert_eq!(s.movement_speed, 1.0);
        assert_eq!(s.movement_acceleration, 0.15);
        assert_eq!(s.look_speed, 0.005);
        assert!(s.look_vertical);
        assert!(!s.auto_forward);
        assert!(s.active_look);
        assert!(s.capture_mouse);
        assert!(!s.height_speed);
        assert_eq!(s.height_coef, 1.0);
        assert_eq!(s.height_min, 0.0);
        assert_eq!(s.height_max, 1.0);
        assert!(!s.constrain_vertical);
        assert_eq!(s.vertical_min, 0.0);
        assert_eq!(s.vertical_max, PI);
        assert_eq!(s.max_movement_speed, 2.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = ControllerSettings::from_json(r#"{ "movement_speed": 4.0, "capture_mouse": false }"#)
            .unwrap();
        assert_eq!(s.movement_speed, 4.0);
        assert!(!s.capture_mouse);
        assert_eq!(s.look_speed, DEFAULT_LOOK_SPEED);
        assert!(s.enabled);
    }

    #[test]
    fn test_empty_object_is_default() {
        let s = ControllerSettings::from_json("{}").unwrap();
        assert_eq!(s, ControllerSettings::default());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(ControllerSettings::from_json("{ movement_speed: ").is_err());
        assert!(ControllerSettings::from_json(r#"{ "enabled": "yes" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut s = ControllerSettings::default();
        s.constrain_vertical = true;
        s.vertical_min = 0.5;
        let json = s.to_json().unwrap();
        assert_eq!(ControllerSettings::from_json(&json).unwrap(), s);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = ControllerSettings::load("/nonexistent/controls.json").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read settings file"));
    }
}
