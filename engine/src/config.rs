//! Controller Configuration
//!
//! Tuning values for the player controller. `ControllerConfig::default()`
//! returns the shipped tuning; a JSON document only needs the fields it
//! overrides.
//!
//! ```ignore
//! let config = ControllerConfig::from_json_str(r#"{ "walk_speed": 6.0 }"#)?;
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Player mass in kg. Must be positive.
    pub mass: f32,
    /// Spawn velocity, scaled by the gravity reference time step
    pub initial_velocity: Vec3,
    /// Walking speed in m/s
    pub walk_speed: f32,
    /// Running speed in m/s
    pub running_speed: f32,
    /// Upward speed added on jump, in m/s
    pub jump_force: f32,
    /// Jetpack thrust in N
    pub jetpack_force: f32,
    /// Downward impulse in N·s applied every grounded movement tick
    pub stick_to_ground_force: f32,
    /// Degrees of rotation per unit of mouse input
    pub mouse_sensitivity: f32,
    /// Camera pitch limit in degrees (applied symmetrically)
    pub vertical_rotation_limit: f32,
    /// Rate at which the body re-aligns with the planet's up, per second
    pub stand_up_speed: f32,
    /// Yaw added to the seat pose when sitting, in degrees
    pub seat_yaw_correction_degrees: f32,
    /// Camera height above the body origin in meters
    pub eye_height: f32,
    /// Player collision sphere radius in meters
    pub collider_radius: f32,
    /// Vertical field of view in radians
    pub camera_fov: f32,
    /// Screen aspect ratio (width / height)
    pub camera_aspect: f32,
    /// Gaze reach in meters; `None` is unlimited
    pub max_gaze_distance: Option<f32>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            mass: 70.0,
            initial_velocity: Vec3::ZERO,
            walk_speed: 4.0,
            running_speed: 8.0,
            jump_force: 6.0,
            jetpack_force: 700.0,
            stick_to_ground_force: 2.0,
            mouse_sensitivity: 1.5,
            vertical_rotation_limit: 90.0,
            stand_up_speed: 5.0,
            seat_yaw_correction_degrees: 90.0,
            eye_height: 0.7,
            collider_radius: 0.5,
            camera_fov: 1.2,
            camera_aspect: 16.0 / 9.0,
            max_gaze_distance: None,
        }
    }
}

impl ControllerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass > 0.0) || !self.mass.is_finite() {
            return Err(ConfigError::Invalid(format!("mass must be positive, got {}", self.mass)));
        }
        let non_negative = [
            ("walk_speed", self.walk_speed),
            ("running_speed", self.running_speed),
            ("jump_force", self.jump_force),
            ("jetpack_force", self.jetpack_force),
            ("stick_to_ground_force", self.stick_to_ground_force),
            ("stand_up_speed", self.stand_up_speed),
            ("vertical_rotation_limit", self.vertical_rotation_limit),
            ("collider_radius", self.collider_radius),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must not be negative, got {value}")));
            }
        }
        if !(self.camera_fov > 0.0 && self.camera_aspect > 0.0) {
            return Err(ConfigError::Invalid("camera fov and aspect must be positive".into()));
        }
        if let Some(distance) = self.max_gaze_distance {
            if !(distance > 0.0) {
                return Err(ConfigError::Invalid(format!("max_gaze_distance must be positive, got {distance}")));
            }
        }
        Ok(())
    }

    /// Speed for the current run state.
    pub fn movement_speed(&self, running: bool) -> f32 {
        if running {
            self.running_speed
        } else {
            self.walk_speed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.mouse_sensitivity, 1.5);
        assert_eq!(config.vertical_rotation_limit, 90.0);
        assert_eq!(config.stand_up_speed, 5.0);
        assert_eq!(config.seat_yaw_correction_degrees, 90.0);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config = ControllerConfig::from_json_str(
            r#"{ "walk_speed": 6.5, "initial_velocity": [1.0, 2.0, 3.0] }"#,
        )
        .unwrap();
        assert_eq!(config.walk_speed, 6.5);
        assert_eq!(config.initial_velocity, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.running_speed, ControllerConfig::default().running_speed);
    }

    #[test]
    fn test_rejects_non_positive_mass() {
        let err = ControllerConfig::from_json_str(r#"{ "mass": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ControllerConfig::from_json_str("{ walk_speed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_json_round_trip_keeps_values() {
        let mut config = ControllerConfig::default();
        config.max_gaze_distance = Some(4.0);
        let json = config.to_json_pretty().unwrap();
        assert_eq!(ControllerConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_movement_speed() {
        let config = ControllerConfig::default();
        assert_eq!(config.movement_speed(false), config.walk_speed);
        assert_eq!(config.movement_speed(true), config.running_speed);
    }
}
