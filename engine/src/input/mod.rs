//! Input Module
//!
//! The controller never reads devices. A host maps whatever devices it has
//! onto [`ControlInput`] once per tick and hands it to the active controller.
//!
//! # Example
//!
//! ```rust,ignore
//! use orbital_walker_engine::input::ControlInput;
//! use glam::Vec2;
//!
//! let input = ControlInput {
//!     movement: Vec2::new(0.0, 1.0), // forward
//!     running: true,
//!     ..Default::default()
//! };
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Screen center in normalized coordinates
pub const SCREEN_CENTER: Vec2 = Vec2::new(0.5, 0.5);

/// Pre-normalized per-tick input.
///
/// Axis conventions:
/// - `movement`: x = strafe right, y = forward
/// - `space_movement`: x = right, y = up, z = forward
/// - `pointer`: (0,0) bottom-left, (1,1) top-right
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlInput {
    /// Horizontal look input (positive = turn right)
    pub mouse_horizontal: f32,
    /// Vertical look input (positive = look up)
    pub mouse_vertical: f32,
    pub movement: Vec2,
    pub space_movement: Vec3,
    pub running: bool,
    pub jumping: bool,
    pub sit_key: bool,
    pub interact_key: bool,
    /// Aim point for the gaze ray; stays at the center while the cursor is locked
    pub pointer: Vec2,
}

impl Default for ControlInput {
    fn default() -> Self {
        Self {
            mouse_horizontal: 0.0,
            mouse_vertical: 0.0,
            movement: Vec2::ZERO,
            space_movement: Vec3::ZERO,
            running: false,
            jumping: false,
            sit_key: false,
            interact_key: false,
            pointer: SCREEN_CENTER,
        }
    }
}

impl ControlInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Movement axes as a body-local direction (-Z forward), not normalized.
    pub fn local_movement(&self) -> Vec3 {
        Vec3::new(self.movement.x, 0.0, -self.movement.y)
    }

    /// Jetpack axes as a body-local direction (-Z forward), not normalized.
    pub fn local_space_movement(&self) -> Vec3 {
        Vec3::new(self.space_movement.x, self.space_movement.y, -self.space_movement.z)
    }
}
