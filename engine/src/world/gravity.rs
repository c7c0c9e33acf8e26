//! Gravity and simulation time reference
//!
//! Holds the simulation time-scaling factor (used to seed the player's initial
//! velocity) and computes Newtonian pull from every celestial body.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::celestial::CelestialBody;

/// Real-world gravitational constant in m^3 kg^-1 s^-2
pub const GRAVITATIONAL_CONSTANT: f32 = 6.674e-11;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityReference {
    /// Simulation time-scaling factor
    pub time_step: f32,
    /// Gravitational constant used for the pull; game worlds usually scale it up
    pub gravitational_constant: f32,
}

impl Default for GravityReference {
    fn default() -> Self {
        Self {
            time_step: 0.01,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
        }
    }
}

impl GravityReference {
    pub fn new(time_step: f32, gravitational_constant: f32) -> Self {
        Self {
            time_step,
            gravitational_constant,
        }
    }

    /// Sum of gravitational forces (N) on a mass at `position`.
    ///
    /// Bodies closer than 1cm to `position` are skipped.
    pub fn pull_on(&self, position: Vec3, mass: f32, bodies: &[CelestialBody]) -> Vec3 {
        bodies
            .iter()
            .filter_map(|body| {
                let offset = body.position - position;
                let distance_sq = offset.length_squared();
                if distance_sq < 1e-4 {
                    return None;
                }
                let magnitude = self.gravitational_constant * body.mass * mass / distance_sq;
                Some(offset.normalize() * magnitude)
            })
            .sum()
    }
}
