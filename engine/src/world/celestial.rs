//! Celestial bodies
//!
//! Planets and moons the player can stand on. Each body is its own moving,
//! spinning reference frame; while grounded, the player's velocity is
//! composed against the body's velocity.

use glam::{Quat, Vec3};

/// Stable handle to a [`CelestialBody`] in a [`Scene`](super::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

/// Spherical celestial body.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub id: BodyId,
    pub name: String,
    /// Center of the body in world space
    pub position: Vec3,
    /// Linear velocity in m/s
    pub velocity: Vec3,
    pub rotation: Quat,
    /// Spin in rad/s (axis * rate)
    pub angular_velocity: Vec3,
    /// Surface radius in meters
    pub radius: f32,
    /// Mass in kg, used for gravitational pull
    pub mass: f32,
}

impl CelestialBody {
    pub fn new(id: BodyId, name: impl Into<String>, position: Vec3, radius: f32, mass: f32) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            velocity: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            radius,
            mass,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_spin(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Outward surface normal above `position`.
    ///
    /// Falls back to `Vec3::Y` at the exact center.
    pub fn up_at(&self, position: Vec3) -> Vec3 {
        let to_position = position - self.position;
        if to_position.length_squared() < 0.0001 {
            Vec3::Y
        } else {
            to_position.normalize()
        }
    }

    /// Positive above the surface, negative below.
    pub fn height_above_surface(&self, position: Vec3) -> f32 {
        (position - self.position).length() - self.radius
    }

    /// Move and spin the body forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        let spin = self.angular_velocity * dt;
        let angle = spin.length();
        if angle > 0.0 {
            self.rotation = (Quat::from_axis_angle(spin / angle, angle) * self.rotation).normalize();
        }
    }
}
