//! Rigid body primitives
//!
//! A minimal dynamic body: velocity assignment, force/impulse application and
//! explicit Euler integration. Collision response lives in
//! [`contact`](super::contact); orientation is integrated by whoever owns the
//! body (the player controller rotates it directly).
//!
//! Axis convention matches the rest of the engine: +X right, +Y up, -Z forward.

use glam::{Quat, Vec3};

use super::types::Pose;

/// How a force passed to [`RigidBody::add_force`] is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force in newtons, accumulated and applied over the next step.
    Force,
    /// Instant change of momentum in newton-seconds.
    Impulse,
}

#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Mass in kg. Fixed at construction.
    mass: f32,
    pub velocity: Vec3,
    pub position: Vec3,
    pub orientation: Quat,
    /// Kinematic bodies ignore forces and are not integrated.
    pub kinematic: bool,
    pub collider_enabled: bool,
    /// Forces accumulated since the last `integrate` call
    accumulated_force: Vec3,
}

impl RigidBody {
    /// Create a dynamic body. `mass` must be positive; callers validate it
    /// (see [`ControllerConfig::validate`](crate::config::ControllerConfig::validate)).
    pub fn new(mass: f32, position: Vec3, orientation: Quat) -> Self {
        debug_assert!(mass > 0.0, "rigid body mass must be positive");
        Self {
            mass,
            velocity: Vec3::ZERO,
            position,
            orientation,
            kinematic: false,
            collider_enabled: true,
            accumulated_force: Vec3::ZERO,
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.orientation)
    }

    pub fn set_pose(&mut self, pose: Pose) {
        self.position = pose.translation;
        self.orientation = pose.rotation;
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Local +Y in world space.
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    /// Local -Z in world space.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// Rotate a body-local direction into world space.
    #[inline]
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.orientation * local
    }

    pub fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        if self.kinematic {
            return;
        }
        match mode {
            ForceMode::Force => self.accumulated_force += force,
            ForceMode::Impulse => self.velocity += force / self.mass,
        }
    }

    pub fn pending_force(&self) -> Vec3 {
        self.accumulated_force
    }

    /// Advance the body by `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        if self.kinematic {
            self.accumulated_force = Vec3::ZERO;
            return;
        }
        self.velocity += self.accumulated_force / self.mass * dt;
        self.position += self.velocity * dt;
        self.accumulated_force = Vec3::ZERO;
    }
}
