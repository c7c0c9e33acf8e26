//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the controller, re-exported from the glam library, plus a small
//! rigid transform type used for reference-frame composition.

pub use glam::{EulerRot, Quat, Vec2, Vec3};

/// Rigid transform: rotation followed by translation.
///
/// Used wherever the scene needs a world pose (anchors, seat attachment,
/// camera eye) without a live parent/child transform graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation,
        }
    }

    /// Compose `self` (parent) with `local` (child expressed in parent space).
    pub fn mul_pose(&self, local: &Pose) -> Pose {
        Pose {
            translation: self.transform_point(local.translation),
            rotation: (self.rotation * local.rotation).normalize(),
        }
    }

    pub fn inverse(&self) -> Pose {
        let rotation = self.rotation.inverse();
        Pose {
            translation: rotation * -self.translation,
            rotation,
        }
    }

    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.translation
    }

    #[inline]
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }
}
