//! Pointer rays
//!
//! Builds world-space rays from the eye through a point on screen. The gaze
//! detector uses the screen center while the cursor is locked.

use glam::{Vec2, Vec3};

use crate::physics::{Pose, Ray};

/// Camera-space direction through a screen point.
///
/// * `uv` - Normalized screen coordinates, (0,0) bottom-left to (1,1) top-right
/// * `aspect_ratio` - Width over height
/// * `fov` - Vertical field of view in radians
///
/// The result is unit length, in the camera convention -Z forward, +Y up, +X right.
pub fn get_ray_direction(uv: Vec2, aspect_ratio: f32, fov: f32) -> Vec3 {
    let ndc = uv * 2.0 - Vec2::ONE;
    let tan_half = (fov * 0.5).tan();
    Vec3::new(ndc.x * aspect_ratio * tan_half, ndc.y * tan_half, -1.0).normalize()
}

/// World-space ray from a camera at `camera` through screen point `uv`.
pub fn pointer_ray(camera: &Pose, uv: Vec2, aspect_ratio: f32, fov: f32) -> Ray {
    let local = get_ray_direction(uv, aspect_ratio, fov);
    Ray::new(camera.translation, camera.transform_direction(local))
}

/// Projection parameters needed to turn a screen point into a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastConfig {
    pub aspect_ratio: f32,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self::new(16.0 / 9.0, 1.2)
    }
}

impl RaycastConfig {
    pub fn new(aspect_ratio: f32, fov: f32) -> Self {
        Self { aspect_ratio, fov }
    }

    pub fn pointer_ray(&self, camera: &Pose, uv: Vec2) -> Ray {
        pointer_ray(camera, uv, self.aspect_ratio, self.fov)
    }
}
