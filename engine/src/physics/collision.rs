//! Collision detection module
//!
//! Ray queries used by the gaze detector and the scene raycast. Only
//! entering hits are reported: a collider that contains the ray origin is
//! invisible to the ray, matching how physics engines treat queries cast from
//! inside a volume.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//! Oriented boxes are handled by moving the ray into the box's local frame.
//!
//! # Example
//!
//! ```ignore
//! use orbital_walker_engine::physics::collision::{ray_aabb_intersect, Ray};
//! use glam::Vec3;
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
//! if let Some(t) = ray_aabb_intersect(ray.origin, ray.direction, -Vec3::ONE, Vec3::ONE) {
//!     let hit_point = ray.at(t);
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::types::Pose;

/// Half-line with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. The direction is normalized; a zero direction stays zero
    /// and never hits anything.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Box collider expressed in the owner's local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxCollider {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl BoxCollider {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn cube(half_size: f32) -> Self {
        Self::new(Vec3::ZERO, Vec3::splat(half_size))
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Whether a point given in the collider's local space lies inside.
    pub fn contains_local(&self, point: Vec3) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y && d.z <= self.half_extents.z
    }

    /// Whether a world-space point lies inside the box placed at `pose`.
    pub fn contains(&self, pose: &Pose, point: Vec3) -> bool {
        self.contains_local(pose.inverse().transform_point(point))
    }
}

/// Performs ray-AABB (Axis-Aligned Bounding Box) intersection test using the slab method.
///
/// # Arguments
///
/// * `ray_origin` - Starting point of the ray
/// * `ray_dir` - Direction of the ray (must be normalized)
/// * `aabb_min` - Minimum corner of the AABB
/// * `aabb_max` - Maximum corner of the AABB
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the intersection point (t >= 0).
///   When the origin is inside the box this is the exit distance.
/// * `None` - No intersection or intersection is behind the ray origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    // Handle near-zero directions by using large values
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb_min - ray_origin) * inv_dir;
    let t2 = (aabb_max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// Ray against an oriented box placed at `pose`.
///
/// Returns the entering distance, or `None` if the box is missed or contains
/// the ray origin.
pub fn ray_box_intersect(ray: &Ray, pose: &Pose, collider: &BoxCollider) -> Option<f32> {
    let to_local = pose.inverse();
    let local_origin = to_local.transform_point(ray.origin);
    if collider.contains_local(local_origin) {
        return None;
    }
    // Rigid transform keeps the direction normalized, so t is a world distance
    let local_dir = to_local.transform_direction(ray.direction);
    ray_aabb_intersect(local_origin, local_dir, collider.min(), collider.max())
}

/// Ray against a sphere.
///
/// Returns the entering distance, or `None` if the sphere is missed, lies
/// behind the ray, or contains the ray origin.
pub fn ray_sphere_intersect(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    // Ray: P(t) = origin + t * dir, |dir| = 1
    // |oc + t*d|^2 = r^2  =>  t^2 + 2t(oc.d) + (oc.oc - r^2) = 0
    let oc = ray.origin - center;
    let c = oc.dot(oc) - radius * radius;
    if c <= 0.0 {
        return None;
    }
    let b = oc.dot(ray.direction);
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    (t >= 0.0).then_some(t)
}
