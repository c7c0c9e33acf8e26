//! Physics module
//!
//! Minimal physics primitives the controller needs from a physics backend:
//! rigid body velocity/force handling, ray queries and contact events.
//! This is not a general rigid-body engine; it only covers what the player
//! controller, the demo session and the tests exercise.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Forces in N, impulses in N·s
//! - Mass in kg
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types re-exported from glam, plus [`Pose`]
//! - [`body`] - Rigid body with force/impulse application and integration
//! - [`collision`] - Ray-box and ray-sphere queries
//! - [`contact`] - Contact event queue and sphere contact monitor

pub mod body;
pub mod collision;
pub mod contact;
pub mod types;

pub use body::{ForceMode, RigidBody};
pub use collision::{BoxCollider, Ray, ray_aabb_intersect, ray_box_intersect, ray_sphere_intersect};
pub use contact::{ContactEvent, ContactMonitor, ContactQueue, resolve_sphere_penetration};
pub use types::{EulerRot, Pose, Quat, Vec2, Vec3};
