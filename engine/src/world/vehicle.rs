//! Vehicles the player can walk around in and pilot.
//!
//! The ship flight model is not part of this crate. A vehicle here is a moving
//! reference frame (root object + velocity) with an interior volume used to
//! decide whether the player is aboard.

use glam::Vec3;

use super::scene::ObjectId;
use crate::physics::BoxCollider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: VehicleId,
    /// Root scene object; its local pose is the vehicle's world pose
    pub root: ObjectId,
    pub velocity: Vec3,
    /// Cabin volume in the root object's local space
    pub interior: BoxCollider,
}

impl Vehicle {
    pub fn new(id: VehicleId, root: ObjectId, interior: BoxCollider) -> Self {
        Self {
            id,
            root,
            velocity: Vec3::ZERO,
            interior,
        }
    }
}
