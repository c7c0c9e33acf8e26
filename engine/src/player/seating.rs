//! Seating
//!
//! A seated player is not parented into the scene graph. It stores which
//! anchor it is attached to plus a fixed offset, and the world pose is
//! recomputed from the anchor every tick, so the player follows the seat as
//! the vehicle moves.

use glam::Quat;

use crate::control::ControllerId;
use crate::physics::Pose;
use crate::world::{ObjectId, Scene};

/// Links a seat in the scene to the anchors and vehicle controller it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatBinding {
    /// Root of the seat hierarchy; gazing at it or any descendant allows sitting
    pub seat: ObjectId,
    /// Pose the player takes while seated
    pub sitting_anchor: ObjectId,
    /// Where the player is placed on standing up
    pub stand_up_anchor: ObjectId,
    /// Receives input authority while the player is seated
    pub vehicle_controller: ControllerId,
}

impl SeatBinding {
    /// Whether `target` is the seat itself or part of its hierarchy.
    pub fn contains(&self, scene: &Scene, target: ObjectId) -> bool {
        scene.is_part_of(target, self.seat)
    }
}

/// Reference-frame attachment: the player pose is `anchor * offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attachment {
    pub anchor: ObjectId,
    pub offset: Pose,
}

impl Attachment {
    pub fn new(anchor: ObjectId, offset: Pose) -> Self {
        Self { anchor, offset }
    }

    /// Attach with a pure yaw offset, in degrees about the anchor's up.
    pub fn with_yaw(anchor: ObjectId, yaw_degrees: f32) -> Self {
        Self::new(anchor, Pose::from_rotation(Quat::from_rotation_y(yaw_degrees.to_radians())))
    }

    /// World pose of the attached body, or `None` if the anchor is gone.
    pub fn world_pose(&self, scene: &Scene) -> Option<Pose> {
        scene.world_pose(self.anchor).map(|anchor| anchor.mul_pose(&self.offset))
    }
}
