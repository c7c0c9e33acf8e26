//! First-person camera rig
//!
//! The camera is a child of the player body. Horizontal look turns the whole
//! body about its local up axis; vertical look only pitches the camera, and
//! the pitch is clamped so the view never flips over.
//!
//! Key features:
//! - Look input is scaled by a sensitivity in degrees per input unit
//! - Pitch clamped to ±`vertical_rotation_limit` degrees
//! - No smoothing - instant response

use glam::{EulerRot, Quat, Vec3};

use crate::physics::Pose;

/// Default sensitivity in degrees per input unit
pub const DEFAULT_SENSITIVITY: f32 = 1.5;

/// Default pitch limit in degrees
pub const DEFAULT_PITCH_LIMIT: f32 = 90.0;

#[derive(Clone, Debug)]
pub struct FpsCameraRig {
    /// Eye position relative to the body origin
    pub eye_offset: Vec3,
    /// Degrees per input unit
    pub sensitivity: f32,
    /// Accumulated pitch in degrees, positive = looking up
    pitch: f32,
    /// Pitch limit in degrees
    pitch_limit: f32,
    /// Camera rotation relative to the body
    local_rotation: Quat,
}

impl Default for FpsCameraRig {
    fn default() -> Self {
        Self {
            eye_offset: Vec3::ZERO,
            sensitivity: DEFAULT_SENSITIVITY,
            pitch: 0.0,
            pitch_limit: DEFAULT_PITCH_LIMIT,
            local_rotation: Quat::IDENTITY,
        }
    }
}

impl FpsCameraRig {
    pub fn new(eye_height: f32, sensitivity: f32, pitch_limit: f32) -> Self {
        Self {
            eye_offset: Vec3::new(0.0, eye_height, 0.0),
            sensitivity,
            pitch_limit: pitch_limit.abs(),
            ..Default::default()
        }
    }

    /// Get the accumulated pitch in degrees
    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    #[inline]
    pub fn local_rotation(&self) -> Quat {
        self.local_rotation
    }

    pub fn set_local_rotation(&mut self, rotation: Quat) {
        self.local_rotation = rotation.normalize();
    }

    /// Apply look input.
    ///
    /// Returns the body yaw change (radians, about the body's local up) that
    /// the caller must apply to the body; the camera's own pitch is updated
    /// in place.
    ///
    /// # Arguments
    /// * `horizontal` - Positive turns right
    /// * `vertical` - Positive looks up
    pub fn apply_look(&mut self, horizontal: f32, vertical: f32) -> Quat {
        let yaw_degrees = horizontal * self.sensitivity;
        self.pitch = (self.pitch + vertical * self.sensitivity).clamp(-self.pitch_limit, self.pitch_limit);
        self.local_rotation = Quat::from_rotation_x(self.pitch.to_radians());

        // Turning right is a negative rotation about +Y
        Quat::from_rotation_y(-yaw_degrees.to_radians())
    }

    /// Re-level the camera against the body: keep pitch, drop any yaw or roll
    /// that crept into the local rotation.
    pub fn level(&mut self) {
        let (pitch, _, _) = self.local_rotation.to_euler(EulerRot::XYZ);
        self.local_rotation = Quat::from_rotation_x(pitch);
    }

    /// Zero the local rotation (camera looks straight along the body forward).
    ///
    /// The accumulated pitch is kept, so the next look input restores it.
    pub fn reset_local_rotation(&mut self) {
        self.local_rotation = Quat::IDENTITY;
    }

    /// Camera pose in world space for a body at `body_pose`.
    pub fn world_pose(&self, body_pose: &Pose) -> Pose {
        body_pose.mul_pose(&Pose::new(self.eye_offset, self.local_rotation))
    }
}
