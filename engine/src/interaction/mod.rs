//! Interaction Module
//!
//! Gaze detection: what interactable object the player is currently looking
//! at. Recomputed every tick; the scene keeps ownership of the object, the
//! detector only remembers its id.

use glam::Vec2;
use log::debug;

use crate::camera::RaycastConfig;
use crate::physics::Pose;
use crate::world::{HitTarget, ObjectId, Scene, Tag};

/// Result of a gaze query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GazeTarget {
    /// The ray hit nothing, or hit something that is not interactable
    #[default]
    Nothing,
    Interactable(ObjectId),
}

impl GazeTarget {
    pub fn object(&self) -> Option<ObjectId> {
        match self {
            GazeTarget::Nothing => None,
            GazeTarget::Interactable(id) => Some(*id),
        }
    }

    pub fn is_some(&self) -> bool {
        matches!(self, GazeTarget::Interactable(_))
    }
}

#[derive(Debug, Clone)]
pub struct InteractableDetector {
    pub raycast: RaycastConfig,
    /// Gaze reach in meters; `None` is unlimited
    pub max_distance: Option<f32>,
    current: GazeTarget,
}

impl InteractableDetector {
    pub fn new(raycast: RaycastConfig, max_distance: Option<f32>) -> Self {
        Self {
            raycast,
            max_distance,
            current: GazeTarget::Nothing,
        }
    }

    /// Target found by the most recent [`detect`](Self::detect) call.
    pub fn current(&self) -> GazeTarget {
        self.current
    }

    /// Cast from the camera through `pointer` and keep the nearest hit if it
    /// is tagged interactable. Anything else in front of it blocks the gaze.
    pub fn detect(&mut self, scene: &Scene, camera: &Pose, pointer: Vec2) -> GazeTarget {
        let ray = self.raycast.pointer_ray(camera, pointer);
        let target = match scene.raycast(&ray, self.max_distance) {
            Some(hit) => match hit.target {
                HitTarget::Object(id) if scene.object(id).is_some_and(|o| o.tag == Tag::Interactable) => {
                    GazeTarget::Interactable(id)
                }
                _ => GazeTarget::Nothing,
            },
            None => GazeTarget::Nothing,
        };

        if target != self.current {
            debug!("Gaze target changed: {:?} -> {:?}", self.current, target);
        }
        self.current = target;
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::BoxCollider;
    use crate::world::SceneObject;
    use glam::Vec3;

    fn detector() -> InteractableDetector {
        InteractableDetector::new(RaycastConfig::default(), None)
    }

    #[test]
    fn test_detects_interactable_in_front() {
        let mut scene = Scene::new();
        let lever = scene
            .spawn(
                SceneObject::new("Lever")
                    .with_tag(Tag::Interactable)
                    .with_local(Pose::from_translation(Vec3::new(0.0, 0.0, -3.0)))
                    .with_collider(BoxCollider::cube(0.25)),
            )
            .unwrap();

        let mut detector = detector();
        let target = detector.detect(&scene, &Pose::IDENTITY, Vec2::splat(0.5));
        assert_eq!(target, GazeTarget::Interactable(lever));
        assert_eq!(detector.current().object(), Some(lever));
    }

    #[test]
    fn test_untagged_blocker_hides_interactable() {
        let mut scene = Scene::new();
        scene
            .spawn(
                SceneObject::new("Crate")
                    .with_local(Pose::from_translation(Vec3::new(0.0, 0.0, -2.0)))
                    .with_collider(BoxCollider::cube(0.5)),
            )
            .unwrap();
        scene
            .spawn(
                SceneObject::new("Lever")
                    .with_tag(Tag::Interactable)
                    .with_local(Pose::from_translation(Vec3::new(0.0, 0.0, -5.0)))
                    .with_collider(BoxCollider::cube(0.25)),
            )
            .unwrap();

        let target = detector().detect(&scene, &Pose::IDENTITY, Vec2::splat(0.5));
        assert_eq!(target, GazeTarget::Nothing);
    }

    #[test]
    fn test_nothing_hit_is_explicit_no_target() {
        let scene = Scene::new();
        let mut detector = detector();
        let target = detector.detect(&scene, &Pose::IDENTITY, Vec2::splat(0.5));
        assert_eq!(target, GazeTarget::Nothing);
        assert!(!target.is_some());
        assert_eq!(target.object(), None);
    }

    #[test]
    fn test_max_distance_limits_reach() {
        let mut scene = Scene::new();
        scene
            .spawn(
                SceneObject::new("Lever")
                    .with_tag(Tag::Interactable)
                    .with_local(Pose::from_translation(Vec3::new(0.0, 0.0, -10.0)))
                    .with_collider(BoxCollider::cube(0.25)),
            )
            .unwrap();
        let mut detector = InteractableDetector::new(RaycastConfig::default(), Some(5.0));
        assert_eq!(detector.detect(&scene, &Pose::IDENTITY, Vec2::splat(0.5)), GazeTarget::Nothing);
    }
}
