//! Vehicle controller
//!
//! Receives input while the player is seated. The flight model is kept to a
//! single thrust term: what matters here is the control handoff, the ship
//! only has to move so the seated player visibly rides along.

use glam::{Quat, Vec3};
use log::{debug, warn};

use crate::control::{ControlContext, Controllable, ControllerId};
use crate::error::ControllerError;
use crate::input::ControlInput;
use crate::world::VehicleId;

/// Default thrust acceleration in m/s²
pub const DEFAULT_THRUST: f32 = 20.0;

#[derive(Debug, Clone)]
pub struct VehicleController {
    id: ControllerId,
    vehicle: VehicleId,
    /// Acceleration at full input, m/s²
    pub thrust: f32,
    release_requested: bool,
}

impl VehicleController {
    pub fn new(id: ControllerId, vehicle: VehicleId) -> Self {
        Self {
            id,
            vehicle,
            thrust: DEFAULT_THRUST,
            release_requested: false,
        }
    }

    pub fn with_thrust(mut self, thrust: f32) -> Self {
        self.thrust = thrust;
        self
    }

    #[inline]
    pub fn id(&self) -> ControllerId {
        self.id
    }

    #[inline]
    pub fn vehicle(&self) -> VehicleId {
        self.vehicle
    }

    pub fn release_requested(&self) -> bool {
        self.release_requested
    }

    /// Returns whether the pilot asked to leave the seat, and clears the request.
    pub fn take_release_request(&mut self) -> bool {
        std::mem::take(&mut self.release_requested)
    }
}

impl Controllable for VehicleController {
    fn controller_id(&self) -> ControllerId {
        self.id
    }

    fn handle_input(&mut self, input: &ControlInput, ctx: &mut ControlContext<'_>) {
        if input.interact_key && !self.release_requested {
            debug!("Vehicle {:?}: pilot release requested", self.vehicle);
            self.release_requested = true;
        }

        let Some(root) = ctx.scene.vehicle(self.vehicle).map(|vehicle| vehicle.root) else {
            warn!("{}", ControllerError::UnknownVehicle(self.vehicle));
            return;
        };
        let orientation = ctx.scene.world_pose(root).map_or(Quat::IDENTITY, |pose| pose.rotation);

        // Full 3D thrust when given, otherwise planar movement
        let local = if input.space_movement != Vec3::ZERO {
            input.local_space_movement()
        } else {
            input.local_movement()
        };
        let delta = orientation * local.normalize_or_zero() * self.thrust * ctx.dt;

        if let Some(vehicle) = ctx.scene.vehicle_mut(self.vehicle) {
            vehicle.velocity += delta;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ActiveControllerRegistry;
    use crate::physics::{BoxCollider, Pose};
    use crate::world::{Scene, SceneObject, Vehicle};
    use glam::Vec2;

    fn scene_with_ship() -> Scene {
        let mut scene = Scene::new();
        let root = scene
            .spawn(SceneObject::new("Ship").with_local(Pose::from_rotation(Quat::from_rotation_y(
                std::f32::consts::FRAC_PI_2,
            ))))
            .unwrap();
        scene
            .add_vehicle(Vehicle::new(VehicleId(1), root, BoxCollider::cube(3.0)))
            .unwrap();
        scene
    }

    #[test]
    fn test_thrust_follows_ship_orientation() {
        let mut scene = scene_with_ship();
        let mut registry = ActiveControllerRegistry::with_active(ControllerId(2));
        let mut ship = VehicleController::new(ControllerId(2), VehicleId(1)).with_thrust(10.0);
        let input = ControlInput {
            movement: Vec2::new(0.0, 1.0),
            ..Default::default()
        };

        let mut ctx = ControlContext { scene: &mut scene, registry: &mut registry, dt: 0.5 };
        ship.handle_input(&input, &mut ctx);

        // Ship faces -X after a quarter turn left
        let velocity = scene.vehicle(VehicleId(1)).unwrap().velocity;
        assert!((velocity - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-5, "{velocity:?}");
    }

    #[test]
    fn test_interact_requests_release_once() {
        let mut scene = scene_with_ship();
        let mut registry = ActiveControllerRegistry::new();
        let mut ship = VehicleController::new(ControllerId(2), VehicleId(1));
        let input = ControlInput {
            interact_key: true,
            ..Default::default()
        };

        let mut ctx = ControlContext { scene: &mut scene, registry: &mut registry, dt: 0.016 };
        ship.handle_input(&input, &mut ctx);
        assert!(ship.release_requested());
        assert!(ship.take_release_request());
        assert!(!ship.take_release_request());
    }

    #[test]
    fn test_unknown_vehicle_is_ignored() {
        let mut scene = Scene::new();
        let mut registry = ActiveControllerRegistry::new();
        let mut ship = VehicleController::new(ControllerId(2), VehicleId(42));
        let input = ControlInput {
            movement: Vec2::ONE,
            ..Default::default()
        };
        let mut ctx = ControlContext { scene: &mut scene, registry: &mut registry, dt: 0.016 };
        ship.handle_input(&input, &mut ctx);
        assert!(scene.vehicles().is_empty());
    }
}
