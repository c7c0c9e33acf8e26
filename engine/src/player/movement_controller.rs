//! Player Movement Controller
//!
//! Per-regime physics updates for the player body. Movement direction is
//! relative to the body's facing.
//!
//! # Physics Model
//!
//! - **Ground / ship**: velocity *snaps* to `frame velocity + desired velocity`
//!   every tick. The planet or ship moves on its own, and snapping makes the
//!   player track it without accumulating drift.
//! - **Jump**: same snap, plus `up * jump_force`. Clears the grounded flag at
//!   once so the next tick is already airborne.
//! - **Flight**: jetpack thrust is a continuous force. Momentum persists
//!   across ticks because there is no surface to snap to.
//! - **Orientation correction** (ground only): slerps the body so its local up
//!   matches the outward normal of the planet it stands on.
//!
//! # Usage
//!
//! ```rust,ignore
//! let desired = desired_velocity(&body, &input, config.movement_speed(input.running));
//! ground_movement(&mut body, desired, scene.body(planet_id), config.stick_to_ground_force)?;
//! correct_orientation(&mut body, planet, config.stand_up_speed, dt);
//! ```

use glam::{Quat, Vec3};

use crate::error::ControllerError;
use crate::input::ControlInput;
use crate::physics::{ForceMode, RigidBody};
use crate::world::CelestialBody;

/// Below this angle (radians) the body counts as upright.
pub const UPRIGHT_TOLERANCE: f32 = 1e-3;

/// World-space walking velocity requested by `input`: the movement axes are
/// normalized, rotated into the body frame and scaled by `speed`.
pub fn desired_velocity(body: &RigidBody, input: &ControlInput, speed: f32) -> Vec3 {
    body.transform_direction(input.local_movement().normalize_or_zero()) * speed
}

/// World-space jetpack force requested by `input`.
pub fn jetpack_force(body: &RigidBody, input: &ControlInput, jetpack_force: f32) -> Vec3 {
    body.transform_direction(input.local_space_movement().normalize_or_zero()) * jetpack_force
}

/// Walk on a celestial body.
///
/// Sets `velocity = reference.velocity + desired`, then applies a downward
/// impulse of `stick_to_ground_force` along the body's local up so fast input
/// cannot launch the player off the surface between physics steps.
///
/// Returns the frame-composed velocity that was assigned (before the impulse).
pub fn ground_movement(
    body: &mut RigidBody,
    desired: Vec3,
    reference: Option<&CelestialBody>,
    stick_to_ground_force: f32,
) -> Result<Vec3, ControllerError> {
    let reference = reference.ok_or(ControllerError::NoReferenceBody)?;
    let velocity = reference.velocity + desired;
    body.set_velocity(velocity);
    let up = body.up();
    body.add_force(-up * stick_to_ground_force, ForceMode::Impulse);
    Ok(velocity)
}

/// Jump off a celestial body.
///
/// `grounded` is cleared unconditionally, before the reference check, so a
/// failed jump still leaves the player airborne instead of retrying next tick.
pub fn jump(
    body: &mut RigidBody,
    desired: Vec3,
    reference: Option<&CelestialBody>,
    jump_force: f32,
    grounded: &mut bool,
) -> Result<Vec3, ControllerError> {
    *grounded = false;
    let reference = reference.ok_or(ControllerError::NoReferenceBody)?;
    let velocity = reference.velocity + desired + body.up() * jump_force;
    body.set_velocity(velocity);
    Ok(velocity)
}

/// Walk inside a vehicle: adopt the ship's velocity instantly, no damping.
pub fn ship_movement(body: &mut RigidBody, desired: Vec3, ship_velocity: Vec3) -> Vec3 {
    let velocity = ship_velocity + desired;
    body.set_velocity(velocity);
    velocity
}

/// Jetpack flight: accumulate a continuous force for the next integration step.
pub fn space_movement(body: &mut RigidBody, force: Vec3) {
    body.add_force(force, ForceMode::Force);
}

/// Rotation that would bring the body's up onto the planet's outward normal,
/// applied on top of the current orientation.
pub fn upright_target(body: &RigidBody, planet: &CelestialBody) -> Quat {
    let outward = planet.up_at(body.position);
    (Quat::from_rotation_arc(body.up(), outward) * body.orientation).normalize()
}

/// Angle in radians between the body's up and the outward planet normal.
pub fn tilt_from_upright(body: &RigidBody, planet: &CelestialBody) -> f32 {
    body.up().angle_between(planet.up_at(body.position))
}

/// Slerp the body toward standing upright on the planet.
///
/// The interpolation factor is `stand_up_speed * dt`, clamped to `[0, 1]`, so
/// each call removes that fraction of the remaining tilt.
///
/// Returns the tilt left after the correction.
pub fn correct_orientation(body: &mut RigidBody, planet: &CelestialBody, stand_up_speed: f32, dt: f32) -> f32 {
    let target = upright_target(body, planet);
    let t = (stand_up_speed * dt).clamp(0.0, 1.0);
    body.orientation = body.orientation.slerp(target, t).normalize();
    tilt_from_upright(body, planet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::BodyId;
    use glam::Vec2;

    fn body() -> RigidBody {
        RigidBody::new(70.0, Vec3::new(0.0, 100.5, 0.0), Quat::IDENTITY)
    }

    fn planet(velocity: Vec3) -> CelestialBody {
        CelestialBody::new(BodyId(1), "Terra", Vec3::ZERO, 100.0, 1.0e12).with_velocity(velocity)
    }

    #[test]
    fn test_desired_velocity_is_normalized_and_scaled() {
        let body = body();
        let input = ControlInput {
            movement: Vec2::new(1.0, 1.0),
            ..Default::default()
        };
        let desired = desired_velocity(&body, &input, 4.0);
        assert!((desired.length() - 4.0).abs() < 1e-5);
        assert!(desired.x > 0.0 && desired.z < 0.0);
    }

    #[test]
    fn test_desired_velocity_follows_body_yaw() {
        let mut body = body();
        body.orientation = Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
        let input = ControlInput {
            movement: Vec2::new(0.0, 1.0),
            ..Default::default()
        };
        let desired = desired_velocity(&body, &input, 2.0);
        assert!((desired - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_no_input_no_desired_velocity() {
        assert_eq!(desired_velocity(&body(), &ControlInput::default(), 4.0), Vec3::ZERO);
        assert_eq!(jetpack_force(&body(), &ControlInput::default(), 700.0), Vec3::ZERO);
    }

    #[test]
    fn test_ground_velocity_is_frame_plus_desired() {
        let cases = [
            (Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)),
            (Vec3::new(30.0, -4.0, 12.5), Vec3::new(0.0, 0.0, -3.0)),
            (Vec3::new(-250.0, 0.0, 0.0), Vec3::ZERO),
        ];
        for (frame, desired) in cases {
            let mut body = body();
            let planet = planet(frame);
            let assigned = ground_movement(&mut body, desired, Some(&planet), 0.0).unwrap();
            assert_eq!(assigned, frame + desired);
            assert_eq!(body.velocity, frame + desired);
        }
    }

    #[test]
    fn test_ground_movement_sticks_to_ground() {
        let mut body = body();
        let planet = planet(Vec3::new(5.0, 0.0, 0.0));
        let assigned = ground_movement(&mut body, Vec3::ZERO, Some(&planet), 14.0).unwrap();
        // 14 N·s downward on 70 kg = -0.2 m/s along up
        assert!((body.velocity - (assigned - Vec3::Y * 0.2)).length() < 1e-6);
    }

    #[test]
    fn test_ground_movement_without_reference_is_error() {
        let mut body = body();
        body.velocity = Vec3::new(1.0, 2.0, 3.0);
        let result = ground_movement(&mut body, Vec3::X, None, 2.0);
        assert_eq!(result, Err(ControllerError::NoReferenceBody));
        // Skipped: body untouched
        assert_eq!(body.velocity, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_jump_clears_grounded_regardless_of_prior_value() {
        let planet = planet(Vec3::new(1.0, 0.0, 0.0));
        for prior in [true, false] {
            let mut grounded = prior;
            let mut body = body();
            let velocity = jump(&mut body, Vec3::NEG_Z, Some(&planet), 6.0, &mut grounded).unwrap();
            assert!(!grounded);
            assert_eq!(velocity, Vec3::new(1.0, 6.0, -1.0));
        }

        let mut grounded = true;
        let mut body = body();
        assert!(jump(&mut body, Vec3::ZERO, None, 6.0, &mut grounded).is_err());
        assert!(!grounded);
    }

    #[test]
    fn test_ship_movement_snaps_to_ship_frame() {
        let mut body = body();
        body.velocity = Vec3::new(100.0, 100.0, 100.0);
        let velocity = ship_movement(&mut body, Vec3::new(0.0, 0.0, -2.0), Vec3::new(40.0, 0.0, 0.0));
        assert_eq!(velocity, Vec3::new(40.0, 0.0, -2.0));
        assert_eq!(body.velocity, velocity);
    }

    #[test]
    fn test_space_movement_accumulates_momentum() {
        let mut body = RigidBody::new(70.0, Vec3::ZERO, Quat::IDENTITY);
        let input = ControlInput {
            space_movement: Vec3::new(0.0, 0.0, 1.0),
            ..Default::default()
        };
        let dt = 1.0 / 60.0;
        let mut previous = 0.0;
        for _ in 0..120 {
            let force = jetpack_force(&body, &input, 700.0);
            space_movement(&mut body, force);
            body.integrate(dt);
            let along = body.velocity.dot(Vec3::NEG_Z);
            assert!(along > previous, "speed along thrust must keep growing");
            previous = along;
        }
        // 700 N / 70 kg = 10 m/s^2 for 2 s
        assert!((previous - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_snap_regimes_do_not_accumulate() {
        let mut body = body();
        let planet = planet(Vec3::new(3.0, 0.0, 0.0));
        for _ in 0..10 {
            ground_movement(&mut body, Vec3::X, Some(&planet), 0.0).unwrap();
            body.integrate(1.0 / 60.0);
        }
        assert_eq!(body.velocity, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_orientation_converges_monotonically() {
        let mut body = RigidBody::new(70.0, Vec3::new(100.0, 20.0, -30.0), Quat::IDENTITY);
        let planet = planet(Vec3::ZERO);
        let dt = 1.0 / 60.0;
        let mut tilt = tilt_from_upright(&body, &planet);
        assert!(tilt > 0.5);

        let mut ticks = 0;
        while tilt > UPRIGHT_TOLERANCE {
            let next = correct_orientation(&mut body, &planet, 5.0, dt);
            assert!(next < tilt, "tilt must shrink every tick ({next} >= {tilt})");
            tilt = next;
            ticks += 1;
            assert!(ticks < 600, "orientation failed to converge");
        }
    }

    #[test]
    fn test_orientation_correction_keeps_upright_body() {
        let mut body = body();
        let tilt = correct_orientation(&mut body, &planet(Vec3::ZERO), 5.0, 1.0 / 60.0);
        assert!(tilt < 1e-4);
        assert!((body.up() - Vec3::Y).length() < 1e-4);
    }
}
