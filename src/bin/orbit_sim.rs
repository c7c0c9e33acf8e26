//! Orbit Sim - headless controller playground
//!
//! Runs scripted input through the player controller and logs what happens.
//! No window, no rendering: useful for tuning `ControllerConfig` values.
//!
//! Run with: `cargo run --bin orbit_sim -- [config.json]`
//!
//! Set `RUST_LOG=debug` to see state changes and gaze updates.
//!
//! Scenarios:
//! - planet: walk on a moving planet, jump, then jetpack away
//! - cabin: sit in a ship seat, fly the ship, stand up again

use std::process::ExitCode;

use glam::{Quat, Vec2, Vec3};
use log::{error, info};

use orbital_walker_engine::physics::{BoxCollider, Pose};
use orbital_walker_engine::world::{BodyId, CelestialBody, GravityReference, Scene, SceneObject, Tag, Vehicle, VehicleId};
use orbital_walker_engine::{
    ControlInput, ControllerConfig, ControllerError, ControllerId, PlayerController, SeatBinding, Session,
    VehicleController,
};

const DT: f32 = 1.0 / 60.0;
const PLAYER: ControllerId = ControllerId(1);
const SHIP: ControllerId = ControllerId(2);

// ============================================================================
// SCENARIOS
// ============================================================================

fn planet_scenario(config: &ControllerConfig) {
    info!("=== planet ===");
    let mut scene = Scene::new();
    let terra = CelestialBody::new(BodyId(1), "Terra", Vec3::ZERO, 100.0, 5.0e13)
        .with_velocity(Vec3::new(12.0, 0.0, 0.0))
        .with_spin(Vec3::new(0.0, 0.05, 0.0));
    let surface = terra.radius + config.collider_radius;
    scene.add_body(terra);

    let gravity = GravityReference::new(0.01, 1.0e-11);
    let spawn = Pose::from_translation(Vec3::new(0.0, surface, 0.0));
    let player = PlayerController::new(PLAYER, config.clone(), &gravity, spawn);
    let mut session = Session::new(scene, player).with_gravity(gravity);

    let walk = ControlInput {
        movement: Vec2::new(0.0, 1.0),
        ..Default::default()
    };
    let jump = ControlInput {
        jumping: true,
        ..Default::default()
    };
    let jetpack = ControlInput {
        space_movement: Vec3::new(0.0, 1.0, 0.0),
        ..Default::default()
    };

    run(&mut session, &walk, 120, "walk");
    run(&mut session, &jump, 1, "jump");
    run(&mut session, &jetpack, 120, "jetpack");
}

fn cabin_scenario(config: &ControllerConfig) -> Result<(), ControllerError> {
    info!("=== cabin ===");
    let mut scene = Scene::new();
    let hull = scene.spawn(
        SceneObject::new("Hull")
            .with_tag(Tag::SpaceShip)
            .with_local(Pose::from_translation(Vec3::new(500.0, 0.0, 0.0))),
    )?;
    let seat = scene.spawn(
        SceneObject::new("PilotSeat")
            .with_tag(Tag::Interactable)
            .with_parent(hull)
            .with_local(Pose::from_translation(Vec3::new(0.0, 0.0, -2.0)))
            .with_collider(BoxCollider::cube(0.4)),
    )?;
    let sitting_anchor = scene.spawn(
        SceneObject::new("SittingPoint")
            .with_parent(seat)
            .with_local(Pose::from_translation(Vec3::new(0.0, 0.3, 0.0))),
    )?;
    let stand_up_anchor = scene.spawn(
        SceneObject::new("StandUpPoint")
            .with_parent(hull)
            .with_local(Pose::from_translation(Vec3::new(0.0, 0.0, 0.5))),
    )?;
    let ship = scene.add_vehicle(Vehicle::new(VehicleId(1), hull, BoxCollider::new(Vec3::ZERO, Vec3::new(3.0, 2.0, 4.0))))?;

    let binding = SeatBinding {
        seat,
        sitting_anchor,
        stand_up_anchor,
        vehicle_controller: SHIP,
    };
    let spawn = Pose::new(Vec3::new(500.0, -config.eye_height, 1.0), Quat::IDENTITY);
    let player = PlayerController::new(PLAYER, config.clone(), &GravityReference::default(), spawn).with_seat(binding);
    let mut session = Session::new(scene, player).with_vehicle(VehicleController::new(SHIP, ship));

    let idle = ControlInput::default();
    let sit = ControlInput {
        sit_key: true,
        ..Default::default()
    };
    let thrust = ControlInput {
        movement: Vec2::new(0.0, 1.0),
        ..Default::default()
    };
    let leave = ControlInput {
        interact_key: true,
        ..Default::default()
    };

    run(&mut session, &idle, 1, "look at seat");
    run(&mut session, &sit, 1, "sit");
    run(&mut session, &thrust, 120, "fly ship");
    run(&mut session, &leave, 1, "stand up");
    run(&mut session, &idle, 30, "walk cabin");

    if let Some(vehicle) = session.scene().vehicle(ship) {
        info!("ship velocity after flight: {:.2?}", vehicle.velocity);
    }
    Ok(())
}

// ============================================================================
// HELPERS
// ============================================================================

fn run(session: &mut Session, input: &ControlInput, ticks: u32, label: &str) {
    for _ in 0..ticks {
        session.tick(DT, input);
    }
    let player = session.player();
    info!(
        "[{label:>12}] tick {:>4} | {:<9} | pos {:.2?} | vel {:.2?} | active {:?}",
        session.ticks(),
        player.state().to_string(),
        player.body().position,
        player.body().velocity,
        session.registry().active(),
    );
}

fn load_config() -> Result<ControllerConfig, orbital_walker_engine::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading controller config from {path}");
            ControllerConfig::load(path)
        }
        None => Ok(ControllerConfig::default()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    planet_scenario(&config);
    if let Err(err) = cabin_scenario(&config) {
        error!("cabin scenario failed: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
