//! Orbital Walker Engine
//!
//! Player-character controller for a space game: walking on orbiting and
//! spinning planets, jetpack flight in open space, walking around inside
//! moving ships, and sitting down to hand control over to a ship.
//!
//! The crate does not render anything. It consumes a per-tick
//! [`ControlInput`] and a [`Scene`] and produces body poses, velocities and
//! UI prompt flags.
//!
//! # Modules
//!
//! - [`physics`] - Rigid body stand-in, colliders, ray tests, contact events
//! - [`world`] - Scene graph, celestial bodies, vehicles, gravity reference
//! - [`control`] - Input authority registry and the `Controllable` seam
//! - [`input`] - The normalized per-tick input snapshot
//! - [`camera`] - First-person rig and screen-space rays
//! - [`interaction`] - Gaze detection of interactable objects
//! - [`player`] - Locomotion state machine, movement regimes, seating
//! - [`vehicle_controller`] - Minimal controllable ship
//! - [`session`] - Fixed-tick driver tying everything together
//!
//! # Example
//!
//! ```ignore
//! use orbital_walker_engine::{ControlInput, ControllerConfig, ControllerId, PlayerController, Session};
//! use orbital_walker_engine::physics::{Pose, Vec3};
//! use orbital_walker_engine::world::{BodyId, CelestialBody, GravityReference, Scene};
//!
//! let mut scene = Scene::new();
//! scene.add_body(CelestialBody::new(BodyId(1), "Terra", Vec3::ZERO, 100.0, 1.0e12));
//!
//! let gravity = GravityReference::default();
//! let spawn = Pose::from_translation(Vec3::new(0.0, 100.5, 0.0));
//! let player = PlayerController::new(ControllerId(1), ControllerConfig::default(), &gravity, spawn);
//!
//! let mut session = Session::new(scene, player).with_gravity(gravity);
//! session.tick(1.0 / 60.0, &ControlInput::default());
//! ```

pub mod camera;
pub mod config;
pub mod control;
pub mod error;
pub mod input;
pub mod interaction;
pub mod physics;
pub mod player;
pub mod session;
pub mod vehicle_controller;
pub mod world;

pub use config::{ConfigError, ControllerConfig};
pub use control::{ActiveControllerRegistry, ControlContext, Controllable, ControllerId, dispatch_input};
pub use error::ControllerError;
pub use input::ControlInput;
pub use interaction::{GazeTarget, InteractableDetector};
pub use player::{PlayerController, PlayerState, PromptFlags, SeatBinding};
pub use session::{Session, TickReport};
pub use vehicle_controller::VehicleController;
