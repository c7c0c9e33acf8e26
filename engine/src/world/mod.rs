//! World Module
//!
//! The scene the controller moves through: celestial bodies it can stand on,
//! vehicles it can board, and the object hierarchy that holds seats, anchors
//! and interactables. The controller reads this state; the session advances it.
//!
//! Objects are referred to by id rather than by reference, so a controller
//! never owns (or keeps alive) anything in the scene.

pub mod celestial;
pub mod gravity;
pub mod scene;
pub mod vehicle;

pub use celestial::{BodyId, CelestialBody};
pub use gravity::GravityReference;
pub use scene::{HitTarget, ObjectId, Scene, SceneHit, SceneObject, Tag};
pub use vehicle::{Vehicle, VehicleId};
