//! Controller errors
//!
//! Every variant is a precondition violation. They are returned by the
//! integrator and seating code, then logged by the controller, which skips the
//! offending update instead of aborting the tick.

use thiserror::Error;

use crate::world::{BodyId, ObjectId, VehicleId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    /// Ground movement or jump requested while no celestial body is recorded
    /// as the current planet.
    #[error("no reference body recorded for ground movement")]
    NoReferenceBody,
    #[error("celestial body {0:?} is not in the scene")]
    UnknownBody(BodyId),
    #[error("vehicle {0:?} is not in the scene")]
    UnknownVehicle(VehicleId),
    #[error("scene object {0:?} does not exist")]
    UnknownObject(ObjectId),
}
