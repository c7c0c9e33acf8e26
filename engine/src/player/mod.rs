//! Player Module
//!
//! Player character locomotion across three regimes plus seating.
//!
//! # Components
//!
//! - [`PlayerController`] - Owns the body, camera rig and context flags; the
//!   [`Controllable`](crate::control::Controllable) for on-foot input
//! - [`PlayerState`] - Regime resolved each tick from the context flags
//! - [`movement_controller`] - Per-regime physics: ground snap, jump, ship
//!   snap, jetpack flight, orientation correction
//! - [`SeatBinding`] / [`Attachment`] - Seat anchors and reference-frame attachment
//! - [`PromptFlags`] - Observational UI prompt visibility

pub mod controller;
pub mod movement_controller;
pub mod prompts;
pub mod seating;
pub mod state;

pub use controller::PlayerController;
pub use movement_controller::{
    correct_orientation, desired_velocity, ground_movement, jetpack_force, jump, ship_movement, space_movement,
    tilt_from_upright, UPRIGHT_TOLERANCE,
};
pub use prompts::PromptFlags;
pub use seating::{Attachment, SeatBinding};
pub use state::PlayerState;
