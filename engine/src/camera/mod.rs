//! Camera Module
//!
//! First-person camera rig and screen-space raycasting.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod fps_controller;
pub mod raycast;

pub use fps_controller::FpsCameraRig;
pub use raycast::{RaycastConfig, get_ray_direction, pointer_ray};
