//! Player controller
//!
//! Ties the locomotion pieces together. Each tick has two halves:
//!
//! - [`PlayerController::update`] runs for every tick regardless of who has
//!   control. It applies queued contact events, works out which vehicle the
//!   player is standing in, resolves the [`PlayerState`], and refreshes the
//!   gaze target and prompt flags.
//! - [`Controllable::handle_input`] only runs while the player holds input
//!   authority. It turns the camera, integrates movement for the current
//!   regime and handles the sit / stand transitions.

use glam::Vec3;
use log::{debug, info, warn};

use super::movement_controller::{
    correct_orientation, desired_velocity, ground_movement, jetpack_force, jump, ship_movement, space_movement,
};
use super::prompts::PromptFlags;
use super::seating::{Attachment, SeatBinding};
use super::state::PlayerState;
use crate::camera::{FpsCameraRig, RaycastConfig};
use crate::config::ControllerConfig;
use crate::control::{ActiveControllerRegistry, ControlContext, Controllable, ControllerId};
use crate::error::ControllerError;
use crate::input::ControlInput;
use crate::interaction::{GazeTarget, InteractableDetector};
use crate::physics::{ContactQueue, ForceMode, Pose, RigidBody};
use crate::world::{BodyId, CelestialBody, GravityReference, Scene, VehicleId};

#[derive(Debug, Clone)]
pub struct PlayerController {
    id: ControllerId,
    config: ControllerConfig,
    body: RigidBody,
    camera: FpsCameraRig,
    detector: InteractableDetector,

    // Context flags. `is_grounded` only changes through contact events and
    // jumping, `is_seated` only through sit / stand_up.
    is_grounded: bool,
    is_seated: bool,
    current_planet: Option<BodyId>,
    inside_vehicle: Option<VehicleId>,

    state: PlayerState,
    gaze: GazeTarget,
    prompts: PromptFlags,

    seats: Vec<SeatBinding>,
    seated_in: Option<SeatBinding>,
    attachment: Option<Attachment>,
    contacts: ContactQueue,
}

impl PlayerController {
    /// Spawn a player at `spawn`.
    ///
    /// The configured initial velocity is scaled by the gravity reference's
    /// time step, so it is expressed in the same units as the n-body
    /// simulation driving the planets.
    pub fn new(id: ControllerId, config: ControllerConfig, gravity: &GravityReference, spawn: Pose) -> Self {
        let mut body = RigidBody::new(config.mass, spawn.translation, spawn.rotation);
        body.set_velocity(config.initial_velocity * gravity.time_step);

        let camera = FpsCameraRig::new(config.eye_height, config.mouse_sensitivity, config.vertical_rotation_limit);
        let detector = InteractableDetector::new(
            RaycastConfig::new(config.camera_aspect, config.camera_fov),
            config.max_gaze_distance,
        );

        Self {
            id,
            config,
            body,
            camera,
            detector,
            is_grounded: false,
            is_seated: false,
            current_planet: None,
            inside_vehicle: None,
            state: PlayerState::Flying,
            gaze: GazeTarget::Nothing,
            prompts: PromptFlags::from_state(PlayerState::Flying, GazeTarget::Nothing),
            seats: Vec::new(),
            seated_in: None,
            attachment: None,
            contacts: ContactQueue::new(),
        }
    }

    /// Register a seat the player may sit in.
    pub fn add_seat(&mut self, binding: SeatBinding) {
        self.seats.push(binding);
    }

    pub fn with_seat(mut self, binding: SeatBinding) -> Self {
        self.add_seat(binding);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn id(&self) -> ControllerId {
        self.id
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    pub fn body(&self) -> &RigidBody {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    pub fn camera(&self) -> &FpsCameraRig {
        &self.camera
    }

    /// World pose of the eye.
    pub fn camera_pose(&self) -> Pose {
        self.camera.world_pose(&self.body.pose())
    }

    #[inline]
    pub fn state(&self) -> PlayerState {
        self.state
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    #[inline]
    pub fn is_seated(&self) -> bool {
        self.is_seated
    }

    /// Last celestial body the player touched down on. Kept after leaving it.
    pub fn current_planet(&self) -> Option<BodyId> {
        self.current_planet
    }

    pub fn inside_vehicle(&self) -> Option<VehicleId> {
        self.inside_vehicle
    }

    pub fn gaze(&self) -> GazeTarget {
        self.gaze
    }

    pub fn prompts(&self) -> PromptFlags {
        self.prompts
    }

    pub fn attachment(&self) -> Option<Attachment> {
        self.attachment
    }

    // ========================================================================
    // Per-tick bookkeeping
    // ========================================================================

    /// Queue a collision transition with a celestial body. Applied at the start
    /// of the next [`update`](Self::update).
    pub fn notify_contact(&mut self, body: BodyId, entered: bool) {
        self.contacts.push(body, entered);
    }

    /// Refresh flags, state, gaze target and prompts for this tick.
    pub fn update(&mut self, scene: &Scene, input: &ControlInput) {
        for event in self.contacts.drain() {
            if event.entered {
                self.is_grounded = true;
                self.current_planet = Some(event.body);
            } else {
                self.is_grounded = false;
            }
        }

        self.inside_vehicle = scene.vehicle_containing(self.body.position);

        let state = PlayerState::resolve(self.is_seated, self.inside_vehicle.is_some(), self.is_grounded);
        if state != self.state {
            debug!("Player {:?} state: {} -> {}", self.id, self.state, state);
        }
        self.state = state;

        let camera = self.camera_pose();
        self.gaze = self.detector.detect(scene, &camera, input.pointer);
        self.prompts = PromptFlags::from_state(self.state, self.gaze);
    }

    /// Move a seated player onto its seat's current world pose.
    pub fn sync_attachment(&mut self, scene: &Scene) {
        let Some(attachment) = self.attachment else {
            return;
        };
        match attachment.world_pose(scene) {
            Some(pose) => self.body.set_pose(pose),
            None => warn!("Seat anchor lost: {}", ControllerError::UnknownObject(attachment.anchor)),
        }
    }

    // ========================================================================
    // External force hooks
    // ========================================================================

    /// Instant velocity change `force / mass`, used by the gravity manager.
    pub fn update_force(&mut self, force: Vec3) {
        self.body.add_force(force, ForceMode::Impulse);
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.body.set_velocity(velocity);
    }

    // ========================================================================
    // Movement
    // ========================================================================

    fn reference_body<'s>(&self, scene: &'s Scene) -> Result<&'s CelestialBody, ControllerError> {
        let id = self.current_planet.ok_or(ControllerError::NoReferenceBody)?;
        scene.body(id).ok_or(ControllerError::UnknownBody(id))
    }

    fn move_on_ground(&mut self, input: &ControlInput, scene: &Scene, dt: f32) {
        let desired = desired_velocity(&self.body, input, self.config.movement_speed(input.running));
        let reference = self.reference_body(scene);
        let planet = reference.as_ref().ok().copied();

        let outcome = if input.jumping {
            jump(&mut self.body, desired, planet, self.config.jump_force, &mut self.is_grounded)
        } else {
            ground_movement(&mut self.body, desired, planet, self.config.stick_to_ground_force)
        };
        if let Err(err) = reference.and(outcome) {
            warn!("Skipping ground movement for player {:?}: {}", self.id, err);
            return;
        }

        if let (false, Some(planet)) = (input.jumping, planet) {
            correct_orientation(&mut self.body, planet, self.config.stand_up_speed, dt);
            self.camera.level();
        }
    }

    fn move_on_ship(&mut self, input: &ControlInput, scene: &Scene) {
        let desired = desired_velocity(&self.body, input, self.config.movement_speed(input.running));
        let ship = self.inside_vehicle.and_then(|id| scene.vehicle(id).map(|vehicle| vehicle.velocity));
        match ship {
            Some(ship_velocity) => {
                ship_movement(&mut self.body, desired, ship_velocity);
            }
            None => warn!("Skipping ship movement for player {:?}: not inside a known vehicle", self.id),
        }
    }

    fn move_in_space(&mut self, input: &ControlInput) {
        let force = jetpack_force(&self.body, input, self.config.jetpack_force);
        space_movement(&mut self.body, force);
    }

    // ========================================================================
    // Seating
    // ========================================================================

    /// The bound seat whose hierarchy contains the current gaze target.
    pub fn seat_in_gaze(&self, scene: &Scene) -> Option<SeatBinding> {
        let target = self.gaze.object()?;
        self.seats.iter().find(|binding| binding.contains(scene, target)).copied()
    }

    /// Sit in `binding`'s seat and hand input authority to its vehicle.
    ///
    /// No-op (returns `false`) when already seated, when the gaze target is
    /// outside the seat hierarchy, or when the sitting anchor is missing.
    pub fn sit(&mut self, binding: SeatBinding, scene: &Scene, registry: &mut ActiveControllerRegistry) -> bool {
        if self.is_seated {
            return false;
        }
        if !self.gaze.object().is_some_and(|target| binding.contains(scene, target)) {
            return false;
        }

        let attachment = Attachment::with_yaw(binding.sitting_anchor, self.config.seat_yaw_correction_degrees);
        let Some(pose) = attachment.world_pose(scene) else {
            warn!("Cannot sit: {}", ControllerError::UnknownObject(binding.sitting_anchor));
            return false;
        };

        self.body.kinematic = true;
        self.body.set_pose(pose);
        self.body.set_velocity(Vec3::ZERO);
        self.attachment = Some(attachment);
        self.seated_in = Some(binding);
        self.camera.reset_local_rotation();
        self.body.collider_enabled = false;
        self.is_seated = true;
        self.state = PlayerState::Seated;
        self.prompts = PromptFlags::from_state(self.state, self.gaze);
        registry.switch_active(binding.vehicle_controller);

        info!("Player {:?} sat down in seat {:?}", self.id, binding.seat);
        true
    }

    /// Leave the seat, reappear at its stand-up anchor and take input
    /// authority back. No-op (returns `false`) while not seated.
    pub fn stand_up(&mut self, scene: &Scene, registry: &mut ActiveControllerRegistry) -> bool {
        if !self.is_seated {
            return false;
        }

        self.attachment = None;
        if let Some(binding) = self.seated_in.take() {
            match scene.world_pose(binding.stand_up_anchor) {
                Some(anchor) => self.body.position = anchor.translation,
                None => warn!("Standing up in place: {}", ControllerError::UnknownObject(binding.stand_up_anchor)),
            }
        }

        self.body.kinematic = false;
        self.body.collider_enabled = true;
        self.is_seated = false;
        self.inside_vehicle = scene.vehicle_containing(self.body.position);
        self.state = PlayerState::resolve(false, self.inside_vehicle.is_some(), self.is_grounded);
        self.prompts = PromptFlags::from_state(self.state, self.gaze);
        registry.switch_active(self.id);

        info!("Player {:?} stood up ({})", self.id, self.state);
        true
    }
}

impl Controllable for PlayerController {
    fn controller_id(&self) -> ControllerId {
        self.id
    }

    fn handle_input(&mut self, input: &ControlInput, ctx: &mut ControlContext<'_>) {
        let yaw = self.camera.apply_look(input.mouse_horizontal, input.mouse_vertical);
        if !self.is_seated {
            self.body.orientation = (self.body.orientation * yaw).normalize();
        }

        match self.state {
            PlayerState::OnGround => self.move_on_ground(input, ctx.scene, ctx.dt),
            PlayerState::OnShip => self.move_on_ship(input, ctx.scene),
            PlayerState::Flying => self.move_in_space(input),
            PlayerState::Seated => {}
        }

        if input.sit_key && !self.is_seated {
            if let Some(binding) = self.seat_in_gaze(ctx.scene) {
                self.sit(binding, ctx.scene, ctx.registry);
            }
        } else if input.interact_key && self.is_seated {
            self.stand_up(ctx.scene, ctx.registry);
        }
    }
}
