//! Simulation session
//!
//! Owns the scene, the control registry and every controllable, and runs one
//! fixed tick at a time:
//!
//! 1. Player bookkeeping (contacts, state, gaze, prompts)
//! 2. Input dispatch to whichever controller holds authority
//! 3. Pilot release requests turn into `stand_up`
//! 4. Contacts the player no longer counts as ground are re-armed
//! 5. Gravity pull on the player
//! 6. Integration: scene, player body, penetration, seat attachment
//! 7. Contact detection, queued for the next tick

use log::{debug, trace};

use crate::control::{ActiveControllerRegistry, ControlContext, Controllable, ControllerId, dispatch_input};
use crate::input::ControlInput;
use crate::physics::{ContactMonitor, resolve_sphere_penetration};
use crate::player::PlayerController;
use crate::vehicle_controller::VehicleController;
use crate::world::{BodyId, GravityReference, Scene};

/// Summary of a single tick, mostly for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Controller that received the input, if any
    pub handled_by: Option<ControllerId>,
    /// Contact transitions detected at the end of the tick
    pub contact_events: usize,
    /// The pilot left the seat this tick
    pub released: bool,
}

pub struct Session {
    scene: Scene,
    registry: ActiveControllerRegistry,
    player: PlayerController,
    vehicles: Vec<VehicleController>,
    monitor: ContactMonitor,
    gravity: Option<GravityReference>,
    ticks: u64,
}

impl Session {
    /// New session with the player holding input authority.
    pub fn new(scene: Scene, player: PlayerController) -> Self {
        Self {
            registry: ActiveControllerRegistry::with_active(player.id()),
            scene,
            player,
            vehicles: Vec::new(),
            monitor: ContactMonitor::new(),
            gravity: None,
            ticks: 0,
        }
    }

    pub fn with_vehicle(mut self, vehicle: VehicleController) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    /// Enable Newtonian pull from every celestial body on the player.
    pub fn with_gravity(mut self, gravity: GravityReference) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn registry(&self) -> &ActiveControllerRegistry {
        &self.registry
    }

    pub fn vehicle_controller(&self, id: ControllerId) -> Option<&VehicleController> {
        self.vehicles.iter().find(|vehicle| vehicle.id() == id)
    }

    pub fn contact_monitor(&self) -> &ContactMonitor {
        &self.monitor
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance the simulation by `dt` seconds with this tick's input.
    pub fn tick(&mut self, dt: f32, input: &ControlInput) -> TickReport {
        let mut report = TickReport::default();

        self.player.update(&self.scene, input);

        {
            let mut controllers: Vec<&mut dyn Controllable> = Vec::with_capacity(1 + self.vehicles.len());
            controllers.push(&mut self.player);
            controllers.extend(self.vehicles.iter_mut().map(|vehicle| vehicle as &mut dyn Controllable));

            let mut ctx = ControlContext {
                scene: &mut self.scene,
                registry: &mut self.registry,
                dt,
            };
            report.handled_by = dispatch_input(&mut controllers, input, &mut ctx);
        }

        let release = self
            .vehicles
            .iter_mut()
            .fold(false, |requested, vehicle| vehicle.take_release_request() || requested);
        if release {
            report.released = self.player.stand_up(&self.scene, &mut self.registry);
        }

        // A jump clears the grounded flag without any exit event. Forget those
        // contacts so landing from a hop below the separation tolerance still
        // reports an enter.
        if !self.player.is_grounded() {
            let stale: Vec<BodyId> = self.monitor.touching().collect();
            for body in stale {
                self.monitor.forget(body);
                debug!("Re-armed contact with {body:?} after leaving the ground");
            }
        }

        if let Some(gravity) = &self.gravity {
            let body = self.player.body();
            let pull = gravity.pull_on(body.position, body.mass(), self.scene.bodies());
            self.player.update_force(pull * dt);
        }

        self.scene.advance(dt);
        self.player.body_mut().integrate(dt);
        let radius = self.player.config().collider_radius;
        for celestial in self.scene.bodies() {
            if resolve_sphere_penetration(self.player.body_mut(), radius, celestial) {
                trace!("Resolved penetration with {}", celestial.name);
            }
        }
        self.player.sync_attachment(&self.scene);

        let body = self.player.body();
        let events = self
            .monitor
            .detect(body.position, radius, body.collider_enabled, self.scene.bodies());
        report.contact_events = events.len();
        for event in events {
            debug!("Contact {:?} {}", event.body, if event.entered { "entered" } else { "exited" });
            self.player.notify_contact(event.body, event.entered);
        }

        self.ticks += 1;
        report
    }
}
