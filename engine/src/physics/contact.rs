//! Contact events between the player and celestial bodies
//!
//! Contacts arrive asynchronously relative to the controller tick, so they are
//! queued as edge-triggered events and drained at the start of the next
//! update. Repeated enter (or exit) events for the same body are harmless.

use std::collections::{HashSet, VecDeque};

use glam::Vec3;

use super::body::RigidBody;
use crate::world::{BodyId, CelestialBody};

/// Start or end of contact with a celestial body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub body: BodyId,
    pub entered: bool,
}

/// FIFO of contact events waiting for the next tick.
#[derive(Debug, Default, Clone)]
pub struct ContactQueue {
    events: VecDeque<ContactEvent>,
}

impl ContactQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, body: BodyId, entered: bool) {
        self.events.push_back(ContactEvent { body, entered });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and yield all pending events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = ContactEvent> + '_ {
        self.events.drain(..)
    }
}

/// Sphere-overlap contact detector.
///
/// Stands in for the broad phase of an external physics engine: reports an
/// enter event when the player sphere comes within `contact_offset` of a body
/// and an exit event once it separates by more than `separation_tolerance`.
#[derive(Debug, Clone)]
pub struct ContactMonitor {
    touching: HashSet<BodyId>,
    /// Gap at which a new contact starts. Absorbs rounding after a
    /// penetration fix leaves the sphere resting exactly on the surface.
    pub contact_offset: f32,
    /// Extra gap allowed before a touching contact is reported as exited.
    pub separation_tolerance: f32,
}

impl Default for ContactMonitor {
    fn default() -> Self {
        Self {
            touching: HashSet::new(),
            contact_offset: 0.01,
            separation_tolerance: 0.05,
        }
    }
}

impl ContactMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_touching(&self, body: BodyId) -> bool {
        self.touching.contains(&body)
    }

    /// Bodies currently reported as touching.
    pub fn touching(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.touching.iter().copied()
    }

    /// Drop `body` from the touching set without emitting an exit, so the
    /// next `detect` reports a fresh enter if the sphere still overlaps it.
    ///
    /// Returns `true` if the body was touching.
    pub fn forget(&mut self, body: BodyId) -> bool {
        self.touching.remove(&body)
    }

    /// Compare the player sphere against every body and return the contact
    /// transitions since the previous call. A disabled collider touches nothing.
    pub fn detect(
        &mut self,
        position: Vec3,
        radius: f32,
        collider_enabled: bool,
        bodies: &[CelestialBody],
    ) -> Vec<ContactEvent> {
        let mut events = Vec::new();
        for body in bodies {
            let gap = body.height_above_surface(position) - radius;
            let was_touching = self.touching.contains(&body.id);
            let threshold = if was_touching { self.separation_tolerance } else { self.contact_offset };
            let touching = collider_enabled && gap <= threshold;

            if touching && !was_touching {
                self.touching.insert(body.id);
                events.push(ContactEvent { body: body.id, entered: true });
            } else if !touching && was_touching {
                self.touching.remove(&body.id);
                events.push(ContactEvent { body: body.id, entered: false });
            }
        }
        events
    }
}

/// Push a dynamic body out of a celestial sphere and cancel the part of its
/// velocity (relative to the sphere) that points inward.
///
/// Returns `true` if the body was penetrating.
pub fn resolve_sphere_penetration(body: &mut RigidBody, radius: f32, celestial: &CelestialBody) -> bool {
    if body.kinematic || !body.collider_enabled {
        return false;
    }
    let offset = body.position - celestial.position;
    let distance = offset.length();
    let min_distance = celestial.radius + radius;
    if distance >= min_distance {
        return false;
    }

    let normal = if distance > 1e-4 { offset / distance } else { Vec3::Y };
    body.position = celestial.position + normal * min_distance;

    let relative = body.velocity - celestial.velocity;
    let inward = relative.dot(normal);
    if inward < 0.0 {
        body.velocity -= normal * inward;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn planet() -> CelestialBody {
        CelestialBody::new(BodyId(1), "Terra", Vec3::ZERO, 10.0, 1.0e6)
    }

    #[test]
    fn test_queue_preserves_order() {
        let mut queue = ContactQueue::new();
        queue.push(BodyId(1), true);
        queue.push(BodyId(1), false);
        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events.len(), 2);
        assert!(events[0].entered);
        assert!(!events[1].entered);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_monitor_is_edge_triggered() {
        let bodies = [planet()];
        let mut monitor = ContactMonitor::new();

        let on_surface = Vec3::new(0.0, 10.5, 0.0);
        let events = monitor.detect(on_surface, 0.5, true, &bodies);
        assert_eq!(events, vec![ContactEvent { body: BodyId(1), entered: true }]);

        // Still touching: no repeated enter
        assert!(monitor.detect(on_surface, 0.5, true, &bodies).is_empty());

        let above = Vec3::new(0.0, 12.0, 0.0);
        let events = monitor.detect(above, 0.5, true, &bodies);
        assert_eq!(events, vec![ContactEvent { body: BodyId(1), entered: false }]);
        assert!(monitor.detect(above, 0.5, true, &bodies).is_empty());
    }

    #[test]
    fn test_disabled_collider_exits_contact() {
        let bodies = [planet()];
        let mut monitor = ContactMonitor::new();
        let on_surface = Vec3::new(0.0, 10.5, 0.0);
        monitor.detect(on_surface, 0.5, true, &bodies);

        let events = monitor.detect(on_surface, 0.5, false, &bodies);
        assert_eq!(events, vec![ContactEvent { body: BodyId(1), entered: false }]);
    }

    #[test]
    fn test_forget_rearms_enter() {
        let bodies = [planet()];
        let mut monitor = ContactMonitor::new();
        let on_surface = Vec3::new(0.0, 10.5, 0.0);
        monitor.detect(on_surface, 0.5, true, &bodies);

        // A hop smaller than the separation tolerance never reports an exit
        let hop = Vec3::new(0.0, 10.53, 0.0);
        assert!(monitor.detect(hop, 0.5, true, &bodies).is_empty());
        assert!(monitor.is_touching(BodyId(1)));

        assert!(monitor.forget(BodyId(1)));
        assert!(!monitor.forget(BodyId(1)));
        assert_eq!(monitor.touching().count(), 0);

        // Back on the surface: a new enter instead of silence
        let events = monitor.detect(on_surface, 0.5, true, &bodies);
        assert_eq!(events, vec![ContactEvent { body: BodyId(1), entered: true }]);
    }

    #[test]
    fn test_forget_while_airborne_stays_quiet() {
        let bodies = [planet()];
        let mut monitor = ContactMonitor::new();
        monitor.detect(Vec3::new(0.0, 10.5, 0.0), 0.5, true, &bodies);
        monitor.forget(BodyId(1));

        // Already above the surface: neither enter nor exit
        assert!(monitor.detect(Vec3::new(0.0, 10.53, 0.0), 0.5, true, &bodies).is_empty());
        assert!(!monitor.is_touching(BodyId(1)));
    }

    #[test]
    fn test_penetration_resolution() {
        let mut celestial = planet();
        celestial.velocity = Vec3::new(2.0, 0.0, 0.0);
        let mut body = RigidBody::new(70.0, Vec3::new(0.0, 9.0, 0.0), Quat::IDENTITY);
        body.velocity = Vec3::new(2.0, -5.0, 0.0);

        assert!(resolve_sphere_penetration(&mut body, 0.5, &celestial));
        assert!((body.position.y - 10.5).abs() < 1e-5);
        // Inward relative component removed, tangential frame velocity kept
        assert!((body.velocity - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
    }
}
