//! Scene graph and queries
//!
//! Objects form a parent/child hierarchy used for two things: resolving world
//! poses of anchors that ride on vehicles, and answering "is this object part
//! of that seat". Parents must exist before their children, so the hierarchy
//! is acyclic by construction.

use glam::Vec3;

use super::celestial::{BodyId, CelestialBody};
use super::vehicle::{Vehicle, VehicleId};
use crate::error::ControllerError;
use crate::physics::{BoxCollider, Pose, Ray, ray_box_intersect, ray_sphere_intersect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

/// Gameplay tag attached to scene objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tag {
    #[default]
    Untagged,
    /// Can be looked at and used (seats, consoles)
    Interactable,
    SpaceShip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub tag: Tag,
    pub parent: Option<ObjectId>,
    /// Pose relative to the parent (world pose when there is no parent)
    pub local: Pose,
    pub collider: Option<BoxCollider>,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: Tag::Untagged,
            parent: None,
            local: Pose::IDENTITY,
            collider: None,
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_parent(mut self, parent: ObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_local(mut self, local: Pose) -> Self {
        self.local = local;
        self
    }

    pub fn with_collider(mut self, collider: BoxCollider) -> Self {
        self.collider = Some(collider);
        self
    }
}

/// What a scene raycast hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Object(ObjectId),
    Body(BodyId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub target: HitTarget,
    pub distance: f32,
    pub point: Vec3,
}

#[derive(Debug, Default, Clone)]
pub struct Scene {
    objects: Vec<SceneObject>,
    bodies: Vec<CelestialBody>,
    vehicles: Vec<Vehicle>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object. Fails if the named parent does not exist yet.
    pub fn spawn(&mut self, object: SceneObject) -> Result<ObjectId, ControllerError> {
        if let Some(parent) = object.parent {
            if parent.0 >= self.objects.len() {
                return Err(ControllerError::UnknownObject(parent));
            }
        }
        self.objects.push(object);
        Ok(ObjectId(self.objects.len() - 1))
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
    }

    /// World pose of an object, composed up the parent chain.
    pub fn world_pose(&self, id: ObjectId) -> Option<Pose> {
        let mut object = self.object(id)?;
        let mut pose = object.local;
        while let Some(parent) = object.parent {
            object = self.object(parent)?;
            pose = object.local.mul_pose(&pose);
        }
        Some(pose)
    }

    /// True if `candidate` is `root` itself or any descendant of it.
    pub fn is_part_of(&self, candidate: ObjectId, root: ObjectId) -> bool {
        let mut current = Some(candidate);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.object(id).and_then(|o| o.parent);
        }
        false
    }

    pub fn add_body(&mut self, body: CelestialBody) -> BodyId {
        let id = body.id;
        self.bodies.push(body);
        id
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> Result<VehicleId, ControllerError> {
        if self.object(vehicle.root).is_none() {
            return Err(ControllerError::UnknownObject(vehicle.root));
        }
        let id = vehicle.id;
        self.vehicles.push(vehicle);
        Ok(id)
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    pub fn vehicle_mut(&mut self, id: VehicleId) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.id == id)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// First vehicle whose interior volume contains `point`.
    pub fn vehicle_containing(&self, point: Vec3) -> Option<VehicleId> {
        self.vehicles.iter().find_map(|vehicle| {
            let pose = self.world_pose(vehicle.root)?;
            vehicle.interior.contains(&pose, point).then_some(vehicle.id)
        })
    }

    /// Nearest collider hit along `ray`.
    ///
    /// Colliders containing the ray origin are skipped, so a camera inside a
    /// ship hull still sees the seats in the cabin.
    pub fn raycast(&self, ray: &Ray, max_distance: Option<f32>) -> Option<SceneHit> {
        let limit = max_distance.unwrap_or(f32::INFINITY);

        let object_hits = self.objects().filter_map(|(id, object)| {
            let collider = object.collider.as_ref()?;
            let pose = self.world_pose(id)?;
            let t = ray_box_intersect(ray, &pose, collider)?;
            Some((HitTarget::Object(id), t))
        });
        let body_hits = self.bodies.iter().filter_map(|body| {
            let t = ray_sphere_intersect(ray, body.position, body.radius)?;
            Some((HitTarget::Body(body.id), t))
        });

        object_hits
            .chain(body_hits)
            .filter(|(_, t)| *t <= limit)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(target, distance)| SceneHit {
                target,
                distance,
                point: ray.at(distance),
            })
    }

    /// Advance bodies and vehicles by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for body in &mut self.bodies {
            body.advance(dt);
        }
        for vehicle in &self.vehicles {
            if let Some(root) = self.objects.get_mut(vehicle.root.0) {
                root.local.translation += vehicle.velocity * dt;
            }
        }
    }
}
