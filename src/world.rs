//! Occupancy/instantiation seam to the host world
//!
//! The generation engine never owns spawned entities. It counts what already
//! sits inside a region, fires instantiation requests, and asks for bulk
//! destruction at round restart. Everything else (gravity, collisions,
//! despawning defeated entities) is the host's business.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::generation::{EntityTemplate, Rect};

/// Classification of tracked entities, mirroring the host's collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityClass {
    /// Planets, suns, black holes, pickups - everything the generator places
    Hazard,
    /// Player-fired projectiles - cleared on restart, never counted for density
    Projectile,
}

/// Spatial shape for occupancy queries.
#[derive(Debug, Clone, Copy)]
pub enum QueryShape {
    /// Full region bounds
    Rect(Rect),
    /// Clearance disk around a spawn candidate
    Disk { center: Vec2, radius: f32 },
}

impl QueryShape {
    pub fn contains(&self, point: Vec2) -> bool {
        match *self {
            QueryShape::Rect(rect) => rect.contains(point),
            QueryShape::Disk { center, radius } => {
                point.distance_squared(center) <= radius * radius
            }
        }
    }
}

/// Handle to a spawned entity, opaque to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

/// The consumed surface of the host world.
pub trait OccupancyWorld {
    /// Number of tracked entities of `class` intersecting `shape`
    fn occupancy(&self, shape: QueryShape, class: EntityClass) -> usize;

    /// Fire-and-forget instantiation request; rotation in radians
    fn instantiate(&mut self, template: EntityTemplate, pos: Vec2, rotation: f32) -> EntityHandle;

    /// Destroy every tracked entity of `class`
    fn destroy_all(&mut self, class: EntityClass);
}

/// In-memory occupancy index backing the headless demo and the test suite.
///
/// Entities are points; a real host would query collider footprints instead.
#[derive(Debug, Default)]
pub struct FieldWorld {
    entities: Vec<FieldEntity>,
    next_id: u32,
}

#[derive(Debug, Clone, Copy)]
struct FieldEntity {
    handle: EntityHandle,
    template: EntityTemplate,
    class: EntityClass,
    pos: Vec2,
}

impl FieldWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tracked entities of every class
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Insert an entity directly (host-driven spawns such as projectiles)
    pub fn insert(&mut self, template: EntityTemplate, class: EntityClass, pos: Vec2) -> EntityHandle {
        let handle = EntityHandle(self.next_id);
        self.next_id += 1;
        self.entities.push(FieldEntity {
            handle,
            template,
            class,
            pos,
        });
        handle
    }

    /// Translate every entity; stand-in for the host's physics step so the
    /// demo field actually drains and refills.
    pub fn drift(&mut self, delta: Vec2) {
        for entity in &mut self.entities {
            entity.pos += delta;
        }
    }

    /// Remove tracked entities that left the play field, the way the original
    /// game's despawn trigger ringed the board. Returns how many were culled.
    pub fn cull_outside(&mut self, bounds: Rect) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| bounds.contains(e.pos));
        before - self.entities.len()
    }

    /// Destroy one entity (defeated, collected...). Returns false when the
    /// handle is already gone.
    pub fn destroy(&mut self, handle: EntityHandle) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.handle != handle);
        before != self.entities.len()
    }

    /// Number of live instances of `template`
    pub fn count_of(&self, template: EntityTemplate) -> usize {
        self.entities
            .iter()
            .filter(|e| e.template == template)
            .count()
    }

    /// Positions of all tracked entities, in spawn order
    pub fn positions(&self) -> Vec<Vec2> {
        self.entities.iter().map(|e| e.pos).collect()
    }
}

impl OccupancyWorld for FieldWorld {
    fn occupancy(&self, shape: QueryShape, class: EntityClass) -> usize {
        self.entities
            .iter()
            .filter(|e| e.class == class && shape.contains(e.pos))
            .count()
    }

    fn instantiate(&mut self, template: EntityTemplate, pos: Vec2, _rotation: f32) -> EntityHandle {
        self.insert(template, EntityClass::Hazard, pos)
    }

    fn destroy_all(&mut self, class: EntityClass) {
        self.entities.retain(|e| e.class != class);
    }
}
