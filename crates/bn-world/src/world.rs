//! `World` — the in-memory host behind every collaborator trait.
//!
//! # Data layout
//!
//! Entity state is stored struct-of-arrays, indexed by `EntityId`:
//!
//! ```text
//! position[e]  rotation[e]  velocity[e]  tag[e]  layer[e]  alive[e]  template[e]
//! ```
//!
//! Ids are never reused across templates.  Despawning a templated entity parks
//! its id in that template's pool and the next `spawn` of the same template
//! revives it; despawning a free-standing entity just marks it dead.

use bn_behavior::{InputSource, KeyMode, Spawner, SpatialQuery, Transforms};
use bn_core::{EntityId, LayerMask, Quat, TemplateId, Vec3};

use crate::{InputState, SpatialIndex, TemplateRegistry};

#[derive(Default)]
pub struct World {
    // ── Entity columns ────────────────────────────────────────────────────
    pub position: Vec<Vec3>,
    pub rotation: Vec<Quat>,
    pub velocity: Vec<Vec3>,
    pub tag:      Vec<String>,
    pub layer:    Vec<u8>,
    pub alive:    Vec<bool>,
    /// Template the entity was spawned from; `TemplateId::INVALID` for
    /// free-standing entities.
    pub template: Vec<TemplateId>,

    pub templates: TemplateRegistry,
    pub input:     InputState,

    index:   SpatialIndex,
    spawned: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Entity lifetime ───────────────────────────────────────────────────

    /// Add a free-standing entity at `position` with identity rotation.
    pub fn create(&mut self, tag: impl Into<String>, layer: u8, position: Vec3) -> EntityId {
        self.push(tag.into(), layer, position, Quat::IDENTITY, TemplateId::INVALID)
    }

    fn push(
        &mut self,
        tag:      String,
        layer:    u8,
        position: Vec3,
        rotation: Quat,
        template: TemplateId,
    ) -> EntityId {
        let id = EntityId(self.position.len() as u32);
        self.position.push(position);
        self.rotation.push(rotation);
        self.velocity.push(Vec3::ZERO);
        self.tag.push(tag);
        self.layer.push(layer);
        self.alive.push(true);
        self.template.push(template);
        self.index.mark_dirty();
        id
    }

    #[inline]
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.alive.get(entity.index()).copied().unwrap_or(false)
    }

    /// Live entity ids in ascending order.
    pub fn iter_alive(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &live)| live)
            .map(|(i, _)| EntityId(i as u32))
    }

    /// Entity slots ever allocated, dead ones included.
    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    /// Successful `spawn` calls since construction.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    // ── Physics ───────────────────────────────────────────────────────────

    /// Advance every live entity by `velocity * dt`.
    pub fn integrate(&mut self, dt: f32) {
        let mut moved = false;
        for ((p, v), &live) in self.position.iter_mut().zip(&self.velocity).zip(&self.alive) {
            if live && *v != Vec3::ZERO {
                *p += *v * dt;
                moved = true;
            }
        }
        if moved {
            self.index.mark_dirty();
        }
    }

    /// Times the spatial index has been rebuilt.
    pub fn index_rebuilds(&self) -> u64 {
        self.index.rebuilds()
    }
}

// ── Collaborator impls ────────────────────────────────────────────────────────

impl SpatialQuery for World {
    /// Results are sorted by ascending `EntityId`.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<EntityId> {
        let mut hits = self.index.within(&self.position, &self.alive, center, radius);
        hits.retain(|e| mask.contains(self.layer[e.index()]));
        hits
    }

    fn tag(&self, entity: EntityId) -> Option<&str> {
        if !self.is_alive(entity) {
            return None;
        }
        self.tag.get(entity.index()).map(String::as_str)
    }
}

impl InputSource for World {
    fn axis(&self, name: &str) -> f32 {
        self.input.axis(name)
    }

    fn key(&self, name: &str, mode: KeyMode) -> bool {
        self.input.key(name, mode)
    }
}

impl Transforms for World {
    fn position(&self, entity: EntityId) -> Option<Vec3> {
        self.is_alive(entity).then(|| self.position[entity.index()])
    }

    fn set_position(&mut self, entity: EntityId, position: Vec3) {
        if self.is_alive(entity) {
            self.position[entity.index()] = position;
            self.index.mark_dirty();
        }
    }

    fn rotation(&self, entity: EntityId) -> Option<Quat> {
        self.is_alive(entity).then(|| self.rotation[entity.index()])
    }

    fn set_rotation(&mut self, entity: EntityId, rotation: Quat) {
        if self.is_alive(entity) {
            self.rotation[entity.index()] = rotation;
        }
    }

    fn velocity(&self, entity: EntityId) -> Option<Vec3> {
        self.is_alive(entity).then(|| self.velocity[entity.index()])
    }

    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3) {
        if self.is_alive(entity) {
            self.velocity[entity.index()] = velocity;
        }
    }
}

/// Pooled spawns reuse the despawned entity's slot and id.
impl Spawner for World {
    fn spawn(&mut self, template: TemplateId, position: Vec3, rotation: Quat) -> Option<EntityId> {
        let (tag, layer) = {
            let t = self.templates.get(template)?;
            (t.tag.clone(), t.layer)
        };
        self.spawned += 1;
        let Some(id) = self.templates.reuse(template) else {
            return Some(self.push(tag, layer, position, rotation, template));
        };
        let i = id.index();
        self.position[i] = position;
        self.rotation[i] = rotation;
        self.velocity[i] = Vec3::ZERO;
        self.alive[i] = true;
        self.index.mark_dirty();
        Some(id)
    }

    fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let i = entity.index();
        self.alive[i] = false;
        self.velocity[i] = Vec3::ZERO;
        if self.template[i].is_valid() {
            self.templates.recycle(self.template[i], entity);
        }
        self.index.mark_dirty();
        true
    }
}
