//! Collaborator traits implemented by the host engine.
//!
//! The dispatcher and the cell bus know nothing about physics, input or
//! entity pools.  Behaviors reach those through the narrow traits below,
//! bundled as [`Host`] and handed to every hook via
//! [`TickContext::host`][crate::TickContext].
//!
//! `bn-world` provides an in-memory implementation of all four; a game engine
//! binding would implement them over its own scene.

use bn_core::{EntityId, LayerMask, Quat, TemplateId, Vec3};

/// Sphere-overlap queries against the host's collision world.
pub trait SpatialQuery {
    /// Entities within `radius` of `center` whose layer is in `mask`.
    ///
    /// Result order is defined by the host.  Detection behaviors that pick
    /// the last match depend on it.
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<EntityId>;

    /// Tag string of a live entity.
    fn tag(&self, entity: EntityId) -> Option<&str>;
}

/// How a key is polled.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum KeyMode {
    /// `true` only on the frame the key went down.
    #[default]
    Press,
    /// `true` on every frame the key is down.
    Hold,
}

/// Logical input polling.
pub trait InputSource {
    /// Current value of a named axis, usually in `[-1, 1]`.  Unknown axes
    /// read as `0.0`.
    fn axis(&self, name: &str) -> f32;

    fn key(&self, name: &str, mode: KeyMode) -> bool;
}

/// Pose and velocity of host entities.  Getters return `None` for entities
/// that are not alive.
pub trait Transforms {
    fn position(&self, entity: EntityId) -> Option<Vec3>;
    fn set_position(&mut self, entity: EntityId, position: Vec3);

    fn rotation(&self, entity: EntityId) -> Option<Quat>;
    fn set_rotation(&mut self, entity: EntityId, rotation: Quat);

    fn velocity(&self, entity: EntityId) -> Option<Vec3>;
    fn set_velocity(&mut self, entity: EntityId, velocity: Vec3);
}

/// Template instantiation with pooling.
///
/// Entity handles carry no generation.  A recycled instance keeps the
/// [`EntityId`] it had before `despawn`, so a handle kept past `despawn`
/// names whatever the pool hands out next.  Clear cells that hold a
/// despawned entity.
pub trait Spawner {
    /// Instantiate (or recycle) an entity of `template`.  `None` if the
    /// template is unknown.  A recycled entity is returned under its old id.
    fn spawn(&mut self, template: TemplateId, position: Vec3, rotation: Quat) -> Option<EntityId>;

    /// Return a live entity to its pool.  `false` if it was not alive.
    fn despawn(&mut self, entity: EntityId) -> bool;
}

/// Everything a behavior may ask of the host.
pub trait Host: SpatialQuery + InputSource + Transforms + Spawner {}

impl<T: SpatialQuery + InputSource + Transforms + Spawner> Host for T {}
