//! Inert behaviors and an inert host.

use bn_core::{EntityId, LayerMask, Quat, TemplateId, Vec3};

use crate::{Behavior, InputSource, KeyMode, PhaseSet, Spawner, SpatialQuery, Transforms};

/// A behavior that does nothing and joins no queue.
///
/// Useful as a placeholder in tests or to reserve a position in the tree.
pub struct Noop;

impl Behavior for Noop {
    fn name(&self) -> &str {
        "noop"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::EMPTY
    }
}

/// A pure composite: no logic of its own, joins every queue so its children
/// receive every phase.  The scene root is a `Group`.
pub struct Group {
    label: String,
}

impl Group {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new("group")
    }
}

impl Behavior for Group {
    fn name(&self) -> &str {
        &self.label
    }
}

/// A host with no entities, no input and no templates.
#[derive(Default, Debug)]
pub struct NullHost;

impl SpatialQuery for NullHost {
    fn overlap_sphere(&self, _center: Vec3, _radius: f32, _mask: LayerMask) -> Vec<EntityId> {
        Vec::new()
    }

    fn tag(&self, _entity: EntityId) -> Option<&str> {
        None
    }
}

impl InputSource for NullHost {
    fn axis(&self, _name: &str) -> f32 {
        0.0
    }

    fn key(&self, _name: &str, _mode: KeyMode) -> bool {
        false
    }
}

impl Transforms for NullHost {
    fn position(&self, _entity: EntityId) -> Option<Vec3> {
        None
    }

    fn set_position(&mut self, _entity: EntityId, _position: Vec3) {}

    fn rotation(&self, _entity: EntityId) -> Option<Quat> {
        None
    }

    fn set_rotation(&mut self, _entity: EntityId, _rotation: Quat) {}

    fn velocity(&self, _entity: EntityId) -> Option<Vec3> {
        None
    }

    fn set_velocity(&mut self, _entity: EntityId, _velocity: Vec3) {}
}

impl Spawner for NullHost {
    fn spawn(&mut self, _template: TemplateId, _position: Vec3, _rotation: Quat) -> Option<EntityId> {
        None
    }

    fn despawn(&mut self, _entity: EntityId) -> bool {
        false
    }
}
