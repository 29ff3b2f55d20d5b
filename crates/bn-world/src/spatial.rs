//! Lazily rebuilt R-tree over live entity positions.
//!
//! Positions change every fixed step, so the tree is not maintained
//! incrementally.  Any mutation marks it dirty and the next query bulk-loads
//! a fresh tree.  Queries take `&self`, hence the interior mutability.

use std::cell::{Cell, RefCell};

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use bn_core::{EntityId, Vec3};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 3-D point with the associated `EntityId`.
#[derive(Clone)]
struct EntityEntry {
    point: [f32; 3],
    id:    EntityId,
}

impl RTreeObject for EntityEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for EntityEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── SpatialIndex ──────────────────────────────────────────────────────────────

pub struct SpatialIndex {
    tree:     RefCell<RTree<EntityEntry>>,
    dirty:    Cell<bool>,
    rebuilds: Cell<u64>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self {
            tree:     RefCell::new(RTree::new()),
            dirty:    Cell::new(true),
            rebuilds: Cell::new(0),
        }
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force a rebuild before the next query.
    #[inline]
    pub fn mark_dirty(&self) {
        self.dirty.set(true);
    }

    /// Times the tree has been bulk-loaded.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds.get()
    }

    /// Ids of every live entity within `radius` of `center` (boundary
    /// included), in ascending id order.
    ///
    /// `positions` and `alive` are the world's SoA columns; they are only read
    /// when the tree is dirty.
    pub fn within(
        &self,
        positions: &[Vec3],
        alive:     &[bool],
        center:    Vec3,
        radius:    f32,
    ) -> Vec<EntityId> {
        if radius < 0.0 {
            return Vec::new();
        }
        if self.dirty.get() {
            self.rebuild(positions, alive);
        }
        let tree = self.tree.borrow();
        let mut hits: Vec<EntityId> = tree
            .locate_within_distance(center.to_array(), radius * radius)
            .map(|e| e.id)
            .collect();
        hits.sort_unstable();
        hits
    }

    fn rebuild(&self, positions: &[Vec3], alive: &[bool]) {
        let entries: Vec<EntityEntry> = positions
            .iter()
            .zip(alive)
            .enumerate()
            .filter(|&(_, (_, &live))| live)
            .map(|(i, (p, _))| EntityEntry { point: p.to_array(), id: EntityId(i as u32) })
            .collect();
        *self.tree.borrow_mut() = RTree::bulk_load(entries);
        self.dirty.set(false);
        self.rebuilds.set(self.rebuilds.get() + 1);
    }
}
