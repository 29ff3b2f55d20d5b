//! `CellTable` — the slot table behind every cell handle.

use std::any::type_name;
use std::collections::hash_map::Entry;

use crate::cell::{CellSlot, TypedCell};
use crate::{CellError, CellId, CellResult, CellValue, NameMap, SingletonRegistry};

/// Owner of every cell in a scene.
///
/// Cells are allocated at configuration time and live as long as the table.
/// Slots are never removed, so a `CellId<T>` stays valid for the table's
/// lifetime.
///
/// # Single-threaded by contract
///
/// All access happens from the scheduler's tick thread and is ordered by
/// dispatch-queue position, so there is no locking: when two behaviors write
/// the same cell in one tick, the later one in queue order wins.
#[derive(Default)]
pub struct CellTable {
    slots:    Vec<Box<dyn CellSlot>>,
    names:    NameMap<String, u32>,
    registry: SingletonRegistry,
}

impl CellTable {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Allocation (configuration time) ───────────────────────────────────

    /// Allocate a cell whose unset sentinel is `T::default()`.
    pub fn alloc<T: CellValue>(&mut self, name: impl Into<String>) -> CellId<T> {
        self.alloc_with(name, T::default())
    }

    /// Allocate a cell with an explicit unset sentinel.  The cell starts out
    /// holding `unset`.
    ///
    /// Names should be unique.  A duplicate is still allocated (handles stay
    /// distinct) but name lookups keep resolving to the first cell.
    pub fn alloc_with<T: CellValue>(&mut self, name: impl Into<String>, unset: T) -> CellId<T> {
        let name = name.into();
        let index = self.slots.len() as u32;
        match self.names.entry(name.clone()) {
            Entry::Occupied(_) => {
                log::warn!("duplicate cell name `{name}`; lookups keep the first cell");
            }
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }
        self.slots.push(Box::new(TypedCell::new(name, unset)));
        CellId::new(index)
    }

    /// Allocate `count` cells named `prefix[0]`, `prefix[1]`, ….
    pub fn alloc_many<T: CellValue>(&mut self, prefix: &str, count: usize) -> Vec<CellId<T>> {
        (0..count)
            .map(|i| self.alloc(format!("{prefix}[{i}]")))
            .collect()
    }

    /// Resolve a cell by name, checking its value type.
    ///
    /// This is the only name-based access path and is meant for wiring a
    /// scene up; behaviors keep the returned handle.
    pub fn lookup<T: CellValue>(&self, name: &str) -> CellResult<CellId<T>> {
        let index = *self
            .names
            .get(name)
            .ok_or_else(|| CellError::UnknownCell(name.to_owned()))?;
        self.check_type::<T>(index, name)
    }

    fn check_type<T: CellValue>(&self, index: u32, name: &str) -> CellResult<CellId<T>> {
        let slot = &self.slots[index as usize];
        if slot.as_any().is::<TypedCell<T>>() {
            Ok(CellId::new(index))
        } else {
            Err(CellError::TypeMismatch {
                name:     name.to_owned(),
                expected: type_name::<T>(),
                found:    slot.type_name(),
            })
        }
    }

    // ── Typed access (tick time) ──────────────────────────────────────────

    fn typed<T: CellValue>(&self, id: CellId<T>) -> Option<&TypedCell<T>> {
        self.slots
            .get(id.index())
            .and_then(|slot| slot.as_any().downcast_ref::<TypedCell<T>>())
    }

    fn typed_mut<T: CellValue>(&mut self, id: CellId<T>) -> Option<&mut TypedCell<T>> {
        self.slots
            .get_mut(id.index())
            .and_then(|slot| slot.as_any_mut().downcast_mut::<TypedCell<T>>())
    }

    /// Current value, or the unset sentinel.  Never fails: a handle from a
    /// different table reads as `T::default()`.
    #[inline]
    pub fn read<T: CellValue>(&self, id: CellId<T>) -> T {
        self.typed(id).map(|c| c.value().clone()).unwrap_or_default()
    }

    /// Borrow the current value without cloning.
    #[inline]
    pub fn get<T: CellValue>(&self, id: CellId<T>) -> Option<&T> {
        self.typed(id).map(TypedCell::value)
    }

    /// Mutable borrow of the value.  Counts as one write.
    #[inline]
    pub fn get_mut<T: CellValue>(&mut self, id: CellId<T>) -> Option<&mut T> {
        self.typed_mut(id).map(TypedCell::value_mut)
    }

    /// Replace the stored value unconditionally.
    #[inline]
    pub fn write<T: CellValue>(&mut self, id: CellId<T>, value: T) {
        if let Some(cell) = self.typed_mut(id) {
            cell.set(value);
        }
    }

    /// Write the same value into every cell in `ids`.
    pub fn write_all<T: CellValue>(&mut self, ids: &[CellId<T>], value: &T) {
        for &id in ids {
            self.write(id, value.clone());
        }
    }

    /// Modify the value in place.
    pub fn update<T: CellValue>(&mut self, id: CellId<T>, f: impl FnOnce(&mut T)) {
        if let Some(value) = self.get_mut(id) {
            f(value);
        }
    }

    /// Restore the cell's unset sentinel.
    #[inline]
    pub fn clear<T: CellValue>(&mut self, id: CellId<T>) {
        if let Some(cell) = self.typed_mut(id) {
            cell.reset();
        }
    }

    pub fn clear_all<T: CellValue>(&mut self, ids: &[CellId<T>]) {
        for &id in ids {
            self.clear(id);
        }
    }

    /// `true` if the cell currently holds its unset sentinel.
    pub fn is_unset<T: CellValue + PartialEq>(&self, id: CellId<T>) -> bool {
        self.typed(id).is_none_or(|c| c.value() == c.unset_value())
    }

    // ── Metadata ──────────────────────────────────────────────────────────

    /// Number of writes (including clears) applied to the cell.
    pub fn writes<T: CellValue>(&self, id: CellId<T>) -> u64 {
        self.typed(id).map_or(0, |c| CellSlot::writes(c))
    }

    pub fn name_of<T: CellValue>(&self, id: CellId<T>) -> Option<&str> {
        self.slots.get(id.index()).map(|slot| slot.name())
    }

    /// Number of allocated cells.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `(name, rendered value)` for every cell, in allocation order.
    pub fn snapshot(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.slots.iter().map(|slot| (slot.name(), slot.render()))
    }

    // ── Singleton slots ───────────────────────────────────────────────────

    /// Claim the well-known slot `key` and store `value` in a fresh cell.
    ///
    /// Fails with [`CellError::DuplicateSingleton`] if another owner already
    /// holds `key`; the first claimant stays authoritative.
    pub fn claim_singleton<T: CellValue>(
        &mut self,
        key:   &'static str,
        value: T,
    ) -> CellResult<CellId<T>> {
        if self.registry.is_claimed(key) {
            log::warn!("singleton slot `{key}` already claimed; rejecting second owner");
            return Err(CellError::DuplicateSingleton(key));
        }
        let id = self.alloc_with(key, T::default());
        self.write(id, value);
        self.registry.claim(key, id.index() as u32)?;
        Ok(id)
    }

    /// Resolve the current owner cell of `key`, if any.
    pub fn singleton<T: CellValue>(&self, key: &str) -> Option<CellId<T>> {
        let index = self.registry.slot(key)?;
        self.check_type::<T>(index, key).ok()
    }

    /// Release `key` and clear the cell that backed it.  Returns `false` if
    /// the key was not claimed.
    pub fn release_singleton(&mut self, key: &str) -> bool {
        match self.registry.release(key) {
            Some(index) => {
                if let Some(slot) = self.slots.get_mut(index as usize) {
                    slot.reset();
                }
                true
            }
            None => false,
        }
    }

    /// Read-only view of the singleton registry.
    pub fn registry(&self) -> &SingletonRegistry {
        &self.registry
    }
}
