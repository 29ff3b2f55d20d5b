//! Typed cell handles and the type-erased slot wrapper.
//!
//! # Design
//!
//! Each cell of type `T` is stored as a `TypedCell<T>` behind a
//! `Box<dyn CellSlot>` in the table's slot vector.  A [`CellId<T>`] is just
//! the slot index plus a phantom type, so a handle can only ever be used to
//! read or write values of the type it was allocated with.

use std::any::{Any, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

// ── CellValue ─────────────────────────────────────────────────────────────────

/// Bound for anything that can live in a cell.
///
/// `Default` doubles as the unset sentinel unless a cell declares its own
/// (zero vector, `false`, `EntityId::INVALID`, …).  `Debug` is used by trace
/// writers to render cell snapshots.
pub trait CellValue: Clone + Default + fmt::Debug + 'static {}

impl<T: Clone + Default + fmt::Debug + 'static> CellValue for T {}

// ── CellId ────────────────────────────────────────────────────────────────────

/// Stable, strongly typed handle to one cell in a [`CellTable`][crate::CellTable].
///
/// Handles are `Copy` and carry no borrow, so behaviors store them in their
/// configuration and resolve them against the table every tick.
pub struct CellId<T> {
    index:   u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CellId<T> {
    #[inline]
    pub(crate) fn new(index: u32) -> Self {
        Self { index, _marker: PhantomData }
    }

    /// Slot index inside the owning table.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl<T> Clone for CellId<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for CellId<T> {}

impl<T> PartialEq for CellId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for CellId<T> {}

impl<T> Hash for CellId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for CellId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CellId<{}>({})", type_name::<T>(), self.index)
    }
}

// ── Type-erased slot ──────────────────────────────────────────────────────────

/// Type-erased interface for one stored cell.
///
/// Sealed via the private `Sealed` supertrait: only [`TypedCell`] implements
/// it, so the table can always downcast back to the concrete type.
pub trait CellSlot: sealed::Sealed + 'static {
    fn name(&self) -> &str;

    /// Rust type name of the stored value.
    fn type_name(&self) -> &'static str;

    /// Restore the declared unset sentinel.
    fn reset(&mut self);

    /// `Debug` rendering of the current value.
    fn render(&self) -> String;

    /// Writes applied since allocation.
    fn writes(&self) -> u64;

    #[doc(hidden)]
    fn as_any(&self) -> &dyn Any;

    #[doc(hidden)]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

mod sealed {
    pub trait Sealed {}
}

// ── Concrete slot ─────────────────────────────────────────────────────────────

/// One named value plus its unset sentinel.
pub struct TypedCell<T: CellValue> {
    name:   String,
    value:  T,
    unset:  T,
    writes: u64,
}

impl<T: CellValue> TypedCell<T> {
    pub(crate) fn new(name: String, unset: T) -> Self {
        Self { name, value: unset.clone(), unset, writes: 0 }
    }

    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn unset_value(&self) -> &T {
        &self.unset
    }

    #[inline]
    pub(crate) fn value_mut(&mut self) -> &mut T {
        self.writes += 1;
        &mut self.value
    }

    #[inline]
    pub(crate) fn set(&mut self, value: T) {
        self.writes += 1;
        self.value = value;
    }
}

impl<T: CellValue> sealed::Sealed for TypedCell<T> {}

impl<T: CellValue> CellSlot for TypedCell<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn reset(&mut self) {
        self.writes += 1;
        self.value = self.unset.clone();
    }

    fn render(&self) -> String {
        format!("{:?}", self.value)
    }

    fn writes(&self) -> u64 {
        self.writes
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
