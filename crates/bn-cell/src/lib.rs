//! `bn-cell` — the shared reference-cell bus for the `rust_bn` framework.
//!
//! Behavior nodes never hold references to one another.  They pass values
//! (directions, targets, speeds, cooldown state) sideways and upward by
//! reading and writing *cells*: typed, named value slots owned by a
//! [`CellTable`] and addressed through copyable [`CellId<T>`] handles.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`cell`]     | `CellId<T>`, `CellValue`, `TypedCell<T>`                     |
//! | [`table`]    | `CellTable` — the slot table (alloc / lookup / read / write) |
//! | [`registry`] | `SingletonRegistry` — well-known, single-owner slots         |
//! | [`error`]    | `CellError`, `CellResult<T>`                                 |
//!
//! # Contract
//!
//! - `read` never fails: a cell that was never written (or was cleared)
//!   returns its declared unset sentinel.
//! - `write` replaces the value unconditionally.  There are no observers and
//!   no change notification; consumers poll.
//! - Names are resolved to handles once at configuration time
//!   ([`CellTable::lookup`]); the per-tick path is plain indexing.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Uses `rustc-hash` for the name indexes.                    |

pub mod cell;
pub mod error;
pub mod registry;
pub mod table;

#[cfg(test)]
mod tests;

pub use cell::{CellId, CellValue, TypedCell};
pub use error::{CellError, CellResult};
pub use registry::SingletonRegistry;
pub use table::CellTable;

#[cfg(feature = "fx-hash")]
pub(crate) type NameMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type NameMap<K, V> = std::collections::HashMap<K, V>;
