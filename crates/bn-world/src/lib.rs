//! `bn-world` — an in-memory host for scenes that run outside a game engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`world`]    | `World` — SoA entity store implementing every `bn-behavior` collaborator trait |
//! | [`spatial`]  | `SpatialIndex` — lazily rebuilt R-tree for sphere overlaps  |
//! | [`input`]    | `InputState` — axes, held keys, one-frame press edges       |
//! | [`template`] | `Template`, `TemplateRegistry` — spawnable kinds and pools  |
//! | [`loader`]   | `load_entities_csv`, `load_entities_reader`                 |
//! | [`error`]    | `WorldError`, `WorldResult<T>`                              |
//!
//! # Determinism
//!
//! `overlap_sphere` returns ids in ascending order, so behaviors that depend
//! on query order (last-match detection) give the same answer every run.

pub mod error;
pub mod input;
pub mod loader;
pub mod spatial;
pub mod template;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use input::InputState;
pub use loader::{load_entities_csv, load_entities_reader};
pub use spatial::SpatialIndex;
pub use template::{Template, TemplateRegistry};
pub use world::World;
