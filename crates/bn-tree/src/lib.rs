//! `bn-tree` — the scene arena and hierarchical lifecycle dispatcher.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`scene`]     | `Scene` — node arena, attach/detach/destroy, dispatch      |
//! | [`queues`]    | `PhaseQueues` — a composite's four snapshot queues         |
//! | [`lifecycle`] | `Lifecycle` (`Dormant` → `Active` → `Ended`)               |
//! | [`error`]     | `TreeError`, `TreeResult<T>`                               |
//!
//! # Composite model (summary)
//!
//! Every node is a potential composite: it owns an ordered live child set and
//! four queues built from it.
//!
//! ```text
//! attach / detach      → live child set only
//! rebuild_queues(n)    → queue[p] = live children joining p, attachment order
//! activate(n)          → rebuild; for c in queue[start]: c.on_start; activate(c)
//! tick / fixed_tick    → for c in queue[p] if active(c): c.hook; forward(c)
//! deactivate(n)        → for c in queue[end]: c.on_end; deactivate(c)
//! ```
//!
//! Structural errors (`TreeError`) only come from configuration calls.
//! Dispatch never fails: destroyed children are skipped silently.

pub mod error;
pub mod lifecycle;
pub mod queues;
pub mod scene;

#[cfg(test)]
mod tests;

pub use error::{TreeError, TreeResult};
pub use lifecycle::Lifecycle;
pub use queues::PhaseQueues;
pub use scene::Scene;
