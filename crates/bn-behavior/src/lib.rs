//! `bn-behavior` — the behavior hook trait and everything a hook can touch.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`phase`]    | `Phase` (start / tick / fixed tick / end), `PhaseSet`         |
//! | [`model`]    | `Behavior` trait, `run_hook`                                  |
//! | [`context`]  | `Env<'a>` (one tree walk), `TickContext<'a>` (one hook call)  |
//! | [`event`]    | `EventBus`, `EventContext` — argument-less multicast events   |
//! | [`activity`] | `ActivityFlags` — externally toggleable per-node flags        |
//! | [`host`]     | collaborator traits: `SpatialQuery`, `InputSource`, `Transforms`, `Spawner`, `Host` |
//! | [`noop`]     | `Noop`, `Group`, `NullHost`                                   |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Design notes
//!
//! Hooks take no arguments in the conceptual model and return nothing; in
//! Rust they take a `&mut TickContext` that bundles the borrowed cell table,
//! event bus, activity flags and host.  All of it is single-threaded: one
//! scheduler walks the tree and lends the context to one hook at a time, so
//! there is no locking and the order of writes is the dispatch order.

pub mod activity;
pub mod context;
pub mod error;
pub mod event;
pub mod host;
pub mod model;
pub mod noop;
pub mod phase;

#[cfg(test)]
mod tests;

pub use activity::ActivityFlags;
pub use context::{Env, TickContext};
pub use error::{BehaviorError, BehaviorResult};
pub use event::{EventBus, EventContext, Subscriber};
pub use host::{Host, InputSource, KeyMode, Spawner, SpatialQuery, Transforms};
pub use model::{Behavior, run_hook};
pub use noop::{Group, Noop, NullHost};
pub use phase::{Phase, PhaseSet};
