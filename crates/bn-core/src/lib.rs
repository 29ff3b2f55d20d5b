//! `bn-core` — foundational types for the `rust_bn` behavior framework.
//!
//! This crate is a dependency of every other `bn-*` crate.  It intentionally
//! has no `bn-*` dependencies and minimal external ones (only `glam` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `TemplateId`, `EventId`, `NodeId`             |
//! | [`layer`]       | `LayerMask` category filter for spatial queries           |
//! | [`time`]        | `Tick`, `FixedStepClock`                                  |
//! | [`config`]      | `RunConfig`                                               |
//! | [`math`]        | `Plane` projections, `look_rotation`, axis snapping       |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod layer;
pub mod math;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RunConfig;
pub use error::{CoreError, CoreResult};
pub use ids::{EntityId, EventId, NodeId, TemplateId};
pub use layer::LayerMask;
pub use math::Plane;
pub use time::{FixedStepClock, Tick};

pub use glam::{Quat, Vec2, Vec3};
