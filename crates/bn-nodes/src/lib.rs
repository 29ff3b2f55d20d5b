//! `bn-nodes` — stock behaviors built on the cell bus.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                          |
//! |---------------|-------------------------------------------------------------------|
//! | [`detect`]    | `DetectTargets` — sphere-overlap + tag filter → target cells      |
//! | [`cooldown`]  | `Cooldown` state machine, `TriggerByTime`                         |
//! | [`trigger`]   | `TriggerByDistance`, `TriggerByInput`                             |
//! | [`input`]     | `DirectByInput` — snapped input axes → direction cells            |
//! | [`movement`]  | `MoveByVelocity`, `MoveByAddVelocity`, `MoveByForce`, `SpeedUpByAccel` |
//! | [`direction`] | `DirWithVelocity`, `DirToPoint`, `TargetDirection`                |
//! | [`rotate`]    | `RotateByDir`                                                     |
//! | [`spawn`]     | spawn / despawn event handlers, `SpawnCatalog` singleton          |
//! | [`error`]     | `NodeError`, `NodeResult<T>`                                      |
//!
//! # Wiring
//!
//! Every behavior here is configured with resolved handles (`CellId<T>`,
//! `EntityId`, `EventId`) and never looks anything up by name while ticking.
//! A typical ship reads input into a direction cell, turns it into a velocity
//! delta and applies it, all as siblings under one composite:
//!
//! ```text
//! ship
//! ├── DirectByInput      → dir
//! ├── SpeedUpByAccel     dir, body → delta
//! ├── MoveByAddVelocity  delta → body velocity
//! └── RotateByDir        dir → body rotation
//! ```
//!
//! Sibling order is the data-flow order: a reader placed before its writer
//! sees last frame's value.

pub mod cooldown;
pub mod detect;
pub mod direction;
pub mod error;
pub mod input;
pub mod movement;
pub mod rotate;
pub mod spawn;
pub mod trigger;


pub use cooldown::{Cooldown, CooldownState, Rearm, SNAP_FRACTION, TriggerByTime};
pub use detect::{DetectTargets, TargetPick};
pub use direction::{DirToPoint, DirWithVelocity, TargetDirection, VELOCITY_DEADZONE};
pub use error::{NodeError, NodeResult};
pub use input::DirectByInput;
pub use movement::{
    AccelLane, AccelLane2d, ForceMode, MoveByAddVelocity, MoveByForce, MoveByVelocity,
    SpeedUpByAccel,
};
pub use rotate::RotateByDir;
pub use spawn::{
    Catalog, SPAWN_CATALOG_KEY, SpawnCatalog, despawn_handler, spawn_from_catalog, spawn_handler,
};
pub use trigger::{TriggerByDistance, TriggerByInput};
