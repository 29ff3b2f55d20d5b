//! Spawning and despawning, as event subscribers, plus the shared spawn
//! catalog.
//!
//! Handlers are plain closures bound to an event at configuration time:
//!
//! ```rust,ignore
//! let fire = events.create();
//! events.subscribe(fire, spawn_from_catalog(BULLET, muzzle))?;
//! scene.add(turret, TriggerByTime::new(cooldown, fire))?;
//! ```
//!
//! # Catalog
//!
//! [`SpawnCatalog`] owns the well-known [`SPAWN_CATALOG_KEY`] slot in the cell
//! table.  Exactly one catalog may be authoritative at a time: a second one
//! built while the slot is held logs a warning and stays inert.

use bn_behavior::{Behavior, EventContext, PhaseSet, TickContext};
use bn_cell::{CellId, CellTable};
use bn_core::{EntityId, Quat, TemplateId};

/// Singleton slot holding the active [`Catalog`].
pub const SPAWN_CATALOG_KEY: &str = "spawn.catalog";

/// Template for each spawn kind, indexed by kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub kinds: Vec<TemplateId>,
}

impl Catalog {
    pub fn get(&self, kind: usize) -> Option<TemplateId> {
        self.kinds.get(kind).copied()
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// Spawn `template` at `anchor`'s position and rotation.  Nothing happens if
/// the anchor is gone.
pub fn spawn_handler(
    template: TemplateId,
    anchor:   EntityId,
) -> impl FnMut(&mut EventContext<'_>) + 'static {
    move |ctx| spawn_at(ctx, template, anchor)
}

/// Spawn catalog entry `kind` at `anchor`.  Nothing happens when no catalog
/// is registered or `kind` is out of range.
pub fn spawn_from_catalog(
    kind:   usize,
    anchor: EntityId,
) -> impl FnMut(&mut EventContext<'_>) + 'static {
    move |ctx| {
        if let Some(template) = SpawnCatalog::resolve(ctx.cells, kind) {
            spawn_at(ctx, template, anchor);
        }
    }
}

/// Despawn whatever entity `cell` currently holds.
pub fn despawn_handler(cell: CellId<EntityId>) -> impl FnMut(&mut EventContext<'_>) + 'static {
    move |ctx| {
        let entity = ctx.cells.read(cell);
        if entity.is_valid() {
            ctx.host.despawn(entity);
        }
    }
}

fn spawn_at(ctx: &mut EventContext<'_>, template: TemplateId, anchor: EntityId) {
    let Some(position) = ctx.host.position(anchor) else {
        return;
    };
    let rotation = ctx.host.rotation(anchor).unwrap_or(Quat::IDENTITY);
    if ctx.host.spawn(template, position, rotation).is_none() {
        log::debug!("spawn of {template} at {anchor} refused by host");
    }
}

// ── SpawnCatalog ──────────────────────────────────────────────────────────────

/// Behavior that publishes a [`Catalog`] through the singleton slot.
///
/// The claim is made at construction and released in `on_end`.  A catalog
/// that was authoritative reclaims the slot when it is started again.
pub struct SpawnCatalog {
    catalog:       Catalog,
    cell:          Option<CellId<Catalog>>,
    authoritative: bool,
}

impl SpawnCatalog {
    /// Claim the catalog slot for `kinds`.  If the slot is already held the
    /// returned catalog is inert.
    pub fn claim(cells: &mut CellTable, kinds: Vec<TemplateId>) -> Self {
        let catalog = Catalog { kinds };
        match cells.claim_singleton(SPAWN_CATALOG_KEY, catalog.clone()) {
            Ok(cell) => Self { catalog, cell: Some(cell), authoritative: true },
            Err(err) => {
                log::warn!("spawn catalog stays inert: {err}");
                Self { catalog, cell: None, authoritative: false }
            }
        }
    }

    /// `true` while this catalog holds the slot.
    pub fn is_authoritative(&self) -> bool {
        self.cell.is_some()
    }

    /// Template registered for `kind` in the current catalog.
    pub fn resolve(cells: &CellTable, kind: usize) -> Option<TemplateId> {
        let cell = cells.singleton::<Catalog>(SPAWN_CATALOG_KEY)?;
        cells.get(cell)?.get(kind)
    }
}

impl Behavior for SpawnCatalog {
    fn name(&self) -> &str {
        "spawn_catalog"
    }

    fn phases(&self) -> PhaseSet {
        PhaseSet::START | PhaseSet::END
    }

    fn on_start(&mut self, ctx: &mut TickContext<'_>) {
        if !self.authoritative || self.cell.is_some() {
            return;
        }
        match ctx.cells.claim_singleton(SPAWN_CATALOG_KEY, self.catalog.clone()) {
            Ok(cell) => self.cell = Some(cell),
            Err(err) => log::warn!("spawn catalog could not reclaim its slot: {err}"),
        }
    }

    fn on_end(&mut self, ctx: &mut TickContext<'_>) {
        if self.cell.take().is_some() {
            ctx.cells.release_singleton(SPAWN_CATALOG_KEY);
        }
    }
}
