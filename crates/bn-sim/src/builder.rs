//! Fluent builder for constructing a [`Runner`].

use std::path::Path;

use bn_behavior::EventBus;
use bn_cell::CellTable;
use bn_core::RunConfig;
use bn_tree::Scene;
use bn_world::{World, load_entities_csv};

use crate::{Runner, SimResult};

/// Fluent builder for [`Runner`].
///
/// # Required inputs
///
/// - [`RunConfig`]: fixed step, frame length, total frames, …
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                           |
/// |-------------------|-----------------------------------|
/// | `.scene(s)`       | `Scene::new()` (empty root group) |
/// | `.cells(c)`       | empty `CellTable`                 |
/// | `.events(e)`      | empty `EventBus`                  |
/// | `.world(w)`       | empty `World`                     |
/// | `.entities_csv(p)`| no extra entities                 |
///
/// Cells, events and the world are usually filled in while the scene is
/// configured (cell handles and event ids are baked into behaviors), so the
/// common pattern is to build all four first and hand them over together.
///
/// # Example
///
/// ```rust,ignore
/// let mut runner = RunnerBuilder::new(config)
///     .world(world)
///     .cells(cells)
///     .events(events)
///     .scene(scene)
///     .build()?;
/// runner.run(&mut NoopObserver)?;
/// ```
pub struct RunnerBuilder<'p> {
    config:   RunConfig,
    scene:    Option<Scene>,
    cells:    Option<CellTable>,
    events:   Option<EventBus>,
    world:    Option<World>,
    entities: Option<&'p Path>,
}

impl<'p> RunnerBuilder<'p> {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            scene:    None,
            cells:    None,
            events:   None,
            world:    None,
            entities: None,
        }
    }

    pub fn scene(mut self, scene: Scene) -> Self {
        self.scene = Some(scene);
        self
    }

    pub fn cells(mut self, cells: CellTable) -> Self {
        self.cells = Some(cells);
        self
    }

    pub fn events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Load extra free-standing entities from a `tag,layer,x,y,z` CSV file
    /// into the world during `build`.
    pub fn entities_csv(mut self, path: &'p Path) -> Self {
        self.entities = Some(path);
        self
    }

    /// Validate the configuration, load any CSV entities and return a
    /// ready-to-run [`Runner`].
    pub fn build(self) -> SimResult<Runner> {
        self.config.validate()?;

        let mut world = self.world.unwrap_or_default();
        if let Some(path) = self.entities {
            let ids = load_entities_csv(path, &mut world)?;
            log::info!("loaded {} entities from {}", ids.len(), path.display());
        }

        let scene = self.scene.unwrap_or_default();
        log::info!(
            "runner built: {} nodes, {} entities, {} frames",
            scene.len(),
            world.len(),
            self.config.total_frames
        );

        Ok(Runner {
            clock:  self.config.make_clock(),
            config: self.config,
            scene,
            cells:  self.cells.unwrap_or_default(),
            events: self.events.unwrap_or_default(),
            world,
        })
    }
}
