//! Scene wiring for the turret demo.
//!
//! ```text
//! root
//! ├── SpawnCatalog          [bullet]
//! ├── turret
//! │   ├── DetectTargets     Drone within range → turret.target
//! │   ├── TargetDirection   turret.target → turret.aim (XY)
//! │   ├── RotateByDir       turret.aim → turret rotation
//! │   └── TriggerByTime     turret.cooldown → fire
//! ├── ship
//! │   ├── DirectByInput     axes → ship.dir
//! │   ├── SpeedUpByAccel    ship.dir, ship → ship.delta
//! │   ├── MoveByAddVelocity ship.delta → ship velocity
//! │   └── RotateByDir       ship.dir → ship rotation
//! └── drones
//!     └── TriggerByDistance (one per drone) → escaped.N → despawn
//! ```

use anyhow::Result;
use rand::Rng;

use bn_behavior::{EventBus, Group};
use bn_cell::CellTable;
use bn_core::{EntityId, LayerMask, Plane, Vec3};
use bn_nodes::{
    AccelLane, Cooldown, DetectTargets, DirectByInput, MoveByAddVelocity, Rearm, RotateByDir,
    SpawnCatalog, SpeedUpByAccel, TargetDirection, TriggerByDistance, TriggerByTime,
    despawn_handler, spawn_from_catalog,
};
use bn_tree::Scene;
use bn_world::World;

// ── Layers and tuning ─────────────────────────────────────────────────────────

const LAYER_STATIC: u8 = 0;
const LAYER_PLAYER: u8 = 1;
const LAYER_DRONE:  u8 = 3;
const LAYER_BULLET: u8 = 5;

const TURRET_RANGE:     f32 = 10.0;
const TURRET_TURN_RATE: f32 = 6.0;
const FIRE_INTERVAL:    f32 = 0.5;
const ARENA_RADIUS:     f32 = 14.0;
const DRONE_SPEED:      f32 = 1.5;

/// Everything the runner needs, plus the handles `main` reports on.
pub struct Arena {
    pub world:  World,
    pub cells:  CellTable,
    pub events: EventBus,
    pub scene:  Scene,
    pub ship:   EntityId,
    pub turret: EntityId,
    pub drones: Vec<EntityId>,
}

/// Build the arena with `drone_count` drones scattered around the turret.
pub fn build(drone_count: usize, rng: &mut impl Rng) -> Result<Arena> {
    let mut world = World::new();
    let mut cells = CellTable::new();
    let mut events = EventBus::new();
    let mut scene = Scene::new();
    let root = scene.root();

    let bullet = world.templates.register("bullet", "Bullet", LAYER_BULLET)?;
    let beacon = world.create("Beacon", LAYER_STATIC, Vec3::ZERO);
    let turret = world.create("Turret", LAYER_STATIC, Vec3::ZERO);
    let ship = world.create("Ship", LAYER_PLAYER, Vec3::new(-3.0, -3.0, 0.0));

    scene.add(root, SpawnCatalog::claim(&mut cells, vec![bullet]))?;

    // Turret: find a drone, turn towards it, fire on a timer.
    let target = cells.alloc::<EntityId>("turret.target");
    let aim = cells.alloc::<Vec3>("turret.aim");
    let cooldown = cells.alloc_with("turret.cooldown", Cooldown::new(FIRE_INTERVAL)?);
    let fire = events.create();
    events.subscribe(fire, spawn_from_catalog(0, turret))?;

    let turret_group = scene.add(root, Group::new("turret"))?;
    scene.add(
        turret_group,
        DetectTargets::new(turret, TURRET_RANGE, vec![target])
            .with_tags(["Drone"])
            .with_mask(LayerMask::only(LAYER_DRONE)),
    )?;
    scene.add(turret_group, TargetDirection::new(turret, target).output_in(Plane::XY, aim))?;
    scene.add(turret_group, RotateByDir { body: turret, dir: aim, speed: TURRET_TURN_RATE })?;
    scene.add(turret_group, TriggerByTime::new(cooldown, fire).with_rearm(Rearm::AfterFire))?;

    // Ship: input → direction → velocity delta → velocity.
    let ship_dir = cells.alloc::<Vec3>("ship.dir");
    let delta = cells.alloc::<Vec3>("ship.delta");
    let unit = cells.alloc_with("ship.unit", Vec3::ONE);

    let ship_group = scene.add(root, Group::new("ship"))?;
    scene.add(ship_group, DirectByInput::new().output(Plane::XY, ship_dir))?;
    scene.add(
        ship_group,
        SpeedUpByAccel::new(6.0, 1.0, 4.0, 6.0)
            .with_lane(AccelLane::new(Plane::XY).with(ship_dir, ship, delta)),
    )?;
    scene.add(ship_group, MoveByAddVelocity { body: ship, speed: delta, dir: unit, use_dir: true })?;
    scene.add(ship_group, RotateByDir { body: ship, dir: ship_dir, speed: 10.0 })?;

    // Drones drift outwards and are removed once they leave the arena.
    let origin = cells.alloc_with("arena.origin", beacon);
    let drone_group = scene.add(root, Group::new("drones"))?;
    let mut drones = Vec::with_capacity(drone_count);
    for i in 0..drone_count {
        let position = Vec3::new(rng.gen_range(-8.0..8.0), rng.gen_range(-8.0..8.0), 0.0);
        let drone = world.create("Drone", LAYER_DRONE, position);
        let heading = position.try_normalize().unwrap_or(Vec3::X);
        world.velocity[drone.index()] = heading * DRONE_SPEED * rng.gen_range(0.5_f32..1.5);

        let handle = cells.alloc_with(format!("drone.{i}"), drone);
        let escaped = events.create();
        events.subscribe(escaped, despawn_handler(handle))?;
        scene.add(
            drone_group,
            TriggerByDistance { owner: drone, start_point: origin, distance: ARENA_RADIUS, event: escaped },
        )?;
        drones.push(drone);
    }

    log::info!(
        "arena: {} entities, {} cells, {} events, {} nodes",
        world.len(),
        cells.len(),
        events.len(),
        scene.len()
    );

    Ok(Arena { world, cells, events, scene, ship, turret, drones })
}
