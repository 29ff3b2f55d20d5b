//! Unit tests for bn-world.
//!
//! All tests build small worlds by hand; no files except the CSV temp path.

use bn_behavior::{InputSource, KeyMode, Spawner, SpatialQuery, Transforms};
use bn_core::{EntityId, LayerMask, Quat, TemplateId, Vec3};

use crate::World;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Five entities along +X: tags alternate Enemy / Rock, layer 3 / 0.
///
///   0:(0,0,0) Enemy  1:(2,0,0) Rock  2:(4,0,0) Enemy  3:(6,0,0) Rock  4:(8,0,0) Enemy
fn row_world() -> World {
    let mut w = World::new();
    for i in 0..5 {
        let (tag, layer) = if i % 2 == 0 { ("Enemy", 3) } else { ("Rock", 0) };
        w.create(tag, layer, Vec3::new(2.0 * i as f32, 0.0, 0.0));
    }
    w
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod query_tests {
    use super::*;

    #[test]
    fn overlap_returns_sorted_ids_within_radius() {
        let w = row_world();
        let hits = w.overlap_sphere(Vec3::new(4.0, 0.0, 0.0), 2.5, LayerMask::ALL);
        assert_eq!(hits, vec![EntityId(1), EntityId(2), EntityId(3)]);
    }

    #[test]
    fn boundary_is_inclusive() {
        let w = row_world();
        let hits = w.overlap_sphere(Vec3::ZERO, 2.0, LayerMask::ALL);
        assert_eq!(hits, vec![EntityId(0), EntityId(1)]);
    }

    #[test]
    fn layer_mask_filters() {
        let w = row_world();
        let hits = w.overlap_sphere(Vec3::new(4.0, 0.0, 0.0), 10.0, LayerMask::only(3));
        assert_eq!(hits, vec![EntityId(0), EntityId(2), EntityId(4)]);
        assert!(w.overlap_sphere(Vec3::ZERO, 10.0, LayerMask::NONE).is_empty());
    }

    #[test]
    fn negative_radius_finds_nothing() {
        let w = row_world();
        assert!(w.overlap_sphere(Vec3::ZERO, -1.0, LayerMask::ALL).is_empty());
    }

    #[test]
    fn index_tracks_movement() {
        let mut w = row_world();
        w.set_velocity(EntityId(4), Vec3::new(-10.0, 0.0, 0.0));
        assert!(!w.overlap_sphere(Vec3::ZERO, 1.0, LayerMask::ALL).contains(&EntityId(4)));
        w.integrate(0.75);
        approx::assert_relative_eq!(w.position[4].x, 0.5);
        assert!(w.overlap_sphere(Vec3::ZERO, 1.0, LayerMask::ALL).contains(&EntityId(4)));
    }

    #[test]
    fn index_rebuilds_only_when_dirty() {
        let w = row_world();
        let _ = w.overlap_sphere(Vec3::ZERO, 1.0, LayerMask::ALL);
        let _ = w.overlap_sphere(Vec3::ZERO, 5.0, LayerMask::ALL);
        assert_eq!(w.index_rebuilds(), 1);
    }

    #[test]
    fn dead_entities_have_no_tag_and_are_not_found() {
        let mut w = row_world();
        assert_eq!(w.tag(EntityId(2)), Some("Enemy"));
        assert!(w.despawn(EntityId(2)));
        assert_eq!(w.tag(EntityId(2)), None);
        assert!(!w.overlap_sphere(Vec3::new(4.0, 0.0, 0.0), 0.5, LayerMask::ALL).contains(&EntityId(2)));
        assert_eq!(w.tag(EntityId::INVALID), None);
    }
}

// ── Transforms ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod transform_tests {
    use super::*;

    #[test]
    fn getters_and_setters() {
        let mut w = World::new();
        let e = w.create("Ship", 1, Vec3::X);
        let r = Quat::from_rotation_y(1.0);
        w.set_rotation(e, r);
        w.set_velocity(e, Vec3::Y);
        w.set_position(e, Vec3::Z);
        assert_eq!(w.rotation(e), Some(r));
        assert_eq!(w.velocity(e), Some(Vec3::Y));
        assert_eq!(w.position(e), Some(Vec3::Z));
    }

    #[test]
    fn dead_or_unknown_entities_read_none() {
        let mut w = World::new();
        assert_eq!(w.position(EntityId(0)), None);
        assert_eq!(w.rotation(EntityId::INVALID), None);
        w.set_velocity(EntityId(9), Vec3::ONE);
        assert!(w.is_empty());
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod spawn_tests {
    use crate::WorldError;

    use super::*;

    #[test]
    fn spawn_uses_template_tag_and_layer() {
        let mut w = World::new();
        let bullet = w.templates.register("bullet", "Bullet", 5).unwrap();
        let e = w.spawn(bullet, Vec3::X, Quat::IDENTITY).unwrap();
        assert_eq!(w.tag(e), Some("Bullet"));
        assert_eq!(w.layer[e.index()], 5);
        assert_eq!(w.position(e), Some(Vec3::X));
        assert_eq!(w.spawned(), 1);
    }

    #[test]
    fn despawned_entities_are_recycled_per_template() {
        let mut w = World::new();
        let bullet = w.templates.register("bullet", "Bullet", 5).unwrap();
        let a = w.spawn(bullet, Vec3::X, Quat::IDENTITY).unwrap();
        w.set_velocity(a, Vec3::ONE);
        assert!(w.despawn(a));
        assert!(!w.despawn(a));
        assert_eq!(w.templates.pooled(bullet), 1);

        let b = w.spawn(bullet, Vec3::Y, Quat::IDENTITY).unwrap();
        assert_eq!(a, b);
        assert_eq!(w.position(a), Some(Vec3::Y), "old handle names the new instance");
        assert_eq!(w.velocity(b), Some(Vec3::ZERO));
        assert_eq!(w.position(b), Some(Vec3::Y));
        assert_eq!(w.templates.pooled(bullet), 0);
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn free_standing_entities_are_not_pooled() {
        let mut w = World::new();
        let bullet = w.templates.register("bullet", "Bullet", 5).unwrap();
        let rock = w.create("Rock", 0, Vec3::ZERO);
        assert!(w.despawn(rock));
        let e = w.spawn(bullet, Vec3::ZERO, Quat::IDENTITY).unwrap();
        assert_ne!(e, rock);
        assert_eq!(w.alive_count(), 1);
    }

    #[test]
    fn unknown_template_spawns_nothing() {
        let mut w = World::new();
        assert_eq!(w.spawn(TemplateId(3), Vec3::ZERO, Quat::IDENTITY), None);
        assert_eq!(w.spawned(), 0);
    }

    #[test]
    fn template_lookup_and_layer_validation() {
        let mut w = World::new();
        let t = w.templates.register("drone", "Enemy", 3).unwrap();
        assert_eq!(w.templates.find("drone").unwrap(), t);
        assert!(matches!(w.templates.find("tank"), Err(WorldError::UnknownTemplate(_))));
        assert!(matches!(
            w.templates.register("bad", "X", 32),
            Err(WorldError::LayerOutOfRange(32))
        ));
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod input_tests {
    use super::*;

    #[test]
    fn press_edge_lasts_one_frame() {
        let mut w = World::new();
        w.input.press("Fire1");
        assert!(w.key("Fire1", KeyMode::Press));
        assert!(w.key("Fire1", KeyMode::Hold));
        w.input.end_frame();
        assert!(!w.key("Fire1", KeyMode::Press));
        assert!(w.key("Fire1", KeyMode::Hold));
    }

    #[test]
    fn repeated_press_while_held_has_no_new_edge() {
        let mut w = World::new();
        w.input.press("Jump");
        w.input.end_frame();
        w.input.press("Jump");
        assert!(!w.key("Jump", KeyMode::Press));
        w.input.release("Jump");
        w.input.press("Jump");
        assert!(w.key("Jump", KeyMode::Press));
    }

    #[test]
    fn axes_default_to_zero() {
        let mut w = World::new();
        assert_eq!(w.axis("Horizontal"), 0.0);
        w.input.set_axis("Horizontal", -0.4);
        assert_eq!(w.axis("Horizontal"), -0.4);
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader_tests {
    use std::io::Cursor;

    use crate::{WorldError, load_entities_csv, load_entities_reader};

    use super::*;

    const CSV: &str = "tag,layer,x,y,z\nEnemy,3,4.0,0.0,0.0\nRock,0,1.0,1.0,0.0\n";

    #[test]
    fn rows_become_entities_in_order() {
        let mut w = World::new();
        let ids = load_entities_reader(Cursor::new(CSV), &mut w).unwrap();
        assert_eq!(ids, vec![EntityId(0), EntityId(1)]);
        assert_eq!(w.tag(EntityId(0)), Some("Enemy"));
        assert_eq!(w.position(EntityId(1)), Some(Vec3::new(1.0, 1.0, 0.0)));
        assert_eq!(w.layer[0], 3);
    }

    #[test]
    fn bad_layer_leaves_world_untouched() {
        let mut w = World::new();
        let csv = "tag,layer,x,y,z\nEnemy,3,0,0,0\nEnemy,40,0,0,0\n";
        let err = load_entities_reader(Cursor::new(csv), &mut w).unwrap_err();
        assert!(matches!(err, WorldError::LayerOutOfRange(40)));
        assert!(w.is_empty());
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let mut w = World::new();
        let csv = "tag,layer,x,y,z\nEnemy,three,0,0,0\n";
        assert!(matches!(
            load_entities_reader(Cursor::new(csv), &mut w),
            Err(WorldError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let mut w = World::new();
        let err = load_entities_csv(std::path::Path::new("/nonexistent/entities.csv"), &mut w);
        assert!(matches!(err, Err(WorldError::Io(_))));
    }
}
