//! Unit tests for bn-cell.

use bn_core::{EntityId, Vec3};

use crate::{CellError, CellTable};

// ── Read / write ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod access_tests {
    use super::*;

    #[test]
    fn fresh_cell_reads_unset_sentinel() {
        let mut cells = CellTable::new();
        let dir = cells.alloc::<Vec3>("dir");
        let target = cells.alloc::<EntityId>("target");
        assert_eq!(cells.read(dir), Vec3::ZERO);
        assert_eq!(cells.read(target), EntityId::INVALID);
        assert!(cells.is_unset(target));
    }

    #[test]
    fn read_your_write() {
        let mut cells = CellTable::new();
        let speed = cells.alloc::<f32>("speed");
        cells.write(speed, 4.5);
        assert_eq!(cells.read(speed), 4.5);
        assert_eq!(cells.get(speed), Some(&4.5));
    }

    #[test]
    fn last_write_wins() {
        let mut cells = CellTable::new();
        let target = cells.alloc::<EntityId>("target");
        cells.write(target, EntityId(1));
        cells.write(target, EntityId(2));
        assert_eq!(cells.read(target), EntityId(2));
        assert_eq!(cells.writes(target), 2);
    }

    #[test]
    fn declared_sentinel_is_restored_by_clear() {
        let mut cells = CellTable::new();
        let range = cells.alloc_with::<f32>("range", -1.0);
        assert_eq!(cells.read(range), -1.0);
        cells.write(range, 8.0);
        cells.clear(range);
        assert_eq!(cells.read(range), -1.0);
        assert!(cells.is_unset(range));
    }

    #[test]
    fn write_all_and_clear_all() {
        let mut cells = CellTable::new();
        let outs = cells.alloc_many::<EntityId>("out", 3);
        cells.write_all(&outs, &EntityId(9));
        assert!(outs.iter().all(|&c| cells.read(c) == EntityId(9)));
        cells.clear_all(&outs);
        assert!(outs.iter().all(|&c| cells.is_unset(c)));
        assert_eq!(cells.name_of(outs[2]), Some("out[2]"));
    }

    #[test]
    fn update_in_place() {
        let mut cells = CellTable::new();
        let hits = cells.alloc::<u32>("hits");
        cells.update(hits, |n| *n += 1);
        cells.update(hits, |n| *n += 1);
        assert_eq!(cells.read(hits), 2);
    }

    #[test]
    fn foreign_handle_reads_default_and_ignores_writes() {
        let mut a = CellTable::new();
        let mut b = CellTable::new();
        let _ = b.alloc::<bool>("flag");
        let only_in_a = {
            let _ = a.alloc::<bool>("x");
            a.alloc::<f32>("y")
        };
        // Slot 1 does not exist in `b`.
        assert_eq!(b.read(only_in_a), 0.0);
        b.write(only_in_a, 3.0);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn snapshot_renders_every_cell() {
        let mut cells = CellTable::new();
        let a = cells.alloc::<u32>("a");
        let _ = cells.alloc::<bool>("b");
        cells.write(a, 7);
        let rows: Vec<_> = cells.snapshot().collect();
        assert_eq!(rows, vec![("a", "7".to_owned()), ("b", "false".to_owned())]);
    }
}

// ── Name lookup ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[test]
    fn lookup_resolves_typed_handle() {
        let mut cells = CellTable::new();
        let dir = cells.alloc::<Vec3>("move_dir");
        assert_eq!(cells.lookup::<Vec3>("move_dir").unwrap(), dir);
    }

    #[test]
    fn lookup_unknown_name_errors() {
        let cells = CellTable::new();
        assert!(matches!(cells.lookup::<f32>("nope"), Err(CellError::UnknownCell(_))));
    }

    #[test]
    fn lookup_wrong_type_errors() {
        let mut cells = CellTable::new();
        let _ = cells.alloc::<Vec3>("move_dir");
        assert!(matches!(
            cells.lookup::<f32>("move_dir"),
            Err(CellError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn duplicate_name_keeps_first_for_lookup() {
        let mut cells = CellTable::new();
        let first = cells.alloc::<f32>("speed");
        let second = cells.alloc::<f32>("speed");
        assert_ne!(first, second);
        assert_eq!(cells.lookup::<f32>("speed").unwrap(), first);
    }
}

// ── Singletons ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod singleton_tests {
    use super::*;

    #[test]
    fn first_claim_wins_second_is_rejected() {
        let mut cells = CellTable::new();
        let first = cells.claim_singleton("pool.bullet", 10u32).unwrap();
        let second = cells.claim_singleton("pool.bullet", 20u32);
        assert!(matches!(second, Err(CellError::DuplicateSingleton("pool.bullet"))));
        assert_eq!(cells.read(first), 10);
        assert_eq!(cells.singleton::<u32>("pool.bullet"), Some(first));
    }

    #[test]
    fn singleton_type_is_checked() {
        let mut cells = CellTable::new();
        let _ = cells.claim_singleton("pool.bullet", 10u32).unwrap();
        assert_eq!(cells.singleton::<f32>("pool.bullet"), None);
    }

    #[test]
    fn release_frees_the_key() {
        let mut cells = CellTable::new();
        let first = cells.claim_singleton("pool.bullet", 10u32).unwrap();
        assert!(cells.release_singleton("pool.bullet"));
        assert!(!cells.release_singleton("pool.bullet"));
        assert_eq!(cells.read(first), 0);
        assert!(cells.registry().is_empty());

        let again = cells.claim_singleton("pool.bullet", 30u32).unwrap();
        assert_ne!(again, first);
        assert_eq!(cells.singleton::<u32>("pool.bullet"), Some(again));
    }
}
