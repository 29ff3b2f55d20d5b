//! CSV entity loader.
//!
//! # CSV format
//!
//! One row per free-standing entity.
//!
//! ```csv
//! tag,layer,x,y,z
//! Enemy,3,4.0,0.0,0.0
//! Enemy,3,-6.5,2.0,0.0
//! Rock,0,1.0,1.0,0.0
//! ```
//!
//! `layer` must be in `0..32`.  Rows become entities in file order, so the
//! first row gets the lowest new `EntityId`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use bn_core::{EntityId, Vec3};

use crate::{World, WorldError, WorldResult};

#[derive(Deserialize)]
struct EntityRecord {
    tag:   String,
    layer: u32,
    x:     f32,
    y:     f32,
    z:     f32,
}

/// Load entities from a CSV file into `world`.
pub fn load_entities_csv(path: &Path, world: &mut World) -> WorldResult<Vec<EntityId>> {
    let file = std::fs::File::open(path).map_err(WorldError::Io)?;
    load_entities_reader(file, world)
}

/// Like [`load_entities_csv`] but accepts any `Read` source.
///
/// Rows are validated before anything is added, so a bad row leaves `world`
/// untouched.
pub fn load_entities_reader<R: Read>(reader: R, world: &mut World) -> WorldResult<Vec<EntityId>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize::<EntityRecord>() {
        let row = result.map_err(|e| WorldError::Parse(e.to_string()))?;
        if row.layer >= 32 {
            return Err(WorldError::LayerOutOfRange(row.layer));
        }
        rows.push(row);
    }

    let ids: Vec<EntityId> = rows
        .into_iter()
        .map(|r| world.create(r.tag, r.layer as u8, Vec3::new(r.x, r.y, r.z)))
        .collect();
    log::debug!("loaded {} entities from CSV", ids.len());
    Ok(ids)
}
