//! Procedural map generation split into coherent submodules.

pub mod model;

mod layout;
mod seed;
mod spawns;

pub use model::{EnemySpawn, GeneratedMap, RelicSpawn};

pub const MAP_WIDTH: usize = 20;
pub const MAP_HEIGHT: usize = 20;

use crate::types::TileKind;
use layout::{build_rooms, carve_room};
use seed::derive_map_seed;
use spawns::place_entities;

pub struct MapGenerator {
    base_seed: u64,
    width: usize,
    height: usize,
}

impl MapGenerator {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed, width: MAP_WIDTH, height: MAP_HEIGHT }
    }

    /// Stamp rooms onto an all-wall grid, then place entities on the
    /// resulting floor. Rooms may overlap or stay isolated; nothing here
    /// guarantees the floor areas connect, and nothing downstream assumes
    /// they do.
    pub fn generate(&self, run_index: u32) -> GeneratedMap {
        let map_seed = derive_map_seed(self.base_seed, run_index);
        let mut tiles = vec![TileKind::Wall; self.width * self.height];

        let rooms = build_rooms(map_seed, self.width, self.height);
        for room in &rooms {
            carve_room(&mut tiles, self.width, room);
        }

        place_entities(map_seed, self.width, self.height, tiles)
    }
}

pub fn generate_map(base_seed: u64, run_index: u32) -> GeneratedMap {
    MapGenerator::new(base_seed).generate(run_index)
}
