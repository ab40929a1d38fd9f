//! Entity placement: every spawn consumes one cell from a shared pool of
//! interior floor tiles, so no two entities can start on the same cell.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::types::{EnemyKind, Pos, RelicKind, TileKind};

use super::model::{EnemySpawn, GeneratedMap, RelicSpawn};
use super::seed::random_usize;

pub(super) const ENEMY_COUNT: usize = 3;
pub(super) const RELIC_COUNT: usize = 5;

pub(super) fn place_entities(
    map_seed: u64,
    width: usize,
    height: usize,
    mut tiles: Vec<TileKind>,
) -> GeneratedMap {
    let mut pool = interior_floor_pool(&tiles, width, height);
    let mut rng = ChaCha8Rng::seed_from_u64(map_seed);

    let player_start = draw_from_pool(&mut rng, &mut pool).unwrap_or(Pos { y: 1, x: 1 });

    let exit = draw_from_pool(&mut rng, &mut pool);
    if let Some(pos) = exit {
        // The exit replaces the tile itself; movement detects it with a
        // grid lookup, not an entity scan.
        tiles[(pos.y as usize) * width + (pos.x as usize)] = TileKind::Exit;
    }

    let mut enemy_spawns = Vec::with_capacity(ENEMY_COUNT);
    for spawn_index in 0..ENEMY_COUNT {
        let Some(pos) = draw_from_pool(&mut rng, &mut pool) else {
            break;
        };
        enemy_spawns.push(EnemySpawn { kind: pick_enemy_kind(map_seed, spawn_index), pos });
    }

    let mut relic_spawns = Vec::with_capacity(RELIC_COUNT);
    for spawn_index in 0..RELIC_COUNT {
        let Some(pos) = draw_from_pool(&mut rng, &mut pool) else {
            break;
        };
        relic_spawns.push(RelicSpawn { kind: pick_relic_kind(map_seed, spawn_index), pos });
    }

    GeneratedMap { width, height, tiles, player_start, exit, enemy_spawns, relic_spawns }
}

/// Floor tiles strictly inside the border ring, in scan order.
pub(super) fn interior_floor_pool(tiles: &[TileKind], width: usize, height: usize) -> Vec<Pos> {
    let mut pool = Vec::new();
    for y in 1..(height - 1) {
        for x in 1..(width - 1) {
            if tiles[y * width + x] == TileKind::Floor {
                pool.push(Pos { y: y as i32, x: x as i32 });
            }
        }
    }
    pool
}

/// Uniform draw without replacement; `None` once the pool runs dry, which
/// callers treat as "place fewer entities" rather than an error.
pub(super) fn draw_from_pool(rng: &mut ChaCha8Rng, pool: &mut Vec<Pos>) -> Option<Pos> {
    if pool.is_empty() {
        return None;
    }
    let index = (rng.next_u64() as usize) % pool.len();
    Some(pool.swap_remove(index))
}

pub(super) fn pick_enemy_kind(map_seed: u64, spawn_index: usize) -> EnemyKind {
    let roll = random_usize(map_seed, 5000 + spawn_index as u64, 0, 99);
    if roll < 50 {
        EnemyKind::GloomRat
    } else if roll < 85 {
        EnemyKind::CinderBat
    } else {
        EnemyKind::HollowHusk
    }
}

pub(super) fn pick_relic_kind(map_seed: u64, spawn_index: usize) -> RelicKind {
    let roll = random_usize(map_seed, 6000 + spawn_index as u64, 0, 99);
    if roll < 45 {
        RelicKind::EmberCoin
    } else if roll < 80 {
        RelicKind::BoneIdol
    } else {
        RelicKind::GlassShard
    }
}
