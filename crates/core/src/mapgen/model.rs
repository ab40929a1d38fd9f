//! Public data model for generated maps and their entity placements.

use crate::types::{EnemyKind, Pos, RelicKind, TileKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelicSpawn {
    pub kind: RelicKind,
    pub pos: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedMap {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub player_start: Pos,
    /// Absent only when the floor pool ran dry before the exit draw.
    pub exit: Option<Pos>,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub relic_spawns: Vec<RelicSpawn>,
}

impl GeneratedMap {
    /// Stable byte encoding used by determinism tests.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
                TileKind::Exit => 2,
            });
        }
        bytes.extend(self.player_start.y.to_le_bytes());
        bytes.extend(self.player_start.x.to_le_bytes());

        match self.exit {
            Some(pos) => {
                bytes.push(1);
                bytes.extend(pos.y.to_le_bytes());
                bytes.extend(pos.x.to_le_bytes());
            }
            None => bytes.push(0),
        }

        bytes.extend((self.enemy_spawns.len() as u32).to_le_bytes());
        for spawn in &self.enemy_spawns {
            bytes.push(match spawn.kind {
                EnemyKind::GloomRat => 0,
                EnemyKind::CinderBat => 1,
                EnemyKind::HollowHusk => 2,
            });
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.extend(spawn.pos.x.to_le_bytes());
        }

        bytes.extend((self.relic_spawns.len() as u32).to_le_bytes());
        for spawn in &self.relic_spawns {
            bytes.push(match spawn.kind {
                RelicKind::EmberCoin => 0,
                RelicKind::BoneIdol => 1,
                RelicKind::GlassShard => 2,
            });
            bytes.extend(spawn.pos.y.to_le_bytes());
            bytes.extend(spawn.pos.x.to_le_bytes());
        }

        bytes
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if pos.x < 0 || pos.y < 0 {
            return TileKind::Wall;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return TileKind::Wall;
        }
        self.tiles[y * self.width + x]
    }
}
