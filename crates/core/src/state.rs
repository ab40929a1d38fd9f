use slotmap::SlotMap;

use crate::progression;
use crate::types::*;

pub const PLAYER_STARTING_HP: i32 = 10;
pub const PLAYER_STARTING_ATTACK: i32 = 3;

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
}

impl Player {
    pub fn new_at(pos: Pos) -> Self {
        Self {
            pos,
            hp: PLAYER_STARTING_HP,
            max_hp: PLAYER_STARTING_HP,
            attack: PLAYER_STARTING_ATTACK,
            level: 1,
            xp: 0,
            xp_to_next_level: progression::BASE_XP_TO_NEXT_LEVEL,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub xp_reward: u32,
}

impl Enemy {
    pub fn spawn(kind: EnemyKind, pos: Pos) -> Self {
        Self {
            id: EnemyId::default(),
            kind,
            pos,
            hp: kind.max_hp(),
            max_hp: kind.max_hp(),
            attack: kind.attack(),
            xp_reward: kind.xp_reward(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

#[derive(Clone, Debug)]
pub struct Relic {
    pub id: RelicId,
    pub kind: RelicKind,
    pub pos: Pos,
}

#[derive(Clone)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
}

impl Map {
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileKind>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self { width, height, tiles }
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if pos.x < 0 || pos.y < 0 {
            return TileKind::Wall;
        }
        let xu = pos.x as usize;
        let yu = pos.y as usize;
        if xu >= self.width || yu >= self.height {
            return TileKind::Wall;
        }
        self.tiles[yu * self.width + xu]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = (pos.y as usize) * self.width + (pos.x as usize);
        self.tiles[idx] = tile;
    }

    /// Out-of-bounds positions and walls are not walkable; everything else is.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.tile_at(pos) != TileKind::Wall
    }
}

pub struct GameState {
    pub map: Map,
    pub player: Player,
    pub enemies: SlotMap<EnemyId, Enemy>,
    pub relics: SlotMap<RelicId, Relic>,
}

impl GameState {
    /// Defeated enemies stay in the arena with `hp == 0`; they no longer
    /// count as occupying their tile.
    pub fn living_enemy_at(&self, pos: Pos) -> Option<EnemyId> {
        self.enemies
            .iter()
            .find(|(_, enemy)| enemy.pos == pos && enemy.is_alive())
            .map(|(id, _)| id)
    }

    pub fn relic_at(&self, pos: Pos) -> Option<RelicId> {
        self.relics.iter().find(|(_, relic)| relic.pos == pos).map(|(id, _)| id)
    }
}
