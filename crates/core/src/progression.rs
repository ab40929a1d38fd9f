//! Level curve constants and the experience-award loop.

use crate::state::Player;

pub const BASE_XP_TO_NEXT_LEVEL: u32 = 10;
pub const LEVEL_UP_MAX_HP_BONUS: i32 = 3;
pub const LEVEL_UP_ATTACK_BONUS: i32 = 1;

/// Award experience and apply every level-up it pays for. A single reward
/// can cross several thresholds, so this loops until the remainder is
/// below the (growing) requirement. Returns the number of levels gained.
pub fn grant_xp(player: &mut Player, reward: u32) -> u32 {
    player.xp += reward;
    let mut levels_gained = 0;
    while player.xp >= player.xp_to_next_level {
        player.xp -= player.xp_to_next_level;
        player.xp_to_next_level = player.xp_to_next_level * 3 / 2;
        player.level += 1;
        player.max_hp += LEVEL_UP_MAX_HP_BONUS;
        player.hp = player.max_hp;
        player.attack += LEVEL_UP_ATTACK_BONUS;
        levels_gained += 1;
    }
    levels_gained
}
