//! Battle session state: turn phases, the action menu, and the battle
//! message line. Damage resolution lives on `Game`, which owns the player
//! and the enemy arena.

use crate::types::{EnemyId, EnemyKind, Intent};

/// Delay before the enemy answers a player attack, long enough to read the
/// hit message.
pub const ENEMY_TURN_DELAY_MS: u32 = 1500;
/// Shorter delay after a wasted turn; there is less to read.
pub const WASTED_TURN_DELAY_MS: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// The menu is live and accepting a choice.
    PlayerAction,
    /// The player has acted; the enemy's answer is pending or resolving.
    EnemyResolution,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleAction {
    Attack,
    Guard,
    Item,
    Flee,
}

impl BattleAction {
    pub const MENU: [BattleAction; 4] =
        [BattleAction::Attack, BattleAction::Guard, BattleAction::Item, BattleAction::Flee];

    pub fn label(self) -> &'static str {
        match self {
            BattleAction::Attack => "Attack",
            BattleAction::Guard => "Guard",
            BattleAction::Item => "Item",
            BattleAction::Flee => "Flee",
        }
    }
}

/// The single overwritten battle message line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    Encounter { kind: EnemyKind },
    PlayerHit { kind: EnemyKind, damage: i32 },
    EnemyHit { kind: EnemyKind, damage: i32 },
    TurnWasted { action: BattleAction },
    Won { kind: EnemyKind, xp: u32 },
    Lost,
}

#[derive(Clone, Copy, Debug)]
pub struct BattleSession {
    pub enemy: EnemyId,
    pub phase: TurnPhase,
    pub menu_index: usize,
}

impl BattleSession {
    pub fn new(enemy: EnemyId) -> Self {
        Self { enemy, phase: TurnPhase::PlayerAction, menu_index: 0 }
    }

    pub fn selected_action(&self) -> BattleAction {
        BattleAction::MENU[self.menu_index]
    }

    /// Cycle the menu cursor. Up/Left step back, Down/Right step forward,
    /// both wrapping; ignored outside the player's action phase.
    pub fn navigate(&mut self, intent: Intent) {
        if self.phase != TurnPhase::PlayerAction {
            return;
        }
        let len = BattleAction::MENU.len() as i32;
        let step = match intent {
            Intent::Up | Intent::Left => -1,
            Intent::Down | Intent::Right => 1,
            Intent::Confirm => return,
        };
        self.menu_index = ((self.menu_index as i32 + step).rem_euclid(len)) as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> BattleSession {
        BattleSession::new(EnemyId::default())
    }

    #[test]
    fn cursor_wraps_in_both_directions() {
        let mut battle = session();
        battle.navigate(Intent::Up);
        assert_eq!(battle.menu_index, 3);
        battle.navigate(Intent::Down);
        assert_eq!(battle.menu_index, 0);

        battle.menu_index = 3;
        battle.navigate(Intent::Right);
        assert_eq!(battle.menu_index, 0);
        battle.navigate(Intent::Left);
        assert_eq!(battle.menu_index, 3);
    }

    #[test]
    fn navigation_is_ignored_while_the_enemy_resolves() {
        let mut battle = session();
        battle.phase = TurnPhase::EnemyResolution;
        battle.navigate(Intent::Down);
        assert_eq!(battle.menu_index, 0);
    }

    #[test]
    fn selected_action_follows_the_cursor() {
        let mut battle = session();
        assert_eq!(battle.selected_action(), BattleAction::Attack);
        battle.navigate(Intent::Down);
        assert_eq!(battle.selected_action(), BattleAction::Guard);
    }
}
