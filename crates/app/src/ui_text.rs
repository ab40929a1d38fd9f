//! Text formatting for status lines, log entries, and battle messages.

use app::{format_seed, format_snapshot_hash};
use game_core::{BattleEvent, Game, LogEvent, Screen};

pub fn status_text(game: &Game) -> String {
    match game.screen() {
        Screen::Loading => "Waking the vault...".to_string(),
        Screen::Intro => "WASD/arrows to choose, Enter to confirm".to_string(),
        Screen::Tutorial => "How the descent works".to_string(),
        Screen::Exploring => {
            let relics_left = game.state().relics.len();
            format!("Find the exit. {relics_left} relics unclaimed.")
        }
        Screen::Battling => "Battle! Pick an action.".to_string(),
    }
}

pub fn event_log_line(event: &LogEvent) -> String {
    match event {
        LogEvent::RunStarted => "You wake on cold vault stone.".to_string(),
        LogEvent::ExitSighted { pos } => {
            format!("Something marks an exit near ({}, {}).", pos.x, pos.y)
        }
        LogEvent::Moved { to } => format!("Stepped to ({}, {}).", to.x, to.y),
        LogEvent::Blocked => "A wall stops you short.".to_string(),
        LogEvent::RelicCollected { kind } => {
            format!("Picked up a {}.", kind.display_name())
        }
        LogEvent::BattleStarted { kind } => {
            format!("A {} blocks your path!", kind.display_name())
        }
        LogEvent::BattleWon { kind, xp } => {
            format!("The {} falls. +{xp} xp.", kind.display_name())
        }
        LogEvent::BattleLost => "You black out and come to, shaken but whole.".to_string(),
        LogEvent::LeveledUp { level } => format!("Level up! Now level {level}."),
        LogEvent::RunEscaped => "You found the exit and escaped the vault!".to_string(),
    }
}

pub fn battle_line(event: &BattleEvent) -> String {
    match event {
        BattleEvent::Encounter { kind } => {
            format!("A {} bars the way!", kind.display_name())
        }
        BattleEvent::PlayerHit { kind, damage } => {
            format!("You strike the {} for {damage}.", kind.display_name())
        }
        BattleEvent::EnemyHit { kind, damage } => {
            format!("The {} hits you for {damage}.", kind.display_name())
        }
        BattleEvent::TurnWasted { action } => {
            format!("{} does nothing here. The turn slips away.", action.label())
        }
        BattleEvent::Won { kind, xp } => {
            format!("The {} is defeated! +{xp} xp.", kind.display_name())
        }
        BattleEvent::Lost => "You are overwhelmed...".to_string(),
    }
}

pub fn stats_panel_lines(game: &Game, run_seed: u64) -> Vec<String> {
    let player = &game.state().player;
    vec![
        format!("HP {}/{}", player.hp, player.max_hp),
        format!("ATK {}", player.attack),
        format!("LV {}  XP {}/{}", player.level, player.xp, player.xp_to_next_level),
        format!("Seed: {}", format_seed(run_seed)),
        format!("Snapshot: {}", format_snapshot_hash(game.snapshot_hash())),
    ]
}

pub const TUTORIAL_LINES: [&str; 5] = [
    "Move with WASD or the arrow keys; a gamepad works too.",
    "Walk into an enemy to start a turn-based battle.",
    "Attack wears them down; winning earns experience.",
    "Relics are scattered on the floor. Walk over them to collect.",
    "Find the exit tile to escape the vault.",
];
