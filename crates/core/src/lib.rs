pub mod battle;
pub mod game;
pub mod input;
pub mod mapgen;
pub mod progression;
pub mod state;
pub mod types;

pub use battle::{BattleAction, BattleEvent, BattleSession, TurnPhase};
pub use game::{Game, IntroOption, LOADING_DELAY_MS, TutorialOption};
pub use input::{PadLatches, PadSnapshot};
pub use mapgen::{GeneratedMap, MAP_HEIGHT, MAP_WIDTH};
pub use state::{Enemy, GameState, Map, Player, Relic};
pub use types::*;
