//! Per-frame glue between captured input and the simulation.

use game_core::{Game, Intent, PadSnapshot};
use macroquad::prelude::KeyCode;

/// Map a pressed key to its intent. WASD and the arrow cluster are
/// interchangeable; Enter confirms.
pub fn key_intent(key: KeyCode) -> Option<Intent> {
    match key {
        KeyCode::W | KeyCode::Up => Some(Intent::Up),
        KeyCode::S | KeyCode::Down => Some(Intent::Down),
        KeyCode::A | KeyCode::Left => Some(Intent::Left),
        KeyCode::D | KeyCode::Right => Some(Intent::Right),
        KeyCode::Enter => Some(Intent::Confirm),
        _ => None,
    }
}

/// Process one frame: discrete key intents first, then the polled pad
/// frame, then the deferred-callback clock. The game routes everything by
/// its current screen, so this stays screen-agnostic.
pub fn tick(game: &mut Game, keys_pressed: &[KeyCode], pad: &PadSnapshot, elapsed_ms: u32) {
    for &key in keys_pressed {
        if let Some(intent) = key_intent(key) {
            game.handle_key(intent);
        }
    }
    game.handle_pad(pad);
    game.advance_time(elapsed_ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{LOADING_DELAY_MS, Screen};

    #[test]
    fn wasd_and_arrows_map_to_the_same_intents() {
        assert_eq!(key_intent(KeyCode::W), Some(Intent::Up));
        assert_eq!(key_intent(KeyCode::Up), Some(Intent::Up));
        assert_eq!(key_intent(KeyCode::A), Some(Intent::Left));
        assert_eq!(key_intent(KeyCode::Left), Some(Intent::Left));
        assert_eq!(key_intent(KeyCode::Enter), Some(Intent::Confirm));
        assert_eq!(key_intent(KeyCode::Space), None);
    }

    #[test]
    fn tick_advances_the_loading_screen() {
        let mut game = Game::new(11);
        tick(&mut game, &[], &PadSnapshot::default(), LOADING_DELAY_MS);
        assert_eq!(game.screen(), Screen::Intro);
    }

    #[test]
    fn tick_routes_confirm_into_the_intro_menu() {
        let mut game = Game::new(11);
        tick(&mut game, &[], &PadSnapshot::default(), LOADING_DELAY_MS);
        tick(&mut game, &[KeyCode::Enter], &PadSnapshot::default(), 16);
        assert_eq!(game.screen(), Screen::Exploring);
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let mut game = Game::new(11);
        tick(&mut game, &[], &PadSnapshot::default(), LOADING_DELAY_MS);
        let before = game.snapshot_hash();
        tick(&mut game, &[KeyCode::Q, KeyCode::Tab], &PadSnapshot::default(), 0);
        assert_eq!(game.snapshot_hash(), before);
    }
}
