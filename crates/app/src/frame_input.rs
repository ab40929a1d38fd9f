//! Keyboard input collection for one rendered frame.

use app::ui_scale::UiScaleAction;
use macroquad::prelude::{KeyCode, is_key_down, is_key_pressed};

const ACTION_KEYS: [KeyCode; 9] = [
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Enter,
];

#[derive(Default)]
pub struct FrameInput {
    pub keys_pressed: Vec<KeyCode>,
    pub ui_scale_action: Option<UiScaleAction>,
}

pub fn capture_frame_input() -> FrameInput {
    let mut keys_pressed = Vec::with_capacity(ACTION_KEYS.len());
    for key in ACTION_KEYS {
        if is_key_pressed(key) {
            keys_pressed.push(key);
        }
    }

    let ctrl_down = is_key_down(KeyCode::LeftControl) || is_key_down(KeyCode::RightControl);
    let ui_scale_action = if ctrl_down && is_key_pressed(KeyCode::Equal) {
        Some(UiScaleAction::Increase)
    } else if ctrl_down && is_key_pressed(KeyCode::Minus) {
        Some(UiScaleAction::Decrease)
    } else if ctrl_down && is_key_pressed(KeyCode::Key0) {
        Some(UiScaleAction::Reset)
    } else {
        None
    };

    FrameInput { keys_pressed, ui_scale_action }
}
