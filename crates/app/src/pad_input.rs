//! Gamepad polling, reduced to the snapshot the simulation consumes.

use game_core::PadSnapshot;
use gamepads::{Button, Gamepads};

pub struct PadSource {
    gamepads: Gamepads,
}

impl PadSource {
    pub fn new() -> Self {
        Self { gamepads: Gamepads::new() }
    }

    /// Sample the first connected pad; no pad reads as all-neutral.
    pub fn poll(&mut self) -> PadSnapshot {
        self.gamepads.poll();
        let mut snapshot = PadSnapshot::default();
        if let Some(gamepad) = self.gamepads.all().next() {
            snapshot.dpad_up = gamepad.is_currently_pressed(Button::DPadUp);
            snapshot.dpad_down = gamepad.is_currently_pressed(Button::DPadDown);
            snapshot.dpad_left = gamepad.is_currently_pressed(Button::DPadLeft);
            snapshot.dpad_right = gamepad.is_currently_pressed(Button::DPadRight);
            snapshot.confirm_south = gamepad.is_currently_pressed(Button::ActionDown);
            snapshot.confirm_east = gamepad.is_currently_pressed(Button::ActionRight);
            snapshot.stick_x = gamepad.left_stick_x();
            // The backend reports the stick with up as positive y; the
            // simulation uses screen-down convention.
            snapshot.stick_y = -gamepad.left_stick_y();
        }
        snapshot
    }
}

impl Default for PadSource {
    fn default() -> Self {
        Self::new()
    }
}
