//! Gamepad snapshot normalization and per-context debounce.
//!
//! Key presses arrive as discrete events and need no debouncing. The
//! gamepad is sampled every frame, so a single physical hold would fire on
//! every poll; a latch per routing context suppresses repeats until every
//! input relevant to that context returns to neutral.

use crate::types::Intent;

pub const AXIS_THRESHOLD: f32 = 0.5;

/// One polled frame of gamepad state, already reduced to the inputs the
/// game cares about. Axis values are in [-1, 1], screen-down positive y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PadSnapshot {
    pub dpad_up: bool,
    pub dpad_down: bool,
    pub dpad_left: bool,
    pub dpad_right: bool,
    pub confirm_south: bool,
    pub confirm_east: bool,
    pub stick_x: f32,
    pub stick_y: f32,
}

impl PadSnapshot {
    pub fn up_held(&self) -> bool {
        self.stick_y < -AXIS_THRESHOLD || self.dpad_up
    }

    pub fn down_held(&self) -> bool {
        self.stick_y > AXIS_THRESHOLD || self.dpad_down
    }

    pub fn left_held(&self) -> bool {
        self.stick_x < -AXIS_THRESHOLD || self.dpad_left
    }

    pub fn right_held(&self) -> bool {
        self.stick_x > AXIS_THRESHOLD || self.dpad_right
    }

    pub fn confirm_held(&self) -> bool {
        self.confirm_south || self.confirm_east
    }

    pub fn any_direction_held(&self) -> bool {
        self.up_held() || self.down_held() || self.left_held() || self.right_held()
    }

    /// First held direction in priority order: up, down, left, right.
    pub fn direction(&self) -> Option<Intent> {
        if self.up_held() {
            Some(Intent::Up)
        } else if self.down_held() {
            Some(Intent::Down)
        } else if self.left_held() {
            Some(Intent::Left)
        } else if self.right_held() {
            Some(Intent::Right)
        } else {
            None
        }
    }
}

/// Which routing context a polled intent would land in. Each context keeps
/// its own latch so switching screens mid-hold behaves correctly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadContext {
    Menu,
    Explore,
    Battle,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PadLatches {
    menu: bool,
    explore: bool,
    battle: bool,
}

impl PadLatches {
    fn slot(&mut self, context: PadContext) -> &mut bool {
        match context {
            PadContext::Menu => &mut self.menu,
            PadContext::Explore => &mut self.explore,
            PadContext::Battle => &mut self.battle,
        }
    }
}

/// Decode one polled frame into at most one intent for the given context.
/// While the context's latch is set, nothing fires; the latch releases
/// only once every input the context listens to is neutral.
pub fn decode_pad(
    snapshot: &PadSnapshot,
    context: PadContext,
    latches: &mut PadLatches,
) -> Option<Intent> {
    let latch = latches.slot(context);
    if *latch {
        if relevant_inputs_neutral(snapshot, context) {
            *latch = false;
        }
        return None;
    }

    let intent = candidate_intent(snapshot, context);
    if intent.is_some() {
        *latch = true;
    }
    intent
}

fn candidate_intent(snapshot: &PadSnapshot, context: PadContext) -> Option<Intent> {
    match context {
        // Menus only navigate vertically.
        PadContext::Menu => {
            if snapshot.up_held() {
                Some(Intent::Up)
            } else if snapshot.down_held() {
                Some(Intent::Down)
            } else if snapshot.confirm_held() {
                Some(Intent::Confirm)
            } else {
                None
            }
        }
        PadContext::Explore => snapshot.direction(),
        PadContext::Battle => snapshot
            .direction()
            .or_else(|| snapshot.confirm_held().then_some(Intent::Confirm)),
    }
}

fn relevant_inputs_neutral(snapshot: &PadSnapshot, context: PadContext) -> bool {
    match context {
        PadContext::Menu => {
            !snapshot.up_held() && !snapshot.down_held() && !snapshot.confirm_held()
        }
        PadContext::Explore => !snapshot.any_direction_held(),
        PadContext::Battle => !snapshot.any_direction_held() && !snapshot.confirm_held(),
    }
}
