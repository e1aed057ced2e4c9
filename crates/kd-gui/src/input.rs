//! Keyboard adapter for the simulation's input interface.

use kd_simulation::{Action, InputSource};
use macroquad::prelude::*;

/// Keys bound to each action. Movement accepts WASD and the arrow keys.
pub fn bindings(action: Action) -> &'static [KeyCode] {
    match action {
        Action::Up => &[KeyCode::W, KeyCode::Up],
        Action::Down => &[KeyCode::S, KeyCode::Down],
        Action::Left => &[KeyCode::A, KeyCode::Left],
        Action::Right => &[KeyCode::D, KeyCode::Right],
        Action::Chop => &[KeyCode::X],
        Action::Mine => &[KeyCode::Z],
        Action::Craft => &[KeyCode::C],
    }
}

/// Reads the live keyboard state. The simulation's craft latch handles
/// edge detection, so this only reports held keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyboardInput;

impl InputSource for KeyboardInput {
    fn is_action_held(&self, action: Action) -> bool {
        bindings(action).iter().any(|key| is_key_down(*key))
    }
}

/// Check if the pause key was pressed this frame.
pub fn pause_pressed() -> bool {
    is_key_pressed(KeyCode::P)
}

/// Check if the restart key was pressed this frame.
pub fn restart_pressed() -> bool {
    is_key_pressed(KeyCode::R)
}

/// Check if the Escape key was pressed this frame.
pub fn escape_pressed() -> bool {
    is_key_pressed(KeyCode::Escape)
}

/// Check if the reach overlay toggle was pressed this frame.
pub fn reach_toggle_pressed() -> bool {
    is_key_pressed(KeyCode::Tab)
}
