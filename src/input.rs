//! Input sampling
//!
//! Raw key state is sampled once per frame into an `Intent`, so the core
//! update path never touches the keyboard directly and tests can feed in
//! whatever intents they need.

use macroquad::prelude::*;

/// Per-frame player input, decoupled from key bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
}

impl Intent {
    /// Sample the current keyboard state. Arrows or WASD move, Space jumps.
    pub fn sample() -> Self {
        Self {
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            jump: is_key_down(KeyCode::Space),
        }
    }
}
