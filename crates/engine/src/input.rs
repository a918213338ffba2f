//! Keyboard steering.
//!
//! The engine stores whatever heading it is given; the turn-rate limit
//! lives here, in the polling logic a renderer runs once per frame.

use shared::StateUpdate;

/// Steering keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Map a DOM-style key code (`ArrowLeft`, `KeyA`, ...) to a steering key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" | "KeyA" => Some(Key::Left),
            "ArrowRight" | "KeyD" => Some(Key::Right),
            "ArrowUp" | "KeyW" => Some(Key::Up),
            "ArrowDown" | "KeyS" => Some(Key::Down),
            _ => None,
        }
    }
}

/// Held steering keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct Steering {
    pub left_pressed: bool,
    pub right_pressed: bool,
    // Up/down are tracked but do not steer (no boost or brake).
    pub up_pressed: bool,
    pub down_pressed: bool,
}

impl Steering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    /// Release every key.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn set(&mut self, key: Key, pressed: bool) {
        match key {
            Key::Left => self.left_pressed = pressed,
            Key::Right => self.right_pressed = pressed,
            Key::Up => self.up_pressed = pressed,
            Key::Down => self.down_pressed = pressed,
        }
    }

    /// Heading after one frame of input, or `None` if it would not change.
    pub fn next_direction(&self, current: f32, turn_speed: f32) -> Option<f32> {
        let mut direction = current;
        if self.left_pressed {
            direction -= turn_speed;
        }
        if self.right_pressed {
            direction += turn_speed;
        }
        (direction != current).then_some(direction)
    }

    /// Poll the local player's snake: the direction to send this frame, if any.
    pub fn poll(&self, update: &StateUpdate, turn_speed: f32) -> Option<f32> {
        let snake = update.own_snake().filter(|s| s.is_alive)?;
        self.next_direction(snake.direction, turn_speed)
    }
}
