//! Shared types for native-slither.
//!
//! This crate contains:
//! - The game state snapshot types (snakes, pellets, lobby)
//! - Color palettes used by the engine and renderers
//! - Form validation helpers for the presentation layer

mod error;
pub mod input;
mod lobby;
mod state;

pub use error::InputError;
pub use lobby::{Lobby, Player};
pub use state::{GameState, Pellet, Snake, StateUpdate};

use serde::{Deserialize, Serialize};

/// Identifier of a player (also the owner of a snake).
pub type PlayerId = u32;

/// Identifier of a snake or pellet.
pub type EntityId = u32;

/// RGB color used for snakes and pellets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Represents a 2D position in arena space using glam's Vec2.
pub type Position = glam::Vec2;

/// Snake colors, assigned by player slot (wrapping).
pub const SNAKE_COLORS: [Color; 10] = [
    Color::new(0, 170, 255),   // blue
    Color::new(0, 255, 0),     // green
    Color::new(187, 51, 255),  // purple
    Color::new(255, 51, 51),   // red
    Color::new(255, 153, 51),  // orange
    Color::new(0, 255, 255),   // cyan
    Color::new(255, 51, 255),  // magenta
    Color::new(255, 255, 0),   // yellow
    Color::new(51, 51, 255),   // blue purple
    Color::new(0, 255, 128),   // teal
];

/// Pellet colors, picked at random.
pub const PELLET_COLORS: [Color; 4] = [
    Color::new(255, 255, 51),
    Color::new(255, 153, 51),
    Color::new(255, 51, 255),
    Color::new(0, 255, 255),
];

/// Snake color for the given player slot.
#[inline]
pub fn snake_color(slot: usize) -> Color {
    SNAKE_COLORS[slot % SNAKE_COLORS.len()]
}
