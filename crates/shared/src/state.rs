//! Game state snapshot types.

use crate::{Color, EntityId, Lobby, PlayerId, Position};
use serde::{Deserialize, Serialize};

/// A snake. Segments are ordered head first, tail last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    pub id: EntityId,
    pub player_id: PlayerId,
    pub player_name: String,
    pub segments: Vec<Position>,
    /// Heading in radians.
    pub direction: f32,
    pub color: Color,
    pub is_alive: bool,
    pub score: u32,
}

impl Snake {
    /// Current head position.
    #[inline]
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A food pellet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pellet {
    pub id: EntityId,
    pub position: Position,
    pub color: Color,
    /// Score awarded when eaten.
    pub value: u32,
}

/// Authoritative game state for one round.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub snakes: Vec<Snake>,
    pub pellets: Vec<Pellet>,
    pub game_started: bool,
    pub game_ended: bool,
    /// Player id of the sole survivor, if the round ended with one.
    pub winner: Option<PlayerId>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl GameState {
    /// A state with no round in progress.
    pub fn empty(timestamp: u64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    pub fn snake_of(&self, player_id: PlayerId) -> Option<&Snake> {
        self.snakes.iter().find(|s| s.player_id == player_id)
    }

    pub fn alive_count(&self) -> usize {
        self.snakes.iter().filter(|s| s.is_alive).count()
    }

    /// Whether ticks should still advance this state.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.game_started && !self.game_ended
    }
}

/// Snapshot handed to state subscribers after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    pub lobby: Option<Lobby>,
    pub game_state: GameState,
    pub player_id: PlayerId,
}

impl StateUpdate {
    /// The local player's snake, if a round has placed one.
    pub fn own_snake(&self) -> Option<&Snake> {
        self.game_state.snake_of(self.player_id)
    }
}
