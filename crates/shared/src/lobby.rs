//! Lobby records.

use crate::PlayerId;
use serde::{Deserialize, Serialize};

/// A player sitting in a lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_ready: bool,
    pub is_host: bool,
}

impl Player {
    /// A ready player that hosts the lobby.
    pub fn host(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_ready: true,
            is_host: true,
        }
    }

    /// A ready player that joined someone else's lobby.
    pub fn guest(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_ready: true,
            is_host: false,
        }
    }
}

/// An in-memory lobby.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lobby {
    /// Join code shown to players.
    pub code: String,
    /// Players in join order.
    pub players: Vec<Player>,
    pub max_players: usize,
    pub game_started: bool,
    pub host_id: PlayerId,
}

impl Lobby {
    #[inline]
    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == id)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    pub fn host(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.id == self.host_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lobby() -> Lobby {
        Lobby {
            code: "ABCDEF".to_string(),
            players: vec![Player::guest(7, "Guest"), Player::host(3, "Hosty")],
            max_players: 2,
            game_started: false,
            host_id: 3,
        }
    }

    #[test]
    fn test_host_is_found_by_id_not_position() {
        let lobby = lobby();
        let host = lobby.host().unwrap();
        assert_eq!(host.name, "Hosty");
        assert!(host.is_host);
        assert!(lobby.contains(7));
        assert!(!lobby.contains(4));
        assert!(lobby.is_full());
    }

    #[test]
    fn test_missing_host() {
        let mut lobby = lobby();
        lobby.host_id = 99;
        assert!(lobby.host().is_none());
        lobby.players.pop();
        assert!(!lobby.is_full());
    }
}
