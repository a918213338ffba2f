//! Lobby management.
//!
//! A session holds at most one lobby. There is no backend to validate join
//! codes against: joining a code that does not match the current lobby
//! synthesizes a fresh lobby hosted by a stand-in player.

use rand::Rng;
use shared::{Lobby, Player, PlayerId};
use tracing::{info, warn};

/// Length of generated join codes.
pub const CODE_LENGTH: usize = 6;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Player id of the stand-in host of a synthesized lobby.
pub const STAND_IN_HOST_ID: PlayerId = 0;

/// Display name of the stand-in host.
pub const STAND_IN_HOST_NAME: &str = "Host Player";

/// Generate a join code drawn uniformly from `A`-`Z`.
pub fn generate_code(rng: &mut impl Rng) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Owns the session's lobby.
#[derive(Debug)]
pub struct LobbyManager {
    lobby: Option<Lobby>,
    max_players: usize,
}

impl LobbyManager {
    pub fn new(max_players: usize) -> Self {
        Self {
            lobby: None,
            max_players,
        }
    }

    /// The current lobby, if any.
    #[inline]
    pub fn lobby(&self) -> Option<&Lobby> {
        self.lobby.as_ref()
    }

    /// Create a lobby with `player_id` as its sole, hosting player.
    ///
    /// Replaces any lobby the session was in.
    pub fn create(&mut self, player_id: PlayerId, name: &str) -> &Lobby {
        let code = generate_code(&mut rand::rng());
        info!("Lobby {} created by {} ({})", code, name, player_id);

        self.lobby.insert(Lobby {
            code,
            players: vec![Player::host(player_id, name)],
            max_players: self.max_players,
            game_started: false,
            host_id: player_id,
        })
    }

    /// Join the lobby identified by `code`.
    ///
    /// When `code` does not match the current lobby a placeholder lobby with
    /// a stand-in host is created first, so joining never fails.
    pub fn join(&mut self, code: &str, player_id: PlayerId, name: &str) -> &Lobby {
        let max_players = self.max_players;
        let lobby = match self.lobby.take() {
            Some(lobby) if lobby.code == code => lobby,
            _ => {
                info!("Lobby {} not known locally, using a stand-in host", code);
                Lobby {
                    code: code.to_string(),
                    players: vec![Player::host(STAND_IN_HOST_ID, STAND_IN_HOST_NAME)],
                    max_players,
                    game_started: false,
                    host_id: STAND_IN_HOST_ID,
                }
            }
        };
        let lobby = self.lobby.insert(lobby);

        if lobby.contains(player_id) {
            return lobby;
        }
        if lobby.is_full() {
            warn!(
                "Lobby {} is over capacity ({} / {})",
                lobby.code,
                lobby.players.len() + 1,
                lobby.max_players
            );
        }
        lobby.players.push(Player::guest(player_id, name));
        info!("{} ({}) joined lobby {}", name, player_id, lobby.code);
        lobby
    }

    /// Mark the lobby as started. Returns `None` when there is no lobby.
    pub fn start(&mut self) -> Option<&Lobby> {
        let lobby = self.lobby.as_mut()?;
        lobby.game_started = true;
        info!("Lobby {} starting with {} players", lobby.code, lobby.players.len());
        Some(&*lobby)
    }

    /// Discard the lobby.
    pub fn leave(&mut self) -> Option<Lobby> {
        let lobby = self.lobby.take();
        if let Some(lobby) = &lobby {
            info!("Left lobby {}", lobby.code);
        }
        lobby
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_code_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let code = generate_code(&mut rng);
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn test_create_makes_sole_host() {
        let mut manager = LobbyManager::new(10);
        let lobby = manager.create(7, "Ada");

        assert_eq!(lobby.code.len(), 6);
        assert_eq!(lobby.players, vec![Player::host(7, "Ada")]);
        assert_eq!(lobby.host_id, 7);
        assert_eq!(lobby.max_players, 10);
        assert!(!lobby.game_started);
    }

    #[test]
    fn test_join_unknown_code_fabricates_lobby() {
        let mut manager = LobbyManager::new(10);
        let lobby = manager.join("QWERTY", 7, "Ada");

        assert_eq!(lobby.code, "QWERTY");
        assert_eq!(lobby.host_id, STAND_IN_HOST_ID);
        assert_eq!(lobby.players.len(), 2);
        assert_eq!(lobby.players[0], Player::host(STAND_IN_HOST_ID, STAND_IN_HOST_NAME));
        assert_eq!(lobby.players[1], Player::guest(7, "Ada"));
    }

    #[test]
    fn test_join_other_code_replaces_lobby() {
        let mut manager = LobbyManager::new(10);
        let created = manager.create(7, "Ada").code.clone();
        let lobby = manager.join("ZZZZZZ", 7, "Ada");

        assert_ne!(lobby.code, created);
        assert_eq!(lobby.host_id, STAND_IN_HOST_ID);
        assert_eq!(lobby.players.len(), 2);
    }

    #[test]
    fn test_join_existing_lobby_appends() {
        let mut manager = LobbyManager::new(10);
        let code = manager.create(1, "Host").code.clone();
        let lobby = manager.join(&code, 2, "Guest");

        assert_eq!(lobby.players.len(), 2);
        assert_eq!(lobby.host_id, 1);
        assert!(!lobby.players[1].is_host);
        assert!(lobby.players[1].is_ready);
    }

    #[test]
    fn test_rejoin_does_not_duplicate() {
        let mut manager = LobbyManager::new(10);
        manager.join("ABCDEF", 7, "Ada");
        let lobby = manager.join("ABCDEF", 7, "Ada");
        assert_eq!(lobby.players.len(), 2);
    }

    #[test]
    fn test_join_over_capacity_still_succeeds() {
        let mut manager = LobbyManager::new(2);
        manager.join("ABCDEF", 1, "A");
        let lobby = manager.join("ABCDEF", 2, "B");
        assert_eq!(lobby.players.len(), 3);
        assert!(lobby.is_full());
    }

    #[test]
    fn test_start_and_leave() {
        let mut manager = LobbyManager::new(10);
        assert!(manager.start().is_none());

        manager.create(1, "Host");
        assert!(manager.start().unwrap().game_started);

        let left = manager.leave().unwrap();
        assert!(left.game_started);
        assert!(manager.lobby().is_none());
        assert!(manager.leave().is_none());
    }
}
