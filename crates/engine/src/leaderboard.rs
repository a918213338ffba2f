//! Round leaderboard.

use shared::{GameState, PlayerId};

/// A leaderboard entry.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub player_id: PlayerId,
    pub name: String,
    pub score: u32,
    pub is_alive: bool,
}

/// Standings for one round.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Leaderboard {
    /// Highest score first; ties keep spawn order.
    pub entries: Vec<LeaderboardEntry>,
    pub alive: usize,
    /// Winner's display name once the round has ended with a survivor.
    pub winner: Option<String>,
}

impl Leaderboard {
    pub fn from_state(state: &GameState) -> Self {
        let mut entries: Vec<LeaderboardEntry> = state
            .snakes
            .iter()
            .map(|snake| LeaderboardEntry {
                player_id: snake.player_id,
                name: snake.player_name.clone(),
                score: snake.score,
                is_alive: snake.is_alive,
            })
            .collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));

        let winner = state
            .winner
            .filter(|_| state.game_ended)
            .and_then(|id| state.snake_of(id))
            .map(|snake| snake.player_name.clone());

        Self {
            entries,
            alive: state.alive_count(),
            winner,
        }
    }

    /// Rank (1-based) of `player_id`.
    pub fn rank_of(&self, player_id: PlayerId) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.player_id == player_id)
            .map(|i| i + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Snake, snake_color};

    fn snake(player_id: PlayerId, name: &str, score: u32, is_alive: bool) -> Snake {
        Snake {
            id: player_id + 100,
            player_id,
            player_name: name.to_string(),
            segments: vec![glam::Vec2::ZERO],
            direction: 0.0,
            color: snake_color(player_id as usize),
            is_alive,
            score,
        }
    }

    #[test]
    fn test_sorted_by_score() {
        let state = GameState {
            snakes: vec![
                snake(1, "a", 3, false),
                snake(2, "b", 7, true),
                snake(3, "c", 3, true),
            ],
            game_started: true,
            ..GameState::default()
        };
        let board = Leaderboard::from_state(&state);

        let names: Vec<&str> = board.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
        assert_eq!(board.alive, 2);
        assert_eq!(board.winner, None);
        assert_eq!(board.rank_of(3), Some(3));
        assert_eq!(board.rank_of(9), None);
    }

    #[test]
    fn test_winner_name_after_end() {
        let state = GameState {
            snakes: vec![snake(1, "a", 5, false), snake(2, "b", 4, true)],
            game_started: true,
            game_ended: true,
            winner: Some(2),
            ..GameState::default()
        };
        let board = Leaderboard::from_state(&state);
        assert_eq!(board.winner.as_deref(), Some("b"));
        assert_eq!(board.entries[0].name, "a");
    }
}
