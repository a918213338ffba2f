//! Native slither engine library.
//!
//! A local, same-process arena: lobby management, the tick simulation and
//! state publishing, plus the input and leaderboard helpers a renderer needs.

pub mod collision;
pub mod config;
pub mod input;
pub mod leaderboard;
pub mod lobby;
pub mod session;
pub mod simulation;
pub mod world;

// Re-export commonly used types
pub use config::Config;
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use session::{LocalSession, StateHandler, TickStatus};
pub use simulation::{DeathCause, Simulation};

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
