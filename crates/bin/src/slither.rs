//! Slither - headless local arena demo.
//!
//! Plays the presentation layer: joins or creates a lobby, starts a round,
//! and polls steering input at frame cadence while an autopilot keeps the
//! local snake off the walls. State is logged instead of drawn.

use engine::input::{Key, Steering};
use engine::{Config, Leaderboard, LocalSession};
use glam::Vec2;
use shared::{GameState, StateUpdate, input};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// How far ahead of the head the autopilot looks for walls.
const LOOKAHEAD: f32 = 60.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Native Slither v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    info!("Loaded configuration");
    info!("  Arena: {}x{}", config.arena.width, config.arena.height);
    info!("  Tick interval: {}ms", config.session.tick_interval_ms);
    info!("  Pellets: {}", config.pellet.count);

    let name = input::player_name(&config.demo.player_name)?;
    let session = LocalSession::new(&config);

    session
        .on_state_change(|update: &StateUpdate| {
            if let Some(lobby) = &update.lobby {
                if !update.game_state.game_started {
                    debug!("Lobby {}: {} players", lobby.code, lobby.players.len());
                }
            }
        })
        .await;

    let lobby = match &config.demo.join_code {
        Some(code) => session.join_lobby(&input::join_code(code)?, &name).await,
        None => session.create_lobby(&name).await,
    };
    info!("In lobby {} with {} players", lobby.code, lobby.players.len());
    if let Some(host) = lobby.host() {
        info!("Hosted by {}", host.name);
    }
    for player in &lobby.players {
        let marker = if player.id == session.player_id() { " (you)" } else { "" };
        info!("  {}{}", player.name, marker);
    }

    session.start_game().await;

    let finished = tokio::select! {
        state = run_frames(&session, &config) => Some(state),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            None
        }
    };

    if let Some(state) = finished {
        report(&state, session.player_id());
    }

    session.leave_lobby().await;
    Ok(())
}

/// Poll input once per frame until the round ends.
async fn run_frames(session: &LocalSession, config: &Config) -> GameState {
    let mut frames = interval(Duration::from_millis(config.demo.frame_interval_ms.max(1)));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let updates = session.subscribe().await;
    let mut steering = Steering::new();

    loop {
        frames.tick().await;
        let update = updates.borrow().clone();
        if update.game_state.game_ended {
            return update.game_state;
        }

        autopilot(&update, config, &mut steering);
        if let Some(direction) = steering.poll(&update, config.snake.turn_speed) {
            session.update_player_direction(direction).await;
        }
    }
}

/// Hold "right" while the point ahead of the head is close to a wall.
fn autopilot(update: &StateUpdate, config: &Config, steering: &mut Steering) {
    steering.clear();
    let Some(snake) = update.own_snake().filter(|s| s.is_alive) else {
        return;
    };

    let ahead = snake.head() + Vec2::from_angle(snake.direction) * LOOKAHEAD;
    let margin = config.snake.segment_radius * 2.0;
    let inside = ahead.x > margin
        && ahead.x < config.arena.width - margin
        && ahead.y > margin
        && ahead.y < config.arena.height - margin;
    if !inside {
        steering.press(Key::Right);
    }
}

fn report(state: &GameState, player_id: shared::PlayerId) {
    let board = Leaderboard::from_state(state);
    match &board.winner {
        Some(name) => info!("{} wins!", name),
        None => info!("No survivors"),
    }
    info!("Final leaderboard:");
    for (rank, entry) in board.entries.iter().enumerate() {
        let marker = if entry.player_id == player_id { " (you)" } else { "" };
        info!("  #{} {}{}: {}", rank + 1, entry.name, marker, entry.score);
    }
}
