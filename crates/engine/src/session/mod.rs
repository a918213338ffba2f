//! Local game session.
//!
//! [`LocalSession`] is the same-process stand-in for a game server: it owns
//! the lobby, the simulation and the tick timer for one local player, and
//! publishes a [`StateUpdate`] after every state-affecting call.

use crate::config::Config;
use crate::lobby::LobbyManager;
use crate::simulation::Simulation;
use rand::Rng;
use shared::{GameState, Lobby, PlayerId, StateUpdate};
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub mod publisher;
pub mod tick;

pub use publisher::{StateHandler, StatePublisher};
pub use tick::run_tick_loop;

/// Outcome of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    /// The round continues.
    Running,
    /// The round ended on this tick.
    Ended,
    /// The timer belongs to a round that was left or replaced.
    Stale,
}

/// Everything a session mutates, guarded by one lock.
pub struct SessionState {
    player_id: PlayerId,
    lobby: LobbyManager,
    pub(crate) simulation: Simulation,
    publisher: StatePublisher,
    /// Bumped on every start and leave so stale timers can tell.
    round: u64,
    pub(crate) tick_task: Option<JoinHandle<()>>,
}

impl SessionState {
    fn new(player_id: PlayerId, config: &Config, simulation: Simulation) -> Self {
        let initial = StateUpdate {
            lobby: None,
            game_state: simulation.state().clone(),
            player_id,
        };
        Self {
            player_id,
            lobby: LobbyManager::new(config.session.max_players),
            simulation,
            publisher: StatePublisher::new(initial),
            round: 0,
            tick_task: None,
        }
    }

    fn snapshot(&self) -> StateUpdate {
        StateUpdate {
            lobby: self.lobby.lobby().cloned(),
            game_state: self.simulation.state().clone(),
            player_id: self.player_id,
        }
    }

    fn publish(&self) {
        self.publisher.publish(self.snapshot());
    }

    fn stop_timer(&mut self) {
        if let Some(task) = self.tick_task.take() {
            task.abort();
            debug!("Stopped tick loop for round {}", self.round);
        }
    }

    /// Run one tick of `round` and publish the result.
    pub(crate) fn advance(&mut self, round: u64) -> TickStatus {
        if round != self.round || !self.simulation.state().is_running() {
            return TickStatus::Stale;
        }

        self.simulation.tick();
        self.publish();

        if self.simulation.state().game_ended {
            TickStatus::Ended
        } else {
            TickStatus::Running
        }
    }
}

/// Handle to a local session. Clones share the same session.
#[derive(Clone)]
pub struct LocalSession {
    state: Arc<RwLock<SessionState>>,
    player_id: PlayerId,
    tick_interval_ms: u64,
}

impl LocalSession {
    /// Create a session for a freshly generated local player id.
    pub fn new(config: &Config) -> Self {
        let player_id = rand::rng().random_range(1..=PlayerId::MAX);
        Self::with_simulation(config, player_id, Simulation::new(config))
    }

    /// Create a session with a fixed player id and a deterministic simulation.
    pub fn with_seed(config: &Config, player_id: PlayerId, seed: u64) -> Self {
        Self::with_simulation(config, player_id, Simulation::with_seed(config, seed))
    }

    fn with_simulation(config: &Config, player_id: PlayerId, simulation: Simulation) -> Self {
        info!("Session created for player {}", player_id);
        Self {
            state: Arc::new(RwLock::new(SessionState::new(player_id, config, simulation))),
            player_id,
            tick_interval_ms: config.session.tick_interval_ms,
        }
    }

    /// The local player's id.
    #[inline]
    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    /// Register a handler called with every published snapshot.
    ///
    /// The handler runs while the session is locked; it must not call back
    /// into the session. Use [`LocalSession::subscribe`] to react to state
    /// from another task instead.
    pub async fn on_state_change<F>(&self, handler: F)
    where
        F: Fn(&StateUpdate) + Send + Sync + 'static,
    {
        self.state.write().await.publisher.on_state_change(Box::new(handler));
    }

    /// Receiver that always holds the latest published snapshot.
    pub async fn subscribe(&self) -> watch::Receiver<StateUpdate> {
        self.state.read().await.publisher.subscribe()
    }

    /// Current state, read on demand.
    pub async fn snapshot(&self) -> StateUpdate {
        self.state.read().await.snapshot()
    }

    /// Create a lobby hosted by the local player.
    pub async fn create_lobby(&self, name: &str) -> Lobby {
        let mut guard = self.state.write().await;
        let session = &mut *guard;
        let lobby = session.lobby.create(session.player_id, name).clone();
        session.publish();
        lobby
    }

    /// Join the lobby with `code`, fabricating it if it is not known.
    pub async fn join_lobby(&self, code: &str, name: &str) -> Lobby {
        let mut guard = self.state.write().await;
        let session = &mut *guard;
        let lobby = session.lobby.join(code, session.player_id, name).clone();
        session.publish();
        lobby
    }

    /// Start a round with the lobby's players and begin ticking.
    ///
    /// Without a lobby this does nothing and returns the current state.
    pub async fn start_game(&self) -> GameState {
        let mut guard = self.state.write().await;
        let session = &mut *guard;

        let players = match session.lobby.start() {
            Some(lobby) => lobby.players.clone(),
            None => {
                debug!("start_game called without a lobby");
                return session.simulation.state().clone();
            }
        };

        session.stop_timer();
        session.round += 1;
        let game = session.simulation.initialize(&players).clone();
        session.publish();

        let round = session.round;
        session.tick_task = Some(tokio::spawn(run_tick_loop(
            Arc::clone(&self.state),
            round,
            self.tick_interval_ms,
        )));
        info!("Round {} started with {} players", round, players.len());

        game
    }

    /// Leave the lobby, discarding it and any round in progress.
    pub async fn leave_lobby(&self) {
        let mut session = self.state.write().await;
        session.stop_timer();
        session.round += 1;
        session.lobby.leave();
        session.simulation.reset();
        session.publish();
    }

    /// Point the local player's snake at `angle` (radians).
    pub async fn update_player_direction(&self, angle: f32) {
        let mut session = self.state.write().await;
        let player_id = session.player_id;
        if !session.simulation.set_direction(player_id, angle) {
            debug!("Ignoring direction for player {} without a live snake", player_id);
        }
    }

    /// Whether a tick loop is currently attached to the session.
    pub async fn is_ticking(&self) -> bool {
        self.state
            .read()
            .await
            .tick_task
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}
