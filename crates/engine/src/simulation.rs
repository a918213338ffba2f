//! Authoritative round simulation.
//!
//! A [`Simulation`] owns the [`GameState`] of the current round and advances
//! it one tick at a time:
//! - Move every live snake's head along its heading
//! - Kill snakes that leave the arena or hit a body
//! - Eat pellets (the snake keeps its tail for one tick per pellet)
//! - Replenish pellets and evaluate the win condition
//!
//! Body collisions are judged against the positions bodies had at the start
//! of the tick, never against heads already advanced this tick. A snake that
//! died earlier in the same tick no longer blocks anyone, so when two heads
//! meet only the first one stepped dies.

use crate::collision::{check_circle_collision, hits_any};
use crate::config::Config;
use crate::now_millis;
use crate::world::{ArenaBorder, World};
use glam::Vec2;
use shared::{GameState, Player, PlayerId, Position, Snake, snake_color};
use std::f32::consts::TAU;
use tracing::{debug, info};

/// Why a snake died.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeathCause {
    /// Head left the arena.
    Border,
    /// Head hit the body of the snake owned by this player.
    Snake(PlayerId),
    /// Head hit its own body.
    SelfCollision,
}

/// What happened to one snake during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    Died(DeathCause),
    Moved,
    Ate { value: u32 },
}

/// The tick simulation for one session.
#[derive(Debug)]
pub struct Simulation {
    config: Config,
    world: World,
    state: GameState,
    tick_count: u64,
}

impl Simulation {
    /// Create an idle simulation (no round in progress).
    pub fn new(config: &Config) -> Self {
        Self::with_world(config, World::new(Self::border(config)))
    }

    /// Create an idle simulation with a deterministic RNG.
    pub fn with_seed(config: &Config, seed: u64) -> Self {
        Self::with_world(config, World::with_seed(Self::border(config), seed))
    }

    fn with_world(config: &Config, world: World) -> Self {
        Self {
            config: config.clone(),
            world,
            state: GameState::empty(now_millis()),
            tick_count: 0,
        }
    }

    fn border(config: &Config) -> ArenaBorder {
        ArenaBorder::new(config.arena.width, config.arena.height)
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks advanced in the current round.
    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Discard the current round.
    pub fn reset(&mut self) {
        self.state = GameState::empty(now_millis());
        self.tick_count = 0;
    }

    /// Start a new round for `players`.
    ///
    /// Snake `i` of `n` spawns on a circle around the arena center at angle
    /// `i / n * 2π`, heading outward, with its initial segments laid out
    /// behind the head.
    pub fn initialize(&mut self, players: &[Player]) -> &GameState {
        let snake_cfg = &self.config.snake;
        let center = self.world.border.center();
        let count = players.len();

        let mut snakes = Vec::with_capacity(count);
        for (index, player) in players.iter().enumerate() {
            let angle = index as f32 / count as f32 * TAU;
            let dir = Vec2::from_angle(angle);
            let head = center + dir * snake_cfg.spawn_radius;
            let segments = (0..snake_cfg.initial_length.max(1))
                .map(|k| head - dir * (snake_cfg.segment_spacing * k as f32))
                .collect();

            snakes.push(Snake {
                id: self.world.next_id(),
                player_id: player.id,
                player_name: player.name.clone(),
                segments,
                direction: angle,
                color: snake_color(index),
                is_alive: true,
                score: snake_cfg.initial_length.max(1) as u32,
            });
        }

        let mut pellets = Vec::with_capacity(self.config.pellet.count);
        self.world.spawn_pellets(&mut pellets, &self.config.pellet);

        self.state = GameState {
            snakes,
            pellets,
            game_started: true,
            game_ended: false,
            winner: None,
            timestamp: now_millis(),
        };
        self.tick_count = 0;

        debug!(
            "Round initialized: {} snakes, {} pellets",
            self.state.snakes.len(),
            self.state.pellets.len()
        );
        &self.state
    }

    /// Store a new heading for `player_id`'s snake.
    ///
    /// Any angle is accepted; turn-rate limits belong to the input layer.
    /// Returns false if the player has no live snake.
    pub fn set_direction(&mut self, player_id: PlayerId, angle: f32) -> bool {
        match self
            .state
            .snakes
            .iter_mut()
            .find(|s| s.player_id == player_id && s.is_alive)
        {
            Some(snake) => {
                snake.direction = angle;
                true
            }
            None => false,
        }
    }

    /// Advance the round by one tick. Does nothing unless a round is running.
    pub fn tick(&mut self) -> &GameState {
        if !self.state.is_running() {
            return &self.state;
        }
        self.tick_count += 1;

        // Start-of-tick bodies; `None` for snakes that were already dead.
        let bodies: Vec<Option<Vec<Position>>> = self
            .state
            .snakes
            .iter()
            .map(|s| s.is_alive.then(|| s.segments.clone()))
            .collect();

        let mut eaten = 0usize;
        for index in 0..self.state.snakes.len() {
            if bodies[index].is_none() {
                continue;
            }
            match self.step_snake(index, &bodies) {
                Step::Died(cause) => {
                    let snake = &mut self.state.snakes[index];
                    snake.is_alive = false;
                    info!(
                        "Snake {} ({}) died: {:?} (score {})",
                        snake.id, snake.player_name, cause, snake.score
                    );
                }
                Step::Ate { value } => {
                    eaten += 1;
                    debug!("Snake {} ate a pellet worth {}", self.state.snakes[index].id, value);
                }
                Step::Moved => {}
            }
        }

        self.world.spawn_pellets(&mut self.state.pellets, &self.config.pellet);
        self.check_win();
        self.state.timestamp = now_millis();

        if self.tick_count % 300 == 0 {
            debug!(
                "Tick #{}: {} alive, {} pellets, {} eaten this tick",
                self.tick_count,
                self.state.alive_count(),
                self.state.pellets.len(),
                eaten
            );
        }

        &self.state
    }

    /// Move one snake, testing its new head against start-of-tick bodies.
    fn step_snake(&mut self, index: usize, bodies: &[Option<Vec<Position>>]) -> Step {
        let segment_radius = self.config.snake.segment_radius;
        let snake = &self.state.snakes[index];
        let new_head = snake.head() + Vec2::from_angle(snake.direction) * self.config.snake.speed;

        if !self.world.border.contains(new_head) {
            return Step::Died(DeathCause::Border);
        }

        for (other, body) in bodies.iter().enumerate() {
            if other == index || !self.state.snakes[other].is_alive {
                continue;
            }
            if let Some(body) = body {
                if hits_any(new_head, body, segment_radius) {
                    return Step::Died(DeathCause::Snake(self.state.snakes[other].player_id));
                }
            }
        }

        // The current head is exempt; everything behind it counts.
        if let Some(own) = &bodies[index] {
            if hits_any(new_head, own.get(1..).unwrap_or_default(), segment_radius) {
                return Step::Died(DeathCause::SelfCollision);
            }
        }

        let pellet_radius = self.config.pellet.radius;
        let hit = self.state.pellets.iter().position(|pellet| {
            check_circle_collision(new_head, segment_radius, pellet.position, pellet_radius).is_colliding()
        });
        let value = hit.map(|i| self.state.pellets.remove(i).value);

        let snake = &mut self.state.snakes[index];
        snake.segments.insert(0, new_head);
        match value {
            Some(value) => {
                snake.score += value;
                Step::Ate { value }
            }
            None => {
                snake.segments.pop();
                Step::Moved
            }
        }
    }

    /// End the round once at most one snake is alive.
    fn check_win(&mut self) {
        let mut alive = self.state.snakes.iter().filter(|s| s.is_alive);
        let first = alive.next();
        if alive.next().is_some() {
            return;
        }

        self.state.game_ended = true;
        self.state.winner = first.map(|s| s.player_id);

        match first {
            Some(snake) => info!(
                "Round over after {} ticks: {} wins with score {}",
                self.tick_count, snake.player_name, snake.score
            ),
            None => info!("Round over after {} ticks: no survivors", self.tick_count),
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
