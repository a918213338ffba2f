//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
    #[serde(default)]
    pub snake: SnakeConfig,
    #[serde(default)]
    pub pellet: PelletConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

impl Config {
    /// Load configuration from `config.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("config.toml"))
    }

    /// Load configuration from `path`, writing the defaults there if it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            Ok(config.sanitized())
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }

    /// Clamp values the simulation cannot run with.
    pub fn sanitized(mut self) -> Self {
        if self.snake.initial_length == 0 {
            warn!("snake.initial_length must be at least 1, using 1");
            self.snake.initial_length = 1;
        }
        self
    }
}

/// Session and lobby settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Tick interval in milliseconds (33 = ~30 ticks per second).
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Lobby capacity.
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            max_players: default_max_players(),
        }
    }
}

fn default_tick_interval() -> u64 {
    1000 / 30
}
fn default_max_players() -> usize {
    10
}

/// Arena bounds. The arena spans `[0, width] x [0, height]`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArenaConfig {
    #[serde(default = "default_arena_width")]
    pub width: f32,
    #[serde(default = "default_arena_height")]
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: default_arena_width(),
            height: default_arena_height(),
        }
    }
}

fn default_arena_width() -> f32 {
    1200.0
}
fn default_arena_height() -> f32 {
    800.0
}

/// Snake configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SnakeConfig {
    /// Collision radius of a segment.
    #[serde(default = "default_segment_radius")]
    pub segment_radius: f32,
    /// Distance travelled per tick.
    #[serde(default = "default_snake_speed")]
    pub speed: f32,
    /// Heading change per frame while a turn key is held (radians).
    #[serde(default = "default_turn_speed")]
    pub turn_speed: f32,
    #[serde(default = "default_initial_length")]
    pub initial_length: usize,
    /// Spacing of the initial segments.
    #[serde(default = "default_segment_spacing")]
    pub segment_spacing: f32,
    /// Distance of spawn points from the arena center.
    #[serde(default = "default_spawn_radius")]
    pub spawn_radius: f32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            segment_radius: default_segment_radius(),
            speed: default_snake_speed(),
            turn_speed: default_turn_speed(),
            initial_length: default_initial_length(),
            segment_spacing: default_segment_spacing(),
            spawn_radius: default_spawn_radius(),
        }
    }
}

fn default_segment_radius() -> f32 {
    8.0
}
fn default_snake_speed() -> f32 {
    2.0
}
fn default_turn_speed() -> f32 {
    0.05
}
fn default_initial_length() -> usize {
    3
}
fn default_segment_spacing() -> f32 {
    10.0
}
fn default_spawn_radius() -> f32 {
    100.0
}

/// Pellet configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PelletConfig {
    #[serde(default = "default_pellet_radius")]
    pub radius: f32,
    /// Number of pellets kept in the arena.
    #[serde(default = "default_pellet_count")]
    pub count: usize,
    /// Score awarded per pellet.
    #[serde(default = "default_pellet_value")]
    pub value: u32,
    /// Extra inset from the arena edges on top of the pellet radius.
    #[serde(default = "default_spawn_padding")]
    pub spawn_padding: f32,
}

impl PelletConfig {
    /// Minimum distance between a spawned pellet and any arena edge.
    #[inline]
    pub fn spawn_margin(&self) -> f32 {
        self.radius + self.spawn_padding
    }
}

impl Default for PelletConfig {
    fn default() -> Self {
        Self {
            radius: default_pellet_radius(),
            count: default_pellet_count(),
            value: default_pellet_value(),
            spawn_padding: default_spawn_padding(),
        }
    }
}

fn default_pellet_radius() -> f32 {
    6.0
}
fn default_pellet_count() -> usize {
    50
}
fn default_pellet_value() -> u32 {
    1
}
fn default_spawn_padding() -> f32 {
    14.0
}

/// Settings for the headless demo binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Join this code instead of creating a lobby.
    #[serde(default)]
    pub join_code: Option<String>,
    /// Render/input polling interval in milliseconds.
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            join_code: Some(default_join_code()),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

fn default_player_name() -> String {
    "Player".to_string()
}
fn default_join_code() -> String {
    "DEMOXX".to_string()
}
fn default_frame_interval() -> u64 {
    16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [arena]
            width = 600.0

            [pellet]
            count = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.arena.width, 600.0);
        assert_eq!(config.arena.height, 800.0);
        assert_eq!(config.pellet.count, 5);
        assert_eq!(config.pellet.radius, 6.0);
        assert_eq!(config.snake.initial_length, 3);
        assert_eq!(config.session.tick_interval_ms, 33);
    }

    #[test]
    fn test_zero_initial_length_is_clamped() {
        let config: Config = toml::from_str("[snake]\ninitial_length = 0\n").unwrap();
        assert_eq!(config.sanitized().snake.initial_length, 1);

        let path = std::env::temp_dir().join(format!("slither-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[snake]\ninitial_length = 0\n").unwrap();
        let loaded = Config::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.snake.initial_length, 1);
    }

    #[test]
    fn test_spawn_margin() {
        let pellet = PelletConfig::default();
        assert_eq!(pellet.spawn_margin(), 20.0);
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let config: Config = toml::from_str(&text).unwrap();
        assert_eq!(config.session.max_players, 10);
        assert_eq!(config.demo.join_code.as_deref(), Some("DEMOXX"));
    }
}
