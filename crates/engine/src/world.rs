//! Arena bounds, id allocation and pellet spawning.

use crate::config::PelletConfig;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{EntityId, PELLET_COLORS, Pellet, Position};

/// Arena bounds. The arena spans `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy)]
pub struct ArenaBorder {
    pub width: f32,
    pub height: f32,
}

impl ArenaBorder {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `pos` lies inside the arena (edges included).
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Get a random position at least `margin` away from every edge.
    #[inline]
    pub fn random_position(&self, margin: f32, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            rng.random::<f32>() * (self.width - margin * 2.0) + margin,
            rng.random::<f32>() * (self.height - margin * 2.0) + margin,
        )
    }
}

/// Entity bookkeeping shared by every round of a simulation.
#[derive(Debug)]
pub struct World {
    /// Next entity ID to assign.
    next_entity_id: EntityId,

    pub border: ArenaBorder,

    rng: StdRng,
}

impl World {
    /// Create a world seeded from the OS entropy source.
    pub fn new(border: ArenaBorder) -> Self {
        Self::with_rng(border, StdRng::from_os_rng())
    }

    /// Create a world with a deterministic RNG.
    pub fn with_seed(border: ArenaBorder, seed: u64) -> Self {
        Self::with_rng(border, StdRng::seed_from_u64(seed))
    }

    fn with_rng(border: ArenaBorder, rng: StdRng) -> Self {
        Self {
            next_entity_id: 1,
            border,
            rng,
        }
    }

    /// Get the next entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id = self.next_entity_id.wrapping_add(1);
        if self.next_entity_id == 0 {
            self.next_entity_id = 1; // Skip 0
        }
        id
    }

    /// Create a pellet at a random inset position with a random palette color.
    pub fn random_pellet(&mut self, config: &PelletConfig) -> Pellet {
        let id = self.next_id();
        let position = self.border.random_position(config.spawn_margin(), &mut self.rng);
        let color = PELLET_COLORS[self.rng.random_range(0..PELLET_COLORS.len())];
        Pellet {
            id,
            position,
            color,
            value: config.value,
        }
    }

    /// Top `pellets` up to the configured count. Returns how many were spawned.
    pub fn spawn_pellets(&mut self, pellets: &mut Vec<Pellet>, config: &PelletConfig) -> usize {
        let missing = config.count.saturating_sub(pellets.len());
        pellets.reserve(missing);
        for _ in 0..missing {
            pellets.push(self.random_pellet(config));
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_contains_edges() {
        let border = ArenaBorder::new(1200.0, 800.0);
        assert!(border.contains(Vec2::new(0.0, 0.0)));
        assert!(border.contains(Vec2::new(1200.0, 800.0)));
        assert!(!border.contains(Vec2::new(1200.5, 400.0)));
        assert!(!border.contains(Vec2::new(600.0, -0.1)));
    }

    #[test]
    fn test_random_pellets_are_inset() {
        let mut world = World::with_seed(ArenaBorder::new(1200.0, 800.0), 7);
        let config = PelletConfig::default();
        let margin = config.spawn_margin();

        for _ in 0..500 {
            let pellet = world.random_pellet(&config);
            assert!(pellet.position.x >= margin && pellet.position.x <= 1200.0 - margin);
            assert!(pellet.position.y >= margin && pellet.position.y <= 800.0 - margin);
            assert!(PELLET_COLORS.contains(&pellet.color));
            assert_eq!(pellet.value, 1);
        }
    }

    #[test]
    fn test_spawn_pellets_tops_up() {
        let mut world = World::with_seed(ArenaBorder::new(1200.0, 800.0), 1);
        let config = PelletConfig::default();
        let mut pellets = Vec::new();

        assert_eq!(world.spawn_pellets(&mut pellets, &config), 50);
        pellets.truncate(47);
        assert_eq!(world.spawn_pellets(&mut pellets, &config), 3);
        assert_eq!(pellets.len(), 50);
        assert_eq!(world.spawn_pellets(&mut pellets, &config), 0);
    }

    #[test]
    fn test_ids_are_unique_and_nonzero() {
        let mut world = World::with_seed(ArenaBorder::new(10.0, 10.0), 0);
        let a = world.next_id();
        let b = world.next_id();
        assert_ne!(a, 0);
        assert_ne!(a, b);
    }
}
