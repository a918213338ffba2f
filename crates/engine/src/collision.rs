//! Collision detection.
//!
//! All collisions in the arena are circle tests against a distance
//! threshold:
//! - Head vs segment: threshold is the segment radius
//! - Head vs pellet: threshold is segment radius + pellet radius

use glam::Vec2;

/// Result of checking the distance between two points.
#[derive(Debug)]
pub struct CollisionResult {
    /// Distance below which the points collide.
    pub r: f32,
    /// Distance X component
    pub dx: f32,
    /// Distance Y component
    pub dy: f32,
    /// Actual distance
    pub d: f32,
}

impl CollisionResult {
    /// Check if the points are actually colliding.
    #[inline]
    pub fn is_colliding(&self) -> bool {
        self.d < self.r
    }
}

/// Check two points against a collision threshold.
#[inline]
pub fn check_collision(pos: Vec2, check_pos: Vec2, threshold: f32) -> CollisionResult {
    let dx = check_pos.x - pos.x;
    let dy = check_pos.y - pos.y;

    CollisionResult {
        r: threshold,
        dx,
        dy,
        d: (dx * dx + dy * dy).sqrt(),
    }
}

/// Check two circles for overlap (threshold is the sum of the radii).
#[inline]
pub fn check_circle_collision(pos: Vec2, radius: f32, check_pos: Vec2, check_radius: f32) -> CollisionResult {
    check_collision(pos, check_pos, radius + check_radius)
}

/// Whether `head` hits any of `segments`.
#[inline]
pub fn hits_any(head: Vec2, segments: &[Vec2], threshold: f32) -> bool {
    segments
        .iter()
        .any(|&segment| check_collision(head, segment, threshold).is_colliding())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_check() {
        let result = check_circle_collision(Vec2::new(0.0, 0.0), 8.0, Vec2::new(10.0, 0.0), 6.0);

        assert!(result.is_colliding()); // 8 + 6 = 14, distance = 10
        assert_eq!(result.d, 10.0);
    }

    #[test]
    fn test_no_collision() {
        let result = check_circle_collision(Vec2::new(0.0, 0.0), 8.0, Vec2::new(100.0, 0.0), 6.0);

        assert!(!result.is_colliding()); // 8 + 6 = 14, distance = 100
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let result = check_collision(Vec2::new(0.0, 0.0), Vec2::new(0.0, 8.0), 8.0);
        assert_eq!(result.dy, 8.0);
        assert!(!result.is_colliding());
    }

    #[test]
    fn test_hits_any() {
        let body = [Vec2::new(50.0, 50.0), Vec2::new(40.0, 50.0), Vec2::new(30.0, 50.0)];
        assert!(hits_any(Vec2::new(35.0, 52.0), &body, 8.0));
        assert!(!hits_any(Vec2::new(60.0, 60.0), &body, 8.0));
        assert!(!hits_any(Vec2::new(0.0, 0.0), &[], 8.0));
    }
}
