//! Simulation state and entity types
//!
//! Everything `step` reads or writes lives in [`EnvState`]. The observation is
//! derived from it on demand and never stored.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::EnvConfig;

/// The player's vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Top-left corner in track coordinates
    pub pos: Vec2,
    /// Forward speed, clamped to [0, max_speed]; progress is toward y = 0
    pub speed: f32,
    pub size: Vec2,
}

impl Vehicle {
    /// Start position: horizontally centered, `start_offset` above the bottom
    pub fn at_start(config: &EnvConfig) -> Self {
        Self {
            pos: Vec2::new(config.width / 2.0, config.height - config.start_offset),
            speed: 0.0,
            size: Vec2::new(config.vehicle_width, config.vehicle_height),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Lateral move, refused within `edge_margin` of either edge
    pub fn steer(&mut self, dx: f32, config: &EnvConfig) {
        if dx < 0.0 && self.pos.x > config.edge_margin {
            self.pos.x += dx;
        } else if dx > 0.0 && self.pos.x < config.width - self.size.x - config.edge_margin {
            self.pos.x += dx;
        }
    }

    /// Change speed by `delta`, saturating at both ends
    pub fn throttle(&mut self, delta: f32, max_speed: f32) {
        self.speed = (self.speed + delta).clamp(0.0, max_speed);
    }

    /// Move up the track by the current speed
    pub fn advance(&mut self) {
        self.pos.y -= self.speed;
    }
}

/// A falling square obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, y: f32, size: f32) -> Self {
        Self {
            id,
            rect: Rect::new(x, y, size, size),
        }
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.rect.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.rect.pos.y
    }

    pub fn fall(&mut self, dy: f32) {
        self.rect.pos.y += dy;
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct EnvState<R = Pcg32> {
    pub vehicle: Vehicle,
    /// Live obstacles in insertion order
    pub obstacles: Vec<Obstacle>,
    /// Spawn placement source
    pub rng: R,
    /// Next obstacle id
    next_id: u32,
}

impl<R: Rng> EnvState<R> {
    /// Fresh episode state: vehicle at start, obstacle floor spawned
    pub fn new(config: &EnvConfig, rng: R) -> Self {
        let mut state = Self {
            vehicle: Vehicle::at_start(config),
            obstacles: Vec::with_capacity(config.min_obstacles),
            rng,
            next_id: 1,
        };
        state.replenish_obstacles(config);
        state
    }

    /// Put the vehicle back at the start and respawn the obstacle floor.
    /// The RNG keeps its stream so consecutive episodes differ.
    pub fn reset(&mut self, config: &EnvConfig) {
        self.vehicle = Vehicle::at_start(config);
        self.obstacles.clear();
        self.replenish_obstacles(config);
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Spawn one obstacle above the visible frame at a random column
    pub fn spawn_obstacle(&mut self, config: &EnvConfig) {
        let x = self
            .rng
            .random_range(config.spawn_margin_x..=config.width - config.spawn_margin_x);
        let y = self.rng.random_range(config.spawn_y_min..=config.spawn_y_max);
        let id = self.next_entity_id();
        self.obstacles
            .push(Obstacle::new(id, x, y, config.obstacle_size));
    }

    /// Spawn until the live count is back at `min_obstacles`; returns how many were added
    pub fn replenish_obstacles(&mut self, config: &EnvConfig) -> usize {
        let missing = config.min_obstacles.saturating_sub(self.obstacles.len());
        for _ in 0..missing {
            self.spawn_obstacle(config);
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_vehicle_start_position() {
        let vehicle = Vehicle::at_start(&EnvConfig::default());
        assert_eq!(vehicle.pos, Vec2::new(400.0, 500.0));
        assert_eq!(vehicle.speed, 0.0);
        assert_eq!(vehicle.size, Vec2::new(40.0, 60.0));
    }

    #[test]
    fn test_steer_guards() {
        let config = EnvConfig::default();
        let mut vehicle = Vehicle::at_start(&config);

        vehicle.pos.x = 10.0;
        vehicle.steer(-5.0, &config);
        assert_eq!(vehicle.pos.x, 10.0, "at the left guard, left is a no-op");

        vehicle.pos.x = 11.0;
        vehicle.steer(-5.0, &config);
        assert_eq!(vehicle.pos.x, 6.0);

        vehicle.pos.x = 750.0;
        vehicle.steer(5.0, &config);
        assert_eq!(vehicle.pos.x, 750.0, "at the right guard, right is a no-op");

        vehicle.pos.x = 749.0;
        vehicle.steer(5.0, &config);
        assert_eq!(vehicle.pos.x, 754.0);
    }

    #[test]
    fn test_throttle_saturates() {
        let mut vehicle = Vehicle::at_start(&EnvConfig::default());
        vehicle.throttle(-1.0, 8.0);
        assert_eq!(vehicle.speed, 0.0);
        for _ in 0..20 {
            vehicle.throttle(1.0, 8.0);
        }
        assert_eq!(vehicle.speed, 8.0);
    }

    #[test]
    fn test_spawn_within_ranges() {
        let config = EnvConfig::default();
        let mut state = EnvState::new(&config, Pcg32::seed_from_u64(7));
        for _ in 0..200 {
            state.spawn_obstacle(&config);
        }
        for obstacle in &state.obstacles {
            assert!((100.0..=700.0).contains(&obstacle.x()));
            assert!((-300.0..=-50.0).contains(&obstacle.y()));
            assert_eq!(obstacle.rect.size, Vec2::new(30.0, 30.0));
        }
    }

    #[test]
    fn test_new_state_has_obstacle_floor_with_unique_ids() {
        let config = EnvConfig::default();
        let mut state = EnvState::new(&config, Pcg32::seed_from_u64(1));
        assert_eq!(state.obstacles.len(), 3);

        state.obstacles.truncate(1);
        assert_eq!(state.replenish_obstacles(&config), 2);
        assert_eq!(state.obstacles.len(), 3);

        let mut ids: Vec<u32> = state.obstacles.iter().map(|o| o.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_reset_restores_start() {
        let config = EnvConfig::default();
        let mut state = EnvState::new(&config, Pcg32::seed_from_u64(3));
        state.vehicle.pos.y = -20.0;
        state.vehicle.speed = 6.0;
        state.obstacles.clear();

        state.reset(&config);
        assert_eq!(state.vehicle, Vehicle::at_start(&config));
        assert_eq!(state.obstacles.len(), config.min_obstacles);
    }
}
