//! Observation encoding
//!
//! A fixed four-component view of the vehicle and its nearest obstacle,
//! normalized by the track size. Recomputed on demand, never stored.

use serde::{Deserialize, Serialize};

use super::state::{Obstacle, Vehicle};
use crate::config::EnvConfig;

/// Number of components in an observation vector
pub const OBSERVATION_LEN: usize = 4;

/// Distance component when no obstacle is live
pub const NO_OBSTACLE_DISTANCE: f32 = 1.0;
/// Obstacle-x component when no obstacle is live (track center)
pub const NO_OBSTACLE_X: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// vehicle.x / width
    pub car_x: f32,
    /// vehicle.y / height
    pub car_y: f32,
    /// |obstacle.y - vehicle.y| / height for the nearest obstacle
    pub obstacle_distance: f32,
    /// obstacle.x / width for that same obstacle
    pub obstacle_x: f32,
}

impl Observation {
    pub fn to_array(&self) -> [f32; OBSERVATION_LEN] {
        [self.car_x, self.car_y, self.obstacle_distance, self.obstacle_x]
    }

    pub fn to_vec(&self) -> Vec<f32> {
        self.to_array().to_vec()
    }
}

impl From<Observation> for [f32; OBSERVATION_LEN] {
    fn from(obs: Observation) -> Self {
        obs.to_array()
    }
}

/// Nearest obstacle by absolute vertical distance to the vehicle.
///
/// Ahead and behind count alike. Ties go to the earliest obstacle in the set.
pub fn nearest_obstacle<'a>(vehicle: &Vehicle, obstacles: &'a [Obstacle]) -> Option<&'a Obstacle> {
    let mut best: Option<(&Obstacle, f32)> = None;
    for obstacle in obstacles {
        let distance = (obstacle.y() - vehicle.pos.y).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((obstacle, distance)),
        }
    }
    best.map(|(obstacle, _)| obstacle)
}

/// Encode the current state
pub fn observe(vehicle: &Vehicle, obstacles: &[Obstacle], config: &EnvConfig) -> Observation {
    let (obstacle_distance, obstacle_x) = match nearest_obstacle(vehicle, obstacles) {
        Some(obstacle) => (
            (obstacle.y() - vehicle.pos.y).abs() / config.height,
            obstacle.x() / config.width,
        ),
        None => (NO_OBSTACLE_DISTANCE, NO_OBSTACLE_X),
    };

    Observation {
        car_x: vehicle.pos.x / config.width,
        car_y: vehicle.pos.y / config.height,
        obstacle_distance,
        obstacle_x,
    }
}
