//! Discrete state transition
//!
//! One call to [`tick`] applies exactly one action and advances the world by
//! one step, in a fixed order:
//! 1. apply the action
//! 2. advance the vehicle by its speed
//! 3. drop every obstacle by the fall speed
//! 4. recycle obstacles past the bottom and restore the floor
//! 5. test vehicle/obstacle overlap
//! 6. score the step

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::first_collision;
use super::state::EnvState;
use crate::config::EnvConfig;
use crate::error::EnvError;

/// Discrete action space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left = 0,
    Right = 1,
    Accelerate = 2,
    Brake = 3,
}

impl Action {
    pub const COUNT: usize = 4;
    pub const ALL: [Action; Action::COUNT] =
        [Action::Left, Action::Right, Action::Accelerate, Action::Brake];

    /// Integer encoding (0..=3)
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<i64> for Action {
    type Error = EnvError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Action::Left),
            1 => Ok(Action::Right),
            2 => Ok(Action::Accelerate),
            3 => Ok(Action::Brake),
            other => Err(EnvError::InvalidAction(other)),
        }
    }
}

/// Result of a single transition, before observation encoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub reward: f32,
    pub done: bool,
    /// The step ended on an obstacle overlap
    pub collision: bool,
    /// Obstacles removed past the bottom edge this step
    pub recycled: usize,
}

/// Advance the state by one step under `action`
pub fn tick<R: Rng>(state: &mut EnvState<R>, config: &EnvConfig, action: Action) -> StepOutcome {
    // Exactly one action per step; lateral moves never touch speed
    match action {
        Action::Left => state.vehicle.steer(-config.lateral_step, config),
        Action::Right => state.vehicle.steer(config.lateral_step, config),
        Action::Accelerate => state.vehicle.throttle(config.acceleration, config.max_speed),
        Action::Brake => state.vehicle.throttle(-config.acceleration, config.max_speed),
    }

    state.vehicle.advance();

    for obstacle in &mut state.obstacles {
        obstacle.fall(config.obstacle_fall_speed);
    }

    let recycled = recycle_obstacles(state, config);

    let hit = first_collision(&state.vehicle.rect(), &state.obstacles);
    if let Some(id) = hit {
        log::debug!(
            "Vehicle at ({:.1}, {:.1}) hit obstacle {}",
            state.vehicle.pos.x,
            state.vehicle.pos.y,
            id
        );
    }
    let collision = hit.is_some();

    let reward = if collision {
        config.collision_reward
    } else {
        config.survival_reward
    };
    let done = collision || state.vehicle.pos.y < 0.0;

    StepOutcome {
        reward,
        done,
        collision,
        recycled,
    }
}

/// Drop obstacles at or past the bottom edge, then restore the floor.
/// Returns how many were removed.
pub fn recycle_obstacles<R: Rng>(state: &mut EnvState<R>, config: &EnvConfig) -> usize {
    let before = state.obstacles.len();
    state.obstacles.retain(|o| o.y() < config.height);
    let removed = before - state.obstacles.len();

    let spawned = state.replenish_obstacles(config);
    if removed > 0 {
        log::debug!("Recycled {} obstacles, spawned {}", removed, spawned);
    }
    removed
}
