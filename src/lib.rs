//! Track Runner - a scrolling-track driving environment
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vehicle, obstacles, collisions, observations)
//! - `config`: Environment configuration with validation and JSON loading
//! - `stats`: Episode accounting for driving loops
//! - `error`: Crate error type

pub mod config;
pub mod error;
pub mod sim;
pub mod stats;

pub use config::EnvConfig;
pub use error::{EnvError, Result};
pub use sim::{Action, Environment, Observation, StepOutcome};
pub use stats::{EpisodeOutcome, EpisodeStats, EpisodeTracker, RunSummary};

/// Default environment constants
pub mod consts {
    /// Track dimensions
    pub const TRACK_WIDTH: f32 = 800.0;
    pub const TRACK_HEIGHT: f32 = 600.0;

    /// Vehicle defaults
    pub const VEHICLE_WIDTH: f32 = 40.0;
    pub const VEHICLE_HEIGHT: f32 = 60.0;
    /// Vehicle starts this far above the bottom edge
    pub const VEHICLE_START_OFFSET: f32 = 100.0;
    pub const MAX_SPEED: f32 = 8.0;
    /// Speed change per Accelerate/Brake action
    pub const ACCELERATION: f32 = 1.0;
    /// Horizontal move per Left/Right action
    pub const LATERAL_STEP: f32 = 5.0;
    /// Lateral moves are refused this close to the track edges
    pub const EDGE_MARGIN: f32 = 10.0;

    /// Obstacle defaults (square)
    pub const OBSTACLE_SIZE: f32 = 30.0;
    pub const MIN_OBSTACLES: usize = 3;
    /// Constant descent per step, independent of vehicle speed
    pub const OBSTACLE_FALL_SPEED: f32 = 3.0;
    /// Spawn x range is [margin, width - margin]
    pub const SPAWN_MARGIN_X: f32 = 100.0;
    /// Spawn y range, above the visible frame
    pub const SPAWN_Y_MIN: f32 = -300.0;
    pub const SPAWN_Y_MAX: f32 = -50.0;

    /// Rewards
    pub const COLLISION_REWARD: f32 = -10.0;
    pub const SURVIVAL_REWARD: f32 = 1.0;
}
