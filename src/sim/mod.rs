//! Deterministic simulation module
//!
//! All environment logic lives here. This module must be pure and deterministic:
//! - One discrete step per call
//! - Seeded RNG only
//! - Stable iteration order (obstacle insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod env;
pub mod observation;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_collision};
pub use env::Environment;
pub use observation::{OBSERVATION_LEN, Observation, nearest_obstacle, observe};
pub use state::{EnvState, Obstacle, Vehicle};
pub use tick::{Action, StepOutcome, recycle_obstacles, tick};
