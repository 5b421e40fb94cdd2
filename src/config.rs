//! Environment configuration
//!
//! Every tunable of the simulation lives here. Values default to the
//! classic 800x600 track; any subset can be overridden from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{EnvError, Result};

/// Environment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    // === Track ===
    pub width: f32,
    pub height: f32,

    // === Vehicle ===
    pub vehicle_width: f32,
    pub vehicle_height: f32,
    /// Distance of the vehicle's start position above the bottom edge
    pub start_offset: f32,
    pub max_speed: f32,
    /// Speed change per Accelerate/Brake
    pub acceleration: f32,
    /// Horizontal move per Left/Right
    pub lateral_step: f32,
    /// Lateral guard distance from the track edges
    pub edge_margin: f32,

    // === Obstacles ===
    pub obstacle_size: f32,
    /// Live obstacle floor, restored every step
    pub min_obstacles: usize,
    pub obstacle_fall_speed: f32,
    pub spawn_margin_x: f32,
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,

    // === Rewards ===
    pub collision_reward: f32,
    pub survival_reward: f32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            width: TRACK_WIDTH,
            height: TRACK_HEIGHT,

            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            start_offset: VEHICLE_START_OFFSET,
            max_speed: MAX_SPEED,
            acceleration: ACCELERATION,
            lateral_step: LATERAL_STEP,
            edge_margin: EDGE_MARGIN,

            obstacle_size: OBSTACLE_SIZE,
            min_obstacles: MIN_OBSTACLES,
            obstacle_fall_speed: OBSTACLE_FALL_SPEED,
            spawn_margin_x: SPAWN_MARGIN_X,
            spawn_y_min: SPAWN_Y_MIN,
            spawn_y_max: SPAWN_Y_MAX,

            collision_reward: COLLISION_REWARD,
            survival_reward: SURVIVAL_REWARD,
        }
    }
}

impl EnvConfig {
    /// Track of the given size, everything else default
    pub fn with_track(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Reject configurations the simulation cannot honor
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("width", self.width),
            ("height", self.height),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("start_offset", self.start_offset),
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("lateral_step", self.lateral_step),
            ("edge_margin", self.edge_margin),
            ("obstacle_size", self.obstacle_size),
            ("obstacle_fall_speed", self.obstacle_fall_speed),
            ("spawn_margin_x", self.spawn_margin_x),
            ("spawn_y_min", self.spawn_y_min),
            ("spawn_y_max", self.spawn_y_max),
            ("collision_reward", self.collision_reward),
            ("survival_reward", self.survival_reward),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite")));
        }

        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("vehicle_width", self.vehicle_width),
            ("vehicle_height", self.vehicle_height),
            ("obstacle_size", self.obstacle_size),
        ] {
            if value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        for (name, value) in [
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("lateral_step", self.lateral_step),
            ("edge_margin", self.edge_margin),
            ("obstacle_fall_speed", self.obstacle_fall_speed),
            ("spawn_margin_x", self.spawn_margin_x),
        ] {
            if value < 0.0 {
                return Err(invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        // A lateral step wider than the guard margin could carry the vehicle off the track
        if self.lateral_step > self.edge_margin {
            return Err(invalid(format!(
                "lateral_step {} exceeds edge_margin {}",
                self.lateral_step, self.edge_margin
            )));
        }
        if self.min_obstacles == 0 {
            return Err(invalid("min_obstacles must be at least 1".into()));
        }
        if self.width - 2.0 * self.spawn_margin_x < 0.0 {
            return Err(invalid(format!(
                "spawn_margin_x {} leaves no spawn range on a track {} wide",
                self.spawn_margin_x, self.width
            )));
        }
        if self.spawn_y_min > self.spawn_y_max {
            return Err(invalid(format!(
                "spawn_y_min {} is above spawn_y_max {}",
                self.spawn_y_min, self.spawn_y_max
            )));
        }
        // Vehicle must fit between the lateral guards at its start column
        if self.width / 2.0 + self.vehicle_width + self.edge_margin > self.width {
            return Err(invalid(format!(
                "vehicle_width {} does not fit on a track {} wide",
                self.vehicle_width, self.width
            )));
        }
        Ok(())
    }

    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded environment config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn invalid(msg: String) -> EnvError {
    EnvError::InvalidConfig(msg)
}
