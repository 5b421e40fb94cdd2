//! Agent-facing environment
//!
//! Owns the configuration and simulation state and exposes the
//! `reset`/`step` contract. Episode restarts are the caller's decision: a
//! terminal step is reported, never acted on.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::observation::{Observation, observe};
use super::state::{EnvState, Obstacle, Vehicle};
use super::tick::{Action, StepOutcome, tick};
use crate::config::EnvConfig;
use crate::error::Result;

/// Scrolling-track driving environment
#[derive(Debug, Clone)]
pub struct Environment<R = Pcg32> {
    config: EnvConfig,
    state: EnvState<R>,
    /// Episode has reached a terminal step since the last reset
    done: bool,
    /// Stepping past a terminal step has already been reported this episode
    warned_terminal: bool,
}

impl Environment<Pcg32> {
    /// Environment whose obstacle placement is driven by `seed`
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Environment<R> {
    /// Environment with a caller-supplied random source
    pub fn with_rng(config: EnvConfig, rng: R) -> Result<Self> {
        config.validate()?;
        let state = EnvState::new(&config, rng);
        Ok(Self {
            config,
            state,
            done: false,
            warned_terminal: false,
        })
    }

    /// Start a new episode and return its first observation
    pub fn reset(&mut self) -> Observation {
        self.state.reset(&self.config);
        self.done = false;
        self.warned_terminal = false;
        log::debug!(
            "Episode reset: vehicle at ({}, {}), {} obstacles",
            self.state.vehicle.pos.x,
            self.state.vehicle.pos.y,
            self.state.obstacles.len()
        );
        self.observe()
    }

    /// Apply one action and advance the world one step
    pub fn step(&mut self, action: Action) -> (Observation, f32, bool) {
        let outcome = self.step_outcome(action);
        (self.observe(), outcome.reward, outcome.done)
    }

    /// Integer form of [`step`](Self::step); actions outside `0..=3` are rejected
    pub fn step_index(&mut self, action: i64) -> Result<(Observation, f32, bool)> {
        let action = Action::try_from(action)?;
        Ok(self.step(action))
    }

    /// Like [`step`](Self::step) but returns the full transition record
    pub fn step_outcome(&mut self, action: Action) -> StepOutcome {
        if self.done && !self.warned_terminal {
            log::warn!("step called after episode ended; call reset to start a new one");
            self.warned_terminal = true;
        }
        let mut outcome = tick(&mut self.state, &self.config, action);
        // Terminal holds until reset
        outcome.done |= self.done;
        self.done = outcome.done;
        outcome
    }

    /// Current observation
    pub fn observe(&self) -> Observation {
        observe(&self.state.vehicle, &self.state.obstacles, &self.config)
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.state.vehicle
    }

    /// Live obstacles in set order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.state.obstacles
    }

    /// The episode has ended; stays set until `reset`
    pub fn is_done(&self) -> bool {
        self.done
    }
}
