//! Episode accounting for driving loops
//!
//! In-memory only: tracks each episode's length, return and ending, and
//! keeps a small leaderboard of the best episodes in a run.

use serde::{Deserialize, Serialize};

use crate::sim::StepOutcome;

/// Number of best episodes kept in a run summary
pub const MAX_BEST_EPISODES: usize = 5;

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// Vehicle overlapped an obstacle
    Collision,
    /// Vehicle crossed the top edge
    ReachedTop,
    /// Still in progress (or cut off by the caller)
    Running,
}

/// Summary of a single episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub index: u32,
    pub steps: u64,
    pub total_reward: f32,
    pub outcome: EpisodeOutcome,
}

/// Accumulates step results for the current episode
#[derive(Debug, Clone, Default)]
pub struct EpisodeTracker {
    index: u32,
    steps: u64,
    total_reward: f32,
}

impl EpisodeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step; returns the finished episode when the step was terminal
    pub fn record(&mut self, outcome: &StepOutcome) -> Option<EpisodeStats> {
        self.steps += 1;
        self.total_reward += outcome.reward;
        if !outcome.done {
            return None;
        }
        let ending = if outcome.collision {
            EpisodeOutcome::Collision
        } else {
            EpisodeOutcome::ReachedTop
        };
        Some(self.finish(ending))
    }

    /// Close the current episode (e.g. the step budget ran out)
    pub fn finish(&mut self, outcome: EpisodeOutcome) -> EpisodeStats {
        let stats = EpisodeStats {
            index: self.index,
            steps: self.steps,
            total_reward: self.total_reward,
            outcome,
        };
        self.index += 1;
        self.steps = 0;
        self.total_reward = 0.0;
        stats
    }

    /// Steps taken in the current episode so far
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

/// Aggregate over all episodes of a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub episodes: u32,
    pub total_steps: u64,
    pub collisions: u32,
    pub reached_top: u32,
    /// Sum of episode returns
    pub total_reward: f64,
    /// Best episodes by return, descending
    pub best: Vec<EpisodeStats>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a finished episode in; returns its leaderboard rank (1-indexed) if it placed
    pub fn add(&mut self, episode: EpisodeStats) -> Option<usize> {
        self.episodes += 1;
        self.total_steps += episode.steps;
        self.total_reward += f64::from(episode.total_reward);
        match episode.outcome {
            EpisodeOutcome::Collision => self.collisions += 1,
            EpisodeOutcome::ReachedTop => self.reached_top += 1,
            EpisodeOutcome::Running => {}
        }
        self.insert_best(episode)
    }

    fn insert_best(&mut self, episode: EpisodeStats) -> Option<usize> {
        // Insertion point keeps descending order; earlier episodes win ties
        let pos = self
            .best
            .iter()
            .position(|e| episode.total_reward > e.total_reward)
            .unwrap_or(self.best.len());
        if pos >= MAX_BEST_EPISODES {
            return None;
        }
        self.best.insert(pos, episode);
        self.best.truncate(MAX_BEST_EPISODES);
        Some(pos + 1)
    }

    pub fn mean_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / f64::from(self.episodes)
        }
    }

    pub fn mean_length(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_steps as f64 / f64::from(self.episodes)
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
