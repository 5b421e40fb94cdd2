//! Track Runner headless driver
//!
//! Runs a uniform-random policy against the environment, restarting each
//! episode as soon as it ends, and reports per-episode and run statistics.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use track_runner::{
    Action, EnvConfig, Environment, EpisodeOutcome, EpisodeTracker, Result, RunSummary,
};

/// Command-line options
#[derive(Debug, Parser)]
#[command(name = "track-runner", about = "Run a random policy on the driving track")]
struct Options {
    /// Seed for obstacle placement (the policy uses seed + 1)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Total environment steps to run
    #[arg(long, default_value_t = 10_000)]
    steps: u64,

    /// JSON environment config; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn run(options: &Options) -> Result<RunSummary> {
    let config = match &options.config {
        Some(path) => EnvConfig::load(path)?,
        None => EnvConfig::default(),
    };
    let mut env = Environment::new(config, options.seed)?;
    // Policy draws from its own stream so obstacle placement stays seed-stable
    let mut policy = Pcg32::seed_from_u64(options.seed.wrapping_add(1));

    let mut tracker = EpisodeTracker::new();
    let mut summary = RunSummary::new();
    env.reset();

    for _ in 0..options.steps {
        let action = Action::ALL[policy.random_range(0..Action::COUNT)];
        let outcome = env.step_outcome(action);
        if let Some(episode) = tracker.record(&outcome) {
            log::info!(
                "Episode {} ended after {} steps: {:?}, return {}",
                episode.index,
                episode.steps,
                episode.outcome,
                episode.total_reward
            );
            if let Some(rank) = summary.add(episode) {
                log::debug!("New best episode, rank {}", rank);
            }
            // Restart policy belongs to the driver, not the environment
            env.reset();
        }
    }

    if tracker.steps() > 0 {
        let partial = tracker.finish(EpisodeOutcome::Running);
        log::info!(
            "Episode {} cut off after {} steps, return {}",
            partial.index,
            partial.steps,
            partial.total_reward
        );
        summary.add(partial);
    }

    Ok(summary)
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    let options = Options::parse();
    log::info!("Track Runner starting: {:?}", options);

    let summary = match run(&options) {
        Ok(summary) => summary,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    if options.json {
        match summary.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                log::error!("failed to encode summary: {err}");
                std::process::exit(1);
            }
        }
    } else {
        println!(
            "{} episodes, {} steps: {} collisions, {} reached top",
            summary.episodes, summary.total_steps, summary.collisions, summary.reached_top
        );
        println!(
            "mean return {:.2}, mean length {:.1}",
            summary.mean_reward(),
            summary.mean_length()
        );
        for (rank, episode) in summary.best.iter().enumerate() {
            println!(
                "  #{} episode {}: return {} over {} steps ({:?})",
                rank + 1,
                episode.index,
                episode.total_reward,
                episode.steps,
                episode.outcome
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let options =
            Options::try_parse_from(["track-runner", "--seed", "7", "--steps", "50", "--json"])
                .unwrap();
        assert_eq!(options.seed, 7);
        assert_eq!(options.steps, 50);
        assert!(options.json);
        assert!(options.config.is_none());

        let defaults = Options::try_parse_from(["track-runner"]).unwrap();
        assert_eq!(defaults.seed, 0);
        assert_eq!(defaults.steps, 10_000);
        assert!(!defaults.json);

        let with_config =
            Options::try_parse_from(["track-runner", "--config", "track.json"]).unwrap();
        assert_eq!(with_config.config, Some(PathBuf::from("track.json")));

        assert!(Options::try_parse_from(["track-runner", "--seed"]).is_err());
        assert!(Options::try_parse_from(["track-runner", "--steps", "many"]).is_err());
        assert!(Options::try_parse_from(["track-runner", "--fast"]).is_err());
    }

    #[test]
    fn test_run_accounts_every_step() {
        let options = Options {
            seed: 3,
            steps: 2_000,
            config: None,
            json: false,
        };
        let summary = run(&options).unwrap();
        assert_eq!(summary.total_steps, 2_000);
        assert!(summary.episodes >= 1);
        assert!(summary.best.len() <= track_runner::stats::MAX_BEST_EPISODES);
    }
}
