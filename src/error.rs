//! Crate error type

use thiserror::Error;

/// Errors surfaced by the environment and its configuration
#[derive(Debug, Error)]
pub enum EnvError {
    /// Integer action outside the `0..=3` action space
    #[error("invalid action {0}: expected 0 (left), 1 (right), 2 (accelerate) or 3 (brake)")]
    InvalidAction(i64),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;
