use crate::agents::errors::AgentError;
use crate::bandit::errors::{ArmError, EnvironmentError};

use config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("Invalid experiment settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Arm(#[from] ArmError),
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot read config: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error(transparent)]
    Runner(#[from] RunnerError),
    #[error("Failed to serialize report to JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
