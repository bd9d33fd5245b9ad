use crate::bandit::errors::EnvironmentError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Horizon must be at least one pull, got {0}")]
    InvalidHorizon(usize),
    #[error("Confidence must lie in (0, 1), got {0}")]
    InvalidConfidence(f64),
    #[error("Exploration exponent must be finite and positive, got {0}")]
    InvalidAlpha(f64),
    #[error("Reward scale must be finite and positive, got {0}")]
    InvalidSigma(f64),
    #[error("Agent decides between exactly two arms, environment has {0}")]
    UnsupportedArmCount(usize),
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
}
