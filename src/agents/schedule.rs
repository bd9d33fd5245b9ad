use super::errors::AgentError;

use std::fmt::Debug;

pub const EXPLORATION_FACTOR: f64 = 2.0;

/// Half-width of the confidence interval around an arm's empirical mean.
pub trait ConfidenceSchedule: Debug + Send + Sync {
    fn half_width(&self, count: u64, confidence: f64) -> f64;

    /// Half-width under exploration exponent `alpha`: the interval at confidence `delta^alpha`.
    /// `alpha = 1` is the standard interval, a larger `alpha` a looser one.
    fn alpha_half_width(&self, alpha: f64, count: u64, confidence: f64) -> f64 {
        self.half_width(count, confidence.powf(alpha))
    }

    /// Optimism of the sampling index, as a multiple of the half-width. Must exceed 1, otherwise
    /// the arm that trails on its upper bound is never pulled enough for the intervals to part.
    fn exploration_factor(&self) -> f64 {
        EXPLORATION_FACTOR
    }

    /// Reward scale the intervals assume, when the schedule has one.
    fn reward_scale(&self) -> Option<f64> {
        None
    }
}

/// Sub-Gaussian interval `sqrt(2 sigma^2 alpha ln(1/delta) / count)` for rewards of scale `sigma`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianSchedule {
    sigma: f64,
}

impl GaussianSchedule {
    pub fn new(sigma: f64) -> Result<Self, AgentError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(AgentError::InvalidSigma(sigma));
        }
        Ok(Self { sigma })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl Default for GaussianSchedule {
    fn default() -> Self {
        Self { sigma: 1.0 }
    }
}

impl ConfidenceSchedule for GaussianSchedule {
    fn half_width(&self, count: u64, confidence: f64) -> f64 {
        self.alpha_half_width(1.0, count, confidence)
    }

    // sqrt(2 sigma^2 alpha ln(1/delta) / count), which avoids underflowing delta^alpha
    fn alpha_half_width(&self, alpha: f64, count: u64, confidence: f64) -> f64 {
        if count == 0 {
            return f64::INFINITY;
        }
        (2.0 * self.sigma.powi(2) * alpha * (1.0 / confidence).ln() / count as f64).sqrt()
    }

    fn reward_scale(&self) -> Option<f64> {
        Some(self.sigma)
    }
}
