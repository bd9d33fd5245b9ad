use super::agent::{validate, Agent, Decision};
use super::errors::AgentError;
use super::estimates::Estimates;
use super::regret::etc_regret_bound;
use super::schedule::{ConfidenceSchedule, GaussianSchedule};

use crate::bandit::RewardSource;

use tracing::debug;

/// Explore-Then-Commit: pull both arms alternately and commit to the empirical leader once
/// the number of stages reaches `4 sigma^2 / gap^2 * ln(1/delta)` for the current gap estimate.
#[derive(Debug)]
pub struct ExploreThenCommit {
    schedule: Box<dyn ConfidenceSchedule>,
}

impl ExploreThenCommit {
    pub fn new() -> Self {
        Self::with_schedule(Box::new(GaussianSchedule::default()))
    }

    pub fn with_schedule(schedule: Box<dyn ConfidenceSchedule>) -> Self {
        Self { schedule }
    }

    // With equal counts, gap^2 >= w0^2 + w1^2 is n >= 4 sigma^2 / gap^2 * ln(1/delta).
    fn exploration_done(&self, estimates: &Estimates, confidence: f64) -> bool {
        let (first, second) = (estimates.get(0), estimates.get(1));
        let gap = first.mean - second.mean;
        let threshold = self.schedule.half_width(first.count, confidence).powi(2)
            + self.schedule.half_width(second.count, confidence).powi(2);

        gap.powi(2) >= threshold
    }
}

impl Default for ExploreThenCommit {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for ExploreThenCommit {
    fn name(&self) -> String {
        "etc".to_string()
    }

    fn decide(
        &self,
        n_steps: usize,
        confidence: f64,
        source: &mut dyn RewardSource,
    ) -> Result<Decision, AgentError> {
        validate(n_steps, confidence, &*source)?;

        let mut estimates = Estimates::new(2);
        let mut pulls = Vec::with_capacity(n_steps);

        while pulls.len() < n_steps {
            let arm_id = pulls.len() % 2;
            let reward = source.pull_arm(arm_id)?;
            estimates.update(arm_id, reward);
            pulls.push(arm_id);

            if arm_id == 1 && self.exploration_done(&estimates, confidence) {
                return Ok(Decision {
                    chosen_arm: estimates.best(),
                    pulls,
                });
            }
        }

        debug!(n_steps, "Horizon reached during exploration");
        Ok(Decision {
            chosen_arm: estimates.best(),
            pulls,
        })
    }

    fn regret_bound(&self, gap: f64, confidence: f64) -> Option<f64> {
        self.schedule
            .reward_scale()
            .map(|sigma| etc_regret_bound(sigma, gap, confidence))
    }
}
