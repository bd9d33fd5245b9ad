use super::errors::AgentError;
use super::etc::ExploreThenCommit;
use super::regret::decision_regret;
use super::schedule::GaussianSchedule;
use super::ucb_alpha::UcbAlpha;

use crate::bandit::{Environment, RewardSource};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::debug;

/// What an agent's own logic produces: the arm it commits to and the pulls that led there.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub chosen_arm: usize,
    pub pulls: Vec<usize>,
}

impl Decision {
    pub fn decision_time(&self) -> usize {
        self.pulls.len()
    }
}

/// Result of one full run of an agent, scored against the environment's true means.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DecisionOutcome {
    pub chosen_arm_index: usize,
    pub decision_time: usize,
    pub decision_regret: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentType {
    ExploreThenCommit {
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
    UcbAlpha {
        alpha: f64,
        #[serde(default = "default_sigma")]
        sigma: f64,
    },
}

fn default_sigma() -> f64 {
    1.0
}

impl AgentType {
    pub fn into_inner(self) -> Result<Box<dyn Agent>, AgentError> {
        match self {
            AgentType::ExploreThenCommit { sigma } => Ok(Box::new(
                ExploreThenCommit::with_schedule(Box::new(GaussianSchedule::new(sigma)?)),
            )),
            AgentType::UcbAlpha { alpha, sigma } => Ok(Box::new(UcbAlpha::with_schedule(
                alpha,
                Box::new(GaussianSchedule::new(sigma)?),
            )?)),
        }
    }
}

/// A two-arm identification agent. Each run starts from fresh estimates; only the
/// configuration is kept between runs.
pub trait Agent: Debug + Send {
    fn name(&self) -> String;

    /// Pulls arms from `source` until the stopping rule fires or `n_steps` pulls are spent.
    fn decide(
        &self,
        n_steps: usize,
        confidence: f64,
        source: &mut dyn RewardSource,
    ) -> Result<Decision, AgentError>;

    /// Theoretical regret at decision time for a problem with the given gap, when known.
    fn regret_bound(&self, _gap: f64, _confidence: f64) -> Option<f64> {
        None
    }

    fn play(
        &self,
        n_steps: usize,
        confidence: f64,
        environment: &mut Environment,
    ) -> Result<DecisionOutcome, AgentError> {
        let decision = self.decide(n_steps, confidence, environment)?;
        let decision_regret = decision_regret(&decision.pulls, &environment.true_means());

        debug!(
            agent = %self.name(),
            chosen_arm = decision.chosen_arm,
            decision_time = decision.decision_time(),
            decision_regret,
            "Decision reached"
        );

        Ok(DecisionOutcome {
            chosen_arm_index: decision.chosen_arm,
            decision_time: decision.decision_time(),
            decision_regret,
        })
    }
}

pub(super) fn validate(
    n_steps: usize,
    confidence: f64,
    source: &dyn RewardSource,
) -> Result<(), AgentError> {
    if n_steps == 0 {
        return Err(AgentError::InvalidHorizon(n_steps));
    }
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(AgentError::InvalidConfidence(confidence));
    }
    if source.n_arms() != 2 {
        return Err(AgentError::UnsupportedArmCount(source.n_arms()));
    }
    Ok(())
}
