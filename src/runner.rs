//! Repeats agent runs over independent environments and aggregates their outcomes.

use crate::agents::Agent;
use crate::bandit::{Arm, DistributionFamily, Environment, MaybeSeededRng};
use crate::errors::RunnerError;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Two-arm problem and repetition budget shared by every run of an experiment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentSettings {
    pub family: DistributionFamily,
    pub std: f64,
    pub means: [f64; 2],
    pub n_steps: usize,
    pub n_experiments: usize,
    pub seed: Option<u64>,
}

impl Default for ExperimentSettings {
    fn default() -> Self {
        Self {
            family: DistributionFamily::Gaussian,
            std: 1.0,
            means: [0.0, 1.0],
            n_steps: 100,
            n_experiments: 1000,
            seed: None,
        }
    }
}

impl ExperimentSettings {
    pub fn gap(&self) -> f64 {
        (self.means[1] - self.means[0]).abs()
    }

    fn best_mean(&self) -> f64 {
        self.means[0].max(self.means[1])
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExperimentSummary {
    pub agent: String,
    pub confidence: f64,
    pub log_inv_delta: f64,
    pub mean_regret: f64,
    pub mean_decision_time: f64,
    pub horizon_rate: f64,
    pub correct_rate: f64,
    pub regret_bound: Option<f64>,
}

pub fn run_experiment(
    agent: &dyn Agent,
    confidence: f64,
    settings: &ExperimentSettings,
) -> Result<ExperimentSummary, RunnerError> {
    if settings.n_experiments == 0 {
        return Err(RunnerError::InvalidSettings(
            "n_experiments must be positive".to_string(),
        ));
    }

    let mut rng = MaybeSeededRng::new(settings.seed);
    let (mut regret, mut decision_time) = (0.0, 0.0);
    let (mut horizon_hits, mut correct) = (0_usize, 0_usize);

    for _ in 0..settings.n_experiments {
        // fresh arms and environment per run, each arm with its own seed
        let arms = settings
            .means
            .iter()
            .map(|&mean| Arm::new(mean, settings.std, settings.family, Some(rng.fork_seed())))
            .collect::<Result<Vec<_>, _>>()?;
        let mut environment = Environment::new(arms)?;

        let outcome = agent.play(settings.n_steps, confidence, &mut environment)?;
        regret += outcome.decision_regret;
        decision_time += outcome.decision_time as f64;
        horizon_hits += (outcome.decision_time == settings.n_steps) as usize;
        correct += settings
            .means
            .get(outcome.chosen_arm_index)
            .is_some_and(|&mean| mean == settings.best_mean()) as usize;
    }

    let n = settings.n_experiments as f64;
    let gap = settings.gap();
    let summary = ExperimentSummary {
        agent: agent.name(),
        confidence,
        log_inv_delta: (1.0 / confidence).ln(),
        mean_regret: regret / n,
        mean_decision_time: decision_time / n,
        horizon_rate: horizon_hits as f64 / n,
        correct_rate: correct as f64 / n,
        regret_bound: (gap > 0.0)
            .then(|| agent.regret_bound(gap, confidence))
            .flatten(),
    };

    info!(
        agent = %summary.agent,
        confidence,
        mean_regret = summary.mean_regret,
        mean_decision_time = summary.mean_decision_time,
        "Experiment done"
    );

    Ok(summary)
}

/// `points` evenly spaced values of `log(1/delta)` from 0 to `max`, both ends included.
pub fn log_inv_delta_grid(max: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..points)
            .map(|i| max * i as f64 / (points - 1) as f64)
            .collect(),
    }
}

/// Runs every agent at every `log(1/delta)` of the grid. Grid points whose confidence falls
/// outside `(0, 1)` are skipped.
pub fn sweep(
    agents: &[Box<dyn Agent>],
    grid: &[f64],
    settings: &ExperimentSettings,
) -> Result<Vec<ExperimentSummary>, RunnerError> {
    let mut summaries = Vec::with_capacity(agents.len() * grid.len());

    for agent in agents {
        info!(agent = %agent.name(), points = grid.len(), "Simulating");

        for &log_inv_delta in grid {
            let confidence = (-log_inv_delta).exp();
            if !(confidence > 0.0 && confidence < 1.0) {
                warn!(log_inv_delta, "Skipping grid point with confidence outside (0, 1)");
                continue;
            }
            summaries.push(run_experiment(agent.as_ref(), confidence, settings)?);
        }
    }

    Ok(summaries)
}
