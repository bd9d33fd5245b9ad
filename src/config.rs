use crate::agents::AgentType;
use crate::runner::ExperimentSettings;

use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SweepConfig {
    pub log_inv_delta_max: f64,
    pub points: usize,
    pub n_steps: usize,
    pub n_experiments: usize,
    pub agents: Vec<AgentType>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let mut agents = vec![AgentType::ExploreThenCommit { sigma: 1.0 }];
        agents.extend(
            [0.1, 0.5, 1.0, 2.0, 4.0]
                .into_iter()
                .map(|alpha| AgentType::UcbAlpha { alpha, sigma: 1.0 }),
        );

        Self {
            log_inv_delta_max: 10.0,
            points: 10,
            n_steps: 1000,
            n_experiments: 100,
            agents,
        }
    }
}

/// `APP_*` variables, with `__` between nested keys (`APP_EXPERIMENT__N_STEPS`).
fn environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub confidence: f64,
    pub experiment: ExperimentSettings,
    pub agents: Vec<AgentType>,
    pub sweep: SweepConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            confidence: 0.02,
            experiment: ExperimentSettings::default(),
            agents: vec![AgentType::ExploreThenCommit { sigma: 1.0 }],
            sweep: SweepConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(File::with_name("config").required(false), environment())
    }

    fn load<S>(file: S, environment: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let builder = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;

        builder.try_deserialize()
    }

    /// Settings of the sweep experiments: the base problem with the sweep's own budget.
    pub fn sweep_settings(&self) -> ExperimentSettings {
        ExperimentSettings {
            n_steps: self.sweep.n_steps,
            n_experiments: self.sweep.n_experiments,
            ..self.experiment.clone()
        }
    }
}
