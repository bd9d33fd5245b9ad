use gap_bandits::agents::{Agent, AgentType};
use gap_bandits::config::AppConfig;
use gap_bandits::errors::AppError;
use gap_bandits::runner::{log_inv_delta_grid, run_experiment, sweep, ExperimentSummary};

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Report {
    experiments: Vec<ExperimentSummary>,
    sweep: Vec<ExperimentSummary>,
}

fn build_agents(agent_types: Vec<AgentType>) -> Result<Vec<Box<dyn Agent>>, AppError> {
    agent_types
        .into_iter()
        .map(|agent_type| agent_type.into_inner().map_err(AppError::from))
        .collect()
}

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        means = ?config.experiment.means,
        std = config.experiment.std,
        confidence = config.confidence,
        "Starting experiments"
    );

    let experiments = build_agents(config.agents.clone())?
        .iter()
        .map(|agent| run_experiment(agent.as_ref(), config.confidence, &config.experiment))
        .collect::<Result<Vec<_>, _>>()?;

    let grid = log_inv_delta_grid(config.sweep.log_inv_delta_max, config.sweep.points);
    let sweep_summaries = sweep(
        &build_agents(config.sweep.agents.clone())?,
        &grid,
        &config.sweep_settings(),
    )?;

    let report = Report {
        experiments,
        sweep: sweep_summaries,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
