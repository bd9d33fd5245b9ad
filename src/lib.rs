//! Simulation of two-armed bandit problems and of sequential agents that identify the better
//! arm at a fixed confidence level, with the regret they pay before deciding.

pub mod agents;
pub mod bandit;
pub mod config;
pub mod errors;
pub mod runner;
