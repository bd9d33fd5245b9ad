mod agent;
pub mod errors;
mod estimates;
pub mod etc;
pub mod regret;
pub mod schedule;
pub mod ucb_alpha;

pub use agent::{Agent, AgentType, Decision, DecisionOutcome};
pub use etc::ExploreThenCommit;
pub use schedule::{ConfidenceSchedule, GaussianSchedule};
pub use ucb_alpha::UcbAlpha;
