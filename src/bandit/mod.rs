pub mod arm;
pub mod environment;
pub mod errors;
mod rng;

pub use arm::{Arm, DistributionFamily};
pub use environment::{Environment, RewardSource};
pub use rng::MaybeSeededRng;
