use super::arm::Arm;
use super::errors::EnvironmentError;

/// What a decision agent is allowed to see of an environment: the number of arms and the
/// rewards it draws. Ground truth stays on [`Environment`].
pub trait RewardSource {
    fn n_arms(&self) -> usize;
    fn pull_arm(&mut self, index: usize) -> Result<f64, EnvironmentError>;
}

/// An ordered, fixed set of arms together with the rewards observed on each since the last reset.
#[derive(Debug)]
pub struct Environment {
    arms: Vec<Arm>,
    reward_history: Vec<Vec<f64>>,
}

impl Environment {
    pub fn new(arms: Vec<Arm>) -> Result<Self, EnvironmentError> {
        if arms.is_empty() {
            return Err(EnvironmentError::NoArms);
        }

        let reward_history = vec![Vec::new(); arms.len()];
        Ok(Self {
            arms,
            reward_history,
        })
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn reward_history(&self) -> &[Vec<f64>] {
        &self.reward_history
    }

    pub fn reset_history(&mut self) {
        self.reward_history.iter_mut().for_each(Vec::clear);
    }

    /// Means of the arm distributions, for scoring decisions only.
    pub fn true_means(&self) -> Vec<f64> {
        self.arms.iter().map(Arm::mean).collect()
    }

    pub fn n_arms(&self) -> usize {
        self.arms.len()
    }

    pub fn pull_arm(&mut self, index: usize) -> Result<f64, EnvironmentError> {
        let n_arms = self.arms.len();
        let arm = self
            .arms
            .get_mut(index)
            .ok_or(EnvironmentError::ArmOutOfRange { index, n_arms })?;

        let reward = arm.pull(1)?[0];
        self.reward_history[index].push(reward);

        Ok(reward)
    }
}

impl RewardSource for Environment {
    fn n_arms(&self) -> usize {
        Environment::n_arms(self)
    }

    fn pull_arm(&mut self, index: usize) -> Result<f64, EnvironmentError> {
        Environment::pull_arm(self, index)
    }
}
