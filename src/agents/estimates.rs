use std::cmp::Ordering;

/// Running pull count and empirical mean of one arm.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Estimate {
    pub count: u64,
    pub mean: f64,
}

impl Estimate {
    pub fn update(&mut self, reward: f64) {
        self.count += 1;
        self.mean += (reward - self.mean) / (self.count as f64);
    }
}

/// Per-run estimates for every arm, rebuilt at the start of each run.
#[derive(Clone, Debug)]
pub struct Estimates {
    arms: Vec<Estimate>,
}

impl Estimates {
    pub fn new(n_arms: usize) -> Self {
        Self {
            arms: vec![Estimate::default(); n_arms],
        }
    }

    /// Panics when `arm_id` is not an arm of these estimates.
    pub fn update(&mut self, arm_id: usize, reward: f64) {
        self.arms[arm_id].update(reward);
    }

    pub fn get(&self, arm_id: usize) -> Estimate {
        self.arms[arm_id]
    }

    pub fn first_unpulled(&self) -> Option<usize> {
        self.arms.iter().position(|arm| arm.count == 0)
    }

    /// Arm with the highest empirical mean among pulled arms. Ties go to the lower index, and
    /// an arm never pulled only wins when no arm was pulled.
    pub fn best(&self) -> usize {
        self.arms
            .iter()
            .enumerate()
            .filter(|(_, arm)| arm.count > 0)
            .fold(None, |best: Option<(usize, f64)>, (arm_id, arm)| match best {
                Some((_, mean)) if arm.mean.partial_cmp(&mean) != Some(Ordering::Greater) => best,
                _ => Some((arm_id, arm.mean)),
            })
            .map(|(arm_id, _)| arm_id)
            .unwrap_or_default()
    }
}
