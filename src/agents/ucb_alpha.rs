use super::agent::{validate, Agent, Decision};
use super::errors::AgentError;
use super::estimates::{Estimate, Estimates};
use super::regret::ucb_alpha_regret_bound;
use super::schedule::{ConfidenceSchedule, GaussianSchedule};

use crate::bandit::RewardSource;

use tracing::debug;

/// Confidence-bound agent with exploration exponent `alpha`.
///
/// Each arm carries the interval `[mean - w, mean + w]`, with `w` the schedule's half-width at
/// confidence `delta^alpha`. The agent pulls the arm with the highest sampling index
/// `mean + factor * w` and stops once the two intervals are disjoint. `alpha = 1` is the
/// standard test; a larger `alpha` widens the intervals, which buys certainty with regret and
/// decision time.
#[derive(Debug)]
pub struct UcbAlpha {
    alpha: f64,
    schedule: Box<dyn ConfidenceSchedule>,
}

impl UcbAlpha {
    pub fn new(alpha: f64) -> Result<Self, AgentError> {
        Self::with_schedule(alpha, Box::new(GaussianSchedule::default()))
    }

    pub fn with_schedule(
        alpha: f64,
        schedule: Box<dyn ConfidenceSchedule>,
    ) -> Result<Self, AgentError> {
        if !alpha.is_finite() || alpha <= 0.0 {
            return Err(AgentError::InvalidAlpha(alpha));
        }
        Ok(Self { alpha, schedule })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn half_width(&self, arm: Estimate, confidence: f64) -> f64 {
        self.schedule.alpha_half_width(self.alpha, arm.count, confidence)
    }

    fn sampling_index(&self, arm: Estimate, confidence: f64) -> f64 {
        arm.mean + self.schedule.exploration_factor() * self.half_width(arm, confidence)
    }

    fn next_arm(&self, estimates: &Estimates, confidence: f64) -> usize {
        if let Some(arm_id) = estimates.first_unpulled() {
            return arm_id;
        }

        let first = self.sampling_index(estimates.get(0), confidence);
        let second = self.sampling_index(estimates.get(1), confidence);
        if second > first {
            1
        } else {
            0
        }
    }

    fn intervals_disjoint(&self, estimates: &Estimates, confidence: f64) -> bool {
        if estimates.first_unpulled().is_some() {
            return false;
        }

        let (first, second) = (estimates.get(0), estimates.get(1));
        let first_width = self.half_width(first, confidence);
        let second_width = self.half_width(second, confidence);

        first.mean - first_width > second.mean + second_width
            || second.mean - second_width > first.mean + first_width
    }
}

impl Agent for UcbAlpha {
    fn name(&self) -> String {
        format!("ucb_alpha({})", self.alpha)
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
            let arm_id = self.next_arm(&estimates, confidence);
            let reward = source.pull_arm(arm_id)?;
            estimates.update(arm_id, reward);
            pulls.push(arm_id);

            if self.intervals_disjoint(&estimates, confidence) {
                return Ok(Decision {
                    chosen_arm: estimates.best(),
                    pulls,
                });
            }
        }

        debug!(n_steps, alpha = self.alpha, "Horizon reached before intervals separated");
        Ok(Decision {
            chosen_arm: estimates.best(),
            pulls,
        })
    }

    fn regret_bound(&self, gap: f64, confidence: f64) -> Option<f64> {
        self.schedule
            .reward_scale()
            .map(|sigma| ucb_alpha_regret_bound(self.alpha, sigma, gap, confidence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bandit::{Arm, Environment};

    const SEED: u64 = 1234;

    fn make_environment(means: [f64; 2], seed: u64) -> Environment {
        Environment::new(
            means
                .iter()
                .enumerate()
                .map(|(k, &mean)| Arm::gaussian(mean, 1.0, Some(seed * 2 + k as u64)).unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn make_estimates(first: (u64, f64), second: (u64, f64)) -> Estimates {
        let mut estimates = Estimates::new(2);
        (0..first.0).for_each(|_| estimates.update(0, first.1));
        (0..second.0).for_each(|_| estimates.update(1, second.1));
        estimates
    }

    fn mean_outcome(agent: &UcbAlpha, confidence: f64, n_steps: usize, n: u64) -> (f64, f64) {
        let (regret, time) = (0..n)
            .map(|seed| {
                agent
                    .play(n_steps, confidence, &mut make_environment([0.0, 1.0], seed))
                    .unwrap()
            })
            .fold((0.0, 0.0), |(regret, time), outcome| {
                (
                    regret + outcome.decision_regret,
                    time + outcome.decision_time as f64,
                )
            });
        (regret / n as f64, time / n as f64)
    }

    #[test]
    fn invalid_alpha() {
        assert!(matches!(UcbAlpha::new(0.0), Err(AgentError::InvalidAlpha(_))));
        assert!(matches!(UcbAlpha::new(-2.0), Err(AgentError::InvalidAlpha(_))));
        assert!(UcbAlpha::new(f64::INFINITY).is_err());
        assert_eq!(UcbAlpha::new(32.0).unwrap().alpha(), 32.0);
    }

    #[test]
    fn pulls_each_arm_first() {
        let agent = UcbAlpha::new(1.0).unwrap();
        let decision = agent
            .decide(2, 0.1, &mut make_environment([5.0, 0.0], SEED))
            .unwrap();
        assert_eq!(decision.pulls, vec![0, 1]);
    }

    #[test]
    fn next_arm_prefers_higher_index() {
        let agent = UcbAlpha::new(1.0).unwrap();
        // equal counts: the higher mean has the higher index
        assert_eq!(agent.next_arm(&make_estimates((4, 0.0), (4, 1.0)), 0.1), 1);
        // equal means: the less pulled arm has the wider bonus
        assert_eq!(agent.next_arm(&make_estimates((2, 0.5), (9, 0.5)), 0.1), 0);
        // tie goes to the lower index
        assert_eq!(agent.next_arm(&make_estimates((3, 0.5), (3, 0.5)), 0.1), 0);
    }

    #[test]
    fn disjoint_intervals() {
        let agent = UcbAlpha::new(1.0).unwrap();
        let w = GaussianSchedule::default().half_width(50, 0.1);
        assert!(agent.intervals_disjoint(&make_estimates((50, 0.0), (50, 2.0 * w + 0.01)), 0.1));
        assert!(agent.intervals_disjoint(&make_estimates((50, 2.0 * w + 0.01), (50, 0.0)), 0.1));
        assert!(!agent.intervals_disjoint(&make_estimates((50, 0.0), (50, 2.0 * w - 0.01)), 0.1));
        assert!(!agent.intervals_disjoint(&make_estimates((50, 0.0), (0, 0.0)), 0.1));
    }

    #[test]
    fn alpha_sets_the_interval_width() {
        let gap = 2.0 * GaussianSchedule::default().half_width(50, 0.1) - 0.01;
        let estimates = make_estimates((50, 0.0), (50, gap));

        assert!(!UcbAlpha::new(1.0).unwrap().intervals_disjoint(&estimates, 0.1));
        assert!(UcbAlpha::new(0.5).unwrap().intervals_disjoint(&estimates, 0.1));
        assert!(!UcbAlpha::new(4.0).unwrap().intervals_disjoint(&estimates, 0.1));
    }

    #[test]
    fn regret_positive_and_zero_without_inferior_pulls() {
        let agent = UcbAlpha::new(2.0).unwrap();
        for seed in 0..50 {
            let outcome = agent
                .play(1000, 0.05, &mut make_environment([0.0, 1.0], seed))
                .unwrap();
            assert!(outcome.decision_regret > 0.0);
        }

        let outcome = agent
            .play(1, 0.05, &mut make_environment([1.0, 0.0], SEED))
            .unwrap();
        assert_eq!(outcome.decision_regret, 0.0);
    }

    #[test]
    fn decides_before_horizon() {
        let agent = UcbAlpha::new(1.0).unwrap();
        let before_horizon = (0..100)
            .filter(|&seed| {
                agent
                    .play(1000, 0.02, &mut make_environment([0.0, 1.0], seed))
                    .unwrap()
                    .decision_time
                    < 1000
            })
            .count();
        assert!(before_horizon >= 90);

        let (regret, time) = mean_outcome(&agent, 0.02, 1000, 100);
        assert!(time < 1000.0);
        assert!(regret < agent.regret_bound(1.0, 0.02).unwrap());
    }

    #[test]
    fn decision_time_grows_as_confidence_tightens() {
        for alpha in [0.5, 1.0, 4.0] {
            let agent = UcbAlpha::new(alpha).unwrap();
            let (_, loose) = mean_outcome(&agent, 0.2, 5000, 200);
            let (_, tight) = mean_outcome(&agent, 0.001, 5000, 200);
            assert!(loose < tight);
        }
    }

    #[test]
    fn regret_within_theoretical_bound() {
        for alpha in [0.1, 0.5, 1.0, 2.0] {
            let agent = UcbAlpha::new(alpha).unwrap();
            let (regret, time) = mean_outcome(&agent, 0.02, 20000, 300);
            assert!(regret <= agent.regret_bound(1.0, 0.02).unwrap());
            assert!(time < 20000.0);
        }
    }

    #[test]
    fn larger_alpha_is_more_conservative() {
        let quick = UcbAlpha::new(0.5).unwrap();
        let cautious = UcbAlpha::new(4.0).unwrap();

        let (quick_regret, quick_time) = mean_outcome(&quick, 0.01, 5000, 200);
        let (cautious_regret, cautious_time) = mean_outcome(&cautious, 0.01, 5000, 200);
        assert!(quick_regret < cautious_regret);
        assert!(quick_time < cautious_time);
    }

    #[test]
    fn unbounded_without_sigma() {
        #[derive(Debug)]
        struct Fixed;

        impl ConfidenceSchedule for Fixed {
            fn half_width(&self, _: u64, _: f64) -> f64 {
                0.1
            }
        }

        let agent = UcbAlpha::with_schedule(1.0, Box::new(Fixed)).unwrap();
        assert!(agent.regret_bound(1.0, 0.1).is_none());
        let outcome = agent
            .play(100, 0.1, &mut make_environment([0.0, 3.0], SEED))
            .unwrap();
        assert!(outcome.decision_time >= 2);
        assert!(outcome.decision_time <= 100);
    }
}
