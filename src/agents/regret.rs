//! Regret accounting against the true arm means, and the theoretical bounds the agents are
//! compared to. Nothing here is used by the agents' own decision logic.

/// Sum over every pull of the gap between the best true mean and the mean of the pulled arm.
pub fn decision_regret(pulls: &[usize], true_means: &[f64]) -> f64 {
    let best = true_means
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    pulls
        .iter()
        .filter_map(|&arm_id| true_means.get(arm_id))
        .map(|mean| best - mean)
        .sum()
}

/// Coefficient of the UCB-alpha regret bound.
pub fn c(alpha: f64) -> f64 {
    if alpha == 1.0 {
        1.0
    } else {
        f64::min(
            (alpha + 1.0).powi(2) / 4.0,
            4.0 * alpha.powi(2) / (1.0 - alpha).powi(2),
        )
    }
}

/// Explore-Then-Commit regret at decision time, `8 sigma^2 / gap * ln(1/delta)`.
pub fn etc_regret_bound(sigma: f64, gap: f64, confidence: f64) -> f64 {
    8.0 * sigma.powi(2) / gap * (1.0 / confidence).ln()
}

/// UCB-alpha regret at decision time, `(8 sigma^2 / gap * c(alpha) + gap) * ln(1/delta)`.
pub fn ucb_alpha_regret_bound(alpha: f64, sigma: f64, gap: f64, confidence: f64) -> f64 {
    (8.0 * sigma.powi(2) / gap * c(alpha) + gap) * (1.0 / confidence).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn coefficient_at_one() {
        assert_eq!(c(1.0), 1.0);
    }

    #[test]
    fn coefficient_values() {
        // (1.5)^2 / 4 = 0.5625 against 4 * 0.25 / 0.25 = 4
        assert!((c(0.5) - 0.5625).abs() < EPS);
        // 9 / 4 against 16
        assert!((c(2.0) - 2.25).abs() < EPS);
        // 25 / 4 against 64 / 9
        assert!((c(4.0) - 6.25).abs() < EPS);
        // 1001^2 / 4 against 4e6 / 999^2
        assert!((c(1000.0) - 4_000_000.0 / 998_001.0).abs() < EPS);
    }

    #[test]
    fn regret_counts_inferior_pulls() {
        let means = [0.0, 1.0];
        assert_eq!(decision_regret(&[1, 1, 1], &means), 0.0);
        assert!((decision_regret(&[0, 1, 0, 1, 0], &means) - 3.0).abs() < EPS);
    }

    #[test]
    fn regret_uses_gap() {
        let means = [2.5, 1.0, 2.0];
        assert!((decision_regret(&[1, 2, 0], &means) - 2.0).abs() < EPS);
    }

    #[test]
    fn bounds() {
        let log_inv = (1.0_f64 / 0.02).ln();
        assert!((etc_regret_bound(1.0, 1.0, 0.02) - 8.0 * log_inv).abs() < EPS);
        assert!((etc_regret_bound(1.0, 1.0, 0.02) - 31.296).abs() < 1e-3);
        assert!((ucb_alpha_regret_bound(1.0, 1.0, 1.0, 0.02) - 9.0 * log_inv).abs() < EPS);
        assert!(
            (ucb_alpha_regret_bound(2.0, 2.0, 0.5, 0.02) - (64.0 * 2.25 + 0.5) * log_inv).abs()
                < EPS
        );
    }
}
