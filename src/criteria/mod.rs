//! Infill criteria scoring candidate points, minimization convention.
mod ei;
mod lcb;

pub use ei::{ei, log_ei};
pub use lcb::lcb;

use crate::types::InfillStrategy;

impl InfillStrategy {
    /// Criterion value to be minimized at a point with predicted mean `mu`
    /// and standard deviation `sigma`.
    ///
    /// EI is an improvement to maximize, hence negated; its log form is used
    /// so that tiny improvements far from promising regions stay comparable.
    pub(crate) fn objective(&self, mu: f64, sigma: f64, fmin: f64, kappa: f64) -> f64 {
        match self {
            InfillStrategy::Ei => -log_ei(mu, sigma, fmin),
            InfillStrategy::Lcb => lcb(mu, sigma, kappa),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_objective_dispatch() {
        let (mu, sigma, fmin) = (0.2, 0.3, 0.5);
        assert_abs_diff_eq!(
            -log_ei(mu, sigma, fmin),
            InfillStrategy::Ei.objective(mu, sigma, fmin, 0.),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            lcb(mu, sigma, 2.),
            InfillStrategy::Lcb.objective(mu, sigma, fmin, 2.),
            epsilon = 1e-12
        );
    }
}
