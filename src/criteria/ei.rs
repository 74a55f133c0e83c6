use crate::utils::{log_ei_helper, norm_cdf, norm_pdf};

/// Expected improvement at a point with predicted mean `mu` and standard
/// deviation `sigma`, given the incumbent `fmin` (minimization convention).
///
/// A point with no predictive uncertainty cannot improve on the incumbent.
pub fn ei(mu: f64, sigma: f64, fmin: f64) -> f64 {
    if sigma < f64::EPSILON {
        return 0.;
    }
    let u = (fmin - mu) / sigma;
    sigma * (u * norm_cdf(u) + norm_pdf(u))
}

/// Log of expected improvement.
///
/// Not computed as `ei(...).ln()`: the improvement underflows to zero a few
/// standard deviations away from the incumbent while its log is still a
/// perfectly usable finite value. `f64::MIN` stands in for the degenerate
/// `sigma = 0` case where EI is exactly zero.
pub fn log_ei(mu: f64, sigma: f64, fmin: f64) -> f64 {
    if sigma < f64::EPSILON {
        return f64::MIN;
    }
    let u = (fmin - mu) / sigma;
    log_ei_helper(u) + sigma.ln()
}
