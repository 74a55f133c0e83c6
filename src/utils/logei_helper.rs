use crate::utils::{norm_cdf, norm_pdf};
use libm::{erfc, expm1, log1p};

const INV_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;
const SQRT_PI: f64 = 1.7724538509055159;
const LOG_2PI_OVER_2: f64 = 0.9189385332046727; // log(2π)/2
const LOG_PI_OVER_2_ALL_OVER_2: f64 = 0.2257913526447274; // log(π/2)/2

/// `ln(erfcx(x))` for positive x, where `erfcx(x) = exp(x²)·erfc(x)`.
///
/// The direct product overflows to `inf·0 = NaN` past x ≈ 26.6; the
/// asymptotic expansion `erfcx(x) ~ (1 - 1/(2x²) + 3/(4x⁴)) / (x√π)`
/// takes over before that.
fn log_erfcx(x: f64) -> f64 {
    if x > 25. {
        let inv_sq = 1. / (x * x);
        log1p(-0.5 * inv_sq * (1. - 1.5 * inv_sq)) - (x * SQRT_PI).ln()
    } else {
        ((x * x).exp() * erfc(x)).ln()
    }
}

fn log1mexp(x: f64) -> f64 {
    if x > -std::f64::consts::LN_2 {
        (-expm1(x)).ln()
    } else {
        log1p(-x.exp())
    }
}

/// Stable computation of `log(φ(u) + u·Φ(u))`, the scale-free part of log-EI.
///
/// Direct evaluation underflows to `-inf` for u far below zero; the asymptotic
/// branches keep the value finite down to the representable range.
pub fn log_ei_helper(u: f64) -> f64 {
    if u > -1.0 {
        (norm_pdf(u) + u * norm_cdf(u)).ln()
    } else {
        let log_phi_u = -0.5 * u * u - LOG_2PI_OVER_2;

        let log_term = if u > -1. / f64::sqrt(1e-6) {
            let w = log_erfcx(-INV_SQRT_2 * u) + u.abs().ln() + LOG_PI_OVER_2_ALL_OVER_2;
            log1mexp(w)
        } else {
            -2.0 * u.abs().ln()
        };

        log_phi_u + log_term
    }
}
