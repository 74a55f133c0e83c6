use crate::errors::InfillError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Infill criterion used to select the next promising point.
///
/// Both criteria are minimized by the acquisition optimizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfillStrategy {
    /// Expected improvement, consumed as negated log-EI for numerical stability
    Ei,
    /// Lower confidence bound `mu - kappa * sigma`
    Lcb,
}

impl FromStr for InfillStrategy {
    type Err = InfillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ei" => Ok(InfillStrategy::Ei),
            "lcb" => Ok(InfillStrategy::Lcb),
            other => Err(InfillError::UnsupportedCriterion(other.to_string())),
        }
    }
}

/// Local optimizer used to refine each multistart candidate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalAlgorithm {
    /// SLSQP optimizer (gradient based, finite-difference gradients)
    Slsqp,
    /// Cobyla optimizer (gradient free)
    Cobyla,
}

/// Signature of the function passed to local optimizers: objective value at
/// `x` with an optional gradient slice to fill and user data
pub trait ObjFn<U>: Fn(&[f64], Option<&mut [f64]>, &mut U) -> f64 {}
impl<T, U> ObjFn<U> for T where T: Fn(&[f64], Option<&mut [f64]>, &mut U) -> f64 {}

/// Data threaded through the infill objective during local optimizations
#[derive(Clone, Debug)]
pub struct InfillObjData {
    /// Current incumbent, the minimum observed objective value (used by EI,
    /// NaN when the criterion does not need it)
    pub fmin: f64,
    /// LCB exploration coefficient
    pub kappa: f64,
}
