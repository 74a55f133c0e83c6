//! Traits abstracting the probabilistic surrogate of the expensive objective.
//!
//! The library never computes a Gaussian process posterior itself: models are
//! queried through [`SurrogateModel`] and refitted through [`SurrogateBuilder`].

use crate::errors::Result;
use ndarray::{Array1, ArrayView1, ArrayView2};

/// A probabilistic surrogate of the objective function.
pub trait SurrogateModel {
    /// Predict mean and variance of the surrogate at the given points,
    /// one point per row. Returned variances are non-negative.
    fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)>;
}

/// Capability to (re)fit a surrogate on an observed dataset.
///
/// The kernel configuration and the hyperparameter optimization restarts
/// used to escape likelihood local optima are the builder's own concern.
pub trait SurrogateBuilder {
    type Model: SurrogateModel;

    /// Fit a surrogate on `x` (one sample per row) and `y` observed values.
    fn fit(&self, x: &ArrayView2<f64>, y: &ArrayView1<f64>) -> Result<Self::Model>;
}
