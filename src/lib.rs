//! Multistart optimization of Bayesian optimization infill criteria.
//!
//! Given a probabilistic surrogate of an expensive objective function, this
//! library locates the next most promising evaluation point by minimizing an
//! infill (acquisition) criterion over a bounded domain:
//! * expected improvement, consumed in its numerically stable log form,
//! * lower confidence bound.
//!
//! The criterion is minimized with a multistart procedure: random starting
//! points are drawn uniformly in the domain, ranked with a single batched
//! surrogate prediction, and every one of them is refined with a
//! box-constrained local optimizer (SLSQP or Cobyla). The best refined
//! candidate is the next point to evaluate.
//!
//! The surrogate model is an external capability reached through the
//! [`SurrogateModel`] and [`SurrogateBuilder`] traits: Gaussian process
//! posterior inference and hyperparameter fitting happen on the other side
//! of those traits.
//!
//! # Example
//!
//! ```
//! use ndarray::{array, Array1, ArrayView2};
//! use infill::{AcquisitionOptimizer, InfillStrategy, Result, SurrogateModel};
//!
//! // A surrogate with a quadratic mean and a constant predictive variance
//! struct Paraboloid;
//!
//! impl SurrogateModel for Paraboloid {
//!     fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
//!         let means = x.outer_iter().map(|p| (p[0] - 0.3) * (p[0] - 0.3)).collect();
//!         Ok((means, Array1::from_elem(x.nrows(), 0.01)))
//!     }
//! }
//!
//! let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb).seed(42);
//! let (x_next, _) = acq.find_next_point(&Paraboloid, &array![[0., 1.]], &array![0.5, 0.7])?;
//! assert!(x_next[0] >= 0. && x_next[0] <= 1.);
//! # Ok::<(), infill::InfillError>(())
//! ```
mod criteria;
mod errors;
mod optimizers;
mod solver;
mod surrogate;
mod types;
mod utils;

pub use crate::criteria::{ei, lcb, log_ei};
pub use crate::errors::{InfillError, Result};
pub use crate::optimizers::MAX_EVAL_DEFAULT;
pub use crate::solver::{AcquisitionOptimizer, SequentialOptimizer, KAPPA_DEFAULT, N_START_DEFAULT};
pub use crate::surrogate::{SurrogateBuilder, SurrogateModel};
pub use crate::types::{InfillObjData, InfillStrategy, LocalAlgorithm, ObjFn};
pub use crate::utils::{check_xlimits, log_ei_helper, norm_cdf, norm_pdf, to_xlimits};
