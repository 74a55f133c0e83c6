//! Multistart minimization of the infill criterion and the sequential
//! Bayesian optimization loop built on top of it.
mod acquisition;
mod sequential;

pub use acquisition::{AcquisitionOptimizer, KAPPA_DEFAULT, N_START_DEFAULT};
pub use sequential::SequentialOptimizer;
