//! Bounded local optimization of a single multistart candidate.
mod optimizer;

pub(crate) use optimizer::LocalOptimizer;
pub use optimizer::MAX_EVAL_DEFAULT;
