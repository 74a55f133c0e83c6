use thiserror::Error;

/// A result type for infill optimization errors
pub type Result<T> = std::result::Result<T, InfillError>;

/// An error raised during infill criterion optimization
#[derive(Error, Debug)]
pub enum InfillError {
    /// When the requested infill criterion name is not a known one
    #[error("Unsupported infill criterion: {0}")]
    UnsupportedCriterion(String),
    /// When expected improvement is requested without any observation
    /// to compute the incumbent from
    #[error("Empty dataset: no incumbent available for expected improvement")]
    EmptyDataset,
    /// When a bounds row is inverted
    #[error("Degenerate bounds: lower {lower} > upper {upper} at component {index}")]
    DegenerateBounds {
        lower: f64,
        upper: f64,
        index: usize,
    },
    /// When a single local optimization run fails
    #[error("Local optimizer failure: {0}")]
    LocalOptimizerFailure(String),
    /// When no start of the multistart procedure yields a usable minimum
    #[error("All local optimization starts failed")]
    AllStartsFailed,
    /// When the surrogate model cannot predict
    #[error("Surrogate error: {0}")]
    SurrogateError(String),
    /// When an invalid value is encountered
    #[error("Value error: {0}")]
    InvalidValue(String),
}
