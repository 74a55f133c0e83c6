use crate::errors::{InfillError, Result};
use ndarray::{stack, Array2, ArrayBase, ArrayView2, Axis, Data, Ix1};

/// Validate a `(d, 2)` bounds matrix where the ith row is
/// `[lower_bound, upper_bound]` of the ith component of x.
pub fn check_xlimits(xlimits: &ArrayView2<f64>) -> Result<()> {
    for (index, row) in xlimits.outer_iter().enumerate() {
        if row[0] > row[1] {
            return Err(InfillError::DegenerateBounds {
                lower: row[0],
                upper: row[1],
                index,
            });
        }
    }
    Ok(())
}

/// Build a `(d, 2)` bounds matrix from lower and upper bound vectors.
pub fn to_xlimits(
    lower: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    upper: &ArrayBase<impl Data<Elem = f64>, Ix1>,
) -> Array2<f64> {
    stack![Axis(1), lower.view(), upper.view()]
}
