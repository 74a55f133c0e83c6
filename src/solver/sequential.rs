use crate::errors::Result;
use crate::solver::AcquisitionOptimizer;
use crate::surrogate::{SurrogateBuilder, SurrogateModel};
use crate::utils::check_xlimits;

use log::debug;
use ndarray::{aview1, concatenate, Array1, Array2, ArrayBase, ArrayView1, Axis, Data, Ix1, Ix2};

/// Sequential Bayesian optimization loop with an ask-and-tell interface.
///
/// Each iteration refits the surrogate on the observed dataset, minimizes the
/// infill criterion to pick the next evaluation point, then evaluates the
/// expensive objective there. The surrogate fitting itself, kernel choice
/// included, belongs to the [`SurrogateBuilder`].
pub struct SequentialOptimizer<SB: SurrogateBuilder> {
    builder: SB,
    acq: AcquisitionOptimizer,
    xlimits: Array2<f64>,
}

impl<SB: SurrogateBuilder> SequentialOptimizer<SB> {
    /// Build a loop minimizing within `xlimits`, a `(d, 2)` matrix of
    /// `[lower_bound, upper_bound]` rows.
    pub fn new(
        builder: SB,
        acq: AcquisitionOptimizer,
        xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    ) -> Result<Self> {
        check_xlimits(&xlimits.view())?;
        Ok(SequentialOptimizer {
            builder,
            acq,
            xlimits: xlimits.to_owned(),
        })
    }

    /// Refit the surrogate on the given dataset and return the next
    /// promising point without evaluating the objective there.
    pub fn suggest(
        &self,
        x_data: &ArrayBase<impl Data<Elem = f64>, Ix2>,
        y_data: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    ) -> Result<Array1<f64>> {
        let model = self.builder.fit(&x_data.view(), &y_data.view())?;
        let (x_new, _) = self.acq.find_next_point(&model, &self.xlimits, y_data)?;
        Ok(x_new)
    }

    /// Run one iteration: refit, pick the next point, evaluate `objective`
    /// there. Returns the dataset augmented with the new observation as its
    /// last row together with the surrogate fitted on the input dataset.
    ///
    /// The refit always happens before the acquisition point is computed.
    pub fn step<F>(
        &self,
        x_data: &ArrayBase<impl Data<Elem = f64>, Ix2>,
        y_data: &ArrayBase<impl Data<Elem = f64>, Ix1>,
        objective: F,
    ) -> Result<(Array2<f64>, Array1<f64>, SB::Model)>
    where
        F: Fn(&ArrayView1<f64>) -> f64,
    {
        let model = self.builder.fit(&x_data.view(), &y_data.view())?;
        let (x_new, crit) = self.acq.find_next_point(&model, &self.xlimits, y_data)?;
        let y_new = objective(&x_new.view());
        debug!("New point x = {x_new}, y = {y_new} (criterion {crit})");

        let x_out = concatenate![
            Axis(0),
            x_data.view(),
            x_new.view().insert_axis(Axis(0))
        ];
        let y_out = concatenate![Axis(0), y_data.view(), aview1(&[y_new])];
        Ok((x_out, y_out, model))
    }
}
