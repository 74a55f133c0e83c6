use crate::errors::{InfillError, Result};
use crate::types::{InfillObjData, LocalAlgorithm, ObjFn};

use cobyla::RhoBeg;
use ndarray::{arr1, Array1, Array2, ArrayView1};

/// Default evaluation budget of a single local run
pub const MAX_EVAL_DEFAULT: usize = 2000;

/// Facade for the box-constrained local optimization algorithms used to
/// refine one multistart candidate of the infill criterion.
pub(crate) struct LocalOptimizer<'a> {
    algo: LocalAlgorithm,
    fun: &'a dyn ObjFn<InfillObjData>,
    bounds: &'a Array2<f64>,
    user_data: &'a InfillObjData,
    max_eval: usize,
    xinit: Option<Array1<f64>>,
    ftol_abs: Option<f64>,
    ftol_rel: Option<f64>,
}

impl<'a> LocalOptimizer<'a> {
    pub fn new(
        algo: LocalAlgorithm,
        fun: &'a dyn ObjFn<InfillObjData>,
        user_data: &'a InfillObjData,
        bounds: &'a Array2<f64>,
    ) -> Self {
        LocalOptimizer {
            algo,
            fun,
            bounds,
            user_data,
            max_eval: MAX_EVAL_DEFAULT,
            xinit: None,
            ftol_abs: None,
            ftol_rel: None,
        }
    }

    pub fn ftol_abs(&mut self, ftol_abs: f64) -> &mut Self {
        self.ftol_abs = Some(ftol_abs);
        self
    }

    pub fn ftol_rel(&mut self, ftol_rel: f64) -> &mut Self {
        self.ftol_rel = Some(ftol_rel);
        self
    }

    pub fn max_eval(&mut self, max_eval: usize) -> &mut Self {
        self.max_eval = max_eval;
        self
    }

    pub fn xinit(&mut self, xinit: &ArrayView1<f64>) -> &mut Self {
        self.xinit = Some(xinit.to_owned());
        self
    }

    /// Run the bounded minimization from the configured start point.
    /// Returns the local minimum value and its location, kept within bounds
    /// by the underlying algorithm.
    pub fn minimize(&self) -> Result<(f64, Array1<f64>)> {
        let xinit = self
            .xinit
            .clone()
            .ok_or_else(|| InfillError::InvalidValue("local run without start point".to_string()))?
            .to_vec();
        let bounds: Vec<_> = self
            .bounds
            .outer_iter()
            .map(|row| (row[0], row[1]))
            .collect();

        match self.algo {
            LocalAlgorithm::Cobyla => {
                let cstrs: Vec<fn(&[f64], &mut InfillObjData) -> f64> = vec![];
                let res = cobyla::minimize(
                    |x: &[f64], u: &mut InfillObjData| (self.fun)(x, None, u),
                    &xinit,
                    &bounds,
                    &cstrs,
                    self.user_data.clone(),
                    self.max_eval,
                    RhoBeg::All(0.5),
                    Some(cobyla::StopTols {
                        ftol_rel: self.ftol_rel.unwrap_or(0.0),
                        ftol_abs: self.ftol_abs.unwrap_or(0.0),
                        ..cobyla::StopTols::default()
                    }),
                );
                match res {
                    Ok((_, x_opt, y_opt)) => Ok((y_opt, arr1(&x_opt))),
                    // Cobyla reports benign terminations (roundoff limited at
                    // an active bound, budget exhausted) through Err with the
                    // best point found attached; keep it when usable
                    Err((_, x_opt, y_opt)) if y_opt.is_finite() => Ok((y_opt, arr1(&x_opt))),
                    Err(_) => Err(InfillError::LocalOptimizerFailure(
                        "Cobyla run did not converge".to_string(),
                    )),
                }
            }
            LocalAlgorithm::Slsqp => {
                let cstrs: Vec<fn(&[f64], Option<&mut [f64]>, &mut InfillObjData) -> f64> = vec![];
                let res = slsqp::minimize(
                    self.fun,
                    &xinit,
                    &bounds,
                    &cstrs,
                    self.user_data.clone(),
                    self.max_eval,
                    Some(slsqp::StopTols {
                        ftol_rel: self.ftol_rel.unwrap_or(0.0),
                        ftol_abs: self.ftol_abs.unwrap_or(0.0),
                        ..slsqp::StopTols::default()
                    }),
                );
                match res {
                    Ok((_, x_opt, y_opt)) => Ok((y_opt, arr1(&x_opt))),
                    Err(_) => Err(InfillError::LocalOptimizerFailure(
                        "Slsqp run did not converge".to_string(),
                    )),
                }
            }
        }
    }
}
