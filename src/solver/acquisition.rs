use crate::errors::{InfillError, Result};
use crate::optimizers::{LocalOptimizer, MAX_EVAL_DEFAULT};
use crate::surrogate::SurrogateModel;
use crate::types::{InfillObjData, InfillStrategy, LocalAlgorithm};
use crate::utils::check_xlimits;

use finitediff::FiniteDiff;
use log::{debug, info, warn};
use ndarray::{Array, Array1, Array2, ArrayBase, ArrayView, Data, Ix1, Ix2};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use ndarray_stats::QuantileExt;
use rand_xoshiro::Xoshiro256Plus;
use serde::{Deserialize, Serialize};

/// Default number of random restarts of the local optimizer
pub const N_START_DEFAULT: usize = 10;
/// Default LCB exploration coefficient
pub const KAPPA_DEFAULT: f64 = 2.;

/// Multistart minimizer of the infill criterion.
///
/// Random starting points are drawn uniformly in the domain, ranked with a
/// single batched surrogate prediction, then every one of them is refined
/// with a box-constrained local optimizer; the best refined candidate wins.
/// The multistart redundancy is the only safeguard against criterion local
/// optima, there is no retry beyond it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AcquisitionOptimizer {
    strategy: InfillStrategy,
    local_algo: LocalAlgorithm,
    n_start: usize,
    kappa: f64,
    max_eval: usize,
    seed: Option<u64>,
}

impl Default for AcquisitionOptimizer {
    fn default() -> Self {
        AcquisitionOptimizer::new(InfillStrategy::Ei)
    }
}

impl AcquisitionOptimizer {
    pub fn new(strategy: InfillStrategy) -> Self {
        AcquisitionOptimizer {
            strategy,
            local_algo: LocalAlgorithm::Slsqp,
            n_start: N_START_DEFAULT,
            kappa: KAPPA_DEFAULT,
            max_eval: MAX_EVAL_DEFAULT,
            seed: None,
        }
    }

    /// Sets the infill criterion to minimize
    pub fn strategy(mut self, strategy: InfillStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the local algorithm refining each start
    pub fn local_algorithm(mut self, local_algo: LocalAlgorithm) -> Self {
        self.local_algo = local_algo;
        self
    }

    /// Sets the number of random restarts (> 0)
    pub fn n_start(mut self, n_start: usize) -> Self {
        self.n_start = n_start;
        self
    }

    /// Sets the LCB exploration coefficient (>= 0)
    pub fn kappa(mut self, kappa: f64) -> Self {
        self.kappa = kappa;
        self
    }

    /// Sets the evaluation budget of each local run
    pub fn max_eval(mut self, max_eval: usize) -> Self {
        self.max_eval = max_eval;
        self
    }

    /// Sets the random generator seed for reproducibility; without a seed
    /// the generator is taken from global entropy
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Find the next promising point by minimizing the infill criterion
    /// within `xlimits`, a `(d, 2)` matrix whose ith row is the
    /// `[lower_bound, upper_bound]` interval of the ith component of x.
    ///
    /// `y_data` are the observed objective values; only the incumbent
    /// `min(y_data)` is used, and only by expected improvement.
    ///
    /// Returns the best candidate and its minimized criterion value, the
    /// negated log-EI for [`InfillStrategy::Ei`] and the bound itself for
    /// [`InfillStrategy::Lcb`]. For a fixed seed the result is deterministic
    /// over repeated calls.
    pub fn find_next_point(
        &self,
        model: &dyn SurrogateModel,
        xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
        y_data: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    ) -> Result<(Array1<f64>, f64)> {
        let xlimits = xlimits.to_owned();
        check_xlimits(&xlimits.view())?;
        if self.n_start == 0 {
            return Err(InfillError::InvalidValue(
                "n_start must be positive".to_string(),
            ));
        }

        let fmin = match self.strategy {
            InfillStrategy::Ei => {
                if y_data.is_empty() {
                    return Err(InfillError::EmptyDataset);
                }
                *y_data
                    .min()
                    .map_err(|_| InfillError::InvalidValue("incumbent is undefined".to_string()))?
            }
            // LCB does not use the incumbent
            InfillStrategy::Lcb => f64::NAN,
        };

        let mut rng = match self.seed {
            Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
            None => Xoshiro256Plus::from_entropy(),
        };
        let x_start = self.sample_starts(&xlimits, &mut rng);

        // The one batched surrogate call: rank starts before any local run
        let (means, variances) = model.predict(&x_start.view())?;
        let acq_start: Vec<f64> = means
            .iter()
            .zip(variances.iter())
            .map(|(&m, &v)| self.strategy.objective(m, v.max(0.).sqrt(), fmin, self.kappa))
            .collect();
        if let Some((i_best, crit)) = acq_start
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        {
            debug!("Multistart ranking: start {i_best} is most promising (criterion {crit})");
        }

        let obj = |x: &[f64], gradient: Option<&mut [f64]>, params: &mut InfillObjData| -> f64 {
            // Cobyla may pass NaNs
            if x.iter().any(|v| v.is_nan()) {
                return f64::INFINITY;
            }
            let (fmin, kappa) = (params.fmin, params.kappa);
            if let Some(grad) = gradient {
                let f = |x: &Vec<f64>| -> f64 { self.eval_infill_obj(x, model, fmin, kappa) };
                grad[..].copy_from_slice(&x.to_vec().central_diff(&f));
            }
            self.eval_infill_obj(x, model, fmin, kappa)
        };
        let infill_data = InfillObjData {
            fmin,
            kappa: self.kappa,
        };

        info!("Optimize infill criterion...");
        let mut best: Option<(f64, Array1<f64>)> = None;
        for (i, x0) in x_start.outer_iter().enumerate() {
            let res = LocalOptimizer::new(self.local_algo, &obj, &infill_data, &xlimits)
                .xinit(&x0)
                .max_eval(self.max_eval)
                .ftol_rel(1e-4)
                .ftol_abs(1e-4)
                .minimize();
            match res {
                Ok((f_opt, x_opt)) if f_opt.is_finite() => {
                    debug!("Start {i} converged to {f_opt} at {x_opt}");
                    // strict comparison keeps the first encountered minimum on ties
                    if best.as_ref().map_or(true, |(f_best, _)| f_opt < *f_best) {
                        best = Some((f_opt, x_opt));
                    }
                }
                Ok((f_opt, _)) => warn!("Start {i} discarded (criterion value {f_opt})"),
                Err(err) => warn!("Start {i} failed: {err}"),
            }
        }

        match best {
            Some((f_opt, x_opt)) => {
                info!("Infill criterion minimum {f_opt} at x = {x_opt}");
                Ok((x_opt, f_opt))
            }
            None => Err(InfillError::AllStartsFailed),
        }
    }

    /// Draw `n_start` points uniformly in the domain, row by row, so that a
    /// fixed seed yields the same first rows whatever `n_start`.
    fn sample_starts(&self, xlimits: &Array2<f64>, rng: &mut Xoshiro256Plus) -> Array2<f64> {
        let dim = xlimits.nrows();
        let lower = xlimits.column(0);
        let width = &xlimits.column(1) - &lower;
        let unit = Array::random_using((self.n_start, dim), Uniform::new(0., 1.), rng);
        unit * &width + &lower
    }

    fn eval_infill_obj(&self, x: &[f64], model: &dyn SurrogateModel, fmin: f64, kappa: f64) -> f64 {
        let pt = ArrayView::from_shape((1, x.len()), x).unwrap();
        match model.predict(&pt) {
            Ok((means, variances)) => {
                let sigma = variances[0].max(0.).sqrt();
                self.strategy.objective(means[0], sigma, fmin, kappa)
            }
            Err(_) => f64::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1, ArrayView2};

    /// Quadratic mean bowl with constant predictive variance
    struct Paraboloid {
        center: Array1<f64>,
        variance: f64,
    }

    impl SurrogateModel for Paraboloid {
        fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
            let means = x
                .outer_iter()
                .map(|row| {
                    row.iter()
                        .zip(self.center.iter())
                        .map(|(v, c)| (v - c) * (v - c))
                        .sum()
                })
                .collect();
            let variances = Array1::from_elem(x.nrows(), self.variance);
            Ok((means, variances))
        }
    }

    /// Fails on pointwise queries, succeeds on the batched ranking call
    struct BatchOnly;

    impl SurrogateModel for BatchOnly {
        fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
            if x.nrows() == 1 {
                return Err(InfillError::SurrogateError("pointwise".to_string()));
            }
            Ok((Array1::zeros(x.nrows()), Array1::ones(x.nrows())))
        }
    }

    fn bowl() -> Paraboloid {
        Paraboloid {
            center: array![0.3],
            variance: 1e-4,
        }
    }

    #[test]
    fn test_lcb_finds_mean_minimum() {
        let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb).seed(42);
        let (x_opt, value) = acq
            .find_next_point(&bowl(), &array![[0., 1.]], &array![0.5])
            .expect("next point");
        assert_abs_diff_eq!(0.3, x_opt[0], epsilon = 1e-2);
        // constant sigma shifts the bound below the mean minimum
        assert_abs_diff_eq!(-2. * 1e-2, value, epsilon = 1e-3);
    }

    #[test]
    fn test_ei_finds_mean_minimum_with_constant_sigma() {
        // constant predictive uncertainty: EI is maximal where the mean is lowest
        let acq = AcquisitionOptimizer::new(InfillStrategy::Ei).seed(42);
        let (x_opt, value) = acq
            .find_next_point(&bowl(), &array![[0., 1.]], &array![0.6, 0.5, 0.8])
            .expect("next point");
        assert_abs_diff_eq!(0.3, x_opt[0], epsilon = 1e-2);
        assert!(value.is_finite());
    }

    #[test]
    fn test_lcb_without_observations() {
        // LCB does not need an incumbent
        let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb).seed(0);
        let empty = Array1::<f64>::zeros(0);
        let (x_opt, _) = acq
            .find_next_point(&bowl(), &array![[0., 1.]], &empty)
            .expect("next point");
        assert_abs_diff_eq!(0.3, x_opt[0], epsilon = 1e-2);
    }

    #[test]
    fn test_ei_requires_observations() {
        let acq = AcquisitionOptimizer::new(InfillStrategy::Ei).seed(0);
        let empty = Array1::<f64>::zeros(0);
        let err = acq
            .find_next_point(&bowl(), &array![[0., 1.]], &empty)
            .unwrap_err();
        assert!(matches!(err, InfillError::EmptyDataset));
    }

    #[test]
    fn test_degenerate_bounds() {
        let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb).seed(0);
        let err = acq
            .find_next_point(&bowl(), &array![[1., 0.]], &array![0.5])
            .unwrap_err();
        assert!(matches!(err, InfillError::DegenerateBounds { index: 0, .. }));
    }

    #[test]
    fn test_result_stays_within_bounds() {
        // unconstrained criterion minimum lies outside the domain
        let model = Paraboloid {
            center: array![3., -2.],
            variance: 1e-4,
        };
        let xlimits = array![[0., 1.], [0., 1.]];
        let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb).seed(7);
        let (x_opt, _) = acq
            .find_next_point(&model, &xlimits, &array![0.5])
            .expect("next point");
        for (v, row) in x_opt.iter().zip(xlimits.outer_iter()) {
            assert!(*v >= row[0] - 1e-6 && *v <= row[1] + 1e-6);
        }
        assert_abs_diff_eq!(1., x_opt[0], epsilon = 1e-2);
        assert_abs_diff_eq!(0., x_opt[1], epsilon = 1e-2);
    }

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let acq = AcquisitionOptimizer::new(InfillStrategy::Ei).seed(42);
        let y = array![0.6, 0.5, 0.8];
        let (x1, v1) = acq
            .find_next_point(&bowl(), &array![[0., 1.]], &y)
            .expect("next point");
        let (x2, v2) = acq
            .find_next_point(&bowl(), &array![[0., 1.]], &y)
            .expect("next point");
        assert_eq!(x1, x2);
        assert_eq!(v1, v2);
    }

    #[test]
    fn test_more_starts_never_worsen() {
        // a fixed seed draws starts row by row, so n_start = k prefixes n_start = k + 1
        let model = Paraboloid {
            center: array![0.7, 0.2],
            variance: 1e-3,
        };
        let xlimits = array![[0., 1.], [0., 1.]];
        let y = array![0.5];
        let mut previous = f64::INFINITY;
        for n_start in [1, 2, 5, 10] {
            let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb)
                .n_start(n_start)
                .seed(42);
            let (_, value) = acq
                .find_next_point(&model, &xlimits, &y)
                .expect("next point");
            assert!(value <= previous + 1e-12);
            previous = value;
        }
    }

    #[test]
    fn test_kappa_threads_through_local_runs() {
        // kappa = 0 degenerates LCB to the mean: the bound at the bowl center is 0
        let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb).kappa(0.).seed(42);
        let (x_opt, value) = acq
            .find_next_point(&bowl(), &array![[0., 1.]], &array![0.5])
            .expect("next point");
        assert_abs_diff_eq!(0.3, x_opt[0], epsilon = 1e-2);
        assert_abs_diff_eq!(0., value, epsilon = 1e-3);
    }

    #[test]
    fn test_cobyla_keeps_candidates_at_active_bound() {
        // criterion minimum sits on the boundary, where Cobyla runs often
        // end roundoff limited; their candidates must stay in the pool
        let model = Paraboloid {
            center: array![2.],
            variance: 1e-4,
        };
        let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb)
            .local_algorithm(LocalAlgorithm::Cobyla)
            .seed(42);
        let (x_opt, _) = acq
            .find_next_point(&model, &array![[0., 1.]], &array![0.5])
            .expect("next point");
        assert!(x_opt[0] >= 0. && x_opt[0] <= 1. + 1e-6);
        assert_abs_diff_eq!(1., x_opt[0], epsilon = 1e-2);
    }

    #[test]
    fn test_all_starts_failed() {
        let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb).seed(0);
        let err = acq
            .find_next_point(&BatchOnly, &array![[0., 1.]], &array![0.5])
            .unwrap_err();
        assert!(matches!(err, InfillError::AllStartsFailed));
    }

    #[test]
    fn test_zero_starts_rejected() {
        let acq = AcquisitionOptimizer::new(InfillStrategy::Lcb).n_start(0);
        let err = acq
            .find_next_point(&bowl(), &array![[0., 1.]], &array![0.5])
            .unwrap_err();
        assert!(matches!(err, InfillError::InvalidValue(_)));
    }
}
