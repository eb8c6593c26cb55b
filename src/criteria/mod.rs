//! Available acquisition functions to be used in a bayesian optimization loop
mod lcb_pspace;

pub use lcb_pspace::{LCB_PSPACE_NAME, LcbPspace, LcbPspaceFactory};

use crate::errors::Result;
use ndarray::{Array1, Array2, ArrayView2};

/// A trait for acquisition functions which maximum location will
/// determine the next most promising point to evaluate.
///
/// x is expected to be a `(n, nx)` matrix, values are returned for each row.
pub trait Acquisition: Send + Sync {
    /// Name of the acquisition function
    fn name(&self) -> &'static str;

    /// Whether analytical gradients are reliable enough to be used by the optimizer
    fn analytical_gradient_prediction(&self) -> bool;

    /// Number of outputs of the underlying surrogate model
    fn nb_output(&self) -> usize;

    /// Acquisition values to be maximized
    fn score(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>>;

    /// Acquisition values and their derivatives wrt x components (one row per point)
    fn score_with_gradients(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array2<f64>)>;

    /// Expected value part of the acquisition, without the uncertainty part
    fn score_mean_only(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>>;

    /// The two parts (expected value, std) combined by the acquisition
    fn score_components(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)>;

    /// Values handed to an optimizer which minimizes, that is the opposite
    /// of the acquisition values (the query cost being unit)
    fn acquisition_function(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>> {
        Ok(-self.score(x)?)
    }

    /// Values and derivatives handed to an optimizer which minimizes
    fn acquisition_function_with_gradients(
        &self,
        x: &ArrayView2<f64>,
    ) -> Result<(Array1<f64>, Array2<f64>)> {
        let (f, df) = self.score_with_gradients(x)?;
        Ok((-f, -df))
    }
}

impl std::fmt::Debug for dyn Acquisition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}
