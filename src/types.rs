use crate::errors::Result;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Predicted values, standard deviations and their derivatives wrt x components
/// given as `(mean, std, dmean_dx, dstd_dx)` where gradients are `(n, nx)` matrices.
pub type ValStdGradients = (Array1<f64>, Array1<f64>, Array2<f64>, Array2<f64>);

/// Transformed values, variances and their derivatives wrt x components
/// given as `(mean, var, dmean_dx, dvar_dx)`.
pub type ValVarGradients = (Array1<f64>, Array1<f64>, Array2<f64>, Array2<f64>);

/// A query cost function returning for each row of x its cost
/// and the cost derivatives wrt x components.
pub type CostFn = Box<dyn Fn(&ArrayView2<f64>) -> (Array1<f64>, Array2<f64>) + Send + Sync>;

/// A change of variables mapping the latent output distribution of a surrogate
/// into probability space (used for non gaussian observation likelihoods)
pub trait ChangeOfVariables: Send + Sync {
    /// Maps predicted mean and standard deviation to their probability space counterparts
    fn forward(
        &self,
        mean: &ArrayView1<f64>,
        std: &ArrayView1<f64>,
    ) -> Result<(Array1<f64>, Array1<f64>)>;

    /// Maps predicted mean, standard deviation and their derivatives.
    ///
    /// Contrary to [`ChangeOfVariables::forward`], the variance (not the standard deviation)
    /// and its derivatives are returned.
    fn forward_with_gradients(
        &self,
        mean: &ArrayView1<f64>,
        std: &ArrayView1<f64>,
        dmean_dx: &ArrayView2<f64>,
        dstd_dx: &ArrayView2<f64>,
    ) -> Result<ValVarGradients>;
}

/// A trait for probabilistic surrogate models consumed by acquisition functions
///
/// x is expected to be a `(n, nx)` matrix where each row is a point to predict.
pub trait Surrogate: Send + Sync {
    /// Predict mean and standard deviation at given points
    fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)>;

    /// Predict mean, standard deviation and their derivatives at given points
    fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients>;

    /// Transform to apply to predictions before they are used by an acquisition function.
    ///
    /// Models with a gaussian observation likelihood have none (the default),
    /// models with a custom likelihood return the change of variables to probability space.
    fn output_transform(&self) -> Option<&dyn ChangeOfVariables> {
        None
    }

    /// Whether predictions have to be remapped to probability space.
    ///
    /// Acquisition functions remap predictions only when this returns true *and*
    /// an [output transform](Surrogate::output_transform) is available, hence overriding
    /// it to false disables the remapping of a model exposing a transform.
    fn requires_pspace_remap(&self) -> bool {
        self.output_transform().is_some()
    }
}

impl<S: Surrogate + ?Sized> Surrogate for Box<S> {
    fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        (**self).predict(x)
    }
    fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients> {
        (**self).predict_gradients(x)
    }
    fn output_transform(&self) -> Option<&dyn ChangeOfVariables> {
        (**self).output_transform()
    }
    fn requires_pspace_remap(&self) -> bool {
        (**self).requires_pspace_remap()
    }
}

impl<S: Surrogate + ?Sized> Surrogate for Arc<S> {
    fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        (**self).predict(x)
    }
    fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients> {
        (**self).predict_gradients(x)
    }
    fn output_transform(&self) -> Option<&dyn ChangeOfVariables> {
        (**self).output_transform()
    }
    fn requires_pspace_remap(&self) -> bool {
        (**self).requires_pspace_remap()
    }
}

/// A surrogate with a custom observation likelihood: predictions of the
/// underlying latent `model` are remapped with `transform` by acquisition functions.
#[derive(Clone, Debug)]
pub struct ProbabilitySpace<M, T> {
    model: M,
    transform: T,
}

impl<M: Surrogate, T: ChangeOfVariables> ProbabilitySpace<M, T> {
    /// Attach the change of variables `transform` to the latent `model`
    pub fn new(model: M, transform: T) -> Self {
        ProbabilitySpace { model, transform }
    }

    /// The underlying latent model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The change of variables to probability space
    pub fn transform(&self) -> &T {
        &self.transform
    }
}

impl<M: Surrogate, T: ChangeOfVariables> Surrogate for ProbabilitySpace<M, T> {
    fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        self.model.predict(x)
    }

    fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients> {
        self.model.predict_gradients(x)
    }

    fn output_transform(&self) -> Option<&dyn ChangeOfVariables> {
        Some(&self.transform)
    }
}

/// Optimizer used to optimize the acquisition function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InfillOptimizer {
    /// SLSQP optimizer (gradient based)
    Slsqp,
    /// Cobyla optimizer (gradient free)
    Cobyla,
}
