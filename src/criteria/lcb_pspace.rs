use crate::ACQBOX_LOG;
use crate::criteria::Acquisition;
use crate::errors::Result;
use crate::parameters::{LcbParams, LcbValidParams};
use crate::types::{ChangeOfVariables, CostFn, InfillOptimizer, Surrogate};
use crate::utils::{
    check_nb_points, check_xlimits, lcb_combine, lcb_combine_gradients, std_from_var_gradients,
};

use env_logger::{Builder, Env};
use linfa::ParamGuard;
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Data, Ix2};
use std::sync::Arc;

/// Name of the lower confidence bound in probability space acquisition
pub const LCB_PSPACE_NAME: &str = "LCB_pspace";

/// Builder of the [LcbPspace] acquisition function.
///
/// ```
/// # use acqbox::{LcbPspaceFactory, Acquisition, InfillOptimizer, Surrogate, ValStdGradients, Result};
/// # use ndarray::{array, Array1, Array2, ArrayView2};
/// struct Flat;
///
/// impl Surrogate for Flat {
///     fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
///         Ok((Array1::ones(x.nrows()), Array1::from_elem(x.nrows(), 0.5)))
///     }
///     fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients> {
///         let (m, s) = self.predict(x)?;
///         Ok((m, s, Array2::zeros(x.dim()), Array2::zeros(x.dim())))
///     }
/// }
///
/// let lcb = LcbPspaceFactory::with_model(Flat)
///     .configure(|params| params.exploration_weight(2.))
///     .optimizer(InfillOptimizer::Cobyla)
///     .within(&array![[0., 25.]])
///     .expect("LCB configured");
/// let values = lcb.score(&array![[3.]].view()).expect("LCB values");
/// assert_eq!(values[0], 0.0);
/// ```
pub struct LcbPspaceFactory {
    model: Arc<dyn Surrogate>,
    optimizer: Option<InfillOptimizer>,
    cost_with_gradients: Option<CostFn>,
    params: LcbParams,
}

impl LcbPspaceFactory {
    /// Acquisition over predictions of the given surrogate `model`
    pub fn with_model<S: Surrogate + 'static>(model: S) -> Self {
        Self::with_shared_model(Arc::new(model))
    }

    /// Acquisition over predictions of a surrogate `model` shared with the caller
    pub fn with_shared_model(model: Arc<dyn Surrogate>) -> Self {
        LcbPspaceFactory {
            model,
            optimizer: None,
            cost_with_gradients: None,
            params: LcbParams::new(),
        }
    }

    /// Set acquisition parameters
    pub fn configure<F: FnOnce(LcbParams) -> LcbParams>(mut self, init: F) -> Self {
        self.params = init(self.params);
        self
    }

    /// Set the optimizer in charge of the acquisition maximization.
    /// It is kept for reference and not used by the acquisition itself.
    pub fn optimizer(mut self, optimizer: InfillOptimizer) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    /// Set a query cost function. LCB does not handle costs: the function
    /// is accepted but ignored, a warning is emitted when building the acquisition.
    pub fn cost_with_gradients<C>(mut self, cost: C) -> Self
    where
        C: Fn(&ArrayView2<f64>) -> (Array1<f64>, Array2<f64>) + Send + Sync + 'static,
    {
        self.cost_with_gradients = Some(Box::new(cost));
        self
    }

    /// Build the acquisition over the search space specified by `xlimits`
    /// as a `[[lower, upper], ...]` array, one row per input component.
    pub fn within(self, xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>) -> Result<LcbPspace> {
        let env = Env::new().filter_or(ACQBOX_LOG, "warn");
        let mut builder = Builder::from_env(env);
        let builder = builder.target(env_logger::Target::Stdout);
        builder.try_init().ok();

        let params = self.params.check()?;
        check_xlimits(xlimits)?;
        if self.cost_with_gradients.is_some() {
            warn!("The set cost function is ignored! LCB acquisition does not make sense with cost.");
        }
        debug!(
            "{LCB_PSPACE_NAME} with exploration weight {} (pspace remap: {})",
            params.exploration_weight(),
            self.model.requires_pspace_remap() && self.model.output_transform().is_some()
        );
        Ok(LcbPspace {
            model: self.model,
            xlimits: xlimits.to_owned(),
            optimizer: self.optimizer,
            params,
        })
    }
}

/// GP lower confidence bound computed in probability space rather than in
/// outcome space when the surrogate has a non gaussian likelihood.
///
/// Values are `-mean + exploration_weight * std` where `(mean, std)` are the
/// surrogate predictions, remapped beforehand with the surrogate
/// [output transform](Surrogate::output_transform) if any.
/// Higher values are more promising.
#[derive(Clone)]
pub struct LcbPspace {
    model: Arc<dyn Surrogate>,
    xlimits: Array2<f64>,
    optimizer: Option<InfillOptimizer>,
    params: LcbValidParams,
}

impl LcbPspace {
    /// Analytical gradients are available but not validated enough to drive an optimizer
    pub const ANALYTICAL_GRADIENT_PREDICTION: bool = false;

    /// Constructor taking the construction parameters shared by acquisition functions.
    ///
    /// `optimizer` is only kept for reference and `cost_with_gradients` is ignored
    /// (see [LcbPspaceFactory::cost_with_gradients]).
    pub fn new(
        model: Arc<dyn Surrogate>,
        xlimits: &ArrayBase<impl Data<Elem = f64>, Ix2>,
        optimizer: Option<InfillOptimizer>,
        cost_with_gradients: Option<CostFn>,
        exploration_weight: f64,
        nb_output: usize,
    ) -> Result<Self> {
        let factory = LcbPspaceFactory {
            model,
            optimizer,
            cost_with_gradients,
            params: LcbParams::new()
                .exploration_weight(exploration_weight)
                .nb_output(nb_output),
        };
        factory.within(xlimits)
    }

    /// Weight of the standard deviation term
    pub fn exploration_weight(&self) -> f64 {
        self.params.exploration_weight()
    }

    /// Checked parameters of the acquisition
    pub fn params(&self) -> &LcbValidParams {
        &self.params
    }

    /// The surrogate model
    pub fn model(&self) -> &dyn Surrogate {
        self.model.as_ref()
    }

    /// Search space as `[[lower, upper], ...]`
    pub fn xlimits(&self) -> &Array2<f64> {
        &self.xlimits
    }

    /// The optimizer declared at construction if any
    pub fn optimizer(&self) -> Option<InfillOptimizer> {
        self.optimizer
    }

    /// Change of variables to apply when the model requires a probability space remap
    fn pspace_transform(&self) -> Option<&dyn ChangeOfVariables> {
        if self.model.requires_pspace_remap() {
            self.model.output_transform()
        } else {
            None
        }
    }

    /// Predictions remapped in probability space when the model requires it
    fn pspace_predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        let (mean, std) = self.model.predict(x)?;
        match self.pspace_transform() {
            Some(transform) => transform.forward(&mean.view(), &std.view()),
            None => Ok((mean, std)),
        }
    }
}

impl std::fmt::Debug for LcbPspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LcbPspace")
            .field("params", &self.params)
            .field("xlimits", &self.xlimits)
            .field("optimizer", &self.optimizer)
            .field("pspace_remap", &self.pspace_transform().is_some())
            .finish()
    }
}

impl Acquisition for LcbPspace {
    fn name(&self) -> &'static str {
        LCB_PSPACE_NAME
    }

    fn analytical_gradient_prediction(&self) -> bool {
        Self::ANALYTICAL_GRADIENT_PREDICTION
    }

    fn nb_output(&self) -> usize {
        self.params.nb_output()
    }

    fn score(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>> {
        let (mean, std) = self.pspace_predict(x)?;
        lcb_combine(&mean, &std, self.exploration_weight())
    }

    /// When the model has an output transform, the transform gives back variances
    /// from which standard deviations derivatives are computed as `dvar / (2 * std)`:
    /// gradients are not finite where std vanishes.
    fn score_with_gradients(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array2<f64>)> {
        let (mean, std, dmean_dx, dstd_dx) = self.model.predict_gradients(x)?;
        let (mean, std, dmean_dx, dstd_dx) = match self.pspace_transform() {
            Some(transform) => {
                let (mean, var, dmean_dx, dvar_dx) = transform.forward_with_gradients(
                    &mean.view(),
                    &std.view(),
                    &dmean_dx.view(),
                    &dstd_dx.view(),
                )?;
                let (std, dstd_dx) = std_from_var_gradients(&var, &dvar_dx)?;
                (mean, std, dmean_dx, dstd_dx)
            }
            None => (mean, std, dmean_dx, dstd_dx),
        };
        check_nb_points(mean.len(), dmean_dx.nrows())?;
        let w = self.exploration_weight();
        Ok((
            lcb_combine(&mean, &std, w)?,
            lcb_combine_gradients(&dmean_dx, &dstd_dx, w)?,
        ))
    }

    fn score_mean_only(&self, x: &ArrayView2<f64>) -> Result<Array1<f64>> {
        let (mean, std) = self.pspace_predict(x)?;
        check_nb_points(mean.len(), std.len())?;
        Ok(mean)
    }

    fn score_components(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        let (mean, std) = self.pspace_predict(x)?;
        check_nb_points(mean.len(), std.len())?;
        Ok((mean, std))
    }
}
