//! Analytic surrogates and transforms used by unit tests
use crate::errors::{AcqError, Result};
use crate::types::{ChangeOfVariables, Surrogate, ValStdGradients, ValVarGradients};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

/// Predicts the same mean and std everywhere
#[derive(Clone, Debug)]
pub(crate) struct ConstantModel {
    pub(crate) mean: f64,
    pub(crate) std: f64,
}

impl Surrogate for ConstantModel {
    fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        Ok((
            Array1::from_elem(x.nrows(), self.mean),
            Array1::from_elem(x.nrows(), self.std),
        ))
    }

    fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients> {
        let (mean, std) = self.predict(x)?;
        Ok((mean, std, Array2::zeros(x.dim()), Array2::zeros(x.dim())))
    }
}

/// mean(x) = sum((x_i - 1)^2), std(x) = 0.5 + 0.25 * sin(sum(x_i))^2
#[derive(Clone, Debug)]
pub(crate) struct QuadraticModel;

impl Surrogate for QuadraticModel {
    fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        let mean = x.map_axis(Axis(1), |xi| xi.mapv(|v| (v - 1.) * (v - 1.)).sum());
        let std = x.map_axis(Axis(1), |xi| 0.5 + 0.25 * xi.sum().sin().powi(2));
        Ok((mean, std))
    }

    fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients> {
        let (mean, std) = self.predict(x)?;
        let dmean = x.mapv(|v| 2. * (v - 1.));
        let mut dstd: Array2<f64> = Array2::zeros(x.dim());
        for (mut di, xi) in dstd.rows_mut().into_iter().zip(x.rows()) {
            di.fill(0.25 * (2. * xi.sum()).sin());
        }
        Ok((mean, std, dmean, dstd))
    }
}

/// Predicts one std more than the number of points
#[derive(Clone, Debug)]
pub(crate) struct MismatchedModel;

impl Surrogate for MismatchedModel {
    fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        Ok((Array1::ones(x.nrows()), Array1::ones(x.nrows() + 1)))
    }

    fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients> {
        let (mean, std) = self.predict(x)?;
        Ok((mean, std, Array2::zeros(x.dim()), Array2::zeros(x.dim())))
    }
}

/// Always fails to predict
#[derive(Clone, Debug)]
pub(crate) struct FailingModel;

impl Surrogate for FailingModel {
    fn predict(&self, _x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
        Err(AcqError::ModelError("prediction failed".to_string()))
    }

    fn predict_gradients(&self, _x: &ArrayView2<f64>) -> Result<ValStdGradients> {
        Err(AcqError::ModelError("gradient prediction failed".to_string()))
    }
}

/// Maps (m, s) to (tanh(m), s * (1 - tanh(m)^2)), i.e. a first order
/// propagation of the std through tanh
#[derive(Clone, Debug)]
pub(crate) struct TanhTransform;

impl ChangeOfVariables for TanhTransform {
    fn forward(
        &self,
        mean: &ArrayView1<f64>,
        std: &ArrayView1<f64>,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        let t = mean.mapv(f64::tanh);
        let g = t.mapv(|t| 1. - t * t);
        let std = &g * std;
        Ok((t, std))
    }

    fn forward_with_gradients(
        &self,
        mean: &ArrayView1<f64>,
        std: &ArrayView1<f64>,
        dmean_dx: &ArrayView2<f64>,
        dstd_dx: &ArrayView2<f64>,
    ) -> Result<ValVarGradients> {
        let (t, s) = self.forward(mean, std)?;
        let g = t.mapv(|t| 1. - t * t).insert_axis(Axis(1));
        let dt = &g * dmean_dx;
        let dg = t.mapv(|t| -2. * t).insert_axis(Axis(1)) * &dt;
        let ds = &g * dstd_dx + &std.insert_axis(Axis(1)) * &dg;
        let var = s.mapv(|v| v * v);
        let dvar = s.mapv(|v| 2. * v).insert_axis(Axis(1)) * &ds;
        Ok((t, var, dt, dvar))
    }
}

/// Always fails to transform
#[derive(Clone, Debug)]
pub(crate) struct FailingTransform;

impl ChangeOfVariables for FailingTransform {
    fn forward(
        &self,
        _mean: &ArrayView1<f64>,
        _std: &ArrayView1<f64>,
    ) -> Result<(Array1<f64>, Array1<f64>)> {
        Err(anyhow::anyhow!("transform failed").into())
    }

    fn forward_with_gradients(
        &self,
        _mean: &ArrayView1<f64>,
        _std: &ArrayView1<f64>,
        _dmean_dx: &ArrayView2<f64>,
        _dstd_dx: &ArrayView2<f64>,
    ) -> Result<ValVarGradients> {
        Err(anyhow::anyhow!("transform failed").into())
    }
}
