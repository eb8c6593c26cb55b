//! This library implements acquisition functions used in a bayesian optimization loop
//! to select the next point to evaluate from the predictions of a probabilistic surrogate.
//!
//! The acquisition currently available is the GP Lower Confidence Bound computed in
//! probability space ([LcbPspace]): values are `-mean + exploration_weight * std`,
//! where the predicted mean and standard deviation are first remapped to probability
//! space when the surrogate declares a non gaussian observation likelihood
//! (see [Surrogate::output_transform] and [ProbabilitySpace]).
//!
//! Surrogate models, the change of variables and the optimizer maximizing the
//! acquisition are provided by the caller through the [Surrogate] and
//! [ChangeOfVariables] traits.
//!
//! # Example
//!
//! ```
//! use acqbox::{Acquisition, LcbPspaceFactory, Result, Surrogate, ValStdGradients};
//! use ndarray::{array, Array1, ArrayView2, Axis};
//!
//! // A one-dimensional analytical model: mean x^2, std 0.1 + x^2 / 10
//! struct Parabola;
//!
//! impl Surrogate for Parabola {
//!     fn predict(&self, x: &ArrayView2<f64>) -> Result<(Array1<f64>, Array1<f64>)> {
//!         let x = x.column(0);
//!         Ok((x.mapv(|v| v * v), x.mapv(|v| 0.1 + v * v / 10.)))
//!     }
//!
//!     fn predict_gradients(&self, x: &ArrayView2<f64>) -> Result<ValStdGradients> {
//!         let (mean, std) = self.predict(x)?;
//!         let dmean = x.mapv(|v| 2. * v);
//!         let dstd = x.mapv(|v| v / 5.);
//!         Ok((mean, std, dmean, dstd))
//!     }
//! }
//!
//! let lcb = LcbPspaceFactory::with_model(Parabola)
//!     .configure(|params| params.exploration_weight(1.))
//!     .within(&array![[-1., 1.]])
//!     .expect("LCB configured");
//!
//! let x = Array1::linspace(-1., 1., 11).insert_axis(Axis(1));
//! let values = lcb.score(&x.view()).expect("LCB values");
//! // the best candidate is where the predicted mean is the lowest
//! assert_eq!(values.iter().cloned().fold(f64::MIN, f64::max), values[5]);
//! ```
//!
//! Logging is done with the [log] facade, the verbosity being controlled
//! with the [ACQBOX_LOG] environment variable (`ACQBOX_LOG=debug` for instance).
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod criteria;

mod errors;
mod parameters;
mod types;
mod utils;

pub use crate::criteria::*;
pub use crate::errors::*;
pub use crate::parameters::*;
pub use crate::types::*;

/// Env variable to set the log level (`error`, `warn`, `info`, `debug`, `trace`)
pub const ACQBOX_LOG: &str = "ACQBOX_LOG";
