use crate::errors::{AcqError, Result};
use linfa::ParamGuard;
use serde::{Deserialize, Serialize};

/// Default exploration weight of lower confidence bound criteria
pub const DEFAULT_EXPLORATION_WEIGHT: f64 = 2.0;

/// LCB acquisition checked parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LcbValidParams {
    /// Weight of the standard deviation term, the greater the more explorative
    pub(crate) exploration_weight: f64,
    /// Number of outputs of the surrogate model (forwarded to the base acquisition contract)
    pub(crate) nb_output: usize,
}

impl Default for LcbValidParams {
    fn default() -> LcbValidParams {
        LcbValidParams {
            exploration_weight: DEFAULT_EXPLORATION_WEIGHT,
            nb_output: 1,
        }
    }
}

impl LcbValidParams {
    /// Get exploration weight
    pub fn exploration_weight(&self) -> f64 {
        self.exploration_weight
    }

    /// Get number of model outputs
    pub fn nb_output(&self) -> usize {
        self.nb_output
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
/// The set of parameters that can be specified for the
/// [LCB in probability space](crate::criteria::LcbPspace) acquisition.
pub struct LcbParams(LcbValidParams);

impl LcbParams {
    /// A constructor for LCB parameters with default values
    pub fn new() -> LcbParams {
        Self(LcbValidParams::default())
    }

    /// A constructor for LCB parameters from validated parameters
    pub fn new_from_valid(params: &LcbValidParams) -> Self {
        Self(params.clone())
    }

    /// Set exploration weight.
    ///
    /// Should be non negative, 0 means pure exploitation.
    pub fn exploration_weight(mut self, exploration_weight: f64) -> Self {
        self.0.exploration_weight = exploration_weight;
        self
    }

    /// Set the number of outputs of the surrogate model
    pub fn nb_output(mut self, nb_output: usize) -> Self {
        self.0.nb_output = nb_output;
        self
    }
}

impl From<LcbValidParams> for LcbParams {
    fn from(valid: LcbValidParams) -> Self {
        LcbParams(valid)
    }
}

impl ParamGuard for LcbParams {
    type Checked = LcbValidParams;
    type Error = AcqError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        let w = self.0.exploration_weight;
        if !w.is_finite() || w < 0. {
            return Err(AcqError::InvalidConfigError(format!(
                "exploration weight should be a finite non negative value, got {w}"
            )));
        }
        if self.0.nb_output == 0 {
            return Err(AcqError::InvalidConfigError(
                "`nb_output` cannot be 0!".to_string(),
            ));
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
