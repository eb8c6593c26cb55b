use thiserror::Error;

/// A result type for acquisition function errors
pub type Result<T> = std::result::Result<T, AcqError>;

/// An error when building or evaluating an acquisition function
#[derive(Error, Debug)]
pub enum AcqError {
    /// When configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    /// When the surrogate model or its output transform fails
    #[error("Model error: {0}")]
    ModelError(String),
    /// When predictions have incompatible shapes (e.g. means and stds of different lengths)
    #[error(transparent)]
    ShapeError(#[from] ndarray::ShapeError),
    /// When a collaborator raises its own error type
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
