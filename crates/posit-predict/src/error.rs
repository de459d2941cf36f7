use thiserror::Error;

/// Errors from a prediction gateway.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PredictionError {
    /// A profile key the prediction depends on is blank.
    #[error("missing {0} for prediction")]
    MissingKey(&'static str),

    /// The gateway could not answer.
    #[error("prediction source unavailable: {0}")]
    Unavailable(String),
}
