//! # posit-predict
//!
//! Prediction gateway for POSIT'IF: turns a client's lucky color, totem
//! animal and three 1-4 scores into love, health and work predictions.

mod error;
mod static_table;

pub use error::PredictionError;
pub use static_table::StaticPredictions;

use posit_core::score::Score;
use serde::Serialize;

/// The three predictions, always in love, health, work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predictions {
    pub love: String,
    pub health: String,
    pub work: String,
}

/// Source of predictions.
pub trait PredictionGateway: Send + Sync {
    /// # Errors
    ///
    /// Returns `PredictionError` if no prediction can be produced for these
    /// inputs.
    fn predict(
        &self,
        color: &str,
        animal: &str,
        love: Score,
        health: Score,
        work: Score,
    ) -> Result<Predictions, PredictionError>;
}
