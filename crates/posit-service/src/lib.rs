//! # posit-service
//!
//! The POSIT'IF consultation service: registration and login, the medium
//! catalog, the consultation lifecycle, predictions, and statistics.
//!
//! Every public operation runs in exactly one [`posit_db::UnitOfWork`]: its
//! writes commit together or not at all. Notifications are sent only after
//! the commit succeeded.

mod accounts;
mod catalog;
mod consultation;
pub mod credential;
mod error;
mod notices;
mod predictions;
mod reporting;
mod seed;

#[cfg(test)]
mod test_support;

pub use consultation::{RequestOutcome, TerminateOutcome};
pub use error::ServiceError;

use std::sync::Arc;

use posit_db::PositDb;
use posit_notify::Notifier;
use posit_predict::PredictionGateway;

/// Entry point for every POSIT'IF operation.
pub struct ConsultationService {
    db: PositDb,
    notifier: Arc<dyn Notifier>,
    predictions: Arc<dyn PredictionGateway>,
    /// Address registration mails are sent from.
    sender: String,
}

impl ConsultationService {
    #[must_use]
    pub fn new(
        db: PositDb,
        notifier: Arc<dyn Notifier>,
        predictions: Arc<dyn PredictionGateway>,
        sender: impl Into<String>,
    ) -> Self {
        Self {
            db,
            notifier,
            predictions,
            sender: sender.into(),
        }
    }

    /// Open a local database and build a service on top of it.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the database cannot be opened or
    /// migrated.
    pub async fn open_local(
        path: &str,
        notifier: Arc<dyn Notifier>,
        predictions: Arc<dyn PredictionGateway>,
        sender: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        let db = PositDb::open_local(path).await?;
        Ok(Self::new(db, notifier, predictions, sender))
    }

    #[must_use]
    pub const fn db(&self) -> &PositDb {
        &self.db
    }
}
