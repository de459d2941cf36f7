//! Statistics over stored conversations.

use posit_core::reports::{EmployeeShare, EmployeeTally, MediumTally};

use crate::ConsultationService;
use crate::error::ServiceError;

impl ConsultationService {
    /// Consultations per medium; mediums never consulted count zero.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn consultation_count_by_medium(&self) -> Result<Vec<MediumTally>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = uow
            .count_conversations_by_medium()
            .await
            .map_err(ServiceError::from);
        uow.finish(result).await
    }

    /// Consultations per employee; idle employees count zero.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn consultation_count_by_employee(
        &self,
    ) -> Result<Vec<EmployeeTally>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = uow
            .count_conversations_by_employee()
            .await
            .map_err(ServiceError::from);
        uow.finish(result).await
    }

    /// Each employee's fraction of all consultations. Empty when there are
    /// none at all.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn consultation_share_by_employee(
        &self,
    ) -> Result<Vec<EmployeeShare>, ServiceError> {
        let tallies = self.consultation_count_by_employee().await?;
        Ok(EmployeeShare::from_tallies(&tallies))
    }
}
