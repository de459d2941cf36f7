//! The medium catalog and its seeding.

use chrono::Utc;

use posit_core::entities::{Employee, Medium, Person};
use posit_core::ids::{PREFIX_EMPLOYEE, PREFIX_MEDIUM};
use posit_db::UnitOfWork;

use crate::error::ServiceError;
use crate::seed::{EMPLOYEES, MEDIUMS};
use crate::{ConsultationService, credential};

impl ConsultationService {
    /// Every medium, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn list_mediums(&self) -> Result<Vec<Medium>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = uow.list_mediums().await.map_err(ServiceError::from);
        uow.finish(result).await
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn get_medium(&self, id: &str) -> Result<Option<Medium>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = uow.get_medium(id).await.map_err(ServiceError::from);
        uow.finish(result).await
    }

    /// Create the built-in employees and mediums.
    ///
    /// Does nothing and returns `false` when any medium already exists.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if hashing or the store fails; nothing is
    /// written in that case.
    pub async fn seed_catalog(&self) -> Result<bool, ServiceError> {
        let hashes = EMPLOYEES
            .iter()
            .map(|e| credential::hash(e.password))
            .collect::<Result<Vec<_>, _>>()?;
        let uow = self.db.begin().await?;
        let result = Self::seed_in(&uow, &hashes).await;
        let seeded = uow.finish(result).await?;
        if seeded {
            tracing::info!(
                employees = EMPLOYEES.len(),
                mediums = MEDIUMS.len(),
                "catalog seeded"
            );
        } else {
            tracing::debug!("catalog already present, seeding skipped");
        }
        Ok(seeded)
    }

    async fn seed_in(uow: &UnitOfWork<'_>, hashes: &[String]) -> Result<bool, ServiceError> {
        if uow.count_mediums().await? > 0 {
            return Ok(false);
        }
        let now = Utc::now();

        let mut medium_ids = Vec::with_capacity(MEDIUMS.len());
        for seed in &MEDIUMS {
            let medium = Medium {
                id: uow.generate_id(PREFIX_MEDIUM).await?,
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                profile: (seed.profile)(),
                employee_ids: Vec::new(),
                created_at: now,
            };
            uow.insert_medium(&medium).await?;
            medium_ids.push(medium.id);
        }

        for (seed, hash) in EMPLOYEES.iter().zip(hashes) {
            let employee = Employee {
                person: Person {
                    id: uow.generate_id(PREFIX_EMPLOYEE).await?,
                    first_name: seed.first_name.to_string(),
                    last_name: seed.last_name.to_string(),
                    email: seed.email.to_string(),
                    phone: seed.phone.to_string(),
                    created_at: now,
                },
                available: true,
                medium_ids: seed.mediums.iter().map(|&i| medium_ids[i].clone()).collect(),
            };
            uow.insert_employee(&employee, hash).await?;
        }
        Ok(true)
    }
}
