//! Employee repository.
//!
//! Employees, their medium capabilities, and the availability flag used to
//! hand out consultations.

use posit_core::entities::Employee;
use posit_core::enums::PersonRole;

use crate::error::DatabaseError;
use crate::helpers::get_id_list;
use crate::repos::persons::{PERSON_COLS, PERSON_COL_COUNT, row_to_person};
use crate::unit_of_work::UnitOfWork;

const EMPLOYEE_COLS: &str = "e.available, \
     (SELECT group_concat(em.medium_id, ',') FROM employee_mediums em WHERE em.employee_id = e.person_id)";

/// Result of trying to reserve an employee for a medium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// This employee was available and is now marked unavailable.
    Claimed(String),
    /// Capable employees exist but none is available.
    AllBusy,
    /// No employee can impersonate the medium.
    NoneCapable,
}

fn row_to_employee(row: &libsql::Row) -> Result<Employee, DatabaseError> {
    let base = PERSON_COL_COUNT;
    Ok(Employee {
        person: row_to_person(row)?,
        available: row.get::<i64>(base)? != 0,
        medium_ids: get_id_list(row, base + 1)?,
    })
}

impl UnitOfWork<'_> {
    /// Persist an employee with its credential hash and capability links.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the email is taken or a medium id is unknown.
    pub async fn insert_employee(
        &self,
        employee: &Employee,
        password_hash: &str,
    ) -> Result<(), DatabaseError> {
        self.insert_person(&employee.person, PersonRole::Employee, password_hash)
            .await?;
        self.conn()
            .execute(
                "INSERT INTO employees (person_id, available) VALUES (?1, ?2)",
                libsql::params![employee.person.id.as_str(), i64::from(employee.available)],
            )
            .await?;
        for medium_id in &employee.medium_ids {
            self.link_employee_medium(&employee.person.id, medium_id)
                .await?;
        }
        Ok(())
    }

    /// Record that an employee can impersonate a medium. Linking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either id is unknown.
    pub async fn link_employee_medium(
        &self,
        employee_id: &str,
        medium_id: &str,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT OR IGNORE INTO employee_mediums (employee_id, medium_id) VALUES (?1, ?2)",
                [employee_id, medium_id],
            )
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn get_employee(&self, id: &str) -> Result<Option<Employee>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {PERSON_COLS}, {EMPLOYEE_COLS} FROM employees e
                     JOIN persons p ON p.id = e.person_id WHERE e.person_id = ?1"
                ),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_employee(&row)?)),
            None => Ok(None),
        }
    }

    /// All employees, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn list_employees(&self) -> Result<Vec<Employee>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {PERSON_COLS}, {EMPLOYEE_COLS} FROM employees e
                     JOIN persons p ON p.id = e.person_id ORDER BY e.person_id"
                ),
                (),
            )
            .await?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next().await? {
            employees.push(row_to_employee(&row)?);
        }
        Ok(employees)
    }

    /// Reserve one available employee able to impersonate `medium_id`.
    ///
    /// Candidates are tried in id order. A candidate is only taken if the
    /// conditional update flips its flag, so an employee is never handed two
    /// consultations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn claim_employee_for(&self, medium_id: &str) -> Result<Claim, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT e.person_id, e.available FROM employee_mediums em
                 JOIN employees e ON e.person_id = em.employee_id
                 WHERE em.medium_id = ?1 ORDER BY e.person_id",
                [medium_id],
            )
            .await?;
        let mut candidates = Vec::new();
        let mut capable = 0usize;
        while let Some(row) = rows.next().await? {
            capable += 1;
            if row.get::<i64>(1)? != 0 {
                candidates.push(row.get::<String>(0)?);
            }
        }
        drop(rows);
        if capable == 0 {
            return Ok(Claim::NoneCapable);
        }
        for employee_id in candidates {
            if self.claim_employee(&employee_id).await? {
                return Ok(Claim::Claimed(employee_id));
            }
        }
        Ok(Claim::AllBusy)
    }

    /// Flip an employee from available to unavailable. Returns `false` if they
    /// were already unavailable (or do not exist).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn claim_employee(&self, employee_id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE employees SET available = 0 WHERE person_id = ?1 AND available = 1",
                [employee_id],
            )
            .await?;
        Ok(changed == 1)
    }

    /// Make an employee available again. Returns `false` if they already were.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn release_employee(&self, employee_id: &str) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE employees SET available = 1 WHERE person_id = ?1 AND available = 0",
                [employee_id],
            )
            .await?;
        Ok(changed == 1)
    }
}
