//! Aggregate queries behind the statistics reports.
//!
//! Both counts use a LEFT JOIN so mediums and employees with no conversation
//! appear with zero.

use posit_core::reports::{EmployeeTally, MediumTally};

use crate::error::DatabaseError;
use crate::unit_of_work::UnitOfWork;

impl UnitOfWork<'_> {
    /// Conversations per medium, ordered by medium name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_conversations_by_medium(&self) -> Result<Vec<MediumTally>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT m.id, m.name, COUNT(c.id) FROM mediums m
                 LEFT JOIN conversations c ON c.medium_id = m.id
                 GROUP BY m.id, m.name ORDER BY m.name, m.id",
                (),
            )
            .await?;
        let mut tallies = Vec::new();
        while let Some(row) = rows.next().await? {
            tallies.push(MediumTally {
                medium_id: row.get(0)?,
                medium_name: row.get(1)?,
                conversations: row.get(2)?,
            });
        }
        Ok(tallies)
    }

    /// Conversations per employee, ordered by last then first name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_conversations_by_employee(
        &self,
    ) -> Result<Vec<EmployeeTally>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT p.id, p.first_name, p.last_name, COUNT(c.id) FROM employees e
                 JOIN persons p ON p.id = e.person_id
                 LEFT JOIN conversations c ON c.employee_id = e.person_id
                 GROUP BY p.id, p.first_name, p.last_name
                 ORDER BY p.last_name, p.first_name, p.id",
                (),
            )
            .await?;
        let mut tallies = Vec::new();
        while let Some(row) = rows.next().await? {
            let first: String = row.get(1)?;
            let last: String = row.get(2)?;
            tallies.push(EmployeeTally {
                employee_id: row.get(0)?,
                display_name: format!("{first} {last}"),
                conversations: row.get(3)?,
            });
        }
        Ok(tallies)
    }
}
