//! Medium repository.

use posit_core::entities::{Medium, MediumProfile};
use posit_core::enums::MediumKind;

use crate::error::DatabaseError;
use crate::helpers::{get_id_list, get_opt_string, parse_datetime, parse_enum};
use crate::unit_of_work::UnitOfWork;

const SELECT_COLS: &str = "m.id, m.kind, m.name, m.description, m.support, m.school, m.promotion_year, m.created_at, \
     (SELECT group_concat(em.employee_id, ',') FROM employee_mediums em WHERE em.medium_id = m.id)";

fn row_to_medium(row: &libsql::Row) -> Result<Medium, DatabaseError> {
    let id: String = row.get(0)?;
    let kind: MediumKind = parse_enum(&row.get::<String>(1)?)?;
    let profile = match kind {
        MediumKind::Clairvoyant => MediumProfile::Clairvoyant {
            support: get_opt_string(row, 4)?.ok_or_else(|| {
                DatabaseError::InvalidState(format!("clairvoyant {id} has no support"))
            })?,
        },
        MediumKind::TarotReader => MediumProfile::TarotReader,
        MediumKind::Astrologer => {
            let school = get_opt_string(row, 5)?;
            let year = row.get::<Option<i64>>(6)?;
            match (school, year.and_then(|y| i32::try_from(y).ok())) {
                (Some(school), Some(promotion_year)) => MediumProfile::Astrologer {
                    school,
                    promotion_year,
                },
                _ => {
                    return Err(DatabaseError::InvalidState(format!(
                        "astrologer {id} has no school or promotion year"
                    )));
                }
            }
        }
    };
    Ok(Medium {
        id,
        name: row.get(2)?,
        description: row.get(3)?,
        profile,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        employee_ids: get_id_list(row, 8)?,
    })
}

impl UnitOfWork<'_> {
    /// Persist a medium. Any `employee_ids` must already exist and are linked.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn insert_medium(&self, medium: &Medium) -> Result<(), DatabaseError> {
        let (support, school, promotion_year) = match &medium.profile {
            MediumProfile::Clairvoyant { support } => (Some(support.as_str()), None, None),
            MediumProfile::TarotReader => (None, None, None),
            MediumProfile::Astrologer {
                school,
                promotion_year,
            } => (None, Some(school.as_str()), Some(i64::from(*promotion_year))),
        };
        self.conn()
            .execute(
                "INSERT INTO mediums (id, kind, name, description, support, school, promotion_year, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    medium.id.as_str(),
                    medium.kind().as_str(),
                    medium.name.as_str(),
                    medium.description.as_str(),
                    support,
                    school,
                    promotion_year,
                    medium.created_at.to_rfc3339()
                ],
            )
            .await?;
        for employee_id in &medium.employee_ids {
            self.link_employee_medium(employee_id, &medium.id).await?;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn get_medium(&self, id: &str) -> Result<Option<Medium>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM mediums m WHERE m.id = ?1"),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_medium(&row)?)),
            None => Ok(None),
        }
    }

    /// The whole catalog, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn list_mediums(&self) -> Result<Vec<Medium>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM mediums m ORDER BY m.name, m.id"),
                (),
            )
            .await?;
        let mut mediums = Vec::new();
        while let Some(row) = rows.next().await? {
            mediums.push(row_to_medium(&row)?);
        }
        Ok(mediums)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_mediums(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM mediums", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
