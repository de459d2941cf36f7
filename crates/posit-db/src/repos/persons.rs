//! Person repository.
//!
//! Identity rows shared by clients and employees, credential lookup, and
//! role-aware account loading.

use posit_core::entities::{Account, Person};
use posit_core::enums::PersonRole;

use crate::error::DatabaseError;
use crate::helpers::{is_unique_violation, parse_datetime, parse_enum};
use crate::unit_of_work::UnitOfWork;

/// Person columns, aliased `p`, in the order `row_to_person` reads them.
pub(crate) const PERSON_COLS: &str = "p.id, p.first_name, p.last_name, p.email, p.phone, p.created_at";

/// Number of columns in [`PERSON_COLS`].
pub(crate) const PERSON_COL_COUNT: i32 = 6;

/// What authentication needs to know about an email address.
#[derive(Debug, Clone)]
pub struct LoginRecord {
    pub person_id: String,
    pub role: PersonRole,
    pub password_hash: String,
}

pub(crate) fn row_to_person(row: &libsql::Row) -> Result<Person, DatabaseError> {
    Ok(Person {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl UnitOfWork<'_> {
    /// Insert the shared identity row.
    ///
    /// Emails are unique without regard to case.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::UniqueViolation` if the email is already
    /// registered. Any other constraint failure, an id collision included,
    /// stays a `DatabaseError::LibSql`.
    pub(crate) async fn insert_person(
        &self,
        person: &Person,
        role: PersonRole,
        password_hash: &str,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO persons (id, role, first_name, last_name, email, phone, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    person.id.as_str(),
                    role.as_str(),
                    person.first_name.as_str(),
                    person.last_name.as_str(),
                    person.email.as_str(),
                    person.phone.as_str(),
                    password_hash,
                    person.created_at.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e, "persons.email") {
                    DatabaseError::UniqueViolation(format!("email {}", person.email))
                } else {
                    DatabaseError::LibSql(e)
                }
            })?;
        Ok(())
    }

    /// Whether any person already uses this email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn email_taken(&self, email: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT 1 FROM persons WHERE email = ?1", [email])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// Credential record for an email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the stored role is unknown.
    pub async fn find_login(&self, email: &str) -> Result<Option<LoginRecord>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, role, password_hash FROM persons WHERE email = ?1",
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(LoginRecord {
                person_id: row.get(0)?,
                role: parse_enum(&row.get::<String>(1)?)?,
                password_hash: row.get(2)?,
            })),
            None => Ok(None),
        }
    }

    /// Role of a person, if the id exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn person_role(&self, id: &str) -> Result<Option<PersonRole>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT role FROM persons WHERE id = ?1", [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(parse_enum(&row.get::<String>(0)?)?)),
            None => Ok(None),
        }
    }

    /// Load a person as the full client or employee record their role says.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the role row is missing.
    pub async fn get_account(&self, id: &str) -> Result<Option<Account>, DatabaseError> {
        let Some(role) = self.person_role(id).await? else {
            return Ok(None);
        };
        let account = match role {
            PersonRole::Client => self.get_client(id).await?.map(Account::Client),
            PersonRole::Employee => self.get_employee(id).await?.map(Account::Employee),
        };
        account
            .map(Some)
            .ok_or_else(|| DatabaseError::InvalidState(format!("person {id} has no {role} row")))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{sample_client, sample_employee, test_db};
    use posit_core::enums::PersonRole;

    #[tokio::test]
    async fn find_login_ignores_email_case() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        let client = sample_client(&uow, "ada@example.org").await;

        let login = uow.find_login("ADA@Example.org").await.unwrap().unwrap();
        assert_eq!(login.person_id, client.person.id);
        assert_eq!(login.role, PersonRole::Client);
        assert_eq!(login.password_hash, "hash");
        assert!(uow.find_login("nobody@example.org").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn email_taken_spans_roles() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        sample_employee(&uow, "staff@posit.if", &[]).await;

        assert!(uow.email_taken("staff@posit.if").await.unwrap());
        assert!(uow.email_taken("STAFF@posit.if").await.unwrap());
        assert!(!uow.email_taken("other@posit.if").await.unwrap());
    }

    #[tokio::test]
    async fn get_account_dispatches_on_role() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        let client = sample_client(&uow, "ada@example.org").await;
        let employee = sample_employee(&uow, "staff@posit.if", &[]).await;

        let a = uow.get_account(&client.person.id).await.unwrap().unwrap();
        assert_eq!(a.role(), PersonRole::Client);
        let b = uow.get_account(&employee.person.id).await.unwrap().unwrap();
        assert_eq!(b.role(), PersonRole::Employee);
        assert!(uow.get_account("cli-ffffffff").await.unwrap().is_none());
    }
}
