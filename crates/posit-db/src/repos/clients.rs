//! Client repository.

use posit_core::astral::AstralProfile;
use posit_core::entities::Client;
use posit_core::enums::PersonRole;

use crate::error::DatabaseError;
use crate::helpers::{parse_date, parse_enum};
use crate::repos::persons::{PERSON_COLS, PERSON_COL_COUNT, row_to_person};
use crate::unit_of_work::UnitOfWork;

const CLIENT_COLS: &str =
    "c.birth_date, c.postal_address, c.zodiac_sign, c.chinese_sign, c.lucky_color, c.totem_animal";

fn row_to_client(row: &libsql::Row) -> Result<Client, DatabaseError> {
    let base = PERSON_COL_COUNT;
    Ok(Client {
        person: row_to_person(row)?,
        birth_date: parse_date(&row.get::<String>(base)?)?,
        postal_address: row.get(base + 1)?,
        astral: AstralProfile {
            zodiac_sign: parse_enum(&row.get::<String>(base + 2)?)?,
            chinese_sign: parse_enum(&row.get::<String>(base + 3)?)?,
            lucky_color: row.get(base + 4)?,
            totem_animal: row.get(base + 5)?,
        },
    })
}

impl UnitOfWork<'_> {
    /// Persist a new client with its credential hash.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::UniqueViolation` if the email is taken.
    pub async fn insert_client(
        &self,
        client: &Client,
        password_hash: &str,
    ) -> Result<(), DatabaseError> {
        self.insert_person(&client.person, PersonRole::Client, password_hash)
            .await?;
        self.conn()
            .execute(
                "INSERT INTO clients (person_id, birth_date, postal_address, zodiac_sign, chinese_sign, lucky_color, totem_animal)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    client.person.id.as_str(),
                    client.birth_date.format("%Y-%m-%d").to_string(),
                    client.postal_address.as_str(),
                    client.astral.zodiac_sign.as_str(),
                    client.astral.chinese_sign.as_str(),
                    client.astral.lucky_color.as_str(),
                    client.astral.totem_animal.as_str()
                ],
            )
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn get_client(&self, id: &str) -> Result<Option<Client>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {PERSON_COLS}, {CLIENT_COLS} FROM clients c
                     JOIN persons p ON p.id = c.person_id WHERE c.person_id = ?1"
                ),
                [id],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_client(&row)?)),
            None => Ok(None),
        }
    }

    /// All clients, oldest registration first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn list_clients(&self) -> Result<Vec<Client>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {PERSON_COLS}, {CLIENT_COLS} FROM clients c
                     JOIN persons p ON p.id = c.person_id ORDER BY p.created_at, p.id"
                ),
                (),
            )
            .await?;
        let mut clients = Vec::new();
        while let Some(row) = rows.next().await? {
            clients.push(row_to_client(&row)?);
        }
        Ok(clients)
    }
}
