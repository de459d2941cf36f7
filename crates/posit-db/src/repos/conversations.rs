//! Conversation repository.
//!
//! Lifecycle writes are conditional on the current status, so a transition
//! applied twice reports `false` instead of overwriting timestamps.

use chrono::{DateTime, Utc};

use posit_core::entities::Conversation;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_datetime};
use crate::unit_of_work::UnitOfWork;

const SELECT_COLS: &str = "id, client_id, medium_id, employee_id, status, requested_at, started_at, ended_at, comment";

fn row_to_conversation(row: &libsql::Row) -> Result<Conversation, DatabaseError> {
    Ok(Conversation {
        id: row.get(0)?,
        client_id: row.get(1)?,
        medium_id: row.get(2)?,
        employee_id: row.get(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        requested_at: parse_datetime(&row.get::<String>(5)?)?,
        started_at: parse_optional_datetime(get_opt_string(row, 6)?.as_deref())?,
        ended_at: parse_optional_datetime(get_opt_string(row, 7)?.as_deref())?,
        comment: row.get::<Option<String>>(8)?,
    })
}

impl UnitOfWork<'_> {
    async fn query_conversations(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<Conversation>, DatabaseError> {
        let mut rows = self.conn().query(sql, params).await?;
        let mut conversations = Vec::new();
        while let Some(row) = rows.next().await? {
            conversations.push(row_to_conversation(&row)?);
        }
        Ok(conversations)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails or a reference is unknown.
    pub async fn insert_conversation(&self, conversation: &Conversation) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                &format!("INSERT INTO conversations ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"),
                libsql::params![
                    conversation.id.as_str(),
                    conversation.client_id.as_str(),
                    conversation.medium_id.as_str(),
                    conversation.employee_id.as_str(),
                    conversation.status.as_str(),
                    conversation.requested_at.to_rfc3339(),
                    conversation.started_at.map(|t| t.to_rfc3339()),
                    conversation.ended_at.map(|t| t.to_rfc3339()),
                    conversation.comment.as_deref()
                ],
            )
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, DatabaseError> {
        Ok(self
            .query_conversations(
                &format!("SELECT {SELECT_COLS} FROM conversations WHERE id = ?1"),
                [id],
            )
            .await?
            .into_iter()
            .next())
    }

    /// `requested` -> `accepted`, stamping `started_at`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn mark_conversation_started(
        &self,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE conversations SET status = 'accepted', started_at = ?2
                 WHERE id = ?1 AND status = 'requested'",
                libsql::params![id, at.to_rfc3339()],
            )
            .await?;
        Ok(changed == 1)
    }

    /// `accepted` -> `terminated`, stamping `ended_at`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn mark_conversation_ended(
        &self,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE conversations SET status = 'terminated', ended_at = ?2
                 WHERE id = ?1 AND status = 'accepted'",
                libsql::params![id, at.to_rfc3339()],
            )
            .await?;
        Ok(changed == 1)
    }

    /// Replace the employee's comment. Only started conversations take one.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the update fails.
    pub async fn set_conversation_comment(
        &self,
        id: &str,
        comment: &str,
    ) -> Result<bool, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE conversations SET comment = ?2
                 WHERE id = ?1 AND status IN ('accepted', 'terminated')",
                [id, comment],
            )
            .await?;
        Ok(changed == 1)
    }

    /// A client's conversations, newest request first, optionally for one medium.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn list_client_conversations(
        &self,
        client_id: &str,
        medium_id: Option<&str>,
    ) -> Result<Vec<Conversation>, DatabaseError> {
        self.query_conversations(
            &format!(
                "SELECT {SELECT_COLS} FROM conversations
                 WHERE client_id = ?1 AND (?2 IS NULL OR medium_id = ?2)
                 ORDER BY requested_at DESC, id DESC"
            ),
            libsql::params![client_id, medium_id],
        )
        .await
    }

    /// The conversation an employee is currently assigned to, if any.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn open_conversation_for_employee(
        &self,
        employee_id: &str,
    ) -> Result<Option<Conversation>, DatabaseError> {
        Ok(self
            .query_conversations(
                &format!(
                    "SELECT {SELECT_COLS} FROM conversations
                     WHERE employee_id = ?1 AND status <> 'terminated'
                     ORDER BY requested_at DESC, id DESC LIMIT 1"
                ),
                [employee_id],
            )
            .await?
            .into_iter()
            .next())
    }

    /// Every conversation, oldest request first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be parsed.
    pub async fn list_conversations(&self) -> Result<Vec<Conversation>, DatabaseError> {
        self.query_conversations(
            &format!("SELECT {SELECT_COLS} FROM conversations ORDER BY requested_at, id"),
            (),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use posit_core::enums::ConversationStatus;
    use pretty_assertions::assert_eq;

    use crate::test_support::{
        conversation_fixture, sample_client, sample_employee, sample_medium, test_db,
    };

    #[tokio::test]
    async fn lifecycle_updates_are_conditional() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        let c = sample_client(&uow, "ada@example.org").await;
        let m = sample_medium(&uow, "med-00000001", "Gwenaël").await;
        let e = sample_employee(&uow, "a@posit.if", &[&m.id]).await;
        let conv = conversation_fixture("cnv-00000001", &c.person.id, &m.id, &e.person.id, Utc::now());
        uow.insert_conversation(&conv).await.unwrap();

        assert!(!uow.set_conversation_comment(&conv.id, "early").await.unwrap());
        assert!(!uow.mark_conversation_ended(&conv.id, Utc::now()).await.unwrap());

        let started = Utc::now();
        assert!(uow.mark_conversation_started(&conv.id, started).await.unwrap());
        assert!(!uow.mark_conversation_started(&conv.id, Utc::now()).await.unwrap());

        let ended = started + Duration::minutes(20);
        assert!(uow.mark_conversation_ended(&conv.id, ended).await.unwrap());
        assert!(!uow.mark_conversation_ended(&conv.id, Utc::now()).await.unwrap());
        assert!(uow.set_conversation_comment(&conv.id, "calm client").await.unwrap());

        let loaded = uow.get_conversation(&conv.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, ConversationStatus::Terminated);
        assert_eq!(loaded.started_at, Some(started));
        assert_eq!(loaded.ended_at, Some(ended));
        assert_eq!(loaded.comment.as_deref(), Some("calm client"));
    }

    #[tokio::test]
    async fn client_history_newest_first_and_filtered() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        let c = sample_client(&uow, "ada@example.org").await;
        let m1 = sample_medium(&uow, "med-00000001", "Gwenaël").await;
        let m2 = sample_medium(&uow, "med-00000002", "Endora").await;
        let e = sample_employee(&uow, "a@posit.if", &[&m1.id, &m2.id]).await;
        let t0 = Utc::now();
        for (n, (medium, offset)) in [(&m1, 0), (&m2, 1), (&m1, 2)].into_iter().enumerate() {
            let conv = conversation_fixture(
                &format!("cnv-0000000{n}"),
                &c.person.id,
                &medium.id,
                &e.person.id,
                t0 + Duration::minutes(offset),
            );
            uow.insert_conversation(&conv).await.unwrap();
        }

        let all: Vec<String> = uow
            .list_client_conversations(&c.person.id, None)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(all, vec!["cnv-00000002", "cnv-00000001", "cnv-00000000"]);

        let only_m1 = uow
            .list_client_conversations(&c.person.id, Some(&m1.id))
            .await
            .unwrap();
        assert_eq!(only_m1.len(), 2);
        assert!(only_m1.iter().all(|c| c.medium_id == m1.id));
        assert_eq!(uow.list_conversations().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn open_conversation_ignores_terminated() {
        let db = test_db().await;
        let uow = db.begin().await.unwrap();
        let c = sample_client(&uow, "ada@example.org").await;
        let m = sample_medium(&uow, "med-00000001", "Gwenaël").await;
        let e = sample_employee(&uow, "a@posit.if", &[&m.id]).await;
        let conv = conversation_fixture("cnv-00000001", &c.person.id, &m.id, &e.person.id, Utc::now());
        uow.insert_conversation(&conv).await.unwrap();

        let open = uow.open_conversation_for_employee(&e.person.id).await.unwrap();
        assert_eq!(open.map(|c| c.id), Some(conv.id.clone()));

        let now = Utc::now();
        uow.mark_conversation_started(&conv.id, now).await.unwrap();
        uow.mark_conversation_ended(&conv.id, now + Duration::seconds(1)).await.unwrap();
        assert!(uow.open_conversation_for_employee(&e.person.id).await.unwrap().is_none());
    }
}
