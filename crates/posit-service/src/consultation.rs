//! The consultation lifecycle.
//!
//! ```text
//! requested --accept--> accepted --terminate--> terminated
//! ```
//!
//! Requesting claims an employee; terminating releases them. Every step is
//! one unit of work, and the SMS it triggers is sent after the commit.

use chrono::{Duration, Utc};
use serde::Serialize;

use posit_core::entities::{Client, Conversation, Employee, Medium};
use posit_core::enums::ConversationStatus;
use posit_core::ids::PREFIX_CONVERSATION;
use posit_db::{Claim, DatabaseError, UnitOfWork};
use posit_notify::Sms;

use crate::error::ServiceError;
use crate::{ConsultationService, notices};

/// Result of asking for a consultation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RequestOutcome {
    /// An employee was claimed and the conversation created.
    Assigned(Conversation),
    /// Employees can voice the medium but all of them are busy.
    Unavailable,
    /// Nobody can voice the medium.
    NoCapableEmployee,
}

impl RequestOutcome {
    #[must_use]
    pub const fn conversation(&self) -> Option<&Conversation> {
        match self {
            Self::Assigned(conversation) => Some(conversation),
            Self::Unavailable | Self::NoCapableEmployee => None,
        }
    }
}

/// Result of ending a consultation. Ending twice is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TerminateOutcome {
    Terminated(Conversation),
    /// Already over; returned unchanged.
    AlreadyTerminated(Conversation),
}

impl TerminateOutcome {
    #[must_use]
    pub const fn conversation(&self) -> &Conversation {
        match self {
            Self::Terminated(conversation) | Self::AlreadyTerminated(conversation) => conversation,
        }
    }
}

async fn load_conversation(uow: &UnitOfWork<'_>, id: &str) -> Result<Conversation, ServiceError> {
    uow.get_conversation(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("conversation", id))
}

async fn load_client(uow: &UnitOfWork<'_>, id: &str) -> Result<Client, ServiceError> {
    uow.get_client(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("client", id))
}

async fn load_employee(uow: &UnitOfWork<'_>, id: &str) -> Result<Employee, ServiceError> {
    uow.get_employee(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("employee", id))
}

async fn load_medium(uow: &UnitOfWork<'_>, id: &str) -> Result<Medium, ServiceError> {
    uow.get_medium(id)
        .await?
        .ok_or_else(|| ServiceError::not_found("medium", id))
}

fn changed_underneath(id: &str) -> ServiceError {
    DatabaseError::InvalidState(format!("conversation {id} changed during the update")).into()
}

impl ConsultationService {
    /// Ask for a consultation with a medium.
    ///
    /// Claims the first available capable employee (by id) and creates a
    /// `requested` conversation, then texts the employee.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown client or medium.
    pub async fn request_consultation(
        &self,
        client_id: &str,
        medium_id: &str,
    ) -> Result<RequestOutcome, ServiceError> {
        let uow = self.db.begin().await?;
        let result = Self::request_in(&uow, client_id, medium_id).await;
        let (outcome, sms) = uow.finish(result).await?;
        match &outcome {
            RequestOutcome::Assigned(conversation) => tracing::info!(
                conversation_id = %conversation.id,
                employee_id = %conversation.employee_id,
                "consultation requested"
            ),
            RequestOutcome::Unavailable => {
                tracing::info!(client_id, medium_id, "every capable employee is busy");
            }
            RequestOutcome::NoCapableEmployee => {
                tracing::warn!(medium_id, "no employee can impersonate medium");
            }
        }
        if let Some(sms) = sms {
            self.notifier.send_sms(&sms);
        }
        Ok(outcome)
    }

    async fn request_in(
        uow: &UnitOfWork<'_>,
        client_id: &str,
        medium_id: &str,
    ) -> Result<(RequestOutcome, Option<Sms>), ServiceError> {
        let client = load_client(uow, client_id).await?;
        let medium = load_medium(uow, medium_id).await?;
        let employee_id = match uow.claim_employee_for(medium_id).await? {
            Claim::Claimed(id) => id,
            Claim::AllBusy => return Ok((RequestOutcome::Unavailable, None)),
            Claim::NoneCapable => return Ok((RequestOutcome::NoCapableEmployee, None)),
        };
        let employee = load_employee(uow, &employee_id).await?;

        let conversation = Conversation {
            id: uow.generate_id(PREFIX_CONVERSATION).await?,
            client_id: client.person.id.clone(),
            medium_id: medium.id.clone(),
            employee_id,
            status: ConversationStatus::Requested,
            requested_at: Utc::now(),
            started_at: None,
            ended_at: None,
            comment: None,
        };
        uow.insert_conversation(&conversation).await?;
        let sms = notices::consultation_requested(&client, &medium, &employee);
        Ok((RequestOutcome::Assigned(conversation), Some(sms)))
    }

    /// The employee picks up: `requested` -> `accepted`, then the client is
    /// texted the employee's number.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown conversation and an
    /// invalid-transition error unless it is `requested`.
    pub async fn accept_consultation(&self, id: &str) -> Result<Conversation, ServiceError> {
        let uow = self.db.begin().await?;
        let result = Self::accept_in(&uow, id).await;
        let (conversation, sms) = uow.finish(result).await?;
        tracing::info!(conversation_id = %id, "consultation accepted");
        self.notifier.send_sms(&sms);
        Ok(conversation)
    }

    async fn accept_in(
        uow: &UnitOfWork<'_>,
        id: &str,
    ) -> Result<(Conversation, Sms), ServiceError> {
        let conversation = load_conversation(uow, id).await?;
        conversation
            .status
            .ensure_transition(id, ConversationStatus::Accepted)?;

        let started = Utc::now().max(conversation.requested_at);
        if !uow.mark_conversation_started(id, started).await? {
            return Err(changed_underneath(id));
        }
        let accepted = Conversation {
            status: ConversationStatus::Accepted,
            started_at: Some(started),
            ..conversation
        };

        let client = load_client(uow, &accepted.client_id).await?;
        let employee = load_employee(uow, &accepted.employee_id).await?;
        let medium = load_medium(uow, &accepted.medium_id).await?;
        let sms = notices::consultation_accepted(&accepted, &client, &employee, &medium);
        Ok((accepted, sms))
    }

    /// End an accepted consultation and free its employee.
    ///
    /// Ending an already terminated consultation changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown conversation and an
    /// invalid-transition error if it was never accepted.
    pub async fn terminate_consultation(&self, id: &str) -> Result<TerminateOutcome, ServiceError> {
        let uow = self.db.begin().await?;
        let result = Self::terminate_in(&uow, id).await;
        let outcome = uow.finish(result).await?;
        match &outcome {
            TerminateOutcome::Terminated(c) => {
                tracing::info!(conversation_id = %id, employee_id = %c.employee_id, "consultation terminated");
            }
            TerminateOutcome::AlreadyTerminated(_) => {
                tracing::debug!(conversation_id = %id, "consultation already terminated");
            }
        }
        Ok(outcome)
    }

    async fn terminate_in(uow: &UnitOfWork<'_>, id: &str) -> Result<TerminateOutcome, ServiceError> {
        let conversation = load_conversation(uow, id).await?;
        if conversation.status == ConversationStatus::Terminated {
            return Ok(TerminateOutcome::AlreadyTerminated(conversation));
        }
        conversation
            .status
            .ensure_transition(id, ConversationStatus::Terminated)?;

        let started = conversation.started_at.ok_or_else(|| {
            DatabaseError::InvalidState(format!("accepted conversation {id} has no start time"))
        })?;
        let now = Utc::now();
        let ended = if now > started {
            now
        } else {
            started + Duration::microseconds(1)
        };
        if !uow.mark_conversation_ended(id, ended).await? {
            return Err(changed_underneath(id));
        }
        if !uow.release_employee(&conversation.employee_id).await? {
            tracing::warn!(
                employee_id = %conversation.employee_id,
                "employee was already available at termination"
            );
        }
        Ok(TerminateOutcome::Terminated(Conversation {
            status: ConversationStatus::Terminated,
            ended_at: Some(ended),
            ..conversation
        }))
    }

    /// Attach (or replace) the employee's comment on a started consultation.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::CommentRejected` while the conversation is still
    /// `requested`.
    pub async fn comment_consultation(
        &self,
        id: &str,
        comment: &str,
    ) -> Result<Conversation, ServiceError> {
        let uow = self.db.begin().await?;
        let result = Self::comment_in(&uow, id, comment).await;
        let conversation = uow.finish(result).await?;
        tracing::debug!(conversation_id = %id, "comment saved");
        Ok(conversation)
    }

    async fn comment_in(
        uow: &UnitOfWork<'_>,
        id: &str,
        comment: &str,
    ) -> Result<Conversation, ServiceError> {
        let conversation = load_conversation(uow, id).await?;
        if !conversation.status.accepts_comment() {
            return Err(ServiceError::CommentRejected {
                id: id.to_string(),
                status: conversation.status,
            });
        }
        if !uow.set_conversation_comment(id, comment).await? {
            return Err(changed_underneath(id));
        }
        Ok(Conversation {
            comment: Some(comment.to_string()),
            ..conversation
        })
    }

    /// # Errors
    ///
    /// Returns `ServiceError::Database` if the store fails.
    pub async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = uow.get_conversation(id).await.map_err(ServiceError::from);
        uow.finish(result).await
    }

    /// A client's consultations, newest first, optionally with one medium only.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown client.
    pub async fn client_conversations(
        &self,
        client_id: &str,
        medium_id: Option<&str>,
    ) -> Result<Vec<Conversation>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = async {
            load_client(&uow, client_id).await?;
            Ok::<_, ServiceError>(uow.list_client_conversations(client_id, medium_id).await?)
        }
        .await;
        uow.finish(result).await
    }

    /// The consultation an employee currently holds, if any.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` for an unknown employee.
    pub async fn employee_open_conversation(
        &self,
        employee_id: &str,
    ) -> Result<Option<Conversation>, ServiceError> {
        let uow = self.db.begin().await?;
        let result = async {
            load_employee(&uow, employee_id).await?;
            Ok::<_, ServiceError>(uow.open_conversation_for_employee(employee_id).await?)
        }
        .await;
        uow.finish(result).await
    }
}

#[cfg(test)]
mod tests {
    use posit_core::enums::ConversationStatus;
    use pretty_assertions::assert_eq;

    use super::{RequestOutcome, TerminateOutcome};
    use crate::ServiceError;
    use crate::test_support::{medium_named, seeded_service};

    #[tokio::test]
    async fn full_lifecycle() {
        let (svc, notifier, client) = seeded_service().await;
        let irma = medium_named(&svc, "Mme Irma").await;

        let outcome = svc
            .request_consultation(&client.person.id, &irma.id)
            .await
            .unwrap();
        let requested = outcome.conversation().unwrap().clone();
        assert_eq!(requested.status, ConversationStatus::Requested);
        assert!(irma.employee_ids.contains(&requested.employee_id));
        let employee = svc.get_employee(&requested.employee_id).await.unwrap().unwrap();
        assert!(!employee.available);

        let accepted = svc.accept_consultation(&requested.id).await.unwrap();
        assert_eq!(accepted.status, ConversationStatus::Accepted);
        let started = accepted.started_at.unwrap();
        assert!(started >= requested.requested_at);

        let outcome = svc.terminate_consultation(&requested.id).await.unwrap();
        let TerminateOutcome::Terminated(ended) = outcome else {
            panic!("expected a fresh termination");
        };
        assert!(ended.ended_at.unwrap() > started);
        assert_eq!(svc.get_conversation(&requested.id).await.unwrap(), Some(ended));
        let employee = svc.get_employee(&requested.employee_id).await.unwrap().unwrap();
        assert!(employee.available);

        let sms = notifier.sms();
        assert_eq!(sms.len(), 2);
        assert_eq!(sms[0].to, employee.person.phone);
        assert!(sms[0].body.contains("Mme Irma"));
        assert_eq!(sms[1].to, client.person.phone);
        assert!(sms[1].body.contains(&employee.person.phone));
    }

    #[tokio::test]
    async fn terminate_is_idempotent() {
        let (svc, _, client) = seeded_service().await;
        let endora = medium_named(&svc, "Endora").await;
        let conv = svc
            .request_consultation(&client.person.id, &endora.id)
            .await
            .unwrap()
            .conversation()
            .unwrap()
            .clone();
        svc.accept_consultation(&conv.id).await.unwrap();
        let first = svc.terminate_consultation(&conv.id).await.unwrap();

        // Someone else now holds the employee; a second termination must not free them.
        let again = svc
            .request_consultation(&client.person.id, &endora.id)
            .await
            .unwrap();
        assert!(matches!(again, RequestOutcome::Assigned(_)));

        let second = svc.terminate_consultation(&conv.id).await.unwrap();
        assert_eq!(
            second,
            TerminateOutcome::AlreadyTerminated(first.conversation().clone())
        );
        let employee = svc.get_employee(&conv.employee_id).await.unwrap().unwrap();
        assert!(!employee.available);
    }

    #[tokio::test]
    async fn out_of_order_transitions_are_rejected() {
        let (svc, _, client) = seeded_service().await;
        let endora = medium_named(&svc, "Endora").await;
        let conv = svc
            .request_consultation(&client.person.id, &endora.id)
            .await
            .unwrap()
            .conversation()
            .unwrap()
            .clone();

        let err = svc.terminate_consultation(&conv.id).await.unwrap_err();
        assert!(err.is_invalid_transition(), "got {err:?}");
        let err = svc.comment_consultation(&conv.id, "too soon").await.unwrap_err();
        assert!(matches!(err, ServiceError::CommentRejected { .. }));

        svc.accept_consultation(&conv.id).await.unwrap();
        let err = svc.accept_consultation(&conv.id).await.unwrap_err();
        assert!(err.is_invalid_transition());

        let stored = svc.get_conversation(&conv.id).await.unwrap().unwrap();
        assert_eq!(stored.status, ConversationStatus::Accepted);
        assert_eq!(stored.comment, None);
    }

    #[tokio::test]
    async fn comments_replace_each_other() {
        let (svc, _, client) = seeded_service().await;
        let serena = medium_named(&svc, "Serena").await;
        let conv = svc
            .request_consultation(&client.person.id, &serena.id)
            .await
            .unwrap()
            .conversation()
            .unwrap()
            .clone();
        svc.accept_consultation(&conv.id).await.unwrap();
        svc.comment_consultation(&conv.id, "nervous").await.unwrap();
        svc.terminate_consultation(&conv.id).await.unwrap();
        let commented = svc.comment_consultation(&conv.id, "left happy").await.unwrap();

        assert_eq!(commented.comment.as_deref(), Some("left happy"));
        assert_eq!(commented.status, ConversationStatus::Terminated);
        let stored = svc.get_conversation(&conv.id).await.unwrap().unwrap();
        assert_eq!(stored, commented);
    }

    #[test]
    fn outcomes_serialize_with_tag() {
        let json = serde_json::to_value(RequestOutcome::NoCapableEmployee).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "no_capable_employee" }));
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let (svc, _, client) = seeded_service().await;
        let irma = medium_named(&svc, "Mme Irma").await;

        let err = svc
            .request_consultation("cli-ffffffff", &irma.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "client", .. }));
        let err = svc
            .request_consultation(&client.person.id, "med-ffffffff")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "medium", .. }));
        let err = svc.accept_consultation("cnv-ffffffff").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "conversation", .. }));
        assert!(svc.get_conversation("cnv-ffffffff").await.unwrap().is_none());
        assert!(svc.client_conversations("cli-ffffffff", None).await.is_err());
    }

    #[tokio::test]
    async fn history_and_open_conversation() {
        let (svc, _, client) = seeded_service().await;
        let irma = medium_named(&svc, "Mme Irma").await;
        let endora = medium_named(&svc, "Endora").await;

        let first = svc
            .request_consultation(&client.person.id, &irma.id)
            .await
            .unwrap()
            .conversation()
            .unwrap()
            .clone();
        let open = svc
            .employee_open_conversation(&first.employee_id)
            .await
            .unwrap();
        assert_eq!(open.as_ref().map(|c| c.id.as_str()), Some(first.id.as_str()));

        svc.accept_consultation(&first.id).await.unwrap();
        svc.terminate_consultation(&first.id).await.unwrap();
        assert!(svc
            .employee_open_conversation(&first.employee_id)
            .await
            .unwrap()
            .is_none());

        let second = svc
            .request_consultation(&client.person.id, &endora.id)
            .await
            .unwrap()
            .conversation()
            .unwrap()
            .clone();

        let all = svc.client_conversations(&client.person.id, None).await.unwrap();
        let ids: Vec<&str> = all.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
        let irma_only = svc
            .client_conversations(&client.person.id, Some(&irma.id))
            .await
            .unwrap();
        assert_eq!(irma_only.len(), 1);
    }
}
