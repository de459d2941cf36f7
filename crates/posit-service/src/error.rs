//! Service error types.

use posit_core::enums::ConversationStatus;
use posit_core::errors::CoreError;
use posit_db::DatabaseError;
use thiserror::Error;

/// Errors surfaced by [`crate::ConsultationService`] operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An operation needed an entity that does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Registration with an email some person already uses.
    #[error("email {0} is already registered")]
    DuplicateEmail(String),

    /// Comments are only taken once a conversation has started.
    #[error("conversation {id} cannot take a comment while {status}")]
    CommentRejected {
        id: String,
        status: ConversationStatus,
    },

    /// Invalid transition or failed validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Password hashing failed (no randomness available).
    #[error("credential error: {0}")]
    Credential(String),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether the operation was refused because of the conversation's state.
    #[must_use]
    pub const fn is_invalid_transition(&self) -> bool {
        matches!(
            self,
            Self::Core(CoreError::InvalidTransition { .. }) | Self::CommentRejected { .. }
        )
    }
}
