//! Status enums, roles, and medium kinds for POSIT'IF.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `ConversationStatus` provides `allowed_next_states()` to enforce valid
//! transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// PersonRole
// ---------------------------------------------------------------------------

/// Which kind of account a person row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Client,
    Employee,
}

impl PersonRole {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MediumKind
// ---------------------------------------------------------------------------

/// The three medium personas offered in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediumKind {
    Clairvoyant,
    TarotReader,
    Astrologer,
}

impl MediumKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clairvoyant => "clairvoyant",
            Self::TarotReader => "tarot_reader",
            Self::Astrologer => "astrologer",
        }
    }
}

impl fmt::Display for MediumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConversationStatus
// ---------------------------------------------------------------------------

/// Status of a consultation.
///
/// ```text
/// requested → accepted → terminated
/// ```
///
/// `terminated` is absorbing. Comments may be attached once accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    Requested,
    Accepted,
    Terminated,
}

impl ConversationStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Requested => &[Self::Accepted],
            Self::Accepted => &[Self::Terminated],
            Self::Terminated => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Check the transition and describe the refusal for conversation `id`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if `next` is not reachable.
    pub fn ensure_transition(self, id: &str, next: Self) -> Result<(), CoreError> {
        if self.can_transition_to(next) {
            return Ok(());
        }
        Err(CoreError::InvalidTransition {
            entity_type: "conversation".to_string(),
            id: id.to_string(),
            from: self.to_string(),
            to: next.to_string(),
        })
    }

    /// Whether a comment may be attached in this state.
    #[must_use]
    pub const fn accepts_comment(self) -> bool {
        matches!(self, Self::Accepted | Self::Terminated)
    }

    /// Open conversations still hold their employee.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Terminated)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Accepted => "accepted",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn conversation_transitions_follow_lifecycle() {
        use ConversationStatus::*;
        assert!(Requested.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(Terminated));
        assert!(!Requested.can_transition_to(Terminated));
        assert!(!Terminated.can_transition_to(Accepted));
        assert!(!Terminated.can_transition_to(Terminated));
        assert!(Terminated.allowed_next_states().is_empty());
    }

    #[test]
    fn ensure_transition_reports_both_states() {
        let err = ConversationStatus::Requested
            .ensure_transition("cnv-00000001", ConversationStatus::Terminated)
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                entity_type: "conversation".into(),
                id: "cnv-00000001".into(),
                from: "requested".into(),
                to: "terminated".into(),
            }
        );
    }

    #[test]
    fn comments_need_an_accepted_conversation() {
        assert!(!ConversationStatus::Requested.accepts_comment());
        assert!(ConversationStatus::Accepted.accepts_comment());
        assert!(ConversationStatus::Terminated.accepts_comment());
    }

    #[test]
    fn as_str_matches_serde() {
        for kind in [
            MediumKind::Clairvoyant,
            MediumKind::TarotReader,
            MediumKind::Astrologer,
        ] {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().into()));
        }
        for status in [
            ConversationStatus::Requested,
            ConversationStatus::Accepted,
            ConversationStatus::Terminated,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, serde_json::Value::String(status.as_str().into()));
        }
        assert_eq!(PersonRole::Employee.to_string(), "employee");
    }
}
