use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ConversationStatus;

/// One consultation between a client and a medium, voiced by an employee.
///
/// `started_at` is set on acceptance and `ended_at` on termination; both are
/// written once.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Conversation {
    pub id: String,
    pub client_id: String,
    pub medium_id: String,
    pub employee_id: String,
    pub status: ConversationStatus,
    pub requested_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub comment: Option<String>,
}
