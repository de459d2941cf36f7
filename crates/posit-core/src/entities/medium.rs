use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MediumKind;

/// Kind-specific fields of a medium.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediumProfile {
    /// Reads the future through a support (crystal ball, coffee grounds, ...).
    Clairvoyant { support: String },
    TarotReader,
    Astrologer { school: String, promotion_year: i32 },
}

impl MediumProfile {
    #[must_use]
    pub const fn kind(&self) -> MediumKind {
        match self {
            Self::Clairvoyant { .. } => MediumKind::Clairvoyant,
            Self::TarotReader => MediumKind::TarotReader,
            Self::Astrologer { .. } => MediumKind::Astrologer,
        }
    }
}

/// A persona a client can consult, impersonated by employees.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Medium {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub profile: MediumProfile,
    /// Employees able to impersonate this medium.
    pub employee_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Medium {
    #[must_use]
    pub const fn kind(&self) -> MediumKind {
        self.profile.kind()
    }
}
