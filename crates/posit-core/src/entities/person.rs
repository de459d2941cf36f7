use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::astral::AstralProfile;
use crate::enums::PersonRole;

/// Identity fields shared by clients and employees.
///
/// The credential hash lives in the `persons` row only and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Person {
    /// "First Last", as shown in reports and notifications.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Client {
    #[serde(flatten)]
    pub person: Person,
    pub birth_date: NaiveDate,
    pub postal_address: String,
    pub astral: AstralProfile,
}

/// A staff member who impersonates mediums.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Employee {
    #[serde(flatten)]
    pub person: Person,
    pub available: bool,
    /// Mediums this employee is able to impersonate.
    pub medium_ids: Vec<String>,
}

/// Either kind of person, as returned by authentication and id lookups.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Account {
    Client(Client),
    Employee(Employee),
}

impl Account {
    #[must_use]
    pub const fn person(&self) -> &Person {
        match self {
            Self::Client(client) => &client.person,
            Self::Employee(employee) => &employee.person,
        }
    }

    #[must_use]
    pub const fn role(&self) -> PersonRole {
        match self {
            Self::Client(_) => PersonRole::Client,
            Self::Employee(_) => PersonRole::Employee,
        }
    }
}

/// Data a prospective client submits to register.
#[derive(Clone, Deserialize, JsonSchema)]
pub struct ClientRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub postal_address: String,
}

impl fmt::Debug for ClientRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("phone", &self.phone)
            .field("birth_date", &self.birth_date)
            .field("postal_address", &self.postal_address)
            .finish()
    }
}
