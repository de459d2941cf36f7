//! Shared fixtures for posit-db unit tests.

use chrono::{DateTime, NaiveDate, Utc};
use posit_core::astral::AstralProfile;
use posit_core::entities::{Client, Conversation, Employee, Medium, MediumProfile, Person};
use posit_core::enums::ConversationStatus;
use posit_core::ids::{PREFIX_CLIENT, PREFIX_EMPLOYEE};

use crate::{PositDb, UnitOfWork};

/// Fresh in-memory database with the schema applied.
pub async fn test_db() -> PositDb {
    PositDb::open_local(":memory:").await.unwrap()
}

fn person(id: &str, email: &str) -> Person {
    Person {
        id: id.into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: email.into(),
        phone: "0611223344".into(),
        created_at: Utc::now(),
    }
}

pub fn client_fixture(id: &str, email: &str) -> Client {
    let birth_date = NaiveDate::from_ymd_opt(1990, 12, 10).unwrap();
    Client {
        person: person(id, email),
        birth_date,
        postal_address: "20 avenue Albert Einstein, Villeurbanne".into(),
        astral: AstralProfile::from_birth_date(birth_date),
    }
}

/// Insert a client with password hash `"hash"`.
pub async fn sample_client(uow: &UnitOfWork<'_>, email: &str) -> Client {
    let id = uow.generate_id(PREFIX_CLIENT).await.unwrap();
    let client = client_fixture(&id, email);
    uow.insert_client(&client, "hash").await.unwrap();
    client
}

/// Insert an available employee able to impersonate `medium_ids`.
pub async fn sample_employee(uow: &UnitOfWork<'_>, email: &str, medium_ids: &[&str]) -> Employee {
    let id = uow.generate_id(PREFIX_EMPLOYEE).await.unwrap();
    let mut medium_ids: Vec<String> = medium_ids.iter().map(|m| (*m).to_string()).collect();
    medium_ids.sort();
    let employee = Employee {
        person: person(&id, email),
        available: true,
        medium_ids,
    };
    uow.insert_employee(&employee, "hash").await.unwrap();
    employee
}

/// Insert a tarot reader with no linked employees.
pub async fn sample_medium(uow: &UnitOfWork<'_>, id: &str, name: &str) -> Medium {
    let medium = Medium {
        id: id.into(),
        name: name.into(),
        description: "My cards answer every question.".into(),
        profile: MediumProfile::TarotReader,
        employee_ids: Vec::new(),
        created_at: Utc::now(),
    };
    uow.insert_medium(&medium).await.unwrap();
    medium
}

pub fn conversation_fixture(
    id: &str,
    client_id: &str,
    medium_id: &str,
    employee_id: &str,
    requested_at: DateTime<Utc>,
) -> Conversation {
    Conversation {
        id: id.into(),
        client_id: client_id.into(),
        medium_id: medium_id.into(),
        employee_id: employee_id.into(),
        status: ConversationStatus::Requested,
        requested_at,
        started_at: None,
        ended_at: None,
        comment: None,
    }
}
