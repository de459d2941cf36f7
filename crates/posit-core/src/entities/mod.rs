//! Entity structs for all POSIT'IF domain objects.
//!
//! Each entity maps to one or more tables in the libSQL database (see
//! `posit-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON roundtrip and schema validation.
//!
//! Back-references (a client's conversations, a medium's conversations, ...)
//! are not embedded: the conversation row owns the relation and the lists are
//! served by queries.

mod conversation;
mod medium;
mod person;

pub use conversation::Conversation;
pub use medium::{Medium, MediumProfile};
pub use person::{Account, Client, ClientRegistration, Employee, Person};
