//! Repository modules for all POSIT'IF entities.
//!
//! Each module adds methods to `UnitOfWork` via `impl UnitOfWork<'_>` blocks,
//! so queries always run inside the caller's transaction.

pub mod clients;
pub mod conversations;
pub mod employees;
pub mod mediums;
pub mod persons;
pub mod reports;
