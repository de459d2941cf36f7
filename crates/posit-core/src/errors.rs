//! Cross-cutting error types for POSIT'IF.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ServiceError`) are defined in
//! their respective crates. The CLI converges everything into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any POSIT'IF crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed validation (range, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
