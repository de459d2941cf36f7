//! # posit-core
//!
//! Core types, ID prefixes, and error types for POSIT'IF.
//!
//! This crate provides the foundational types shared across all POSIT'IF crates:
//! - Entity structs for people, mediums, and conversations
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - Astral profile derivation for clients
//! - Cross-cutting error types
//! - Report row types returned by the statistics queries
//! - Validated prediction scores

pub mod astral;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod reports;
pub mod score;
