//! ID prefix constants.
//!
//! Every entity ID is `{prefix}-{8 hex chars}`, generated by the database
//! (see `posit_db::UnitOfWork::generate_id`).

pub const PREFIX_CLIENT: &str = "cli";
pub const PREFIX_EMPLOYEE: &str = "emp";
pub const PREFIX_MEDIUM: &str = "med";
pub const PREFIX_CONVERSATION: &str = "cnv";

/// All known prefixes, in a stable order.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_CLIENT,
    PREFIX_EMPLOYEE,
    PREFIX_MEDIUM,
    PREFIX_CONVERSATION,
];
