//! Rows returned by the statistics queries.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of consultations held by one medium.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MediumTally {
    pub medium_id: String,
    pub medium_name: String,
    pub conversations: i64,
}

/// Number of consultations handled by one employee.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct EmployeeTally {
    pub employee_id: String,
    pub display_name: String,
    pub conversations: i64,
}

/// Fraction of all consultations handled by one employee, in `0.0..=1.0`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct EmployeeShare {
    pub employee_id: String,
    pub display_name: String,
    pub share: f64,
}

impl EmployeeShare {
    /// Turn tallies into shares of their total.
    ///
    /// Returns an empty list when the total is zero, so callers never divide
    /// by zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_tallies(tallies: &[EmployeeTally]) -> Vec<Self> {
        let total: i64 = tallies.iter().map(|t| t.conversations).sum();
        if total == 0 {
            return Vec::new();
        }
        tallies
            .iter()
            .map(|t| Self {
                employee_id: t.employee_id.clone(),
                display_name: t.display_name.clone(),
                share: t.conversations as f64 / total as f64,
            })
            .collect()
    }
}
