//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_seed_catalog() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Seed the employees and mediums catalog when the database is empty.
    #[serde(default = "default_seed_catalog")]
    pub seed_catalog: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed_catalog: default_seed_catalog(),
        }
    }
}
