//! Notification settings.

use serde::{Deserialize, Serialize};

fn default_sender() -> String {
    "contact@posit.if".to_string()
}

const fn default_echo() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotifyConfig {
    /// Address mails are sent from.
    #[serde(default = "default_sender")]
    pub sender: String,

    /// Print simulated mails and SMS to stderr.
    #[serde(default = "default_echo")]
    pub echo: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            sender: default_sender(),
            echo: default_echo(),
        }
    }
}
