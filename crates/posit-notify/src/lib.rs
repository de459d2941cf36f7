//! # posit-notify
//!
//! Outbound mail and SMS for POSIT'IF.
//!
//! Notifications are fire-and-forget: a [`Notifier`] never reports failure
//! back to the caller, and a lost message never rolls back a consultation.

mod console;
mod recording;

pub use console::ConsoleNotifier;
pub use recording::{RecordingNotifier, Sent};

use serde::Serialize;

/// A mail sent to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// A text message sent to a phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sms {
    pub to: String,
    pub body: String,
}

/// Delivery channel for notifications.
pub trait Notifier: Send + Sync {
    fn send_mail(&self, mail: &Mail);

    fn send_sms(&self, sms: &Sms);
}
