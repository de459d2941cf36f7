use std::sync::Mutex;

use serde::Serialize;

use crate::{Mail, Notifier, Sms};

/// One captured notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "channel", rename_all = "snake_case")]
pub enum Sent {
    Mail(Mail),
    Sms(Sms),
}

/// Keeps every notification in memory, in send order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Sent>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<Sent> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    #[must_use]
    pub fn mails(&self) -> Vec<Mail> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Mail(mail) => Some(mail),
                Sent::Sms(_) => None,
            })
            .collect()
    }

    #[must_use]
    pub fn sms(&self) -> Vec<Sms> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Sms(sms) => Some(sms),
                Sent::Mail(_) => None,
            })
            .collect()
    }

    fn push(&self, item: Sent) {
        match self.sent.lock() {
            Ok(mut sent) => sent.push(item),
            Err(poisoned) => poisoned.into_inner().push(item),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn send_mail(&self, mail: &Mail) {
        tracing::debug!(to = %mail.to, "mail recorded");
        self.push(Sent::Mail(mail.clone()));
    }

    fn send_sms(&self, sms: &Sms) {
        tracing::debug!(to = %sms.to, "sms recorded");
        self.push(Sent::Sms(sms.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_in_send_order() {
        let notifier = RecordingNotifier::new();
        let sms = Sms {
            to: "0600000001".into(),
            body: "first".into(),
        };
        let mail = Mail {
            from: "contact@posit.if".into(),
            to: "ada@example.org".into(),
            subject: "second".into(),
            body: String::new(),
        };
        notifier.send_sms(&sms);
        notifier.send_mail(&mail);

        assert_eq!(notifier.sent(), vec![Sent::Sms(sms.clone()), Sent::Mail(mail.clone())]);
        assert_eq!(notifier.sms(), vec![sms]);
        assert_eq!(notifier.mails(), vec![mail]);
    }

    #[test]
    fn serializes_with_channel_tag() {
        let json = serde_json::to_value(Sent::Sms(Sms {
            to: "0600000001".into(),
            body: "hi".into(),
        }))
        .unwrap();
        assert_eq!(json["channel"], "sms");
        assert_eq!(json["to"], "0600000001");
    }
}
