use std::io::Write;

use crate::{Mail, Notifier, Sms};

/// Renders notifications on stderr and traces them.
///
/// With `echo` off the messages only reach the log.
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    echo: bool,
}

impl ConsoleNotifier {
    #[must_use]
    pub const fn new(echo: bool) -> Self {
        Self { echo }
    }

    fn render_mail(mail: &Mail) -> String {
        format!(
            "~<[ Mail ]>~\nFrom: {}\nTo: {}\nSubject: {}\n\n{}\n",
            mail.from, mail.to, mail.subject, mail.body
        )
    }

    fn render_sms(sms: &Sms) -> String {
        format!("~<[ SMS ]>~\nTo: {}\n\n{}\n", sms.to, sms.body)
    }

    fn emit(&self, text: &str) {
        if !self.echo {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        if let Err(e) = writeln!(stderr, "{text}") {
            tracing::warn!(error = %e, "could not echo notification");
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn send_mail(&self, mail: &Mail) {
        tracing::info!(to = %mail.to, subject = %mail.subject, "mail sent");
        self.emit(&Self::render_mail(mail));
    }

    fn send_sms(&self, sms: &Sms) {
        tracing::info!(to = %sms.to, "sms sent");
        self.emit(&Self::render_sms(sms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mail_rendering_has_headers_and_body() {
        let text = ConsoleNotifier::render_mail(&Mail {
            from: "contact@posit.if".into(),
            to: "ada@example.org".into(),
            subject: "Welcome".into(),
            body: "Your client number is cli-1".into(),
        });
        assert!(text.contains("From: contact@posit.if"));
        assert!(text.contains("To: ada@example.org"));
        assert!(text.contains("Subject: Welcome"));
        assert!(text.ends_with("Your client number is cli-1\n"));
    }

    #[test]
    fn sms_rendering() {
        let text = ConsoleNotifier::render_sms(&Sms {
            to: "0600000001".into(),
            body: "hello".into(),
        });
        assert!(text.starts_with("~<[ SMS ]>~"));
        assert!(text.contains("To: 0600000001"));
    }

    #[test]
    fn silent_notifier_does_not_panic() {
        let notifier = ConsoleNotifier::new(false);
        notifier.send_sms(&Sms {
            to: "0600000001".into(),
            body: "quiet".into(),
        });
    }
}
