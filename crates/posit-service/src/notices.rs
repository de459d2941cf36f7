//! Texts of the mails and SMS the service sends.

use posit_core::entities::{Client, Conversation, Employee, Medium};
use posit_notify::{Mail, Sms};

const WELCOME_SUBJECT: &str = "Welcome to POSIT'IF";

fn signed(greeting_name: &str, lines: &[String]) -> String {
    let mut body = format!("Hello {greeting_name},\n\n");
    for line in lines {
        body.push_str("  ");
        body.push_str(line);
        body.push('\n');
    }
    body.push_str("\n  Kind regards,\n\n    The POSIT'IF team\n");
    body
}

pub fn registration_confirmed(sender: &str, client: &Client) -> Mail {
    Mail {
        from: sender.to_string(),
        to: client.person.email.clone(),
        subject: WELCOME_SUBJECT.to_string(),
        body: signed(
            &client.person.first_name,
            &[
                "We confirm your registration to the POSIT'IF service.".to_string(),
                format!("Your client number is: {}.", client.person.id),
            ],
        ),
    }
}

pub fn registration_failed(sender: &str, first_name: &str, email: &str) -> Mail {
    Mail {
        from: sender.to_string(),
        to: email.to_string(),
        subject: WELCOME_SUBJECT.to_string(),
        body: signed(
            first_name,
            &[
                "Unfortunately your registration to the POSIT'IF service failed.".to_string(),
                "Please try again later.".to_string(),
            ],
        ),
    }
}

/// Sent to the employee who has to voice the medium.
pub fn consultation_requested(client: &Client, medium: &Medium, employee: &Employee) -> Sms {
    Sms {
        to: employee.person.phone.clone(),
        body: format!(
            "Consultation requested for {} (#{})\nMedium to impersonate: {}\n",
            client.person.display_name(),
            client.person.id,
            medium.name
        ),
    }
}

/// Sent to the client once the employee is ready.
pub fn consultation_accepted(
    conversation: &Conversation,
    client: &Client,
    employee: &Employee,
    medium: &Medium,
) -> Sms {
    Sms {
        to: client.person.phone.clone(),
        body: format!(
            "Your consultation request of {} has been registered.\n\
             You can reach me right now at {}.\n\
             See you in a moment!\n\
             Posit'ively yours, {}\n",
            conversation.requested_at.format("%d/%m/%Y"),
            employee.person.phone,
            medium.name
        ),
    }
}
