//! Contact message composition.
//!
//! Submitted values are interpolated into the HTML body as-is; nothing is escaped.

use crate::config::MailRoute;
use crate::models::ValidSubmission;

use super::{OutgoingEmail, SENDER_NAME};

pub fn compose(route: &MailRoute, submission: &ValidSubmission) -> OutgoingEmail {
    OutgoingEmail {
        from_name: SENDER_NAME.to_string(),
        from: route.sender.clone(),
        to: route.destination.clone(),
        reply_to: submission.email.clone(),
        subject: submission.subject_line(),
        text: text_body(submission),
        html: html_body(submission),
    }
}

fn text_body(submission: &ValidSubmission) -> String {
    format!(
        "Name: {}\nEmail: {}\n\n{}",
        submission.name, submission.email, submission.message
    )
}

fn html_body(submission: &ValidSubmission) -> String {
    let subject = match submission.subject.as_deref() {
        Some(subject) if !subject.is_empty() => {
            format!("<p><strong>Subject:</strong> {}</p>", subject)
        }
        _ => String::new(),
    };

    format!(
        r#"<div style="font-family:system-ui,Segoe UI,Roboto,Arial;line-height:1.6">
  <h2>New Contact Message</h2>
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Email:</strong> {email}</p>
  {subject}
  <hr/>
  <pre style="white-space:pre-wrap">{message}</pre>
</div>"#,
        name = submission.name,
        email = submission.email,
        subject = subject,
        message = submission.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> MailRoute {
        MailRoute {
            sender: "relay@example.com".to_string(),
            destination: "me@example.com".to_string(),
        }
    }

    fn valid(subject: Option<&str>) -> ValidSubmission {
        ValidSubmission {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            subject: subject.map(str::to_string),
            message: "hi".to_string(),
        }
    }

    #[test]
    fn test_compose_envelope() {
        let email = compose(&route(), &valid(None));

        assert_eq!(email.from_name, "Portfolio Contact");
        assert_eq!(email.from, "relay@example.com");
        assert_eq!(email.to, "me@example.com");
        assert_eq!(email.reply_to, "a@x.com");
        assert_eq!(email.subject, "New message from A");
        assert_eq!(email.text, "Name: A\nEmail: a@x.com\n\nhi");
    }

    #[test]
    fn test_html_omits_subject_paragraph_when_absent() {
        let email = compose(&route(), &valid(None));

        assert!(email.html.contains("<h2>New Contact Message</h2>"));
        assert!(email.html.contains("<p><strong>Name:</strong> A</p>"));
        assert!(email.html.contains("<p><strong>Email:</strong> a@x.com</p>"));
        assert!(email.html.contains(r#"<pre style="white-space:pre-wrap">hi</pre>"#));
        assert!(!email.html.contains("Subject:"));
    }

    #[test]
    fn test_html_includes_subject_when_given() {
        let email = compose(&route(), &valid(Some("Project")));

        assert_eq!(email.subject, "Project");
        assert!(email.html.contains("<p><strong>Subject:</strong> Project</p>"));
    }

    #[test]
    fn test_html_is_not_escaped() {
        let mut submission = valid(None);
        submission.message = "<b>bold</b>".to_string();

        let email = compose(&route(), &submission);
        assert!(email.html.contains("<b>bold</b>"));
    }
}
