use async_trait::async_trait;
use lettre::message::header::{self, HeaderName, HeaderValue};
use lettre::message::{Mailbox, Mailboxes, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use uuid::Uuid;

use crate::config::SmtpConfig;

use super::{MailError, MailTransport, OutgoingEmail};

/// SMTP relay transport (STARTTLS, authenticated when credentials are configured)
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);

        match config.credentials() {
            Some((username, password)) => {
                builder = builder.credentials(Credentials::new(username, password));
                tracing::info!(
                    smtp_host = %config.host,
                    smtp_port = config.port,
                    "SMTP mailer initialized with authentication"
                );
            }
            None => {
                tracing::warn!(
                    smtp_host = %config.host,
                    smtp_port = config.port,
                    "SMTP credentials not configured, contact messages will be refused"
                );
            }
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    fn build_message(email: OutgoingEmail, message_id: String) -> Result<Message, MailError> {
        let from = Mailbox::new(Some(email.from_name), email.from.parse::<Address>()?);
        // Destination may be a comma-separated list.
        let to = email.to.parse::<Mailboxes>()?;

        let mut builder = Message::builder()
            .from(from)
            .mailbox(header::To::from(to));

        // The submitter's address is not validated; anything that is not a
        // mailbox is carried verbatim.
        builder = match email.reply_to.parse::<Mailbox>() {
            Ok(reply_to) => builder.reply_to(reply_to),
            Err(_) => builder.raw_header(HeaderValue::new(
                HeaderName::new_from_ascii_str("Reply-To"),
                single_line(&email.reply_to),
            )),
        };

        let message = builder
            .subject(email.subject)
            .message_id(Some(message_id))
            .multipart(MultiPart::alternative_plain_html(email.text, email.html))?;

        Ok(message)
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<String, MailError> {
        let message_id = generate_message_id(&email.from);
        let message = Self::build_message(email, message_id.clone())?;

        let response = self.transport.send(message).await?;
        if !response.is_positive() {
            return Err(MailError::Rejected(format!(
                "{} {}",
                response.code(),
                response.message().collect::<Vec<_>>().join(" ")
            )));
        }

        Ok(message_id)
    }
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

/// `<uuid@sender-domain>`, the same shape as a client-assigned Message-ID header.
fn generate_message_id(sender: &str) -> String {
    let domain = sender
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
        .unwrap_or("localhost");

    format!("<{}@{}>", Uuid::new_v4(), domain)
}
