pub mod smtp;
pub mod template;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{MailRoute, SmtpConfig};
use crate::models::ValidSubmission;

pub use smtp::SmtpMailer;
pub use template::compose;

/// Display name used on every relayed message.
pub const SENDER_NAME: &str = "Portfolio Contact";

/// A fully composed message, independent of the transport that delivers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub from_name: String,
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Transport rejected message: {0}")]
    Rejected(String),
}

/// Something that can deliver an [`OutgoingEmail`] and report the message id
/// assigned to it.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<String, MailError>;
}

/// Mailer abstraction (backed by SMTP in production)
#[derive(Clone)]
pub struct Mailer {
    inner: Arc<dyn MailTransport>,
}

impl Mailer {
    pub fn new<T>(transport: T) -> Self
    where
        T: MailTransport + 'static,
    {
        Self {
            inner: Arc::new(transport),
        }
    }

    /// Create the SMTP-backed mailer. No connection is opened until the first send.
    pub fn smtp(config: &SmtpConfig) -> Result<Self, MailError> {
        Ok(Self::new(SmtpMailer::new(config)?))
    }

    /// Compose and send one contact message. Returns the transport's message id.
    pub async fn send_contact(
        &self,
        route: &MailRoute,
        submission: &ValidSubmission,
    ) -> Result<String, MailError> {
        let email = compose(route, submission);
        self.inner.send(email).await
    }
}
