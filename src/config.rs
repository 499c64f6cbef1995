use std::env;
use std::fmt;

const DEFAULT_SMTP_HOST: &str = "smtp-relay.brevo.com";
const DEFAULT_SMTP_PORT: u16 = 587;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub smtp: SmtpConfig,
}

/// SMTP relay settings. Credentials and addresses stay optional here so the
/// server can boot without them; the contact route refuses to send instead.
#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from_email: Option<String>,
    pub to_email: Option<String>,
}

/// Sender and destination of a relayed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailRoute {
    pub sender: String,
    pub destination: String,
}

impl Config {
    /// Reads the process environment. `.env` is loaded by the binary beforehand.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Empty values are
    /// treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let username = get("BREVO_SMTP_USER");

        Ok(Config {
            server_host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: get("PORT")
                .unwrap_or_else(|| "5175".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            smtp: SmtpConfig {
                host: get("BREVO_SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port: get("BREVO_SMTP_PORT")
                    .and_then(|p| p.parse().ok())
                    .filter(|p| *p != 0)
                    .unwrap_or(DEFAULT_SMTP_PORT),
                from_email: get("FROM_EMAIL").or_else(|| username.clone()),
                username,
                password: get("BREVO_SMTP_PASS"),
                to_email: get("CONTACT_TO_EMAIL"),
            },
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl SmtpConfig {
    /// Environment keys required for relaying that are currently unset.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        [
            ("BREVO_SMTP_USER", self.username.is_none()),
            ("BREVO_SMTP_PASS", self.password.is_none()),
            ("FROM_EMAIL", self.from_email.is_none()),
            ("CONTACT_TO_EMAIL", self.to_email.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, missing)| missing.then_some(key))
        .collect()
    }

    /// Returns the route only when every required key is present.
    pub fn route(&self) -> Option<MailRoute> {
        if !self.missing_keys().is_empty() {
            return None;
        }
        Some(MailRoute {
            sender: self.from_email.clone()?,
            destination: self.to_email.clone()?,
        })
    }

    pub fn credentials(&self) -> Option<(String, String)> {
        Some((self.username.clone()?, self.password.clone()?))
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[redacted]"))
            .field("from_email", &self.from_email)
            .field("to_email", &self.to_email)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
}
