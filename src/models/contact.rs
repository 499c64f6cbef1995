use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result, MISSING_FIELDS_MESSAGE};

/// Contact form payload as posted by the browser. Every field is optional on
/// the wire so that missing fields surface as a validation error rather than a
/// deserialization failure. Scalar values of other JSON types are read in
/// their string form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "scalar_string")]
    pub message: Option<String>,
}

/// `false` and `0` read as empty so they fail the required-field check like an
/// empty string would. Arrays and objects are rejected.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(if b { b.to_string() } else { String::new() })),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(Some(String::new())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected a string, found {}",
            other
        ))),
    }
}

/// Submission whose required fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// 200 body for a relayed message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            subject,
            message: Some(message.into()),
        }
    }

    /// Checks the required fields as received, without trimming.
    pub fn validate(self) -> Result<ValidSubmission> {
        let required = |field: Option<String>| field.filter(|v| !v.is_empty());

        match (
            required(self.name),
            required(self.email),
            required(self.message),
        ) {
            (Some(name), Some(email), Some(message)) => Ok(ValidSubmission {
                name,
                email,
                subject: self.subject,
                message,
            }),
            _ => Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string())),
        }
    }
}

impl ValidSubmission {
    /// Subject line of the relayed mail: the client's subject verbatim, or a
    /// derived one when it is absent or blank.
    pub fn subject_line(&self) -> String {
        match &self.subject {
            Some(subject) if !subject.trim().is_empty() => subject.clone(),
            _ => format!("New message from {}", self.name),
        }
    }
}
