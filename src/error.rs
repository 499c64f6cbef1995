use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: name, email, message";
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Server email is not configured. Set BREVO_SMTP_USER, BREVO_SMTP_PASS, FROM_EMAIL, CONTACT_TO_EMAIL.";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// Relay credentials or addresses are unset. Carries the missing keys for
    /// the server log only.
    #[error("{}", NOT_CONFIGURED_MESSAGE)]
    MailNotConfigured(Vec<&'static str>),

    /// The transport failed. Detail is logged where the failure happens and
    /// never reaches the response.
    #[error("{}", SEND_FAILED_MESSAGE)]
    MailDelivery,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::MailNotConfigured(_) | AppError::MailDelivery => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(_: serde_json::Error) -> Self {
        AppError::BadRequest("Invalid JSON body".to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
