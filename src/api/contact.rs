use axum::http::{header, HeaderMap};
use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use crate::error::{AppError, Result};
use crate::models::{ContactResponse, ContactSubmission};
use crate::state::AppState;

/// Contact routes
pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", post(send_contact))
}

/// Only `application/json` bodies are read; anything else, like an empty body,
/// is a submission with no fields.
fn parse_submission(headers: &HeaderMap, body: &[u8]) -> Result<ContactSubmission> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ContactSubmission::default());
    }
    Ok(serde_json::from_slice(body)?)
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

/// POST /api/contact - Relay a contact form submission by email
async fn send_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ContactResponse>> {
    let submission = parse_submission(&headers, &body)?.validate()?;

    // Client input errors take precedence over server misconfiguration.
    let Some(route) = state.config.smtp.route() else {
        let missing = state.config.smtp.missing_keys();
        tracing::error!(missing = ?missing, "Contact relay is not configured");
        return Err(AppError::MailNotConfigured(missing));
    };

    let id = state
        .mailer
        .send_contact(&route, &submission)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, error.debug = ?e, "Failed to send contact email");
            AppError::MailDelivery
        })?;

    tracing::info!(message_id = %id, to = %route.destination, "Contact message relayed");

    Ok(Json(ContactResponse { ok: true, id }))
}
