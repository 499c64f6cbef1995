pub mod contact;
pub mod health;

use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::state::AppState;

/// JSON bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 100 * 1024;

/// Create the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(contact::contact_routes())
        .merge(health::health_routes())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, Response};
    use serde_json::Value;

    use crate::config::Config;
    use crate::mail::{MailError, MailTransport, Mailer, OutgoingEmail};
    use crate::state::AppState;

    /// Transport double that records every message and answers with a fixed outcome.
    #[derive(Clone, Default)]
    pub struct RecordingTransport {
        pub sent: Arc<Mutex<Vec<OutgoingEmail>>>,
        pub fail_with: Option<String>,
    }

    impl RecordingTransport {
        pub fn failing(detail: &str) -> Self {
            Self {
                fail_with: Some(detail.to_string()),
                ..Default::default()
            }
        }

        pub fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, email: OutgoingEmail) -> Result<String, MailError> {
            self.sent.lock().unwrap().push(email);
            match &self.fail_with {
                Some(detail) => Err(MailError::Rejected(detail.clone())),
                None => Ok("<provider-id@example.com>".to_string()),
            }
        }
    }

    pub fn configured() -> Config {
        config_with(&[
            ("BREVO_SMTP_USER", "relay@example.com"),
            ("BREVO_SMTP_PASS", "secret"),
            ("FROM_EMAIL", "portfolio@example.com"),
            ("CONTACT_TO_EMAIL", "me@example.com"),
        ])
    }

    pub fn config_with(pairs: &[(&str, &str)]) -> Config {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .expect("Should build test config")
    }

    pub fn app(config: Config, transport: RecordingTransport) -> axum::Router {
        super::create_router(AppState::new(config, Mailer::new(transport)))
    }

    pub fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    pub async fn json_body(response: Response<Body>) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
