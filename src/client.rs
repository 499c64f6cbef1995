//! Client side of the contact form: posts a submission to the relay and turns
//! the response into a typed result.

use reqwest::Client;

use crate::models::{ContactResponse, ContactSubmission};

pub const CONTACT_PATH: &str = "/api/contact";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success status. The message is the response body, or a generic
    /// status line when the body is empty.
    #[error("{message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
}

#[derive(Debug, Clone)]
pub struct ContactClient {
    client: Client,
    base_url: String,
}

impl ContactClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Sends exactly one request. No retry, no timeout beyond the client's own.
    pub async fn send_contact(
        &self,
        payload: &ContactSubmission,
    ) -> Result<ContactResponse, ClientError> {
        let res = self
            .client
            .post(format!("{}{}", self.base_url, CONTACT_PATH))
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                format!("Request failed with {}", status.as_u16())
            } else {
                body
            };
            return Err(ClientError::Status { status, message });
        }

        Ok(res.json::<ContactResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn payload() -> ContactSubmission {
        ContactSubmission::new("A", "a@x.com", None, "hi")
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "name": "A", "email": "a@x.com", "message": "hi" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "id": "abc" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ContactClient::new(server.uri());
        let response = client.send_contact(&payload()).await.expect("Should succeed");

        assert_eq!(
            response,
            ContactResponse {
                ok: true,
                id: "abc".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_error_status_uses_body_as_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad"))
            .expect(1)
            .mount(&server)
            .await;

        let err = ContactClient::new(server.uri())
            .send_contact(&payload())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "bad");
        assert!(matches!(err, ClientError::Status { status, .. } if status.as_u16() == 400));
    }

    #[tokio::test]
    async fn test_error_status_with_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/contact"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = ContactClient::new(format!("{}/", server.uri()))
            .send_contact(&payload())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Request failed with 502");
    }
}
