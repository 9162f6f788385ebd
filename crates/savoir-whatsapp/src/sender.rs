// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound message relay.
//!
//! One POST per send, no retry: delivery failures surface to the caller,
//! which decides whether to try again.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use savoir_core::SavoirError;
use tracing::{debug, info, warn};

/// Request timeout for outbound sends.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sends text messages through the WhatsApp Business send API.
#[derive(Debug, Clone)]
pub struct WhatsAppSender {
    client: reqwest::Client,
    base_url: String,
    phone_number_id: String,
}

impl WhatsAppSender {
    /// Creates a new sender.
    ///
    /// Missing credentials are construction-time errors.
    pub fn new(
        api_key: &str,
        phone_number_id: &str,
        base_url: impl Into<String>,
    ) -> Result<Self, SavoirError> {
        if api_key.trim().is_empty() {
            return Err(SavoirError::Config(
                "whatsapp.api_key is required for the message relay".into(),
            ));
        }
        if phone_number_id.trim().is_empty() {
            return Err(SavoirError::Config(
                "whatsapp.phone_number_id is required for the message relay".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|e| SavoirError::Config(format!("invalid WhatsApp API key: {e}")))?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SavoirError::Channel {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            phone_number_id: phone_number_id.to_string(),
        })
    }

    /// Sends one text message. Exactly one attempt; anything but HTTP 200
    /// is a delivery error carrying the remote status and body.
    pub async fn send_text(&self, to: &str, body: &str) -> Result<(), SavoirError> {
        debug!(to, "sending WhatsApp message");
        let url = format!("{}/{}/messages", self.base_url, self.phone_number_id);
        let payload = serde_json::json!({
            "messaging_product": "whatsapp",
            "preview_url": false,
            "recipient_type": "individual",
            "to": to,
            "type": "text",
            "text": { "body": body }
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| SavoirError::Channel {
                message: format!("send request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            warn!(to, status = %status, body = %body, "message delivery failed");
            return Err(SavoirError::channel(format!(
                "failed to send message: HTTP {status}: {body}"
            )));
        }

        info!(to, "message delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sender(base_url: &str) -> WhatsAppSender {
        WhatsAppSender::new("wa-token", "98765", base_url).unwrap()
    }

    #[test]
    fn new_requires_credentials() {
        assert!(matches!(
            WhatsAppSender::new("", "98765", "https://graph.example.com"),
            Err(SavoirError::Config(_))
        ));
        assert!(matches!(
            WhatsAppSender::new("wa-token", " ", "https://graph.example.com"),
            Err(SavoirError::Config(_))
        ));
    }

    #[tokio::test]
    async fn send_text_posts_expected_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/98765/messages"))
            .and(header("authorization", "Bearer wa-token"))
            .and(body_json(serde_json::json!({
                "messaging_product": "whatsapp",
                "preview_url": false,
                "recipient_type": "individual",
                "to": "15550002222",
                "type": "text",
                "text": {"body": "hello there"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "messages": [{"id": "wamid.out"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        sender(&server.uri())
            .send_text("15550002222", "hello there")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_200_is_a_delivery_error_with_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/98765/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "invalid token"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = sender(&server.uri())
            .send_text("15550002222", "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, SavoirError::Channel { .. }));
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("invalid token"));
        // A single attempt only -- verified by expect(1) on drop.
    }

    #[tokio::test]
    async fn transport_failure_is_a_channel_error() {
        let sender = WhatsAppSender::new("wa-token", "98765", "http://127.0.0.1:1").unwrap();
        let err = sender.send_text("15550002222", "hi").await.unwrap_err();
        assert!(matches!(err, SavoirError::Channel { .. }));
    }
}
