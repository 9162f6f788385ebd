// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the assistant threads/runs API.
//!
//! Handles request construction, bearer authentication, and error
//! normalization. All remote failures (status >= 400, malformed bodies,
//! transport errors) surface as [`SavoirError::Assistant`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use savoir_core::{AssistantApi, RunSnapshot, SavoirError, ToolOutputSubmission};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::instructions::INSTRUCTIONS;
use crate::types::{
    ApiErrorResponse, AssistantObject, CreateAssistantRequest, ListEnvelope, MessageObject,
    ModifyAssistantRequest, RunObject, ThreadObject,
};

/// Name under which a new assistant is provisioned.
const ASSISTANT_NAME: &str = "Savoir";

/// Request timeout for assistant API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the assistant service.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    client: reqwest::Client,
    base_url: String,
}

impl AssistantClient {
    /// Creates a new assistant API client.
    ///
    /// A missing or empty `api_key` is a construction-time error.
    pub fn new(api_key: &str, base_url: impl Into<String>) -> Result<Self, SavoirError> {
        if api_key.trim().is_empty() {
            return Err(SavoirError::Config(
                "assistant.api_key is required for the assistant client".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|e| SavoirError::Config(format!("invalid assistant API key: {e}")))?,
        );
        headers.insert("OpenAI-Beta", HeaderValue::from_static("assistants=v2"));
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SavoirError::Assistant {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    // --- Assistant provisioning ---

    /// Retrieves an assistant by ID.
    pub async fn retrieve_assistant(&self, assistant_id: &str) -> Result<AssistantObject, SavoirError> {
        self.send(self.client.get(self.url(&format!("/assistants/{assistant_id}"))))
            .await
    }

    /// Creates a new assistant with the packaged instructions and the
    /// given tool definitions.
    pub async fn create_assistant(
        &self,
        model: &str,
        tools: Vec<serde_json::Value>,
    ) -> Result<AssistantObject, SavoirError> {
        let body = CreateAssistantRequest {
            name: ASSISTANT_NAME.to_string(),
            instructions: INSTRUCTIONS.to_string(),
            tools,
            model: model.to_string(),
        };
        self.send(self.client.post(self.url("/assistants")).json(&body))
            .await
    }

    /// Pushes the latest instructions and tool definitions to an existing
    /// assistant.
    pub async fn update_assistant(
        &self,
        assistant_id: &str,
        tools: Vec<serde_json::Value>,
    ) -> Result<AssistantObject, SavoirError> {
        let body = ModifyAssistantRequest {
            instructions: INSTRUCTIONS.to_string(),
            tools,
        };
        let assistant: AssistantObject = self
            .send(
                self.client
                    .post(self.url(&format!("/assistants/{assistant_id}")))
                    .json(&body),
            )
            .await?;
        info!(assistant_id = %assistant.id, "assistant updated");
        Ok(assistant)
    }

    /// Resolves the assistant to run against: retrieves `assistant_id`
    /// when configured, otherwise creates a fresh assistant and logs its
    /// ID so it can be pinned in configuration.
    pub async fn get_or_create_assistant(
        &self,
        assistant_id: Option<&str>,
        model: &str,
        tools: Vec<serde_json::Value>,
    ) -> Result<AssistantObject, SavoirError> {
        if let Some(id) = assistant_id {
            debug!(assistant_id = %id, "retrieving pre-provisioned assistant");
            return self.retrieve_assistant(id).await;
        }

        let assistant = self.create_assistant(model, tools).await?;
        info!(
            assistant_id = %assistant.id,
            "created new assistant; set assistant.assistant_id to reuse it"
        );
        Ok(assistant)
    }

    // --- Internals ---

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and decodes the JSON response, normalizing every
    /// failure mode into `SavoirError::Assistant`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SavoirError> {
        let response = request.send().await.map_err(|e| SavoirError::Assistant {
            message: format!("request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| SavoirError::Assistant {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(status = %status, "assistant response received");

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(err) => format!(
                    "assistant API error ({}): {}",
                    err.error.error_type.as_deref().unwrap_or("unknown"),
                    err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            warn!(status = %status, error = %message, "assistant request failed");
            return Err(SavoirError::assistant(message));
        }

        serde_json::from_str(&body).map_err(|e| SavoirError::Assistant {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

#[async_trait]
impl AssistantApi for AssistantClient {
    async fn create_thread(&self) -> Result<String, SavoirError> {
        let thread: ThreadObject = self
            .send(
                self.client
                    .post(self.url("/threads"))
                    .json(&serde_json::json!({})),
            )
            .await?;
        Ok(thread.id)
    }

    async fn add_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<String, SavoirError> {
        let body = serde_json::json!({ "role": "user", "content": content });
        let message: MessageObject = self
            .send(
                self.client
                    .post(self.url(&format!("/threads/{thread_id}/messages")))
                    .json(&body),
            )
            .await?;
        Ok(message.id)
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<RunSnapshot, SavoirError> {
        let body = serde_json::json!({ "assistant_id": assistant_id });
        let run: RunObject = self
            .send(
                self.client
                    .post(self.url(&format!("/threads/{thread_id}/runs")))
                    .json(&body),
            )
            .await?;
        Ok(run.into_snapshot())
    }

    async fn retrieve_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunSnapshot, SavoirError> {
        let run: RunObject = self
            .send(
                self.client
                    .get(self.url(&format!("/threads/{thread_id}/runs/{run_id}"))),
            )
            .await?;
        Ok(run.into_snapshot())
    }

    async fn latest_run(&self, thread_id: &str) -> Result<Option<RunSnapshot>, SavoirError> {
        let runs: ListEnvelope<RunObject> = self
            .send(
                self.client
                    .get(self.url(&format!("/threads/{thread_id}/runs")))
                    .query(&[("limit", "1"), ("order", "desc")]),
            )
            .await?;
        Ok(runs.data.into_iter().next().map(RunObject::into_snapshot))
    }

    async fn latest_assistant_message(
        &self,
        thread_id: &str,
    ) -> Result<Option<String>, SavoirError> {
        let messages: ListEnvelope<MessageObject> = self
            .send(
                self.client
                    .get(self.url(&format!("/threads/{thread_id}/messages")))
                    .query(&[("limit", "1"), ("order", "desc")]),
            )
            .await?;
        Ok(messages.data.first().and_then(MessageObject::first_text))
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutputSubmission],
    ) -> Result<(), SavoirError> {
        let body = serde_json::json!({ "tool_outputs": outputs });
        let _: RunObject = self
            .send(
                self.client
                    .post(self.url(&format!(
                        "/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"
                    )))
                    .json(&body),
            )
            .await?;
        Ok(())
    }
}
