// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the knowledge-retrieval service.
//!
//! One [`RetrievalClient`] is created at startup and shared process-wide;
//! it owns a single pooled connection set that concurrent callers reuse.
//! Expected remote failures (status >= 400, malformed bodies) and transport
//! failures are both normalized into [`SavoirError::Retrieval`] — callers
//! never see a panic or a raw reqwest error.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use savoir_core::SavoirError;
use tracing::{debug, warn};

use crate::types::{CollectionInfo, CollectionPage, DocumentInfo, ErrorBody};

/// Hard ceiling on the `limit` parameter for listing requests, applied
/// regardless of caller input.
pub const MAX_LIST_LIMIT: u32 = 1000;

/// Request timeout for retrieval calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the retrieval service's collections/documents/search/RAG API.
#[derive(Debug, Clone)]
pub struct RetrievalClient {
    client: reqwest::Client,
    base_url: String,
}

impl RetrievalClient {
    /// Creates a new retrieval client.
    ///
    /// A missing or empty `api_key` is a construction-time error: the
    /// credential problem surfaces at startup, not on the first tool call.
    pub fn new(api_key: &str, base_url: impl Into<String>) -> Result<Self, SavoirError> {
        if api_key.trim().is_empty() {
            return Err(SavoirError::Config(
                "retrieval.api_key is required for the retrieval client".into(),
            ));
        }

        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {api_key}");
        headers.insert(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|e| SavoirError::Config(format!("invalid retrieval API key: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SavoirError::Retrieval {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a new collection.
    pub async fn create_collection(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<CollectionInfo, SavoirError> {
        let mut body = serde_json::json!({ "name": name });
        if let Some(description) = description {
            body["description"] = serde_json::Value::String(description.to_string());
        }

        let value = self
            .request_json(self.client.post(self.url("/collections")).json(&body))
            .await?;
        serde_json::from_value(unwrap_results(value)).map_err(|e| SavoirError::Retrieval {
            message: format!("unexpected create-collection response shape: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Lists collections. `limit` is clamped to [`MAX_LIST_LIMIT`].
    pub async fn list_collections(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<CollectionPage, SavoirError> {
        let limit = limit.min(MAX_LIST_LIMIT);
        let value = self
            .request_json(
                self.client
                    .get(self.url("/collections"))
                    .query(&[("offset", offset), ("limit", limit)]),
            )
            .await?;
        serde_json::from_value(value).map_err(|e| SavoirError::Retrieval {
            message: format!("unexpected collection-listing response shape: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Creates a new document from raw text.
    ///
    /// The document exists outside any collection until
    /// [`add_document_to_collection`](Self::add_document_to_collection)
    /// succeeds; sequencing the two steps is the caller's responsibility.
    pub async fn create_document(&self, raw_text: &str) -> Result<DocumentInfo, SavoirError> {
        let body = serde_json::json!({ "raw_text": raw_text });
        let value = self
            .request_json(self.client.post(self.url("/documents")).json(&body))
            .await?;
        serde_json::from_value(unwrap_results(value)).map_err(|e| SavoirError::Retrieval {
            message: format!("document creation response is missing an id: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Associates an existing document with a collection.
    pub async fn add_document_to_collection(
        &self,
        collection_id: &str,
        document_id: &str,
    ) -> Result<(), SavoirError> {
        let path = format!("/collections/{collection_id}/documents/{document_id}");
        self.request_json(self.client.post(self.url(&path)))
            .await
            .map(|_| ())
    }

    /// Performs a chunk search across documents.
    pub async fn search(
        &self,
        query: &str,
        collection_id: Option<&str>,
        max_chunks: u32,
        semantic: bool,
    ) -> Result<serde_json::Value, SavoirError> {
        let mut body = serde_json::json!({
            "query": query,
            "max_chunks": max_chunks,
            "semantic": semantic,
        });
        if let Some(collection_id) = collection_id {
            body["collection_id"] = serde_json::Value::String(collection_id.to_string());
        }

        self.request_json(self.client.post(self.url("/search")).json(&body))
            .await
    }

    /// Answers a query with retrieval-augmented generation.
    pub async fn rag(
        &self,
        query: &str,
        collection_id: Option<&str>,
        max_chunks: u32,
        model: &str,
        temperature: f64,
    ) -> Result<serde_json::Value, SavoirError> {
        let mut body = serde_json::json!({
            "query": query,
            "max_chunks": max_chunks,
            "model": model,
            "temperature": temperature,
        });
        if let Some(collection_id) = collection_id {
            body["collection_id"] = serde_json::Value::String(collection_id.to_string());
        }

        self.request_json(self.client.post(self.url("/rag")).json(&body))
            .await
    }

    /// Tears the client down, closing its pooled connections.
    ///
    /// Connections held by clones of this client close when the last clone
    /// is dropped.
    pub async fn shutdown(self) {
        debug!("retrieval client shutting down");
        drop(self);
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and normalizes every failure mode into
    /// `SavoirError::Retrieval`.
    async fn request_json(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<serde_json::Value, SavoirError> {
        let response = request.send().await.map_err(|e| SavoirError::Retrieval {
            message: format!("request failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| SavoirError::Retrieval {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        debug!(status = %status, "retrieval response received");

        if status.as_u16() >= 400 {
            let message = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(err) => err
                    .message
                    .or(err.error)
                    .unwrap_or_else(|| format!("HTTP {status}")),
                Err(_) => format!("HTTP {status}: {body}"),
            };
            warn!(status = %status, error = %message, "retrieval request failed");
            return Err(SavoirError::retrieval(message));
        }

        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| SavoirError::Retrieval {
            message: format!("invalid JSON response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}

/// Unwraps the service's occasional `{"results": ...}` envelope around
/// single-entity responses.
fn unwrap_results(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) if map.contains_key("results") => {
            map.remove("results").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    }
}
