// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search and RAG tools.

use std::sync::Arc;

use async_trait::async_trait;
use savoir_core::SavoirError;
use savoir_retrieval::RetrievalClient;

use crate::builtin::{optional_str, require_str, u32_or};
use crate::tool::{Tool, ToolOutput};

/// Default chunk budget for direct search.
const DEFAULT_SEARCH_CHUNKS: u32 = 5;

/// Default chunk budget for RAG.
const DEFAULT_RAG_CHUNKS: u32 = 8;

/// Default generation model for RAG.
const DEFAULT_RAG_MODEL: &str = "gpt-4";

/// Default generation temperature for RAG.
const DEFAULT_RAG_TEMPERATURE: f64 = 0.7;

/// Performs a chunk search across documents.
pub struct SearchTool {
    client: Arc<RetrievalClient>,
}

impl SearchTool {
    pub fn new(client: Arc<RetrievalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Performs a search across documents to find relevant chunks."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "What you are searching for."
                },
                "max_chunks": {
                    "type": "integer",
                    "default": DEFAULT_SEARCH_CHUNKS
                },
                "collection_id": {
                    "type": "string",
                    "description": "Optional collection ID to restrict the search."
                },
                "semantic": {
                    "type": "boolean",
                    "description": "Whether to use semantic search (default: false)."
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SavoirError> {
        let query = require_str(&input, "query")?;
        let collection_id = optional_str(&input, "collection_id");
        let max_chunks = u32_or(&input, "max_chunks", DEFAULT_SEARCH_CHUNKS);
        let semantic = input
            .get("semantic")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let response = self
            .client
            .search(query, collection_id, max_chunks, semantic)
            .await?;

        let results = format_search_results(&response);
        Ok(ToolOutput::success(
            serde_json::json!({ "results": results }),
        ))
    }
}

/// Answers a question using information retrieved from documents.
pub struct RagTool {
    client: Arc<RetrievalClient>,
}

impl RagTool {
    pub fn new(client: Arc<RetrievalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for RagTool {
    fn name(&self) -> &str {
        "rag"
    }

    fn description(&self) -> &str {
        "Answers a question using information from documents."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The user question or request."
                },
                "collection_id": {
                    "type": "string",
                    "description": "Optional collection ID to use for retrieval."
                },
                "max_chunks": {
                    "type": "integer",
                    "default": DEFAULT_RAG_CHUNKS
                },
                "model": {
                    "type": "string",
                    "description": "Model to use for generation (default: gpt-4)."
                },
                "temperature": {
                    "type": "number",
                    "description": "Temperature for generation (default: 0.7)."
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SavoirError> {
        let query = require_str(&input, "query")?;
        let collection_id = optional_str(&input, "collection_id");
        let max_chunks = u32_or(&input, "max_chunks", DEFAULT_RAG_CHUNKS);
        let model = optional_str(&input, "model").unwrap_or(DEFAULT_RAG_MODEL);
        let temperature = input
            .get("temperature")
            .and_then(|v| v.as_f64())
            .unwrap_or(DEFAULT_RAG_TEMPERATURE);

        let response = self
            .client
            .rag(query, collection_id, max_chunks, model, temperature)
            .await?;

        Ok(ToolOutput::success(serde_json::json!({
            "answer": response.get("answer").and_then(|v| v.as_str()).unwrap_or(""),
            "context": response.get("context").cloned()
                .unwrap_or(serde_json::Value::Array(Vec::new())),
        })))
    }
}

/// Normalizes raw search hits into a fixed shape with defaulted fields.
fn format_search_results(response: &serde_json::Value) -> Vec<serde_json::Value> {
    response
        .get("results")
        .and_then(|v| v.as_array())
        .map(|results| {
            results
                .iter()
                .filter(|r| r.is_object())
                .map(|r| {
                    serde_json::json!({
                        "content": r.get("content").and_then(|v| v.as_str()).unwrap_or(""),
                        "metadata": r.get("metadata").cloned()
                            .unwrap_or_else(|| serde_json::json!({})),
                        "score": r.get("score").and_then(|v| v.as_f64()).unwrap_or(0.0),
                        "collection_id": r.get("collection_id").and_then(|v| v.as_str())
                            .unwrap_or(""),
                        "document_id": r.get("document_id").and_then(|v| v.as_str())
                            .unwrap_or(""),
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
