// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document management tools.

use std::sync::Arc;

use async_trait::async_trait;
use savoir_core::SavoirError;
use savoir_retrieval::RetrievalClient;

use crate::builtin::require_str;
use crate::tool::{Tool, ToolOutput};

/// Creates a document and adds it to a collection.
///
/// The two steps are dependent: a document must not exist outside a
/// collection. If the association step fails the document is left
/// orphaned on the remote side — there is no compensating delete — so the
/// error names the created document ID, letting the assistant retry the
/// association.
pub struct CreateDocumentTool {
    client: Arc<RetrievalClient>,
}

impl CreateDocumentTool {
    pub fn new(client: Arc<RetrievalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateDocumentTool {
    fn name(&self) -> &str {
        "create_document"
    }

    fn description(&self) -> &str {
        "Creates a new document with the given content and adds it to a collection. The collection must be specified."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "raw_text": {
                    "type": "string",
                    "description": "The text content to be uploaded."
                },
                "collection_id": {
                    "type": "string",
                    "description": "ID of the collection to add the document to. This is required."
                }
            },
            "required": ["raw_text", "collection_id"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SavoirError> {
        let raw_text = require_str(&input, "raw_text")?;
        let collection_id = require_str(&input, "collection_id")?;

        let document = self
            .client
            .create_document(raw_text)
            .await
            .map_err(|e| SavoirError::retrieval(format!("failed to create document: {e}")))?;

        self.client
            .add_document_to_collection(collection_id, &document.id)
            .await
            .map_err(|e| {
                SavoirError::retrieval(format!(
                    "document {} created but adding it to collection {collection_id} failed: {e}",
                    document.id
                ))
            })?;

        Ok(ToolOutput::success(serde_json::json!({
            "document_id": document.id,
            "collection_id": collection_id,
        })))
    }
}

/// Adds an existing document to a collection.
pub struct AddDocumentToCollectionTool {
    client: Arc<RetrievalClient>,
}

impl AddDocumentToCollectionTool {
    pub fn new(client: Arc<RetrievalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for AddDocumentToCollectionTool {
    fn name(&self) -> &str {
        "add_document_to_collection"
    }

    fn description(&self) -> &str {
        "Adds an existing document to a collection."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "document_id": {
                    "type": "string",
                    "description": "ID of the document to add."
                },
                "collection_id": {
                    "type": "string",
                    "description": "ID of the collection to add the document to."
                }
            },
            "required": ["document_id", "collection_id"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SavoirError> {
        let document_id = require_str(&input, "document_id")?;
        let collection_id = require_str(&input, "collection_id")?;

        self.client
            .add_document_to_collection(collection_id, document_id)
            .await?;

        Ok(ToolOutput::success(serde_json::json!({
            "document_id": document_id,
            "collection_id": collection_id,
        })))
    }
}
