// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collection management tools.

use std::sync::Arc;

use async_trait::async_trait;
use savoir_core::SavoirError;
use savoir_retrieval::RetrievalClient;

use crate::builtin::{optional_str, require_str, u32_or, validate_collection_name};
use crate::tool::{Tool, ToolOutput};

/// Creates a new collection to store documents.
pub struct CreateCollectionTool {
    client: Arc<RetrievalClient>,
}

impl CreateCollectionTool {
    pub fn new(client: Arc<RetrievalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateCollectionTool {
    fn name(&self) -> &str {
        "create_collection"
    }

    fn description(&self) -> &str {
        "Creates a new collection to store documents."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Name of the collection."
                },
                "description": {
                    "type": "string",
                    "description": "Optional description of the collection."
                }
            },
            "required": ["name"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SavoirError> {
        let name = require_str(&input, "name")?;
        validate_collection_name(name)?;
        let description = optional_str(&input, "description");

        let collection = self.client.create_collection(name, description).await?;
        Ok(ToolOutput::success(serde_json::json!({
            "id": collection.id,
            "name": collection.name,
            "description": collection.description,
        })))
    }
}

/// Lists all available collections.
pub struct ListCollectionsTool {
    client: Arc<RetrievalClient>,
}

impl ListCollectionsTool {
    pub fn new(client: Arc<RetrievalClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListCollectionsTool {
    fn name(&self) -> &str {
        "list_user_collections"
    }

    fn description(&self) -> &str {
        "Lists all available collections."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "offset": {
                    "type": "integer",
                    "description": "Number of collections to skip.",
                    "default": 0
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of collections to return.",
                    "default": 100
                }
            },
            "required": []
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SavoirError> {
        let offset = u32_or(&input, "offset", 0);
        let limit = u32_or(&input, "limit", 100);

        let page = self.client.list_collections(offset, limit).await?;
        let results: Vec<serde_json::Value> = page
            .results
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "name": c.name,
                    "description": c.description.as_deref().unwrap_or(""),
                    "document_count": c.document_count.unwrap_or(0),
                })
            })
            .collect();

        Ok(ToolOutput::success(serde_json::json!({
            "results": results,
            "total_entries": page.total_entries,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> Arc<RetrievalClient> {
        Arc::new(RetrievalClient::new("test-key", base_url).unwrap())
    }

    #[tokio::test]
    async fn create_collection_validates_before_any_network_call() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let tool = CreateCollectionTool::new(client(&server.uri()));

        let err = tool.invoke(serde_json::json!({})).await.unwrap_err();
        assert!(matches!(err, SavoirError::Validation(_)));

        let err = tool
            .invoke(serde_json::json!({"name": "a/b"}))
            .await
            .unwrap_err();
        assert!(matches!(err, SavoirError::Validation(_)));

        let err = tool
            .invoke(serde_json::json!({"name": "x".repeat(101)}))
            .await
            .unwrap_err();
        assert!(matches!(err, SavoirError::Validation(_)));

        server.verify().await;
    }

    #[tokio::test]
    async fn created_collection_appears_in_listing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": {"id": "col_x", "name": "X"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "col_x", "name": "X", "document_count": 0}],
                "total_entries": 1
            })))
            .mount(&server)
            .await;

        let client = client(&server.uri());
        let create = CreateCollectionTool::new(client.clone());
        let list = ListCollectionsTool::new(client);

        let created = create
            .invoke(serde_json::json!({"name": "X"}))
            .await
            .unwrap();
        let created: serde_json::Value = serde_json::from_str(&created.content).unwrap();
        assert_eq!(created["data"]["name"], "X");

        let listed = list.invoke(serde_json::json!({})).await.unwrap();
        let listed: serde_json::Value = serde_json::from_str(&listed.content).unwrap();
        let names: Vec<&str> = listed["data"]["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"X"));
    }

    #[tokio::test]
    async fn listing_normalizes_missing_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": "col_1", "name": "Sparse"}],
                "total_entries": 1
            })))
            .mount(&server)
            .await;

        let tool = ListCollectionsTool::new(client(&server.uri()));
        let output = tool.invoke(serde_json::json!({})).await.unwrap();
        let payload: serde_json::Value = serde_json::from_str(&output.content).unwrap();
        assert_eq!(payload["data"]["results"][0]["description"], "");
        assert_eq!(payload["data"]["results"][0]["document_count"], 0);
        assert_eq!(payload["data"]["total_entries"], 1);
    }

    #[tokio::test]
    async fn remote_failure_surfaces_remote_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/collections"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "message": "collection already exists"
            })))
            .mount(&server)
            .await;

        let tool = CreateCollectionTool::new(client(&server.uri()));
        let err = tool
            .invoke(serde_json::json!({"name": "Dup"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("collection already exists"));
    }
}
