// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant API request/response wire types.
//!
//! The external service follows the Assistants-v2 contract: threads hold
//! an append-only message history, runs execute an assistant over a
//! thread, and a run waiting on tool outputs reports them under
//! `required_action.submit_tool_outputs`.

use savoir_core::{RunSnapshot, RunStatus, ToolCallRequest};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A created thread. Only the ID is used.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadObject {
    pub id: String,
}

/// A message in a thread.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageObject {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub content: Vec<MessageContentBlock>,
}

impl MessageObject {
    /// Extracts the first text block's value, if any.
    pub fn first_text(&self) -> Option<String> {
        self.content
            .iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text.as_ref())
            .map(|text| text.value.clone())
    }
}

/// One content block of a message. Non-text blocks keep their `type` but
/// carry no text payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageContentBlock {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<TextContent>,
}

/// The text payload of a text content block.
#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    pub value: String,
}

/// A run object as returned by create/retrieve/list.
#[derive(Debug, Clone, Deserialize)]
pub struct RunObject {
    pub id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
}

impl RunObject {
    /// Converts the wire object into the engine-facing snapshot, parsing
    /// each tool call's JSON-string arguments.
    ///
    /// Unparseable arguments become `null` so the tool's own validation
    /// rejects the call and the error flows back to the assistant as a
    /// tool result instead of aborting the run.
    pub fn into_snapshot(self) -> RunSnapshot {
        let tool_calls = self
            .required_action
            .map(|action| action.submit_tool_outputs.tool_calls)
            .unwrap_or_default()
            .into_iter()
            .map(|call| {
                let arguments = serde_json::from_str(&call.function.arguments).unwrap_or_else(|e| {
                    warn!(
                        tool = %call.function.name,
                        error = %e,
                        "tool call arguments are not valid JSON"
                    );
                    serde_json::Value::Null
                });
                ToolCallRequest {
                    id: call.id,
                    name: call.function.name,
                    arguments,
                }
            })
            .collect();

        RunSnapshot {
            id: self.id,
            status: self.status,
            tool_calls,
        }
    }
}

/// The `required_action` field of a run awaiting tool outputs.
#[derive(Debug, Clone, Deserialize)]
pub struct RequiredAction {
    pub submit_tool_outputs: SubmitToolOutputsAction,
}

/// Pending tool calls under a required action.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitToolOutputsAction {
    pub tool_calls: Vec<ApiToolCall>,
}

/// One tool call as serialized on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiToolCall {
    pub id: String,
    pub function: FunctionCall,
}

/// The function name and its JSON-string-encoded arguments.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

/// Generic list envelope (`{"data": [...]}`) used by run and message
/// listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// An assistant as returned by create/retrieve/update.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantObject {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Body for creating an assistant.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAssistantRequest {
    pub name: String,
    pub instructions: String,
    pub tools: Vec<serde_json::Value>,
    pub model: String,
}

/// Body for updating an assistant's instructions and tools in place.
#[derive(Debug, Clone, Serialize)]
pub struct ModifyAssistantRequest {
    pub instructions: String,
    pub tools: Vec<serde_json::Value>,
}

/// Error body shape used by the assistant service.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// The inner error object.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    pub message: String,
}
