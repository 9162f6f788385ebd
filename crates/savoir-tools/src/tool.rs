// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool trait, registry, and dispatch.
//!
//! The [`Tool`] trait defines the interface every callable tool
//! implements. The [`ToolRegistry`] maps tool names to handlers and
//! renders Assistants-format function definitions for provisioning.
//! [`dispatch_call`] turns one requested tool call into the serialized
//! output submitted back to the assistant — including for unknown tools
//! and failing handlers, which become structured error payloads rather
//! than escaping errors.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use savoir_core::{SavoirError, ToolCallRequest, ToolOutputSubmission};
use tracing::{info, warn};

/// Output from a tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// JSON-serialized result payload.
    pub content: String,
    /// Whether the invocation resulted in an error.
    pub is_error: bool,
}

impl ToolOutput {
    /// Wraps a payload in the `{"success": true, "data": ...}` envelope.
    pub fn success(data: serde_json::Value) -> Self {
        Self {
            content: serde_json::json!({ "success": true, "data": data }).to_string(),
            is_error: false,
        }
    }
}

/// Unified interface for all callable tools.
///
/// Each tool provides a name, description, and JSON Schema for its
/// parameters, and an async `invoke`. Handlers validate their arguments
/// before performing any network call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The tool's unique name (used for lookup and API serialization).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's input parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Invokes the tool with the given JSON input.
    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SavoirError>;
}

/// Registry of available tools, indexed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates an empty tool registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registers a tool. The tool is indexed by its `name()`.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Looks up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Returns (name, description) pairs for all registered tools, sorted
    /// by name.
    pub fn list(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .tools
            .values()
            .map(|t| (t.name(), t.description()))
            .collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }

    /// Returns Assistants-format function definitions for all registered
    /// tools, sorted by name.
    ///
    /// Each definition has the shape:
    /// ```json
    /// {
    ///   "type": "function",
    ///   "function": {
    ///     "name": "tool_name",
    ///     "description": "What the tool does",
    ///     "parameters": { ... JSON Schema ... }
    ///   }
    /// }
    /// ```
    pub fn function_definitions(&self) -> Vec<serde_json::Value> {
        let mut defs: Vec<serde_json::Value> = self
            .tools
            .values()
            .map(|t| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": t.name(),
                        "description": t.description(),
                        "parameters": t.parameters_schema(),
                    }
                })
            })
            .collect();
        defs.sort_by(|a, b| {
            a["function"]["name"]
                .as_str()
                .unwrap_or("")
                .cmp(b["function"]["name"].as_str().unwrap_or(""))
        });
        defs
    }

    /// Returns the number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches one requested tool call and serializes its result.
///
/// Never fails: an unknown tool name, a validation failure, or a handler
/// error all become `{"error": ...}` payloads correlated to the request's
/// call ID, so the assistant can recover while the run keeps going.
pub async fn dispatch_call(
    registry: &ToolRegistry,
    call: &ToolCallRequest,
) -> ToolOutputSubmission {
    let output = match registry.get(&call.name) {
        None => {
            warn!(tool = %call.name, "unknown function requested by assistant");
            serde_json::json!({ "error": format!("Unknown function {}", call.name) }).to_string()
        }
        Some(tool) => {
            info!(tool = %call.name, call_id = %call.id, "executing tool");
            match tool.invoke(call.arguments.clone()).await {
                Ok(result) if result.is_error => {
                    serde_json::json!({ "error": result.content }).to_string()
                }
                Ok(result) => result.content,
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "tool invocation failed");
                    serde_json::json!({ "error": e.to_string() }).to_string()
                }
            }
        }
    };

    ToolOutputSubmission {
        tool_call_id: call.id.clone(),
        output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A simple test tool for registry tests.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes the input back"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {
                    "message": { "type": "string", "description": "Message to echo" }
                },
                "required": ["message"]
            })
        }

        async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SavoirError> {
            let message = input["message"].as_str().unwrap_or("no message");
            Ok(ToolOutput::success(serde_json::json!({ "echo": message })))
        }
    }

    /// A tool that always fails, for dispatch error tests.
    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "Always fails"
        }

        fn parameters_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object", "properties": {}})
        }

        async fn invoke(&self, _input: serde_json::Value) -> Result<ToolOutput, SavoirError> {
            Err(SavoirError::retrieval("remote exploded"))
        }
    }

    #[test]
    fn registry_registers_and_retrieves_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        assert!(registry.get("echo").is_some());
        assert!(registry.get("nonexistent").is_none());
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn function_definitions_use_assistants_format() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        registry.register(Arc::new(FailingTool));

        let defs = registry.function_definitions();
        assert_eq!(defs.len(), 2);
        // Sorted by function name.
        assert_eq!(defs[0]["function"]["name"], "echo");
        assert_eq!(defs[1]["function"]["name"], "failing");
        assert_eq!(defs[0]["type"], "function");
        assert!(defs[0]["function"]["parameters"]["properties"]["message"].is_object());
    }

    #[tokio::test]
    async fn dispatch_returns_handler_content() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));

        let call = ToolCallRequest {
            id: "call_1".into(),
            name: "echo".into(),
            arguments: serde_json::json!({"message": "hi"}),
        };
        let submission = dispatch_call(&registry, &call).await;
        assert_eq!(submission.tool_call_id, "call_1");
        let payload: serde_json::Value = serde_json::from_str(&submission.output).unwrap();
        assert_eq!(payload["success"], true);
        assert_eq!(payload["data"]["echo"], "hi");
    }

    #[tokio::test]
    async fn dispatch_unknown_tool_yields_error_payload() {
        let registry = ToolRegistry::new();
        let call = ToolCallRequest {
            id: "call_2".into(),
            name: "delete_everything".into(),
            arguments: serde_json::json!({}),
        };
        let submission = dispatch_call(&registry, &call).await;
        let payload: serde_json::Value = serde_json::from_str(&submission.output).unwrap();
        assert_eq!(payload["error"], "Unknown function delete_everything");
    }

    #[tokio::test]
    async fn dispatch_handler_error_yields_error_payload() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(FailingTool));

        let call = ToolCallRequest {
            id: "call_3".into(),
            name: "failing".into(),
            arguments: serde_json::json!({}),
        };
        let submission = dispatch_call(&registry, &call).await;
        let payload: serde_json::Value = serde_json::from_str(&submission.output).unwrap();
        assert!(payload["error"]
            .as_str()
            .unwrap()
            .contains("remote exploded"));
    }
}
