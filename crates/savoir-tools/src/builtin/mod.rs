// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in retrieval tools.
//!
//! Every handler validates its arguments before the first network call and
//! wraps retrieval responses in the `{"success": true, "data": ...}`
//! envelope the assistant expects.

pub mod collections;
pub mod documents;
pub mod search;

use std::sync::Arc;

use savoir_core::SavoirError;
use savoir_retrieval::RetrievalClient;

use crate::tool::ToolRegistry;

/// Longest accepted collection name.
pub const MAX_COLLECTION_NAME_LEN: usize = 100;

/// Builds the registry of all six retrieval tools over a shared client.
pub fn retrieval_registry(client: Arc<RetrievalClient>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(collections::CreateCollectionTool::new(
        client.clone(),
    )));
    registry.register(Arc::new(collections::ListCollectionsTool::new(
        client.clone(),
    )));
    registry.register(Arc::new(documents::CreateDocumentTool::new(client.clone())));
    registry.register(Arc::new(documents::AddDocumentToCollectionTool::new(
        client.clone(),
    )));
    registry.register(Arc::new(search::SearchTool::new(client.clone())));
    registry.register(Arc::new(search::RagTool::new(client)));
    registry
}

/// Extracts a required, non-blank string argument.
pub(crate) fn require_str<'a>(
    input: &'a serde_json::Value,
    key: &str,
) -> Result<&'a str, SavoirError> {
    let value = input
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| SavoirError::Validation(format!("missing required '{key}' parameter")))?;
    if value.trim().is_empty() {
        return Err(SavoirError::Validation(format!(
            "'{key}' must not be empty"
        )));
    }
    Ok(value)
}

/// Extracts an optional string argument, treating blank as absent.
pub(crate) fn optional_str<'a>(input: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    input
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
}

/// Extracts an optional unsigned integer argument with a default.
pub(crate) fn u32_or(input: &serde_json::Value, key: &str, default: u32) -> u32 {
    input
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v.min(u64::from(u32::MAX)) as u32)
        .unwrap_or(default)
}

/// Validates a collection name: non-blank, bounded length, no path
/// separator characters.
pub(crate) fn validate_collection_name(name: &str) -> Result<(), SavoirError> {
    if name.trim().is_empty() {
        return Err(SavoirError::Validation(
            "collection name must not be empty".into(),
        ));
    }
    if name.len() > MAX_COLLECTION_NAME_LEN {
        return Err(SavoirError::Validation(format!(
            "collection name must be at most {MAX_COLLECTION_NAME_LEN} characters"
        )));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(SavoirError::Validation(
            "collection name must not contain path separators".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_str_rejects_missing_and_blank() {
        let input = serde_json::json!({"present": "value", "blank": "   "});
        assert_eq!(require_str(&input, "present").unwrap(), "value");
        assert!(matches!(
            require_str(&input, "absent"),
            Err(SavoirError::Validation(_))
        ));
        assert!(matches!(
            require_str(&input, "blank"),
            Err(SavoirError::Validation(_))
        ));
    }

    #[test]
    fn require_str_handles_null_arguments() {
        // Unparseable tool-call arguments reach handlers as null.
        let input = serde_json::Value::Null;
        assert!(require_str(&input, "query").is_err());
    }

    #[test]
    fn optional_str_filters_blank() {
        let input = serde_json::json!({"a": "x", "b": ""});
        assert_eq!(optional_str(&input, "a"), Some("x"));
        assert_eq!(optional_str(&input, "b"), None);
        assert_eq!(optional_str(&input, "c"), None);
    }

    #[test]
    fn collection_name_rules() {
        assert!(validate_collection_name("Peter Pan").is_ok());
        assert!(validate_collection_name("").is_err());
        assert!(validate_collection_name(&"x".repeat(101)).is_err());
        assert!(validate_collection_name(&"x".repeat(100)).is_ok());
        assert!(validate_collection_name("a/b").is_err());
        assert!(validate_collection_name("a\\b").is_err());
    }

    #[test]
    fn u32_or_defaults_and_parses() {
        let input = serde_json::json!({"limit": 25, "bad": "nope"});
        assert_eq!(u32_or(&input, "limit", 100), 25);
        assert_eq!(u32_or(&input, "missing", 100), 100);
        assert_eq!(u32_or(&input, "bad", 7), 7);
    }
}
