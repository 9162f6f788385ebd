// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool dispatch table for the Savoir assistant.
//!
//! Maps the tool names the assistant may call to typed handlers over the
//! retrieval client. Each handler validates its arguments before touching
//! the network; dispatch serializes every outcome — success, validation
//! failure, remote failure, unknown tool — into a payload the assistant
//! can act on.

pub mod builtin;
pub mod tool;

pub use builtin::{retrieval_registry, MAX_COLLECTION_NAME_LEN};
pub use tool::{dispatch_call, Tool, ToolOutput, ToolRegistry};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use savoir_retrieval::RetrievalClient;

    use super::*;

    #[test]
    fn registry_contains_all_six_tools() {
        let client =
            Arc::new(RetrievalClient::new("test-key", "https://api.example.com").unwrap());
        let registry = retrieval_registry(client);
        assert_eq!(registry.len(), 6);
        for name in [
            "create_collection",
            "create_document",
            "list_user_collections",
            "search",
            "rag",
            "add_document_to_collection",
        ] {
            assert!(registry.get(name).is_some(), "missing tool {name}");
        }
    }

    #[test]
    fn function_definitions_cover_the_registry() {
        let client =
            Arc::new(RetrievalClient::new("test-key", "https://api.example.com").unwrap());
        let registry = retrieval_registry(client);
        let defs = registry.function_definitions();
        assert_eq!(defs.len(), 6);
        for def in &defs {
            assert_eq!(def["type"], "function");
            assert!(def["function"]["parameters"]["type"] == "object");
        }
    }
}
