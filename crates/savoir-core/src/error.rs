// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Savoir assistant backend.

use thiserror::Error;

/// The primary error type used across all Savoir components.
#[derive(Debug, Error)]
pub enum SavoirError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Assistant API errors (thread/run/message operations).
    #[error("assistant error: {message}")]
    Assistant {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Retrieval service errors (collections, documents, search, RAG).
    #[error("retrieval error: {message}")]
    Retrieval {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Messaging channel errors (webhook, outbound delivery).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Tool argument validation errors. Reported back to the assistant as
    /// a tool result, never surfaced raw to the end user.
    #[error("validation error: {0}")]
    Validation(String),

    /// Run polling exceeded its iteration cap.
    #[error("run timed out after {iterations} poll iterations")]
    Timeout { iterations: u32 },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SavoirError {
    /// Shorthand for an assistant error without an underlying source.
    pub fn assistant(message: impl Into<String>) -> Self {
        SavoirError::Assistant {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a retrieval error without an underlying source.
    pub fn retrieval(message: impl Into<String>) -> Self {
        SavoirError::Retrieval {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a channel error without an underlying source.
    pub fn channel(message: impl Into<String>) -> Self {
        SavoirError::Channel {
            message: message.into(),
            source: None,
        }
    }
}
