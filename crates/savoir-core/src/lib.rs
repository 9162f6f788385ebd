// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Savoir assistant backend.
//!
//! Provides the error type, the shared run/tool/reply types, and the trait
//! seams (`AssistantApi`, `ThreadStore`) that sibling crates implement.

pub mod error;
pub mod traits;
pub mod types;

pub use error::SavoirError;
pub use traits::{AssistantApi, ThreadStore};
pub use types::{
    EngineReply, ReplyOutcome, RunSnapshot, RunStatus, ToolCallRequest, ToolOutputSubmission,
};
