// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Assistant service seam: threads, messages, runs, and tool outputs.

use async_trait::async_trait;

use crate::error::SavoirError;
use crate::types::{RunSnapshot, ToolOutputSubmission};

/// Operations the run engine needs from the external assistant service.
///
/// Implemented over HTTP by `savoir-assistant`; tests substitute a
/// scripted mock. Thread and run IDs are opaque strings owned by the
/// remote service.
#[async_trait]
pub trait AssistantApi: Send + Sync {
    /// Creates a new conversation thread and returns its ID.
    async fn create_thread(&self) -> Result<String, SavoirError>;

    /// Appends a user message to a thread; returns the message ID.
    async fn add_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<String, SavoirError>;

    /// Starts a run of the given assistant over a thread.
    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> Result<RunSnapshot, SavoirError>;

    /// Fetches the current state of a run, including any pending tool calls.
    async fn retrieve_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> Result<RunSnapshot, SavoirError>;

    /// Returns the most recent run on a thread, if any.
    async fn latest_run(&self, thread_id: &str) -> Result<Option<RunSnapshot>, SavoirError>;

    /// Returns the text of the most recent assistant message on a thread.
    async fn latest_assistant_message(
        &self,
        thread_id: &str,
    ) -> Result<Option<String>, SavoirError>;

    /// Submits one batch of tool outputs against a waiting run.
    ///
    /// The batch must contain exactly one output per tool call observed in
    /// the `requires_action` snapshot being answered.
    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutputSubmission],
    ) -> Result<(), SavoirError>;
}
