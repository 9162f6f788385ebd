// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared between the run engine, the assistant client, and
//! the webhook gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Status of an assistant run, as reported by the external service.
///
/// `Unknown` absorbs statuses introduced by the service after this crate
/// was written; the engine treats them as transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    Unknown,
}

impl Serialize for RunStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let status = String::deserialize(deserializer)?;
        Ok(status.parse().unwrap_or(RunStatus::Unknown))
    }
}

impl RunStatus {
    /// True while the run still occupies its thread.
    ///
    /// This is the conservative busy list: a run awaiting tool outputs
    /// (`requires_action`) counts as active.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            RunStatus::Queued | RunStatus::InProgress | RunStatus::RequiresAction
        )
    }

    /// True once the run can never make further progress.
    pub fn is_terminal_failure(self) -> bool {
        matches!(
            self,
            RunStatus::Failed | RunStatus::Cancelled | RunStatus::Expired | RunStatus::Incomplete
        )
    }
}

/// A tool invocation requested by a run in the `requires_action` state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Correlation ID the output must be submitted against.
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// Parsed JSON argument object.
    pub arguments: serde_json::Value,
}

/// One tool output, keyed by the correlation ID of its request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutputSubmission {
    pub tool_call_id: String,
    /// JSON-serialized result payload handed back to the assistant.
    pub output: String,
}

/// A point-in-time view of a run: its ID, status, and any pending tool
/// calls observed in this snapshot.
///
/// Tool calls from one snapshot form one submission batch; calls observed
/// in a later snapshot belong to a new batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSnapshot {
    pub id: String,
    pub status: RunStatus,
    pub tool_calls: Vec<ToolCallRequest>,
}

/// Terminal outcome of one `RunEngine::run` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ReplyOutcome {
    /// The run completed and produced an assistant answer.
    Answered,
    /// A run was already active for this conversation.
    Busy,
    /// The run failed, or an internal error occurred.
    Failed,
    /// The poll loop reached its iteration cap.
    TimedOut,
}

/// The engine's reply: a user-safe text plus the outcome that produced it.
///
/// Internal error detail never appears in `content`; it is logged only.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineReply {
    pub outcome: ReplyOutcome,
    pub content: String,
    pub thread_id: Option<String>,
}

impl EngineReply {
    /// True only for a real assistant answer.
    pub fn is_answered(&self) -> bool {
        self.outcome == ReplyOutcome::Answered
    }
}
