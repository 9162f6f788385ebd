// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversational run engine.
//!
//! One `run()` call drives a full exchange: resolve the user's thread,
//! reject the call if a run is already active, append the message, start
//! a run, poll it to a terminal state while serving tool calls, and
//! return a user-safe reply. No error or panic ever escapes `run()` —
//! every failure path is logged internally and mapped to one of a small
//! fixed set of reply templates.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use savoir_core::{
    AssistantApi, EngineReply, ReplyOutcome, RunStatus, SavoirError, ThreadStore, ToolCallRequest,
};
use savoir_tools::{dispatch_call, ToolRegistry};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Reply when a run is already active for the conversation.
pub const BUSY_REPLY: &str =
    "I'm still processing your previous request. Please wait a moment before sending another message.";

/// Reply for any internal or remote failure.
pub const FAILURE_REPLY: &str =
    "I'm sorry, I encountered an error processing your request. Please try again later.";

/// Reply when the poll loop reaches its iteration cap.
pub const TIMEOUT_REPLY: &str = "I'm sorry, your request timed out. Please try again later.";

/// Settings governing the poll loop.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// The assistant executed by every run.
    pub assistant_id: String,
    /// Sleep between status polls.
    pub poll_interval: Duration,
    /// Maximum number of status polls per run.
    pub max_poll_iterations: u32,
}

/// The conversational run engine.
///
/// Shared process-wide behind an `Arc`; one webhook task per inbound
/// message calls [`run`](Self::run) concurrently. The only cross-task
/// state is the thread store and the per-conversation run locks.
pub struct RunEngine {
    api: Arc<dyn AssistantApi>,
    registry: Arc<ToolRegistry>,
    threads: Arc<dyn ThreadStore>,
    settings: EngineSettings,
    /// Per-user run locks. Holding a lock for the duration of a run makes
    /// the busy check atomic in-process; the remote service stays
    /// authoritative across processes.
    conversation_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl RunEngine {
    pub fn new(
        api: Arc<dyn AssistantApi>,
        registry: Arc<ToolRegistry>,
        threads: Arc<dyn ThreadStore>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            api,
            registry,
            threads,
            settings,
            conversation_locks: DashMap::new(),
        }
    }

    /// Handles one user message and produces a user-safe reply.
    ///
    /// Never returns an error and never panics: remote and internal
    /// failures are logged with detail and collapsed into the generic
    /// failure template; only the fixed busy/timeout/failure/answer texts
    /// can reach the end user.
    pub async fn run(&self, user_message: &str, user_id: &str) -> EngineReply {
        info!(user_id, "processing user message");

        let lock = self
            .conversation_locks
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let Ok(_guard) = lock.try_lock() else {
            warn!(user_id, "run already active for conversation, rejecting");
            return EngineReply {
                outcome: ReplyOutcome::Busy,
                content: BUSY_REPLY.to_string(),
                thread_id: None,
            };
        };

        match self.drive(user_message, user_id).await {
            Ok(reply) => reply,
            Err(SavoirError::Timeout { iterations }) => {
                error!(user_id, iterations, "run timed out");
                EngineReply {
                    outcome: ReplyOutcome::TimedOut,
                    content: TIMEOUT_REPLY.to_string(),
                    thread_id: None,
                }
            }
            Err(e) => {
                error!(user_id, error = %e, "run failed");
                EngineReply {
                    outcome: ReplyOutcome::Failed,
                    content: FAILURE_REPLY.to_string(),
                    thread_id: None,
                }
            }
        }
    }

    /// The fallible body of `run`; every `?` here is caught by the caller.
    async fn drive(&self, user_message: &str, user_id: &str) -> Result<EngineReply, SavoirError> {
        let thread_id = self.resolve_thread(user_id).await?;
        debug!(user_id, thread_id = %thread_id, "using thread");

        // The external service is authoritative for run state: even with
        // the in-process lock held, the thread may carry an active run
        // started elsewhere.
        if let Some(latest) = self.api.latest_run(&thread_id).await?
            && latest.status.is_active()
        {
            warn!(
                thread_id = %thread_id,
                status = %latest.status,
                "active run detected on thread, rejecting"
            );
            return Ok(EngineReply {
                outcome: ReplyOutcome::Busy,
                content: BUSY_REPLY.to_string(),
                thread_id: Some(thread_id),
            });
        }

        let message_id = self.api.add_user_message(&thread_id, user_message).await?;
        debug!(thread_id = %thread_id, message_id = %message_id, "appended user message");

        let run = self
            .api
            .create_run(&thread_id, &self.settings.assistant_id)
            .await?;
        info!(thread_id = %thread_id, run_id = %run.id, "started run");

        self.poll_run(&thread_id, &run.id).await
    }

    /// Polls the run to a terminal state, serving tool calls as they
    /// appear. Returns `SavoirError::Timeout` when the iteration cap is
    /// reached without a terminal state.
    async fn poll_run(&self, thread_id: &str, run_id: &str) -> Result<EngineReply, SavoirError> {
        for iteration in 0..self.settings.max_poll_iterations {
            let snapshot = self.api.retrieve_run(thread_id, run_id).await?;
            debug!(run_id, iteration, status = %snapshot.status, "run status");

            match snapshot.status {
                RunStatus::Completed => {
                    let content = self
                        .api
                        .latest_assistant_message(thread_id)
                        .await?
                        .ok_or_else(|| {
                            SavoirError::assistant("completed run produced no assistant message")
                        })?;
                    info!(run_id, "run completed");
                    return Ok(EngineReply {
                        outcome: ReplyOutcome::Answered,
                        content,
                        thread_id: Some(thread_id.to_string()),
                    });
                }
                status if status.is_terminal_failure() => {
                    error!(run_id, status = %status, "run ended in failure state");
                    return Ok(EngineReply {
                        outcome: ReplyOutcome::Failed,
                        content: FAILURE_REPLY.to_string(),
                        thread_id: Some(thread_id.to_string()),
                    });
                }
                RunStatus::RequiresAction => {
                    self.serve_tool_calls(thread_id, run_id, &snapshot.tool_calls)
                        .await?;
                }
                _ => {}
            }

            tokio::time::sleep(self.settings.poll_interval).await;
        }

        Err(SavoirError::Timeout {
            iterations: self.settings.max_poll_iterations,
        })
    }

    /// Dispatches one `requires_action` snapshot's tool calls and submits
    /// their outputs as a single batch.
    ///
    /// Individual handler failures and unknown tools are serialized into
    /// error payloads by the dispatch layer and never abort the batch;
    /// only the submission itself can fail here.
    async fn serve_tool_calls(
        &self,
        thread_id: &str,
        run_id: &str,
        tool_calls: &[ToolCallRequest],
    ) -> Result<(), SavoirError> {
        if tool_calls.is_empty() {
            warn!(run_id, "requires_action with no tool calls, continuing to poll");
            return Ok(());
        }

        let mut outputs = Vec::with_capacity(tool_calls.len());
        for call in tool_calls {
            outputs.push(dispatch_call(&self.registry, call).await);
        }

        info!(run_id, count = outputs.len(), "submitting tool outputs");
        self.api
            .submit_tool_outputs(thread_id, run_id, &outputs)
            .await
    }

    /// Resolves the user's thread, creating one on first contact.
    ///
    /// Idempotent: repeated calls for the same user return the same
    /// thread ID and create at most one thread.
    async fn resolve_thread(&self, user_id: &str) -> Result<String, SavoirError> {
        if let Some(thread_id) = self.threads.get(user_id).await {
            return Ok(thread_id);
        }

        let thread_id = self.api.create_thread().await?;
        self.threads.insert(user_id, &thread_id).await;
        info!(user_id, thread_id = %thread_id, "created thread for user");
        Ok(thread_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryThreadStore;
    use savoir_retrieval::RetrievalClient;
    use savoir_test_utils::MockAssistant;

    fn settings() -> EngineSettings {
        EngineSettings {
            assistant_id: "asst_test".into(),
            poll_interval: Duration::from_secs(2),
            max_poll_iterations: 30,
        }
    }

    fn empty_registry() -> Arc<ToolRegistry> {
        Arc::new(ToolRegistry::new())
    }

    fn engine_with(api: &MockAssistant, registry: Arc<ToolRegistry>) -> Arc<RunEngine> {
        Arc::new(RunEngine::new(
            Arc::new(api.clone()),
            registry,
            Arc::new(InMemoryThreadStore::new()),
            settings(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn completed_run_returns_assistant_answer() {
        let api = MockAssistant::new();
        api.push_status(RunStatus::Queued).await;
        api.push_status(RunStatus::InProgress).await;
        api.push_status(RunStatus::Completed).await;
        api.set_answer(Some("the answer")).await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("question", "user_1").await;

        assert_eq!(reply.outcome, ReplyOutcome::Answered);
        assert_eq!(reply.content, "the answer");
        assert_eq!(reply.thread_id.as_deref(), Some("thread_1"));
        assert_eq!(api.messages().await, vec![("thread_1".into(), "question".into())]);
    }

    #[tokio::test(start_paused = true)]
    async fn thread_resolution_is_idempotent() {
        let api = MockAssistant::new();
        api.push_status(RunStatus::Completed).await;
        let engine = engine_with(&api, empty_registry());

        let first = engine.run("one", "user_1").await;

        api.push_status(RunStatus::Completed).await;
        let second = engine.run("two", "user_1").await;

        assert_eq!(first.thread_id, second.thread_id);
        assert_eq!(api.created_threads().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn distinct_users_get_distinct_threads() {
        let api = MockAssistant::new();
        api.push_status(RunStatus::Completed).await;
        let engine = engine_with(&api, empty_registry());

        let a = engine.run("hello", "user_a").await;
        api.push_status(RunStatus::Completed).await;
        let b = engine.run("hello", "user_b").await;

        assert_ne!(a.thread_id, b.thread_id);
        assert_eq!(api.created_threads().await, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn remote_active_run_yields_busy() {
        let api = MockAssistant::new();
        api.set_latest_run_status(Some(RunStatus::RequiresAction)).await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("hello", "user_1").await;

        assert_eq!(reply.outcome, ReplyOutcome::Busy);
        assert_eq!(reply.content, BUSY_REPLY);
        // The message was never appended and no run was started.
        assert!(api.messages().await.is_empty());
        assert!(!api.call_log().await.contains(&"create_run".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_second_call_is_rejected_as_busy() {
        let api = MockAssistant::new();
        // First run needs several polls, giving the second call a window.
        api.push_status(RunStatus::InProgress).await;
        api.push_status(RunStatus::InProgress).await;
        api.push_status(RunStatus::Completed).await;
        api.set_answer(Some("done")).await;

        let engine = engine_with(&api, empty_registry());

        let first = tokio::spawn({
            let engine = engine.clone();
            async move { engine.run("first", "user_1").await }
        });

        // Let the first run reach its poll-loop sleep while holding the
        // conversation lock.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let second = engine.run("second", "user_1").await;
        assert_eq!(second.outcome, ReplyOutcome::Busy);
        assert_eq!(second.content, BUSY_REPLY);

        let first = first.await.unwrap();
        assert_eq!(first.outcome, ReplyOutcome::Answered);
        // Exactly one message was appended and one run created.
        assert_eq!(api.messages().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn permanently_in_progress_run_times_out_after_cap() {
        let api = MockAssistant::new();
        api.set_fallback_status(RunStatus::InProgress).await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("hello", "user_1").await;

        assert_eq!(reply.outcome, ReplyOutcome::TimedOut);
        assert_eq!(reply.content, TIMEOUT_REPLY);
        // The loop terminates after exactly the configured cap.
        assert_eq!(api.retrieve_count().await, 30);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_run_yields_generic_failure() {
        let api = MockAssistant::new();
        api.push_status(RunStatus::Failed).await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("hello", "user_1").await;

        assert_eq!(reply.outcome, ReplyOutcome::Failed);
        assert_eq!(reply.content, FAILURE_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_run_yields_generic_failure() {
        let api = MockAssistant::new();
        api.push_status(RunStatus::Expired).await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("hello", "user_1").await;
        assert_eq!(reply.outcome, ReplyOutcome::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn thread_creation_failure_is_caught() {
        let api = MockAssistant::new();
        api.fail_next_create_thread().await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("hello", "user_1").await;

        assert_eq!(reply.outcome, ReplyOutcome::Failed);
        // The internal error text never reaches the user.
        assert_eq!(reply.content, FAILURE_REPLY);
    }

    #[tokio::test(start_paused = true)]
    async fn two_tool_calls_are_submitted_as_one_batch_before_next_poll() {
        let api = MockAssistant::new();
        api.push_tool_calls(vec![
            ToolCallRequest {
                id: "call_a".into(),
                name: "nonexistent_a".into(),
                arguments: serde_json::json!({}),
            },
            ToolCallRequest {
                id: "call_b".into(),
                name: "nonexistent_b".into(),
                arguments: serde_json::json!({}),
            },
        ])
        .await;
        api.push_status(RunStatus::Completed).await;
        api.set_answer(Some("after tools")).await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("do things", "user_1").await;
        assert_eq!(reply.outcome, ReplyOutcome::Answered);

        let submissions = api.submissions().await;
        assert_eq!(submissions.len(), 1, "one combined submission");
        let (_, outputs) = &submissions[0];
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0].tool_call_id, "call_a");
        assert_eq!(outputs[1].tool_call_id, "call_b");

        // The submission happens before the next status poll.
        let log = api.call_log().await;
        let submit_pos = log
            .iter()
            .position(|c| c == "submit_tool_outputs")
            .expect("submission must happen");
        let polls_before: Vec<usize> = log
            .iter()
            .enumerate()
            .filter(|(_, c)| *c == "retrieve_run")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(
            polls_before.iter().filter(|&&i| i < submit_pos).count(),
            1,
            "exactly one poll (the requires_action snapshot) precedes the submission"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_tool_produces_error_payload_and_run_continues() {
        let api = MockAssistant::new();
        api.push_tool_calls(vec![ToolCallRequest {
            id: "call_x".into(),
            name: "delete_everything".into(),
            arguments: serde_json::json!({}),
        }])
        .await;
        api.push_status(RunStatus::InProgress).await;
        api.push_status(RunStatus::Completed).await;
        api.set_answer(Some("recovered")).await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("destroy", "user_1").await;

        // The run polled past the unknown tool and completed.
        assert_eq!(reply.outcome, ReplyOutcome::Answered);
        assert_eq!(reply.content, "recovered");

        let submissions = api.submissions().await;
        let output: serde_json::Value =
            serde_json::from_str(&submissions[0].1[0].output).unwrap();
        assert_eq!(output["error"], "Unknown function delete_everything");
    }

    #[tokio::test(start_paused = true)]
    async fn tool_handler_validation_error_is_serialized_not_fatal() {
        // A real registry over an unreachable retrieval service: the
        // create_document validation fires before any network call.
        let client =
            Arc::new(RetrievalClient::new("test-key", "http://127.0.0.1:1").unwrap());
        let registry = Arc::new(savoir_tools::retrieval_registry(client));

        let api = MockAssistant::new();
        api.push_tool_calls(vec![ToolCallRequest {
            id: "call_v".into(),
            name: "create_document".into(),
            arguments: serde_json::json!({"raw_text": "", "collection_id": "col_1"}),
        }])
        .await;
        api.push_status(RunStatus::Completed).await;
        api.set_answer(Some("ok")).await;

        let engine = engine_with(&api, registry);
        let reply = engine.run("add empty doc", "user_1").await;
        assert_eq!(reply.outcome, ReplyOutcome::Answered);

        let submissions = api.submissions().await;
        let output: serde_json::Value =
            serde_json::from_str(&submissions[0].1[0].output).unwrap();
        assert!(output["error"].as_str().unwrap().contains("raw_text"));
    }

    #[tokio::test(start_paused = true)]
    async fn completed_run_without_message_fails_safely() {
        let api = MockAssistant::new();
        api.push_status(RunStatus::Completed).await;
        api.set_answer(None).await;

        let engine = engine_with(&api, empty_registry());
        let reply = engine.run("hello", "user_1").await;
        assert_eq!(reply.outcome, ReplyOutcome::Failed);
        assert_eq!(reply.content, FAILURE_REPLY);
    }
}
