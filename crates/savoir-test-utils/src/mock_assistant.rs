// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock assistant API for deterministic engine tests.
//!
//! `MockAssistant` implements `AssistantApi` against an in-memory script:
//! each `retrieve_run` pops the next scripted snapshot, falling back to a
//! configurable status once the script is exhausted. Every API call is
//! appended to an ordered call log so tests can assert sequencing (e.g.
//! tool outputs submitted before the next status poll).

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use savoir_core::{
    AssistantApi, RunSnapshot, RunStatus, SavoirError, ToolCallRequest, ToolOutputSubmission,
};
use tokio::sync::Mutex;

#[derive(Debug)]
struct Inner {
    thread_counter: usize,
    run_counter: usize,
    script: VecDeque<(RunStatus, Vec<ToolCallRequest>)>,
    fallback_status: RunStatus,
    latest_run_status: Option<RunStatus>,
    answer: Option<String>,
    messages: Vec<(String, String)>,
    submissions: Vec<(String, Vec<ToolOutputSubmission>)>,
    calls: Vec<String>,
    retrieve_count: usize,
    fail_next_create_thread: bool,
}

/// Scripted `AssistantApi` implementation.
#[derive(Clone)]
pub struct MockAssistant {
    inner: Arc<Mutex<Inner>>,
}

impl MockAssistant {
    /// Creates a mock whose runs complete immediately and whose latest
    /// answer is "mock answer".
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                thread_counter: 0,
                run_counter: 0,
                script: VecDeque::new(),
                fallback_status: RunStatus::Completed,
                latest_run_status: None,
                answer: Some("mock answer".to_string()),
                messages: Vec::new(),
                submissions: Vec::new(),
                calls: Vec::new(),
                retrieve_count: 0,
                fail_next_create_thread: false,
            })),
        }
    }

    /// Status returned by `retrieve_run` once the script is exhausted.
    pub async fn set_fallback_status(&self, status: RunStatus) {
        self.inner.lock().await.fallback_status = status;
    }

    /// Appends a plain status to the retrieve script.
    pub async fn push_status(&self, status: RunStatus) {
        self.inner.lock().await.script.push_back((status, Vec::new()));
    }

    /// Appends a `requires_action` snapshot carrying the given tool calls.
    pub async fn push_tool_calls(&self, tool_calls: Vec<ToolCallRequest>) {
        self.inner
            .lock()
            .await
            .script
            .push_back((RunStatus::RequiresAction, tool_calls));
    }

    /// Sets the status reported for the thread's latest run (None = no
    /// prior run).
    pub async fn set_latest_run_status(&self, status: Option<RunStatus>) {
        self.inner.lock().await.latest_run_status = status;
    }

    /// Sets the text returned as the latest assistant message.
    pub async fn set_answer(&self, answer: Option<&str>) {
        self.inner.lock().await.answer = answer.map(str::to_string);
    }

    /// Makes the next `create_thread` call fail.
    pub async fn fail_next_create_thread(&self) {
        self.inner.lock().await.fail_next_create_thread = true;
    }

    /// Number of threads created so far.
    pub async fn created_threads(&self) -> usize {
        self.inner.lock().await.thread_counter
    }

    /// Number of `retrieve_run` calls so far.
    pub async fn retrieve_count(&self) -> usize {
        self.inner.lock().await.retrieve_count
    }

    /// Messages appended, as (thread_id, content) pairs.
    pub async fn messages(&self) -> Vec<(String, String)> {
        self.inner.lock().await.messages.clone()
    }

    /// Tool output submissions, as (run_id, outputs) pairs.
    pub async fn submissions(&self) -> Vec<(String, Vec<ToolOutputSubmission>)> {
        self.inner.lock().await.submissions.clone()
    }

    /// Ordered log of API method names invoked on this mock.
    pub async fn call_log(&self) -> Vec<String> {
        self.inner.lock().await.calls.clone()
    }
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssistantApi for MockAssistant {
    async fn create_thread(&self) -> Result<String, SavoirError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push("create_thread".into());
        if inner.fail_next_create_thread {
            inner.fail_next_create_thread = false;
            return Err(SavoirError::assistant("mock thread creation failure"));
        }
        inner.thread_counter += 1;
        Ok(format!("thread_{}", inner.thread_counter))
    }

    async fn add_user_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> Result<String, SavoirError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push("add_user_message".into());
        inner
            .messages
            .push((thread_id.to_string(), content.to_string()));
        Ok(format!("msg_{}", inner.messages.len()))
    }

    async fn create_run(
        &self,
        _thread_id: &str,
        _assistant_id: &str,
    ) -> Result<RunSnapshot, SavoirError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push("create_run".into());
        inner.run_counter += 1;
        Ok(RunSnapshot {
            id: format!("run_{}", inner.run_counter),
            status: RunStatus::Queued,
            tool_calls: Vec::new(),
        })
    }

    async fn retrieve_run(
        &self,
        _thread_id: &str,
        run_id: &str,
    ) -> Result<RunSnapshot, SavoirError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push("retrieve_run".into());
        inner.retrieve_count += 1;
        let (status, tool_calls) = inner
            .script
            .pop_front()
            .unwrap_or((inner.fallback_status, Vec::new()));
        Ok(RunSnapshot {
            id: run_id.to_string(),
            status,
            tool_calls,
        })
    }

    async fn latest_run(&self, _thread_id: &str) -> Result<Option<RunSnapshot>, SavoirError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push("latest_run".into());
        Ok(inner.latest_run_status.map(|status| RunSnapshot {
            id: "run_prior".to_string(),
            status,
            tool_calls: Vec::new(),
        }))
    }

    async fn latest_assistant_message(
        &self,
        _thread_id: &str,
    ) -> Result<Option<String>, SavoirError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push("latest_assistant_message".into());
        Ok(inner.answer.clone())
    }

    async fn submit_tool_outputs(
        &self,
        _thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutputSubmission],
    ) -> Result<(), SavoirError> {
        let mut inner = self.inner.lock().await;
        inner.calls.push("submit_tool_outputs".into());
        inner
            .submissions
            .push((run_id.to_string(), outputs.to_vec()));
        Ok(())
    }
}
