// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational run engine for the Savoir assistant backend.
//!
//! Owns per-user thread lifecycle, single-run-per-conversation gating,
//! run polling, and tool-call service. The webhook gateway calls
//! [`RunEngine::run`] with the extracted message text and relays the
//! returned reply.

pub mod engine;
pub mod store;

pub use engine::{EngineSettings, RunEngine, BUSY_REPLY, FAILURE_REPLY, TIMEOUT_REPLY};
pub use store::InMemoryThreadStore;
