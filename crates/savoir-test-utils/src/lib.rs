// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities shared across Savoir crates.
//!
//! Provides a scripted, in-memory `AssistantApi` implementation so engine
//! behavior (polling, tool dispatch, busy gating) can be tested without a
//! network.

pub mod mock_assistant;

pub use mock_assistant::MockAssistant;
