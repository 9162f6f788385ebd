// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client for the external assistant service.
//!
//! Implements [`savoir_core::AssistantApi`] over HTTP (Assistants-v2 wire
//! contract) and provides assistant provisioning: retrieve a
//! pre-configured assistant, create one with the packaged instructions,
//! or push updated instructions/tools to an existing one.

pub mod client;
pub mod instructions;
pub mod types;

pub use client::AssistantClient;
pub use instructions::{INSTRUCTIONS, NOTES};
pub use types::AssistantObject;
