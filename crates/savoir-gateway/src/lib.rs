// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook gateway for the Savoir assistant backend.
//!
//! Receives WhatsApp webhook calls, extracts the first message, invokes
//! the run engine, and relays the reply through the outbound sender. The
//! verification handshake and the always-acknowledge policy live here.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState, ServerConfig};
