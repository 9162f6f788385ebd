// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WhatsApp channel support for the Savoir assistant backend.
//!
//! Covers both directions of the channel: the lenient serde schema for
//! inbound webhook payloads, and the outbound [`WhatsAppSender`] relay.
//! Also provides the stubbed sender-identity lookup and the
//! [`AudioTranscriber`] seam for voice notes.

pub mod auth;
pub mod schema;
pub mod sender;
pub mod transcribe;

pub use auth::authenticate_by_phone;
pub use schema::{Audio, Message, Payload, User};
pub use sender::WhatsAppSender;
pub use transcribe::AudioTranscriber;
