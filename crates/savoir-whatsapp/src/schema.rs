// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound webhook payload schema.
//!
//! The platform nests messages four levels deep
//! (`entry[].changes[].value.messages[]`) and adds fields freely, so
//! these structs are deliberately lenient: unknown fields are ignored and
//! most leaves are optional.

use serde::Deserialize;

/// Root webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Payload {
    /// Payload kind; `whatsapp_business_account` for message events.
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<Entry>,
}

impl Payload {
    /// Extracts the first message in the payload, if any.
    ///
    /// Status-only notifications (delivery receipts, read marks) carry no
    /// messages and yield `None`.
    pub fn first_message(&self) -> Option<&Message> {
        self.entry
            .iter()
            .flat_map(|entry| &entry.changes)
            .flat_map(|change| &change.value.messages)
            .next()
    }
}

/// One entry in the webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// A change notification.
#[derive(Debug, Clone, Deserialize)]
pub struct Change {
    pub value: Value,
    #[serde(default)]
    pub field: String,
}

/// The value object carrying messages and metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Value {
    #[serde(default)]
    pub messaging_product: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Business account metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub display_phone_number: String,
    #[serde(default)]
    pub phone_number_id: String,
}

/// Contact information for the sender.
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub profile: Profile,
    pub wa_id: String,
}

/// Sender profile.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
}

/// A received message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Sender's WhatsApp ID (their phone number).
    pub from: String,
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    /// Message kind: "text", "audio", or anything newer.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<Text>,
    #[serde(default)]
    pub audio: Option<Audio>,
}

impl Message {
    /// The text body, when this is a text message.
    pub fn text_body(&self) -> Option<&str> {
        self.text.as_ref().map(|t| t.body.as_str())
    }
}

/// Text message content.
#[derive(Debug, Clone, Deserialize)]
pub struct Text {
    pub body: String,
}

/// Audio message content; referenced by file ID, downloaded out of band.
#[derive(Debug, Clone, Deserialize)]
pub struct Audio {
    pub id: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub voice: bool,
}

/// Identity derived from an inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub phone: String,
}
