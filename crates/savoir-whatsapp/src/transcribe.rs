// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Audio transcription seam.
//!
//! Downloading and transcribing voice notes is a collaborator concern;
//! the gateway only needs text. Deployments wire in an implementation;
//! without one, audio messages are skipped.

use async_trait::async_trait;
use savoir_core::SavoirError;

use crate::schema::Audio;

/// Turns an audio message reference into text.
#[async_trait]
pub trait AudioTranscriber: Send + Sync {
    /// Resolves the referenced media and returns its transcript.
    async fn transcribe(&self, audio: &Audio) -> Result<String, SavoirError>;
}
