// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-to-thread mapping seam.

use async_trait::async_trait;

/// Process-wide mapping from user ID to assistant thread ID.
///
/// The mapping is created lazily, at most once per user, and never changes
/// once created. Injectable so a multi-instance deployment can swap the
/// in-memory map for an external key-value store without touching the
/// engine.
#[async_trait]
pub trait ThreadStore: Send + Sync {
    /// Returns the thread ID mapped to `user_id`, if one exists.
    async fn get(&self, user_id: &str) -> Option<String>;

    /// Records the mapping for `user_id`. First write wins: if a mapping
    /// already exists it is left unchanged.
    async fn insert(&self, user_id: &str, thread_id: &str);
}
