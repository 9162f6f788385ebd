// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory user-to-thread store.

use async_trait::async_trait;
use dashmap::DashMap;
use savoir_core::ThreadStore;

/// Process-local `ThreadStore` backed by a concurrent map.
///
/// The mapping does not survive a restart; the engine simply creates a
/// fresh thread for a user the next time they write.
#[derive(Debug, Default)]
pub struct InMemoryThreadStore {
    threads: DashMap<String, String>,
}

impl InMemoryThreadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a mapped thread.
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// True if no user has a mapped thread yet.
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}

#[async_trait]
impl ThreadStore for InMemoryThreadStore {
    async fn get(&self, user_id: &str) -> Option<String> {
        self.threads.get(user_id).map(|entry| entry.value().clone())
    }

    async fn insert(&self, user_id: &str, thread_id: &str) {
        // First write wins: the user->thread mapping never changes once
        // created.
        self.threads
            .entry(user_id.to_string())
            .or_insert_with(|| thread_id.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_returns_inserted_mapping() {
        let store = InMemoryThreadStore::new();
        assert!(store.get("user_1").await.is_none());
        store.insert("user_1", "thread_a").await;
        assert_eq!(store.get("user_1").await.as_deref(), Some("thread_a"));
    }

    #[tokio::test]
    async fn first_write_wins() {
        let store = InMemoryThreadStore::new();
        store.insert("user_1", "thread_a").await;
        store.insert("user_1", "thread_b").await;
        assert_eq!(store.get("user_1").await.as_deref(), Some("thread_a"));
        assert_eq!(store.len(), 1);
    }
}
