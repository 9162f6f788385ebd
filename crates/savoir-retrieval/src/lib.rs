// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the external knowledge-retrieval service.
//!
//! Covers the narrow contract this backend consumes: collections,
//! documents, chunk search, and RAG. The service's internals (storage,
//! vector search, ingestion) are entirely remote; this crate holds only
//! transient IDs and names.

pub mod client;
pub mod types;

pub use client::{RetrievalClient, MAX_LIST_LIMIT};
pub use types::{CollectionInfo, CollectionPage, DocumentInfo};
