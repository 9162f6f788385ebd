// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the retrieval service API.

use serde::{Deserialize, Serialize};

/// A collection as returned by create/list operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of documents in the collection; absent on freshly created
    /// collections.
    #[serde(default)]
    pub document_count: Option<u64>,
}

/// One page of a collection listing.
///
/// The service contract guarantees a `results` array and a `total_entries`
/// count.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectionPage {
    pub results: Vec<CollectionInfo>,
    pub total_entries: u64,
}

/// A created document. Only the ID is load-bearing; the service owns
/// everything else.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentInfo {
    pub id: String,
}

/// Error body shape used by the retrieval service. Either field may be
/// present depending on the failure class.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
