// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Identity lookup for inbound senders.

use tracing::debug;

use crate::schema::User;

/// Derives a user from a sender's phone number.
///
/// Single-tenant stub: every phone number maps to the default identity.
/// A real multi-user deployment replaces this with a directory lookup;
/// the rest of the pipeline only depends on the returned `User`.
pub fn authenticate_by_phone(phone_number: &str) -> User {
    debug!(phone = phone_number, "authenticating sender");
    User {
        id: "1".to_string(),
        phone: phone_number.to_string(),
    }
}
