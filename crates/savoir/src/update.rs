// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `update-assistant` command: push the latest instructions and tool
//! definitions to the configured assistant.

use std::sync::Arc;

use savoir_assistant::AssistantClient;
use savoir_config::SavoirConfig;
use savoir_core::SavoirError;
use savoir_retrieval::RetrievalClient;
use savoir_tools::retrieval_registry;
use tracing::info;

pub async fn run(config: SavoirConfig) -> Result<(), SavoirError> {
    let assistant_id = config.assistant.assistant_id.as_deref().ok_or_else(|| {
        SavoirError::Config("assistant.assistant_id is required for update-assistant".into())
    })?;

    // The registry is only consulted for its function definitions here,
    // but it is built the same way `serve` builds it so the definitions
    // cannot drift.
    let retrieval = Arc::new(RetrievalClient::new(
        config.retrieval.api_key.as_deref().unwrap_or_default(),
        &config.retrieval.base_url,
    )?);
    let registry = retrieval_registry(retrieval);

    let client = AssistantClient::new(
        config.assistant.api_key.as_deref().unwrap_or_default(),
        &config.assistant.base_url,
    )?;

    info!(assistant_id, "updating assistant");
    let assistant = client
        .update_assistant(assistant_id, registry.function_definitions())
        .await?;

    println!("updated assistant {}", assistant.id);
    Ok(())
}
