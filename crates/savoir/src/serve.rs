// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component wiring for the `serve` command.

use std::sync::Arc;
use std::time::Duration;

use savoir_assistant::AssistantClient;
use savoir_config::SavoirConfig;
use savoir_core::SavoirError;
use savoir_engine::{EngineSettings, InMemoryThreadStore, RunEngine};
use savoir_gateway::{start_server, GatewayState, ServerConfig};
use savoir_retrieval::RetrievalClient;
use savoir_tools::retrieval_registry;
use savoir_whatsapp::WhatsAppSender;
use tracing::info;

/// Builds every component from configuration and serves the webhook until
/// the process exits.
///
/// All credentials are checked here, at construction, so a misconfigured
/// deployment fails at startup instead of on the first message.
pub async fn run(config: SavoirConfig) -> Result<(), SavoirError> {
    let retrieval = Arc::new(RetrievalClient::new(
        config.retrieval.api_key.as_deref().unwrap_or_default(),
        &config.retrieval.base_url,
    )?);
    let registry = Arc::new(retrieval_registry(retrieval));

    let assistant_client = Arc::new(AssistantClient::new(
        config.assistant.api_key.as_deref().unwrap_or_default(),
        &config.assistant.base_url,
    )?);

    let assistant = assistant_client
        .get_or_create_assistant(
            config.assistant.assistant_id.as_deref(),
            &config.assistant.model,
            registry.function_definitions(),
        )
        .await?;
    info!(assistant_id = %assistant.id, "assistant resolved");

    let engine = Arc::new(RunEngine::new(
        assistant_client,
        registry,
        Arc::new(InMemoryThreadStore::new()),
        EngineSettings {
            assistant_id: assistant.id,
            poll_interval: Duration::from_secs(config.assistant.poll_interval_secs),
            max_poll_iterations: config.assistant.max_poll_iterations,
        },
    ));

    let sender = Arc::new(WhatsAppSender::new(
        config.whatsapp.api_key.as_deref().unwrap_or_default(),
        config.whatsapp.phone_number_id.as_deref().unwrap_or_default(),
        &config.whatsapp.base_url,
    )?);

    let verify_token = config.whatsapp.verify_token.clone().ok_or_else(|| {
        SavoirError::Config("whatsapp.verify_token is required to serve the webhook".into())
    })?;

    let state = GatewayState {
        engine,
        sender,
        transcriber: None,
        verify_token,
    };

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    start_server(&server_config, state).await
}
