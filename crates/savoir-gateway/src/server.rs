// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the webhook.

use std::sync::Arc;

use axum::{routing::get, Router};
use savoir_core::SavoirError;
use savoir_engine::RunEngine;
use savoir_whatsapp::{AudioTranscriber, WhatsAppSender};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The conversational run engine.
    pub engine: Arc<RunEngine>,
    /// Outbound message relay.
    pub sender: Arc<WhatsAppSender>,
    /// Optional transcriber for audio messages.
    pub transcriber: Option<Arc<dyn AudioTranscriber>>,
    /// Secret compared against `hub.verify_token`.
    pub verify_token: String,
}

/// Gateway server configuration (mirrors GatewayConfig from savoir-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the gateway router over the shared state.
///
/// Routes:
/// - GET  /health  — liveness probe
/// - GET  /webhook — platform verification handshake
/// - POST /webhook — inbound message processing
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route(
            "/webhook",
            get(handlers::verify_webhook).post(handlers::post_webhook),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Starts the gateway HTTP server and serves until the process exits.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), SavoirError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SavoirError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| SavoirError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
