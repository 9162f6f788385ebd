// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the webhook gateway.
//!
//! The POST handler always acknowledges with `{"status": "success"}` once
//! the body has been read — malformed payloads and downstream failures
//! are logged, never turned into error responses, so the platform does
//! not re-deliver the same message in a retry storm.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use savoir_whatsapp::{authenticate_by_phone, Message, Payload};

use crate::server::GatewayState;

/// Mode value the platform sends during webhook verification.
const VERIFICATION_MODE: &str = "subscribe";

/// Query parameters of the verification handshake.
#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    #[serde(rename = "hub.mode")]
    pub mode: String,
    #[serde(rename = "hub.verify_token")]
    pub verify_token: String,
    #[serde(rename = "hub.challenge")]
    pub challenge: String,
}

/// Body of the acknowledgement returned for every processed POST.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn get_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// GET /webhook
///
/// Succeeds only when the mode equals `subscribe` and the (trimmed) token
/// matches the configured secret; the response body is the literal
/// challenge string.
pub async fn verify_webhook(
    State(state): State<GatewayState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let token = params.verify_token.trim();
    if params.mode == VERIFICATION_MODE
        && !token.is_empty()
        && token == state.verify_token.trim()
    {
        info!("webhook verification succeeded");
        (StatusCode::OK, params.challenge).into_response()
    } else {
        error!(mode = %params.mode, "webhook verification failed");
        (StatusCode::FORBIDDEN, "Webhook verification failed").into_response()
    }
}

/// POST /webhook
pub async fn post_webhook(
    State(state): State<GatewayState>,
    Json(body): Json<serde_json::Value>,
) -> Json<StatusResponse> {
    debug!("received webhook payload");

    match serde_json::from_value::<Payload>(body) {
        Ok(payload) => {
            if let Some(message) = payload.first_message() {
                process_message(&state, message).await;
            } else {
                debug!("payload carries no messages, ignoring");
            }
        }
        Err(e) => {
            warn!(error = %e, "invalid webhook payload");
        }
    }

    Json(StatusResponse { status: "success" })
}

/// Extracts text, runs the engine, and relays the reply.
///
/// Every failure is logged and swallowed; the webhook is acknowledged
/// regardless.
async fn process_message(state: &GatewayState, message: &Message) {
    let text = match extract_text(state, message).await {
        Some(text) => text,
        None => return,
    };

    let user = authenticate_by_phone(&message.from);
    let reply = state.engine.run(&text, &user.id).await;
    info!(user_id = %user.id, outcome = %reply.outcome, "engine reply produced");

    if let Err(e) = state.sender.send_text(&user.phone, &reply.content).await {
        // Logged only: the inbound platform still gets its acknowledgement.
        error!(phone = %user.phone, error = %e, "failed to deliver reply");
    }
}

/// Resolves the message to plain text: the body for text messages, a
/// transcript for audio when a transcriber is configured.
async fn extract_text(state: &GatewayState, message: &Message) -> Option<String> {
    if let Some(body) = message.text_body() {
        return Some(body.to_string());
    }

    if let Some(audio) = &message.audio {
        let Some(transcriber) = &state.transcriber else {
            info!(message_id = %message.id, "audio message skipped: no transcriber configured");
            return None;
        };
        return match transcriber.transcribe(audio).await {
            Ok(text) => Some(text),
            Err(e) => {
                error!(message_id = %message.id, error = %e, "audio transcription failed");
                None
            }
        };
    }

    debug!(message_id = %message.id, kind = %message.kind, "unsupported message type, ignoring");
    None
}
