// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Savoir assistant backend.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Savoir configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values; credentials default to `None` and are checked at component
/// construction.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SavoirConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Assistant service (threads/runs API) settings.
    #[serde(default)]
    pub assistant: AssistantConfig,

    /// Retrieval service settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// WhatsApp Business API settings.
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,

    /// Webhook HTTP server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "savoir".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Assistant service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssistantConfig {
    /// API key for the assistant service. `None` requires an env override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Pre-provisioned assistant ID. When unset, `serve` creates an
    /// assistant at startup and logs its ID.
    #[serde(default)]
    pub assistant_id: Option<String>,

    /// Model used when creating a new assistant.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the assistant API.
    #[serde(default = "default_assistant_base_url")]
    pub base_url: String,

    /// Seconds between run status polls.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Maximum number of status polls before a run is abandoned.
    #[serde(default = "default_max_poll_iterations")]
    pub max_poll_iterations: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            assistant_id: None,
            model: default_model(),
            base_url: default_assistant_base_url(),
            poll_interval_secs: default_poll_interval_secs(),
            max_poll_iterations: default_max_poll_iterations(),
        }
    }
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_assistant_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_max_poll_iterations() -> u32 {
    30
}

/// Retrieval service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// API key for the retrieval service. `None` requires an env override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the retrieval API.
    #[serde(default = "default_retrieval_base_url")]
    pub base_url: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_retrieval_base_url(),
        }
    }
}

fn default_retrieval_base_url() -> String {
    "https://api.sciphi.ai/v3".to_string()
}

/// WhatsApp Business API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Graph API bearer token. `None` requires an env override.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Business phone number ID used in the send endpoint path.
    #[serde(default)]
    pub phone_number_id: Option<String>,

    /// Secret compared against `hub.verify_token` during webhook
    /// verification.
    #[serde(default)]
    pub verify_token: Option<String>,

    /// Base URL of the Graph API.
    #[serde(default = "default_graph_base_url")]
    pub base_url: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            phone_number_id: None,
            verify_token: None,
            base_url: default_graph_base_url(),
        }
    }
}

fn default_graph_base_url() -> String {
    "https://graph.facebook.com/v22.0".to_string()
}

/// Webhook HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = SavoirConfig::default();
        assert_eq!(config.agent.name, "savoir");
        assert_eq!(config.assistant.poll_interval_secs, 2);
        assert_eq!(config.assistant.max_poll_iterations, 30);
        assert_eq!(config.retrieval.base_url, "https://api.sciphi.ai/v3");
        assert_eq!(config.gateway.port, 8080);
        assert!(config.whatsapp.verify_token.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[assistant]
api_key = "sk-test"
unknown_field = "bad"
"#;
        let result = toml::from_str::<SavoirConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let toml_str = r#"
[whatsapp]
verify_token = "secret"
"#;
        let config: SavoirConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.whatsapp.verify_token.as_deref(), Some("secret"));
        assert_eq!(config.whatsapp.base_url, "https://graph.facebook.com/v22.0");
        assert_eq!(config.assistant.model, "gpt-4.1");
    }
}
