// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes. Credentials are deliberately not validated here: they are
//! checked fail-fast at component construction, so `savoir
//! update-assistant` can run without WhatsApp credentials.

use crate::diagnostic::ConfigError;
use crate::model::SavoirConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects all violations instead of failing fast.
pub fn validate_config(config: &SavoirConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    if config.gateway.port == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.port must not be 0".to_string(),
        });
    }

    if config.assistant.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "assistant.poll_interval_secs must be at least 1".to_string(),
        });
    }

    if config.assistant.max_poll_iterations == 0 {
        errors.push(ConfigError::Validation {
            message: "assistant.max_poll_iterations must be at least 1".to_string(),
        });
    }

    for (key, url) in [
        ("assistant.base_url", &config.assistant.base_url),
        ("retrieval.base_url", &config.retrieval.base_url),
        ("whatsapp.base_url", &config.whatsapp.base_url),
    ] {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            errors.push(ConfigError::Validation {
                message: format!("{key} must start with http:// or https://, got `{url}`"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
