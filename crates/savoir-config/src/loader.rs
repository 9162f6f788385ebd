// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./savoir.toml` > `~/.config/savoir/savoir.toml`
//! > `/etc/savoir/savoir.toml`, with environment variable overrides via the
//! `SAVOIR_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SavoirConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/savoir/savoir.toml` (system-wide)
/// 3. `~/.config/savoir/savoir.toml` (user XDG config)
/// 4. `./savoir.toml` (local directory)
/// 5. `SAVOIR_*` environment variables
pub fn load_config() -> Result<SavoirConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SavoirConfig::default()))
        .merge(Toml::file("/etc/savoir/savoir.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("savoir/savoir.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("savoir.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<SavoirConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SavoirConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SavoirConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SavoirConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SAVOIR_WHATSAPP_VERIFY_TOKEN` must map
/// to `whatsapp.verify_token`, not `whatsapp.verify.token`.
fn env_provider() -> Env {
    Env::prefixed("SAVOIR_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("assistant_", "assistant.", 1)
            .replacen("retrieval_", "retrieval.", 1)
            .replacen("whatsapp_", "whatsapp.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_string_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[agent]
log_level = "debug"

[assistant]
max_poll_iterations = 10
"#,
        )
        .unwrap();
        assert_eq!(config.agent.log_level, "debug");
        assert_eq!(config.assistant.max_poll_iterations, 10);
        // Untouched keys keep their defaults.
        assert_eq!(config.assistant.poll_interval_secs, 2);
    }

    #[test]
    fn env_vars_override_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "savoir.toml",
                r#"
[whatsapp]
verify_token = "from-toml"
"#,
            )?;
            jail.set_env("SAVOIR_WHATSAPP_VERIFY_TOKEN", "from-env");
            jail.set_env("SAVOIR_ASSISTANT_API_KEY", "sk-env");

            let config = load_config().expect("config should load");
            assert_eq!(config.whatsapp.verify_token.as_deref(), Some("from-env"));
            assert_eq!(config.assistant.api_key.as_deref(), Some("sk-env"));
            Ok(())
        });
    }

    #[test]
    fn env_mapping_preserves_underscored_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SAVOIR_WHATSAPP_PHONE_NUMBER_ID", "12345");
            jail.set_env("SAVOIR_ASSISTANT_ASSISTANT_ID", "asst_abc");

            let config = load_config().expect("config should load");
            assert_eq!(config.whatsapp.phone_number_id.as_deref(), Some("12345"));
            assert_eq!(config.assistant.assistant_id.as_deref(), Some("asst_abc"));
            Ok(())
        });
    }
}
