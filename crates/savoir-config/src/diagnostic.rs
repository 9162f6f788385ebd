// SPDX-FileCopyrightText: 2026 Savoir Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config error diagnostics rendered through miette.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error suitable for miette rendering at startup.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// Figment failed to deserialize the merged configuration (unknown
    /// key, type mismatch, malformed TOML).
    #[error("{message}")]
    #[diagnostic(
        code(savoir::config::parse),
        help("check savoir.toml and SAVOIR_* environment variables")
    )]
    Parse {
        /// Figment's description of the failure.
        message: String,
    },

    /// A semantic validation failure on an otherwise well-formed config.
    #[error("validation error: {message}")]
    #[diagnostic(code(savoir::config::validation))]
    Validation {
        /// What constraint was violated.
        message: String,
    },
}

/// Convert a figment extraction error into diagnostics, one per failure.
pub fn figment_to_config_errors(err: figment::Error) -> Vec<ConfigError> {
    err.into_iter()
        .map(|e| ConfigError::Parse {
            message: e.to_string(),
        })
        .collect()
}

/// Render collected config errors to stderr via miette and return how many
/// were printed.
pub fn render_errors(errors: &[ConfigError]) -> usize {
    for error in errors {
        let report = miette::Report::msg(format!("{error}"));
        eprintln!("{report:?}");
        if let Some(help) = error.help() {
            eprintln!("  help: {help}");
        }
    }
    errors.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figment_error_converts_to_parse_diagnostics() {
        let err = crate::loader::load_config_from_str("agent = 5").unwrap_err();
        let errors = figment_to_config_errors(err);
        assert!(!errors.is_empty());
        assert!(matches!(errors[0], ConfigError::Parse { .. }));
    }

    #[test]
    fn render_reports_every_error() {
        let errors = vec![
            ConfigError::Validation {
                message: "gateway.port must not be 0".into(),
            },
            ConfigError::Validation {
                message: "agent.name must not be empty".into(),
            },
        ];
        assert_eq!(render_errors(&errors), 2);
    }
}
