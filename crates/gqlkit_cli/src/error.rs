//! Fatal CLI errors.
//!
//! Problems in the schema itself are diagnostics, not errors. These variants
//! cover everything that stops the CLI before or after the pipeline runs.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(
        code(gqlkit::read),
        help("check that the file exists and is readable")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(gqlkit::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}", path.display())]
    #[diagnostic(
        code(gqlkit::json),
        help("the file must be an extraction bundle or gqlkit.json with camelCase keys")
    )]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode the document as JSON")]
    #[diagnostic(code(gqlkit::encode))]
    Encode(#[from] serde_json::Error),

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(gqlkit::config))]
    Config {
        message: String,
        #[help]
        help: String,
    },
}

impl CliError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: help.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_renders() {
        let err = CliError::config("bad scalar", "rename it");
        assert_eq!(err.to_string(), "invalid configuration: bad scalar");
        assert_eq!(
            err.help().map(|h| h.to_string()),
            Some("rename it".to_string())
        );
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("gqlkit::config".to_string())
        );
    }

    #[test]
    fn test_read_error_keeps_source() {
        let err = CliError::Read {
            path: PathBuf::from("bundle.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read bundle.json");
        assert!(std::error::Error::source(&err).is_some());
    }
}
