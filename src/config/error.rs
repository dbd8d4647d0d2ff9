//! Configuration error types.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::validation::ValidationError;

/// Configuration resolution error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not a valid document.
    #[error("failed to parse config: {0}")]
    Format(#[from] serde_json::Error),

    /// Environment variable holds a non-integer or non-unicode value.
    #[error("could not read env {var}={value:?}: {source}")]
    Parse {
        var: &'static str,
        /// Raw value, lossily decoded when it is not unicode.
        value: String,
        #[source]
        source: EnvValueError,
    },

    /// Semantic checks failed.
    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

/// Why an environment value was rejected.
#[derive(Debug, Error)]
pub enum EnvValueError {
    /// Not a base-10 integer.
    #[error(transparent)]
    Int(#[from] ParseIntError),

    /// Not valid unicode.
    #[error("value is not valid unicode")]
    NotUnicode,
}

impl ConfigError {
    /// Short name of the failure category, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigError::Io { .. } => "io",
            ConfigError::Format(_) => "format",
            ConfigError::Parse { .. } => "parse",
            ConfigError::Validation(_) => "validation",
        }
    }
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
