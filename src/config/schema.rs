//! Configuration schema definitions.
//!
//! This module defines the resolved runtime configuration. The public fields
//! mirror the JSON document; provenance fields are filled by the resolver and
//! never deserialized.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Which source produced a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Not resolved yet.
    #[default]
    Unknown,
    /// Loaded from a JSON file.
    File,
    /// Loaded from environment variables.
    Env,
}

impl SourceMode {
    /// Literal name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Unknown => "unknown",
            SourceMode::File => "file",
            SourceMode::Env => "env",
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root application configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Listen address in `host:port` form (e.g. ":8080" or "127.0.0.1:3000").
    pub listen: String,

    /// HTTP settings.
    pub http: HttpConfig,

    #[serde(skip)]
    mode: SourceMode,

    #[serde(skip)]
    file_name: Option<PathBuf>,
}

/// HTTP timeouts, in seconds.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// Client timeout.
    pub timeout: i64,

    /// Request-level timeout applied to handlers (0 disables it).
    pub request_timeout: i64,
}

impl Config {
    /// Create an empty, unresolved configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Source that produced this configuration.
    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    /// Config file path; only set in file mode.
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    /// Record provenance. Called exactly once by the resolver.
    pub(crate) fn set_source(&mut self, mode: SourceMode, file_name: Option<PathBuf>) {
        debug_assert_eq!(self.mode, SourceMode::Unknown, "source mode set twice");
        self.mode = mode;
        self.file_name = match mode {
            SourceMode::File => file_name,
            _ => None,
        };
    }

    /// Reset negative values to zero. Idempotent.
    pub(crate) fn set_default_values(&mut self) {
        self.http.timeout = self.http.timeout.max(0);
        self.http.request_timeout = self.http.request_timeout.max(0);
    }
}
