//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CONFIG_ENV=1 ? env vars : JSON file (CLI arg or config/config.json)
//!     → source.rs (SourceReader: the only I/O boundary)
//!     → loader.rs (mode selection, parse, default clamping)
//!     → validation.rs (semantic checks)
//!     → Config (validated, immutable)
//!     → report.rs (startup summary)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - All fields have zero defaults to allow minimal configs
//! - Provenance (mode, file path) is recorded once and never changes
//! - Resolution fails fast on the first bad value

pub mod error;
pub mod loader;
pub mod report;
pub mod schema;
pub mod source;
pub mod validation;

pub use error::{ConfigError, EnvValueError};
pub use loader::ConfigResolver;
pub use report::{describe, Describe};
pub use schema::{Config, HttpConfig, SourceMode};
pub use source::{MemorySource, OsSource, SourceReader};
pub use validation::ValidationError;
