//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (config resolution, bind, transitions, requests)
//!     → logging.rs (fmt subscriber filtered by RUST_LOG)
//!     → stderr
//! ```

pub mod logging;

pub use logging::init_logging;
