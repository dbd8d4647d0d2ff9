//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (accepted by axum::serve)
//!     → TraceLayer (request span)
//!     → TimeoutLayer (when http.request_timeout > 0)
//!     → root handler (logs the URI, returns 200)
//! ```

pub mod server;

pub use server::build_router;
