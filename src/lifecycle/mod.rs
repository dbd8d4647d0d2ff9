//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (controller.rs):
//!     Resolved Config → Describe → Bind → Spawn accept loop → Serving
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → bounded channel → main path wakes up
//!
//! Shutdown (controller.rs + shutdown.rs):
//!     Signal received → Stop accepting → Drain connections (30s) → Stopped
//! ```
//!
//! # Design Decisions
//! - Fail fast: bind and serve errors are fatal, never retried
//! - Shutdown has timeout: the accept loop is aborted after the deadline
//! - Second SIGTERM/SIGINT while draining forces shutdown

pub mod controller;
pub mod shutdown;
pub mod signals;

pub use controller::{LifecycleController, LifecycleError, LifecycleState, DEFAULT_GRACE_PERIOD};
pub use shutdown::Shutdown;
pub use signals::ShutdownSignal;
