//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Config.listen
//!     → listener.rs (normalize address, bind)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Bind failures are fatal; there is no retry
//! - Binding happens before the accept loop is spawned so errors surface to the caller

pub mod listener;

pub use listener::{bind, normalize_address, ListenerError};
