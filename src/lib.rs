//! Minimal HTTP service bootstrap.
//!
//! # Architecture Overview
//!
//! ```text
//!   CONFIG_ENV / LISTEN / HTTP_*        config/config.json (or CLI arg)
//!              │                                  │
//!              └──────────────┬───────────────────┘
//!                             ▼
//!                   ┌───────────────────┐
//!                   │  config::source   │  SourceReader (only I/O boundary)
//!                   └─────────┬─────────┘
//!                             ▼
//!                   ┌───────────────────┐
//!                   │  config::loader   │  mode → parse → clamp → check
//!                   └─────────┬─────────┘
//!                             ▼ Config (immutable)
//!   ┌───────────────┐  ┌───────────────────────┐  ┌─────────────────┐
//!   │config::report │─▶│ lifecycle::controller │◀─│lifecycle::signals│
//!   └───────────────┘  └──────────┬────────────┘  └─────────────────┘
//!                                 ▼
//!                      net::listener → http::server (axum)
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::{Config, ConfigResolver};
pub use lifecycle::LifecycleController;
