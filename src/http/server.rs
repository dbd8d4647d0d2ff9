//! HTTP router setup.
//!
//! # Responsibilities
//! - Create Axum Router with the placeholder `/` handler
//! - Wire up middleware (tracing, request timeout)

use std::time::Duration;

use axum::{
    http::{StatusCode, Uri},
    routing::any,
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::Config;

/// Build the Axum router with all middleware layers.
///
/// `config.http.request_timeout` seconds bound each handler; 0 disables the limit.
#[allow(deprecated)]
pub fn build_router(config: &Config) -> Router {
    let request_timeout = u64::try_from(config.http.request_timeout).unwrap_or(0);
    let router = Router::new().route("/", any(root_handler));

    let router = if request_timeout > 0 {
        router.layer(TimeoutLayer::new(Duration::from_secs(request_timeout)))
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

/// Placeholder handler: logs the request URI.
async fn root_handler(uri: Uri) -> StatusCode {
    tracing::info!(uri = %uri, "Request");
    StatusCode::OK
}
