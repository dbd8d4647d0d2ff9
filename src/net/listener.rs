//! TCP listener binding.
//!
//! # Responsibilities
//! - Normalize the configured listen address
//! - Bind to it, failing fast (no retry)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Turn a configured address into something `TcpListener::bind` accepts.
///
/// A missing host (":8080") means all interfaces; an empty address means port 80
/// on all interfaces.
pub fn normalize_address(address: &str) -> String {
    if address.is_empty() {
        "0.0.0.0:80".to_string()
    } else if address.starts_with(':') {
        format!("0.0.0.0{address}")
    } else {
        address.to_string()
    }
}

/// Bind a TCP listener for `address`.
pub async fn bind(address: &str) -> Result<(TcpListener, SocketAddr), ListenerError> {
    let normalized = normalize_address(address);
    let bind_err = |source: std::io::Error| ListenerError::Bind {
        address: normalized.clone(),
        source,
    };

    let listener = TcpListener::bind(normalized.as_str())
        .await
        .map_err(bind_err)?;
    let local_addr = listener.local_addr().map_err(bind_err)?;

    tracing::info!(
        address = %local_addr,
        "Listener bound"
    );

    Ok((listener, local_addr))
}
