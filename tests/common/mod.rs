//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Notify;

/// Send `GET path` on a fresh connection and return the raw response.
pub async fn http_get(addr: SocketAddr, path: &str) -> std::io::Result<String> {
    let mut socket = TcpStream::connect(addr).await?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    socket.write_all(request.as_bytes()).await?;

    let mut response = String::new();
    socket.read_to_string(&mut response).await?;
    Ok(response)
}

/// A router whose `/slow` handler signals `entered` and then sleeps for `delay`.
pub fn slow_router(entered: Arc<Notify>, delay: Duration) -> Router {
    Router::new().route(
        "/slow",
        get(move || {
            let entered = entered.clone();
            async move {
                entered.notify_one();
                tokio::time::sleep(delay).await;
                "done"
            }
        }),
    )
}
