//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGINT (Ctrl+C) and SIGTERM handlers before serving starts
//! - Forward each delivery into a bounded notification channel
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The first signal starts a graceful shutdown; a second one forces it
//! - A closed channel never wakes the receiver

use std::fmt;

use tokio::sync::mpsc;

/// Channel capacity: one graceful request plus one forcing request.
pub const SIGNAL_BUFFER: usize = 2;

/// A termination request from the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT / Ctrl+C.
    Interrupt,
    /// SIGTERM.
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => f.write_str("SIGINT"),
            ShutdownSignal::Terminate => f.write_str("SIGTERM"),
        }
    }
}

/// Create an unconnected notification channel.
pub fn channel() -> (mpsc::Sender<ShutdownSignal>, mpsc::Receiver<ShutdownSignal>) {
    mpsc::channel(SIGNAL_BUFFER)
}

/// Install OS handlers and return the receiving end of their notifications.
///
/// Handlers are registered before this returns, so a signal delivered right
/// after the call is not lost. Must be called from within a Tokio runtime.
pub fn listen() -> mpsc::Receiver<ShutdownSignal> {
    let (tx, rx) = channel();
    let handlers = Handlers::install();
    tokio::spawn(forward(tx, handlers));
    rx
}

/// Wait for the next notification. Pends forever once all producers are gone.
pub async fn recv(rx: &mut mpsc::Receiver<ShutdownSignal>) -> ShutdownSignal {
    match rx.recv().await {
        Some(signal) => signal,
        None => std::future::pending().await,
    }
}

async fn forward(tx: mpsc::Sender<ShutdownSignal>, mut handlers: Handlers) {
    loop {
        let Some(received) = handlers.recv().await else {
            tracing::error!("No signal handlers installed");
            // Hold the sender so the receiver is never woken spuriously.
            return std::future::pending().await;
        };

        tracing::info!(signal = %received, "Signal received");
        if tx.send(received).await.is_err() {
            return;
        }
    }
}

#[cfg(unix)]
struct Handlers {
    interrupt: Option<tokio::signal::unix::Signal>,
    terminate: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl Handlers {
    fn install() -> Self {
        use tokio::signal::unix::{signal, SignalKind};

        let install = |kind: SignalKind, name: &str| match signal(kind) {
            Ok(sig) => Some(sig),
            Err(err) => {
                tracing::warn!(error = %err, signal = name, "Failed to install signal handler");
                None
            }
        };

        Self {
            interrupt: install(SignalKind::interrupt(), "SIGINT"),
            terminate: install(SignalKind::terminate(), "SIGTERM"),
        }
    }

    /// Next delivery, or `None` once no handler can fire again.
    async fn recv(&mut self) -> Option<ShutdownSignal> {
        tokio::select! {
            Some(()) = recv_opt(&mut self.interrupt) => Some(ShutdownSignal::Interrupt),
            Some(()) = recv_opt(&mut self.terminate) => Some(ShutdownSignal::Terminate),
            else => None,
        }
    }
}

#[cfg(unix)]
async fn recv_opt(sig: &mut Option<tokio::signal::unix::Signal>) -> Option<()> {
    match sig.as_mut() {
        Some(sig) => sig.recv().await,
        None => None,
    }
}

#[cfg(not(unix))]
struct Handlers {
    interrupt: bool,
}

#[cfg(not(unix))]
impl Handlers {
    fn install() -> Self {
        Self { interrupt: true }
    }

    async fn recv(&mut self) -> Option<ShutdownSignal> {
        if !self.interrupt {
            return None;
        }
        match tokio::signal::ctrl_c().await {
            Ok(()) => Some(ShutdownSignal::Interrupt),
            Err(err) => {
                tracing::warn!(error = %err, "Failed to install Ctrl+C handler");
                self.interrupt = false;
                None
            }
        }
    }
}
