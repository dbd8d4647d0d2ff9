//! Listener lifecycle state machine.
//!
//! ```text
//! Idle → Starting → Serving → ShuttingDown → Stopped
//!           │          │
//!           └──────────┴──────────────────→ Stopped (bind / serve failure)
//! ```

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

use crate::config::{self, Config};
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::{self, ShutdownSignal};
use crate::net::{self, ListenerError};

/// Time in-flight requests get to finish after a shutdown signal.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(30);

/// Lifecycle phase of the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Created, nothing bound yet.
    Idle,
    /// Binding the listener and printing the summary.
    Starting,
    /// Accepting connections.
    Serving,
    /// First signal received; draining in-flight requests.
    ShuttingDown,
    /// Terminal. The listener is closed.
    Stopped,
}

impl LifecycleState {
    /// Whether `self → next` is a legal transition.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use LifecycleState::*;
        matches!(
            (self, next),
            (Idle, Starting)
                | (Starting, Serving)
                | (Starting, Stopped)
                | (Serving, ShuttingDown)
                | (Serving, Stopped)
                | (ShuttingDown, Stopped)
        )
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Starting => "starting",
            LifecycleState::Serving => "serving",
            LifecycleState::ShuttingDown => "shutting-down",
            LifecycleState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Error type for lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The listen address could not be bound.
    #[error(transparent)]
    Listener(#[from] ListenerError),

    /// The configuration summary could not be written.
    #[error("failed to render config summary")]
    Report(#[from] fmt::Error),

    /// The accept loop failed or exited without a shutdown request.
    #[error("error listen: {0}")]
    Serve(#[source] io::Error),

    /// The accept loop task panicked or was cancelled.
    #[error("server task failed: {0}")]
    Join(#[from] JoinError),

    /// In-flight requests were still running when the grace period ran out.
    #[error("graceful shutdown did not finish within {}s", .grace.as_secs())]
    ShutdownTimeout { grace: Duration },

    /// A second signal arrived while draining.
    #[error("shutdown forced by second {0}")]
    ForcedShutdown(ShutdownSignal),

    /// An operation was called in the wrong phase.
    #[error("invalid lifecycle transition {from} -> {to}")]
    InvalidTransition {
        from: LifecycleState,
        to: LifecycleState,
    },
}

/// Owns the HTTP listener from bind to stop.
pub struct LifecycleController {
    config: Arc<Config>,
    grace: Duration,
    state: LifecycleState,
    shutdown: Shutdown,
    server: Option<JoinHandle<io::Result<()>>>,
    local_addr: Option<SocketAddr>,
}

impl LifecycleController {
    /// Create an idle controller for `config`.
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            grace: DEFAULT_GRACE_PERIOD,
            state: LifecycleState::Idle,
            shutdown: Shutdown::new(),
            server: None,
            local_addr: None,
        }
    }

    /// Override the shutdown grace period.
    pub fn with_grace_period(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    /// Current lifecycle phase.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Address the listener is bound to, once serving.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// Start, then block until a signal stops the listener.
    pub async fn run(
        mut self,
        app: Router,
        mut signals: mpsc::Receiver<ShutdownSignal>,
    ) -> Result<(), LifecycleError> {
        self.start(app).await?;
        self.wait_for_shutdown(&mut signals).await
    }

    /// Bind the listener, print the banner and spawn the accept loop.
    pub async fn start(&mut self, app: Router) -> Result<SocketAddr, LifecycleError> {
        self.transition(LifecycleState::Starting)?;

        let (summary, listener, addr) = match self.prepare().await {
            Ok(prepared) => prepared,
            Err(err) => {
                self.transition(LifecycleState::Stopped)?;
                return Err(err);
            }
        };

        println!("{summary}");
        println!("Listening on: {addr}");

        let stop = self.shutdown.wait();
        self.server = Some(tokio::spawn(async move {
            axum::serve(listener, app).with_graceful_shutdown(stop).await
        }));
        self.local_addr = Some(addr);
        self.transition(LifecycleState::Serving)?;
        Ok(addr)
    }

    /// Wait for a termination signal, then drain within the grace period.
    ///
    /// A second signal while draining aborts the accept loop immediately.
    pub async fn wait_for_shutdown(
        &mut self,
        signals: &mut mpsc::Receiver<ShutdownSignal>,
    ) -> Result<(), LifecycleError> {
        let mut server = match (self.state, self.server.take()) {
            (LifecycleState::Serving, Some(server)) => server,
            (from, _) => {
                return Err(LifecycleError::InvalidTransition {
                    from,
                    to: LifecycleState::ShuttingDown,
                })
            }
        };

        let first = tokio::select! {
            signal = signals::recv(signals) => signal,
            result = &mut server => {
                self.transition(LifecycleState::Stopped)?;
                let err = match result {
                    Ok(Ok(())) => LifecycleError::Serve(io::Error::other("listener closed unexpectedly")),
                    Ok(Err(err)) => LifecycleError::Serve(err),
                    Err(err) => LifecycleError::Join(err),
                };
                tracing::error!(error = %err, "Server stopped before shutdown signal");
                return Err(err);
            }
        };

        self.transition(LifecycleState::ShuttingDown)?;
        tracing::info!(signal = %first, grace_secs = self.grace.as_secs(), "Shutdown signal received");
        println!("Finish processing...");
        self.shutdown.trigger();

        let outcome = tokio::select! {
            result = tokio::time::timeout(self.grace, &mut server) => match result {
                Ok(Ok(Ok(()))) => Ok(()),
                Ok(Ok(Err(err))) => Err(LifecycleError::Serve(err)),
                Ok(Err(err)) => Err(LifecycleError::Join(err)),
                Err(_) => Err(LifecycleError::ShutdownTimeout { grace: self.grace }),
            },
            second = signals::recv(signals) => Err(LifecycleError::ForcedShutdown(second)),
        };

        if outcome.is_err() {
            server.abort();
        }
        self.transition(LifecycleState::Stopped)?;

        match &outcome {
            Ok(()) => {
                tracing::info!("HTTP server stopped");
                println!("Server gracefully stopped.");
            }
            Err(err) => tracing::error!(error = %err, "Shutdown failed"),
        }
        outcome
    }

    async fn prepare(&self) -> Result<(String, TcpListener, SocketAddr), LifecycleError> {
        let summary = config::describe(&self.config)?;
        let (listener, addr) = net::bind(&self.config.listen).await?;
        Ok((summary, listener, addr))
    }

    fn transition(&mut self, next: LifecycleState) -> Result<(), LifecycleError> {
        if !self.state.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::debug!(from = %self.state, to = %next, "Lifecycle transition");
        self.state = next;
        Ok(())
    }
}
