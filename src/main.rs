use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use http_bootstrap::config::{ConfigResolver, OsSource};
use http_bootstrap::http::build_router;
use http_bootstrap::lifecycle::{signals, LifecycleController};
use http_bootstrap::observability::init_logging;

#[derive(Parser)]
#[command(name = "http-bootstrap")]
#[command(about = "Minimal HTTP service with env/file configuration and graceful shutdown", long_about = None)]
struct Cli {
    /// Config file path (file mode only) [default: config/config.json]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Could not initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    tracing::info!("http-bootstrap v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match ConfigResolver::new(OsSource)
        .with_file_override(cli.config)
        .resolve()
    {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Could not load config");
            return ExitCode::FAILURE;
        }
    };

    let app = build_router(&config);
    let controller = LifecycleController::new(config);

    match controller.run(app, signals::listen()).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
