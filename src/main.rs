//! DevOps info service entry point.

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devops_info_service::api::{create_router, AppState};
use devops_info_service::config::Config;
use devops_info_service::error::ServiceError;

/// Minimal HTTP service exposing host and runtime information.
#[derive(Parser, Debug)]
#[command(name = "devops-info-service")]
#[command(about = "HTTP service exposing service, host, and runtime information")]
#[command(version)]
struct Args {
    /// Bind address (overrides HOST).
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug mode (overrides DEBUG).
    #[arg(long)]
    debug: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration and apply CLI overrides
    let mut config = Config::load().map_err(ServiceError::Config)?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.debug {
        config.debug = true;
    }

    // Initialize logging
    let filter = if args.verbose || config.debug {
        EnvFilter::new("devops_info_service=debug,info")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone()))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if let Err(e) = config.validate() {
        return Err(ServiceError::InvalidConfig(e).into());
    }

    // Start time is captured here, once, and shared read-only with every
    // request.
    let state = AppState::new();
    let router = create_router(state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await.map_err(ServiceError::Io)?;
    info!("Starting DevOps Info Service on {}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolve when the process receives ctrl-c or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl-c, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
