//! Student Portal Gateway
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────┐
//!                       │                PORTAL GATEWAY                │
//!     Browser Request   │  ┌──────────┐   ┌──────────────┐             │
//!     ──────────────────┼─▶│ request  │──▶│ session gate │──redirect──┼──▶ /login?from=...
//!                       │  │ id/trace │   └──────┬───────┘             │
//!                       │  └──────────┘          │ pass + Session      │
//!                       │                        ▼                     │
//!                       │  ┌───────────────┐  ┌──────────────┐         │
//!                       │  │ portal / auth │  │ page forward │─────────┼──▶ Page Renderer
//!                       │  │   handlers    │  └──────────────┘         │
//!                       │  └──────┬────────┘                           │
//!                       │         ▼                                    │
//!                       │  ┌───────────────┐   ┌──────────┐            │
//!                       │  │ upstream      │──▶│ activity │            │
//!                       │  │ client        │   │   log    │            │
//!                       │  └──────┬────────┘   └──────────┘            │
//!                       └─────────┼────────────────────────────────────┘
//!                                 ▼
//!                         Institutional API (Bearer <session token>)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use portal_gateway::activity::{ActivityLog, ActivityRecorder, NoopRecorder, TracingRecorder};
use portal_gateway::config::{load_config, ActivitySinkKind, PortalConfig};
use portal_gateway::lifecycle::{wait_for_signal, Shutdown};
use portal_gateway::observability::{logging, metrics};
use portal_gateway::PortalServer;

#[derive(Parser)]
#[command(name = "portal-gateway")]
#[command(about = "Session gate and upstream proxy for the student portal", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults are used when omitted.
    #[arg(short, long, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PortalConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("portal-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config = ?cli.config,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        login_path = %config.session.login_path,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();

    let mut activity_writer = None;
    let activity: Arc<dyn ActivityRecorder> = match config.activity.sink {
        ActivitySinkKind::Tracing => Arc::new(TracingRecorder),
        ActivitySinkKind::Disabled => Arc::new(NoopRecorder),
        ActivitySinkKind::File => {
            let (log, writer) =
                ActivityLog::open(&config.activity.path, shutdown.subscribe()).await?;
            activity_writer = Some(writer);
            Arc::new(log)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = PortalServer::new(config, activity)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await;
    shutdown.trigger();

    server_task.await??;
    if let Some(writer) = activity_writer {
        writer.await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
