//! Pub/Sub push greeting service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Push request          ┌──────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http::server ──▶ pubsub::handler           │
//!                           │   (request id,      read body                │
//!                           │    trace, timeout)  → decode envelope        │
//!                           │                     → decode message.data    │
//!     Greeting / 400        │                     → compose greeting       │
//!     ◀─────────────────────┼──────────────────────────────┘               │
//!                           │                                              │
//!                           │  config · observability · lifecycle          │
//!                           └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use pubsub_push::config::loader;
use pubsub_push::http::HttpServer;
use pubsub_push::lifecycle::{signals, startup, Shutdown};
use pubsub_push::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "pubsub-push")]
#[command(about = "Greets Pub/Sub messages delivered by push", long_about = None)]
struct Cli {
    /// Optional TOML configuration file. PORT from the environment always wins.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = loader::load_or_default(cli.config.as_deref())?;
    logging::init_logging(&config.observability);

    tracing::info!("pubsub-push v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = loader::apply_env(&mut config) {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = match startup::bind_listener(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
