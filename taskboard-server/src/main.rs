//! Taskboard REST API server.
//!
//! Serves the `/api/tasks` surface over a JSON-file-backed document store.
//!
//! ```bash
//! # Run on the default address 0.0.0.0:5000
//! cargo run --bin taskboard-server
//!
//! # Run on a custom address with an explicit data file
//! cargo run --bin taskboard-server -- --bind 127.0.0.1:8080 \
//!     --data-path /tmp/tasks.json
//!
//! # Or via environment variables
//! TASKBOARD_ADDR=127.0.0.1:8080 cargo run --bin taskboard-server
//! ```

use std::sync::Arc;

use clap::Parser;
use taskboard_server::config::{ServerCliArgs, ServerConfig};
use taskboard_server::routes;
use taskboard_server::store::TaskStore;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let store = match open_store(&config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to open task store");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %config.bind_addr, "starting taskboard server");

    match routes::start_server(&config.bind_addr, Arc::new(store)).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "taskboard server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start server");
            std::process::exit(1);
        }
    }
}

/// Opens the document store from the resolved config, creating the data
/// directory when needed. Falls back to in-memory when no data path is
/// available.
fn open_store(config: &ServerConfig) -> Result<TaskStore, Box<dyn std::error::Error>> {
    let Some(path) = &config.data_path else {
        tracing::warn!("no data path configured, tasks will not survive restarts");
        return Ok(TaskStore::in_memory());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::info!(path = %path.display(), "opening task store");
    Ok(TaskStore::open(path.clone())?)
}
