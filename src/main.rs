//! User management frontend (v1)
//!
//! Renders HTML pages for a remote users API built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                  FRONTEND                    │
//!     Browser request     │  ┌─────────┐    ┌─────────┐    ┌──────────┐  │
//!     ────────────────────┼─▶│  http   │───▶│  pages  │───▶│   api    │──┼──▶ Users API
//!                         │  │ server  │    │handlers │    │  client  │  │
//!                         │  └─────────┘    └────┬────┘    └──────────┘  │
//!                         │                      │                       │
//!     HTML / redirect     │  ┌─────────┐    ┌────▼────┐                  │
//!     ◀───────────────────┼──│templates│◀───│  flash  │                  │
//!                         │  └─────────┘    │ cookie  │                  │
//!                         │                 └─────────┘                  │
//!                         │  config · observability · lifecycle          │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use user_frontend::config::load_config;
use user_frontend::lifecycle::startup;
use user_frontend::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "user-frontend")]
#[command(about = "Server-rendered frontend for the users API", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overriding PORT.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    init_logging(&config);
    tracing::info!("user-frontend v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
