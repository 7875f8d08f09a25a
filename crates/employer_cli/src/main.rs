//! Employer roster server entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Initialize logging, open the store and serve the HTTP router.

use anyhow::Context;
use clap::Parser;
use employer_core::db::open_db;
use employer_core::{default_level, init_logging, LogSettings};
use employer_http::{create_router, AppState};
use log::{error, info};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(name = "employer-server")]
#[command(about = "Employee roster HTTP service", long_about = None)]
#[command(version)]
struct Cli {
    /// SQLite database file; created on first run.
    #[arg(long, env = "EMPLOYER_DB_PATH", default_value = "employers.sqlite3")]
    db_path: PathBuf,

    /// Socket address to listen on.
    #[arg(long, env = "EMPLOYER_BIND", default_value = "127.0.0.1:5218")]
    bind: SocketAddr,

    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "EMPLOYER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; stderr when unset.
    #[arg(long, env = "EMPLOYER_LOG_DIR")]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .unwrap_or_else(|| default_level().as_str().to_ascii_lowercase());
    let settings = LogSettings::parse(&level, cli.log_dir.as_deref())?;
    init_logging(settings).context("failed to initialize logging")?;

    let conn = open_db(&cli.db_path)
        .with_context(|| format!("failed to open database `{}`", cli.db_path.display()))?;
    let app = create_router(AppState::new(conn));

    let listener = TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("failed to bind {}", cli.bind))?;
    info!(
        "event=server_start module=cli status=ok bind={} db_path={}",
        cli.bind,
        cli.db_path.display()
    );

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("event=server_stop module=cli status=error error={err}");
        return Err(err.into());
    }

    info!("event=server_stop module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=shutdown_signal module=cli status=error error={err}");
    }
}
