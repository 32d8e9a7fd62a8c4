//! disquaire - record shop catalog and booking service

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use disquaire::{build_router, db, AppState};

/// Record shop catalog and booking service
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Listen port
    #[arg(long, env = "DISQUAIRE_PORT", default_value_t = 8000)]
    port: u16,

    /// SQLite database path (created if missing)
    #[arg(long, env = "DISQUAIRE_DB", default_value = "disquaire.db")]
    database: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting disquaire v{}", env!("CARGO_PKG_VERSION"));
    info!("Database: {}", args.database.display());

    let pool = db::connect(&args.database).await?;
    info!("Database connection established");

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("disquaire listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
