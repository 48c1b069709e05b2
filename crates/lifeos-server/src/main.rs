//! LifeOS HTTP API server.
//!
//! A thin axum layer over lifeos-core, mirroring the dashboard API: task
//! CRUD, V2G request tracking, time logging, stats, and the next-action
//! recommendation.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use lifeos_core::{Config, TaskDb};

mod routes;

use routes::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifeos_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::load()?;
    let db = TaskDb::open_at(&config.database_path()?)?;
    let state = Arc::new(AppState { db: Mutex::new(db) });

    let addr: SocketAddr = config.server_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("LifeOS API listening on http://{addr}");
    axum::serve(listener, routes::router(state)).await?;
    Ok(())
}
