//! Alon Receipts Server
//!
//! Serves the recipe JSON API backed by a `SQLite` database.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use alon_core::tracing_init::{DEFAULT_SERVER_FILTER, init_tracing};
use alon_server::config::Config;
use alon_server::routes::{AppState, build_router};
use alon_server::seed::seed_if_empty;
use alon_server::storage::{RecipeDatabase, RecipeStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(DEFAULT_SERVER_FILTER, config.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.addr,
        "Starting alon-server"
    );

    let db = RecipeDatabase::open(&config.database_url, config.pool_settings())
        .await
        .context("failed to open database")?;
    let store: Arc<dyn RecipeStore> = Arc::new(db.clone());

    if config.no_seed {
        info!("Seeding disabled");
    } else {
        seed_if_empty(store.as_ref())
            .await
            .context("failed to seed database")?;
    }

    let app = build_router(AppState::new(store), config.request_timeout());
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received shutdown signal"),
                Err(e) => {
                    warn!(error = %e, "Cannot listen for shutdown signal");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}
