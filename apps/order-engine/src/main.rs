//! Order Engine Binary
//!
//! Starts the Orderdesk order engine.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-engine
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_ENGINE_CONFIG`: Config file path (default: config.yaml)
//! - `DATABASE_URL`: Overrides the configured database URL
//! - `RUST_LOG`: Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;
use tokio::signal;

use order_engine::application::{ClientService, OrderService, ProductService};
use order_engine::config::load_config;
use order_engine::infrastructure::http::{create_router, AppState};
use order_engine::infrastructure::persistence::schema;
use order_engine::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Orderdesk Order Engine");

    let config_path = std::env::var("ORDER_ENGINE_CONFIG").ok();
    let config = load_config(config_path.as_deref())?;

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    schema::apply(&pool).await?;
    tracing::info!(
        url = %config.database.url,
        max_connections = config.database.max_connections,
        "database ready"
    );

    let state = AppState {
        clients: Arc::new(ClientService::new(pool.clone())),
        products: Arc::new(ProductService::new(pool.clone())),
        orders: Arc::new(OrderService::new(pool)),
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.http_port)
        .parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Order engine stopped");
    Ok(())
}

/// Resolve when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install ctrl-c handler");
    } else {
        tracing::info!("shutdown signal received");
    }
}
