// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Widoo API Server
//!
//! Tracks activities to pick from when bored: create them, draw a random
//! one, select one to focus on, and mark them done (or done-and-repeated).

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use widoo::{config::Config, db::Database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Widoo API");

    // Open the database and bring the schema up to date
    let db = Database::open(&config.db_path)?;
    db.migrate(&config.migrations_dir)
        .context("Migrations failed")?;
    tracing::info!("Migrations done");

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
    });

    let app = widoo::routes::create_router(state.clone());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // In-flight requests have drained; release the connection before exit.
    match Arc::try_unwrap(state) {
        Ok(state) => {
            state.db.close()?;
            tracing::info!("Database connection closed");
        }
        Err(_) => tracing::warn!("Database connection still referenced at shutdown"),
    }

    Ok(())
}

/// Resolves when the interrupt signal arrives.
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for interrupt signal");
    tracing::info!("Stop signal received");
}

/// Initialize logging with an env-derived filter.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("widoo=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
