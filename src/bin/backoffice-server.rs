// ABOUTME: Backoffice server binary wiring config, logging, database and HTTP together
// ABOUTME: Runs until SIGINT/SIGTERM then shuts the listener down gracefully
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Backoffice Contributors

use anyhow::{Context, Result};
use backoffice::auth::TokenManager;
use backoffice::config::ServerConfig;
use backoffice::database_plugins::{factory::Database, DatabaseProvider};
use backoffice::logging::{init_logging, LogFormat};
use backoffice::password::PasswordHasher;
use backoffice::routes::{create_router, AppState};
use clap::Parser;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "backoffice-server", version, about = "Administrative backend server")]
struct Args {
    /// Override the port from HTTP_PORT
    #[arg(long)]
    port: Option<u16>,

    /// Override the database URL from DATABASE_URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    init_logging(config.log_level, LogFormat::from_env())?;
    tracing::info!("Starting backoffice server: {}", config.summary());

    let database = Database::new(&config.database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!(backend = database.backend_info(), "Database ready");

    let token_manager = Arc::new(TokenManager::new(
        &config.auth.jwt_secret,
        chrono::Duration::seconds(config.auth.access_ttl_secs),
        chrono::Duration::seconds(config.auth.refresh_ttl_secs),
    ));
    let password_hasher = PasswordHasher::new(config.auth.bcrypt_cost);

    let purge_db = database.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
        loop {
            interval.tick().await;
            match purge_db.delete_expired_refresh_tokens().await {
                Ok(0) => {}
                Ok(purged) => tracing::info!(purged, "Purged expired refresh tokens"),
                Err(e) => tracing::warn!("Refresh token purge failed: {e}"),
            }
        }
    });

    let state = AppState::new(database, token_manager, password_hasher);
    let app = create_router(state, &config.cors_origins);

    let addr = format!("{}:{}", config.http_host, config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
