// ABOUTME: MealMajor server binary wiring config, logging, database, and routes
// ABOUTME: Starts the REST API for recipe management and dietary profiles
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 MealMajor Contributors

//! # MealMajor Server Binary
//!
//! Starts the recipe-management REST API with user authentication and SQLite
//! storage.

use anyhow::Result;
use clap::Parser;
use mealmajor::{
    auth::AuthManager, config::ServerConfig, database::Database, logging,
    routes::{self, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mealmajor-server")]
#[command(about = "MealMajor - recipe management REST API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    logging::init_from_env()?;

    info!("Starting MealMajor server");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized: {}", config.database_url);

    let auth_manager = AuthManager::new(&config.auth.jwt_secret, config.auth.session_hours);
    let resources = Arc::new(ServerResources::new(database, auth_manager));

    let app = routes::router(resources);
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install shutdown handler: {e}");
    }
}
