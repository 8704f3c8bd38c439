// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! IronPulse Shell API Server
//!
//! Answers navigation checks, manages viewer sessions and impersonation, and
//! serves the persisted site settings and media library.

use ironpulse_shell::{
    access::RouteTable,
    config::Config,
    services::UserDirectory,
    session::SessionRegistry,
    store::{FileStore, SettingsStore},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting IronPulse shell API");

    // Durable store backing the settings documents
    let backend = FileStore::open(&config.storage_path)?;
    let settings = SettingsStore::new(Arc::new(backend));
    let site = settings.site_settings();
    tracing::info!(
        path = %config.storage_path.display(),
        headline = %site.hero_headline,
        media_assets = settings.media_library().len(),
        "Settings loaded"
    );

    // Users handed out by the authentication provider
    let directory = match &config.users_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading user directory");
            UserDirectory::load_from_file(path)?
        }
        None => UserDirectory::demo(),
    };
    tracing::info!(count = directory.len(), "User directory loaded");

    let routes = RouteTable::ironpulse();
    tracing::info!(count = routes.listing().len(), "Route table built");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        routes,
        sessions: SessionRegistry::new(config.session_ttl_hours),
        settings,
        directory,
    });

    // Build router
    let app = ironpulse_shell::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ironpulse_shell=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
