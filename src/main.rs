// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Weekly API Server
//!
//! Authorizes one athlete with Strava and serves weekly activity summaries.

use std::sync::Arc;
use strava_weekly::{
    config::Config,
    db::CredentialStore,
    services::{ActivityService, AuthCoordinator, StravaClient, TokenExchanger},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        store = ?config.credential_store,
        "Starting Strava-Weekly API"
    );

    // An unreachable store at startup is fatal
    let store = CredentialStore::connect(&config).await?;

    let exchanger = TokenExchanger::new(
        &config.strava_oauth_url,
        config.strava_client_id.clone(),
        config.strava_client_secret.clone(),
    );
    let coordinator = AuthCoordinator::new(
        exchanger,
        store,
        &config.strava_oauth_url,
        config.strava_client_id.clone(),
        config.strava_redirect_uri.clone(),
    );

    let authorized = coordinator.load_initial().await?;
    tracing::info!(credential_found = authorized, "Credential store loaded");

    let activities = ActivityService::new(
        StravaClient::new(&config.strava_api_url),
        coordinator.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        coordinator,
        activities,
    });

    // Build router
    let app = strava_weekly::routes::create_router(state);

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
            EnvFilter::from_default_env()
                .add_directive("strava_weekly=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();

    Ok(())
}
