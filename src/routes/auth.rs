// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava OAuth authorization routes.

use axum::{
    extract::{Query, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::Result;
use crate::routes::found;
use crate::services::AuthorizationStatus;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/authorize", get(authorize))
        .route("/strava-redirect", get(strava_redirect))
        .route("/authorization-status", get(authorization_status))
}

/// Start OAuth flow - redirect to Strava authorization.
async fn authorize(State(state): State<Arc<AppState>>) -> Response {
    let auth_url = state.coordinator.begin_authorization();

    tracing::info!(
        client_id = %state.config.strava_client_id,
        "Starting OAuth flow, redirecting to Strava"
    );

    found(&auth_url)
}

/// Query parameters Strava appends to the redirect URI.
#[derive(Deserialize)]
pub struct RedirectParams {
    #[serde(default)]
    code: Option<String>,
    /// Comma-separated scopes the athlete actually granted
    #[serde(default)]
    scope: Option<String>,
    /// Set when the athlete denied access
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code for tokens unless already authorized.
async fn strava_redirect(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RedirectParams>,
) -> Result<Response> {
    if let Some(error) = params.error.as_deref() {
        tracing::warn!(error = %error, "OAuth error from Strava");
    }
    if let Some(scope) = params.scope.as_deref() {
        tracing::info!(scope = %scope, "Scopes granted");
    }

    let outcome = state
        .coordinator
        .complete_authorization(params.code.as_deref())
        .await?;

    tracing::info!(?outcome, "OAuth redirect handled");

    Ok(found("/"))
}

/// Whether a valid credential is stored.
async fn authorization_status(State(state): State<Arc<AppState>>) -> Json<AuthorizationStatus> {
    Json(state.coordinator.status().await)
}
