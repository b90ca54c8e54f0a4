// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{Duration, Utc};
use strava_weekly::config::Config;
use strava_weekly::db::{CredentialStore, FirestoreDb};
use strava_weekly::models::Credential;
use strava_weekly::routes::create_router;
use strava_weekly::services::{ActivityService, AuthCoordinator, StravaClient, TokenExchanger};
use strava_weekly::AppState;
use std::sync::Arc;

/// Address nothing listens on, for tests that must not reach Strava.
#[allow(dead_code)]
pub const UNREACHABLE_STRAVA: &str = "http://127.0.0.1:9";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Config whose Strava endpoints all point at `strava_url` (a mock server).
#[allow(dead_code)]
pub fn test_config(strava_url: &str) -> Config {
    Config {
        strava_oauth_url: format!("{}/oauth", strava_url),
        strava_api_url: format!("{}/api/v3", strava_url),
        ..Config::test_default()
    }
}

/// Credential whose access token is `token`, expiring `ttl` from now.
#[allow(dead_code)]
pub fn credential(token: &str, ttl: Duration) -> Credential {
    Credential {
        access_token: token.to_string(),
        refresh_token: format!("{}-refresh", token),
        expires_at: Utc::now() + ttl,
        athlete: serde_json::json!({ "id": 1, "firstname": "Test" }),
    }
}

/// Coordinator wired to `store` and the mock Strava at `strava_url`.
///
/// The token cache starts empty; call `load_initial` to fill it.
#[allow(dead_code)]
pub fn test_coordinator(strava_url: &str, store: CredentialStore) -> AuthCoordinator {
    let config = test_config(strava_url);
    AuthCoordinator::new(
        TokenExchanger::new(
            &config.strava_oauth_url,
            config.strava_client_id.clone(),
            config.strava_client_secret.clone(),
        ),
        store,
        &config.strava_oauth_url,
        config.strava_client_id,
        config.strava_redirect_uri,
    )
}

/// Create a test app backed by an in-memory store, optionally seeded.
/// Returns the router, the shared state and a handle to the store.
#[allow(dead_code)]
pub async fn create_test_app(
    strava_url: &str,
    seeded: Option<Credential>,
) -> (axum::Router, Arc<AppState>, CredentialStore) {
    let config = test_config(strava_url);
    let store = CredentialStore::in_memory();

    if let Some(credential) = seeded {
        store.put(&credential).await.unwrap();
    }

    let coordinator = test_coordinator(strava_url, store.clone());
    coordinator.load_initial().await.unwrap();

    let activities = ActivityService::new(
        StravaClient::new(&config.strava_api_url),
        coordinator.clone(),
    );

    let state = Arc::new(AppState {
        config,
        coordinator,
        activities,
    });

    (create_router(state.clone()), state, store)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Strava's token endpoint response for a successful exchange.
#[allow(dead_code)]
pub fn token_response(access_token: &str, expires_in: i64) -> serde_json::Value {
    serde_json::json!({
        "token_type": "Bearer",
        "expires_at": Utc::now().timestamp() + expires_in,
        "expires_in": expires_in,
        "refresh_token": "R",
        "access_token": access_token,
        "athlete": { "id": 1, "username": "tester", "firstname": "Test" }
    })
}
