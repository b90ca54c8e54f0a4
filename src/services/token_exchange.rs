// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authorization-code exchange against the Strava OAuth token endpoint.

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Token exchange response from Strava OAuth (includes athlete info).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenExchangeResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of `access_token` in seconds
    pub expires_in: i64,
    /// Athlete summary, kept opaque
    #[serde(default)]
    pub athlete: serde_json::Value,
}

/// Performs the one-time code-for-token exchange. Never touches storage.
#[derive(Clone)]
pub struct TokenExchanger {
    http: reqwest::Client,
    token_url: String,
    client_id: String,
    client_secret: String,
}

impl TokenExchanger {
    /// `oauth_url` is the Strava OAuth base, e.g. `https://www.strava.com/oauth`.
    pub fn new(oauth_url: &str, client_id: String, client_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            token_url: format!("{}/token", oauth_url.trim_end_matches('/')),
            client_id,
            client_secret,
        }
    }

    /// Exchange an authorization code for tokens. Not retried on failure.
    pub async fn exchange(&self, code: &str) -> Result<TokenExchangeResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExchangeFailed(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Strava token exchange failed");
            return Err(AppError::ExchangeFailed(format!(
                "token endpoint returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExchangeFailed(format!("unexpected token response: {}", e)))
    }
}
