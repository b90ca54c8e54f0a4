// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava data API client.
//!
//! Every call takes the bearer token explicitly; token ownership lives in
//! the authorization coordinator.

use crate::error::AppError;
use serde::de::DeserializeOwned;

/// Largest page Strava serves for `/athlete/activities`.
pub const MAX_PER_PAGE: u32 = 200;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
}

impl StravaClient {
    /// `base_url` is the API root, e.g. `https://www.strava.com/api/v3`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get authenticated athlete profile.
    pub async fn get_athlete(&self, access_token: &str) -> Result<serde_json::Value, AppError> {
        let url = format!("{}/athlete", self.base_url);
        self.get_json(&url, access_token, &[]).await
    }

    /// List the athlete's activities, most recent first.
    ///
    /// `after` is a Unix timestamp; Strava only returns activities that
    /// started after it. `T` is usually [`crate::models::StravaActivity`], or
    /// `serde_json::Value` to keep Strava's objects untouched.
    pub async fn list_activities<T: DeserializeOwned>(
        &self,
        access_token: &str,
        after: Option<i64>,
        per_page: u32,
    ) -> Result<Vec<T>, AppError> {
        let url = format!("{}/athlete/activities", self.base_url);

        let mut query = vec![("per_page", per_page.min(MAX_PER_PAGE).to_string())];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        self.get_json(&url, access_token, &query).await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        access_token: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Strava rate limit hit (429)");
            }

            return Err(AppError::UpstreamFailed(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamFailed(format!("JSON parse error: {}", e)))
    }
}
