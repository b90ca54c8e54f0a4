// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity data adapter.
//!
//! Pulls the athlete's data from Strava with whatever access token the
//! coordinator currently holds. Without one, nothing is sent upstream.

use crate::error::{AppError, Result};
use crate::models::StravaActivity;
use crate::services::coordinator::AuthCoordinator;
use crate::services::strava::{StravaClient, MAX_PER_PAGE};
use chrono::{DateTime, Utc};

/// Fetches athlete data on behalf of the authorized user.
#[derive(Clone)]
pub struct ActivityService {
    client: StravaClient,
    coordinator: AuthCoordinator,
}

impl ActivityService {
    pub fn new(client: StravaClient, coordinator: AuthCoordinator) -> Self {
        Self {
            client,
            coordinator,
        }
    }

    async fn access_token(&self) -> Result<String> {
        self.coordinator
            .current_access_token()
            .await
            .ok_or(AppError::Unauthorized)
    }

    /// Authenticated athlete profile, as Strava returns it.
    pub async fn fetch_athlete_profile(&self) -> Result<serde_json::Value> {
        let access_token = self.access_token().await?;
        self.client.get_athlete(&access_token).await
    }

    /// The `limit` most recent activities, newest first, exactly as Strava sent them.
    pub async fn fetch_recent_activities(&self, limit: u32) -> Result<Vec<serde_json::Value>> {
        let access_token = self.access_token().await?;
        self.client
            .list_activities(&access_token, None, limit)
            .await
    }

    /// Activities that started after `since`.
    pub async fn fetch_activities_since(&self, since: DateTime<Utc>) -> Result<Vec<StravaActivity>> {
        let access_token = self.access_token().await?;
        let activities: Vec<StravaActivity> = self
            .client
            .list_activities(&access_token, Some(since.timestamp()), MAX_PER_PAGE)
            .await?;

        tracing::debug!(
            count = activities.len(),
            since = %crate::time_utils::format_utc_rfc3339(since),
            "Fetched activities"
        );
        Ok(activities)
    }
}
