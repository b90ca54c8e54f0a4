// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only athlete data routes.
//!
//! Each handler needs the coordinator's current token; without one the
//! browser is sent to the error page and Strava is never called.

use crate::error::{AppError, Result};
use crate::models::{compute_week_summary, format_activity_row, DisplayRow, WeekSummary};
use crate::time_utils::{current_week_start, local_to_utc};
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/athlete", get(get_athlete))
        .route("/athlete/last-activity", get(get_last_activity))
        .route("/athlete/week-stats", get(get_week_stats))
        .route("/weekly-activities", get(get_weekly_activities))
}

/// Authenticated athlete profile.
async fn get_athlete(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>> {
    let profile = state.activities.fetch_athlete_profile().await?;
    Ok(Json(profile))
}

/// Most recent activity, or `{}` if the athlete has none.
async fn get_last_activity(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>> {
    let activities = state.activities.fetch_recent_activities(1).await?;

    let last = activities
        .into_iter()
        .next()
        .unwrap_or_else(|| serde_json::json!({}));

    Ok(Json(last))
}

/// Totals and averages since Monday.
async fn get_week_stats(State(state): State<Arc<AppState>>) -> Result<Json<WeekSummary>> {
    let week_start = current_week_start();
    let since = local_to_utc(week_start).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Week start {} is not a valid local time", week_start))
    })?;

    let activities = state.activities.fetch_activities_since(since).await?;

    Ok(Json(compute_week_summary(&activities, week_start)))
}

/// This week's activities formatted for the table view.
async fn get_weekly_activities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DisplayRow>>> {
    let week_start = current_week_start();
    let since = local_to_utc(week_start).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("Week start {} is not a valid local time", week_start))
    })?;

    let activities = state.activities.fetch_activities_since(since).await?;

    Ok(Json(activities.iter().map(format_activity_row).collect()))
}
