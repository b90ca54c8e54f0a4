// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava activity model and its display form.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Meters per second to kilometers per hour.
pub const MPS_TO_KMH: f64 = 3.6;
pub const METERS_PER_KM: f64 = 1000.0;

/// Summary activity as returned by `GET /athlete/activities`.
///
/// Only the fields used for the weekly views are typed; everything else
/// Strava sends is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StravaActivity {
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Elevation gain in meters
    #[serde(default)]
    pub total_elevation_gain: f64,
    /// Average speed in meters per second
    #[serde(default)]
    pub average_speed: f64,
    /// Start time in the athlete's timezone, with a misleading `Z` suffix
    #[serde(default)]
    pub start_date_local: String,
    pub average_heartrate: Option<f64>,
    pub average_watts: Option<f64>,
    pub max_watts: Option<f64>,
    pub kilojoules: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl StravaActivity {
    /// Wall-clock start time in the athlete's timezone.
    ///
    /// Strava formats `start_date_local` like a UTC timestamp; only the
    /// wall-clock part is meaningful.
    pub fn local_start(&self) -> Option<NaiveDateTime> {
        DateTime::parse_from_rfc3339(&self.start_date_local)
            .map(|dt| dt.naive_local())
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&self.start_date_local, "%Y-%m-%dT%H:%M:%S")
            })
            .ok()
    }
}

/// One row of the weekly activities table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "public/generated/")
)]
pub struct DisplayRow {
    /// Start date as `M/D/YYYY`
    pub date: String,
    /// Kilometers, two decimals
    pub distance: String,
    /// Seconds
    pub moving_time: u64,
    /// Meters
    pub elevation_gain: f64,
    /// Kilometers per hour, two decimals
    pub average_speed: String,
    pub average_heart_rate: Option<f64>,
    pub average_power: Option<f64>,
    pub max_watts: Option<f64>,
    pub kcals: Option<f64>,
}

/// Map a raw activity to its display row.
pub fn format_activity_row(activity: &StravaActivity) -> DisplayRow {
    let date = activity
        .local_start()
        .map(|start| start.format("%-m/%-d/%Y").to_string())
        .unwrap_or_default();

    DisplayRow {
        date,
        distance: format!("{:.2}", activity.distance / METERS_PER_KM),
        moving_time: activity.moving_time,
        elevation_gain: activity.total_elevation_gain,
        average_speed: format!("{:.2}", activity.average_speed * MPS_TO_KMH),
        average_heart_rate: activity.average_heartrate,
        average_power: activity.average_watts,
        max_watts: activity.max_watts,
        kcals: activity.kilojoules,
    }
}
