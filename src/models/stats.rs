// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly training totals computed from Strava activities.

use chrono::NaiveDateTime;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::activity::{StravaActivity, METERS_PER_KM, MPS_TO_KMH};

/// Totals and averages for the current week.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "public/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub total_distance_in_km: f64,
    pub total_time_in_seconds: u64,
    #[serde(rename = "averageSpeedKmH")]
    pub average_speed_km_h: f64,
    pub average_heart_rate: f64,
    pub average_power: f64,
    pub elevation_gain: f64,
    #[serde(rename = "totalkCals")]
    pub total_kcals: f64,
}

/// Running sums over the activities that fall inside the week.
#[derive(Debug, Default)]
struct WeekTotals {
    distance_meters: f64,
    moving_time: u64,
    heart_rate: f64,
    power: f64,
    elevation_gain: f64,
    kilojoules: f64,
    count: u32,
}

impl WeekTotals {
    fn add(&mut self, activity: &StravaActivity) {
        self.distance_meters += activity.distance;
        self.moving_time += activity.moving_time;
        // Activities without a sensor contribute zero but still count
        self.heart_rate += activity.average_heartrate.unwrap_or(0.0);
        self.power += activity.average_watts.unwrap_or(0.0);
        self.elevation_gain += activity.total_elevation_gain;
        self.kilojoules += activity.kilojoules.unwrap_or(0.0);
        self.count += 1;
    }
}

/// Aggregate the activities that started at or after `week_start`.
///
/// Heart-rate and power averages are divided by the number of activities
/// in the week, including those that did not report the metric. Average
/// speed is total distance over total moving time, not a mean of the
/// per-activity speeds.
pub fn compute_week_summary(activities: &[StravaActivity], week_start: NaiveDateTime) -> WeekSummary {
    let totals = activities
        .iter()
        .filter(|a| a.local_start().is_some_and(|start| start >= week_start))
        .fold(WeekTotals::default(), |mut totals, activity| {
            totals.add(activity);
            totals
        });

    let average_speed_mps = if totals.moving_time > 0 {
        totals.distance_meters / totals.moving_time as f64
    } else {
        0.0
    };

    let per_activity = |sum: f64| {
        if totals.count > 0 {
            sum / f64::from(totals.count)
        } else {
            0.0
        }
    };

    WeekSummary {
        total_distance_in_km: totals.distance_meters / METERS_PER_KM,
        total_time_in_seconds: totals.moving_time,
        average_speed_km_h: average_speed_mps * MPS_TO_KMH,
        average_heart_rate: per_activity(totals.heart_rate),
        average_power: per_activity(totals.power),
        elevation_gain: totals.elevation_gain,
        total_kcals: totals.kilojoules,
    }
}
