// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod credential;
pub mod stats;

pub use activity::{format_activity_row, DisplayRow, StravaActivity};
pub use credential::Credential;
pub use stats::{compute_week_summary, WeekSummary};
