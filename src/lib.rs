// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Weekly: weekly training summaries for one Strava athlete
//!
//! This crate provides the backend that walks the athlete through Strava's
//! OAuth consent, keeps the resulting credential, and serves weekly
//! activity totals built from the Strava API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ActivityService, AuthCoordinator};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub coordinator: AuthCoordinator,
    pub activities: ActivityService,
}
