// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod coordinator;
pub mod strava;
pub mod token_exchange;

pub use activity::ActivityService;
pub use coordinator::{AuthCoordinator, AuthorizationOutcome, AuthorizationStatus};
pub use strava::StravaClient;
pub use token_exchange::{TokenExchangeResponse, TokenExchanger};
