// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use strava_weekly::error::AppError;

#[test]
fn test_browser_facing_errors() {
    assert!(AppError::MissingCode.is_browser_facing());
    assert!(AppError::ExchangeFailed("invalid code".to_string()).is_browser_facing());
    assert!(AppError::Unauthorized.is_browser_facing());

    assert!(!AppError::UpstreamFailed("HTTP 500".to_string()).is_browser_facing());
    assert!(!AppError::StoreUnavailable("offline".to_string()).is_browser_facing());
}

#[test]
fn test_error_page_location_encodes_message() {
    let err = AppError::ExchangeFailed("token endpoint returned 400 Bad Request".to_string());

    assert_eq!(
        err.error_page_location(),
        "/error.html?message=Failed%20to%20exchange%20authorization%20code%20for%20token%3A%20\
         token%20endpoint%20returned%20400%20Bad%20Request"
    );
}

#[test]
fn test_browser_facing_error_redirects() {
    let response = AppError::Unauthorized.into_response();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/error.html?message=Access%20token%20not%20available."
    );
}

#[test]
fn test_api_error_statuses() {
    assert_eq!(
        AppError::UpstreamFailed("HTTP 502".to_string())
            .into_response()
            .status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        AppError::StoreUnavailable("offline".to_string())
            .into_response()
            .status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        AppError::Internal(anyhow::anyhow!("boom"))
            .into_response()
            .status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
