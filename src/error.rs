// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Browser-facing error view. Receives the failure as a `message` query parameter.
pub const ERROR_PAGE: &str = "/error.html";

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No authorization code provided.")]
    MissingCode,

    #[error("Failed to exchange authorization code for token: {0}")]
    ExchangeFailed(String),

    #[error("Access token not available.")]
    Unauthorized,

    #[error("Failed to fetch Strava data: {0}")]
    UpstreamFailed(String),

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Errors raised while a browser is being walked through the OAuth flow
    /// (or bounced off a data page) are shown on the error view, not as JSON.
    pub fn is_browser_facing(&self) -> bool {
        matches!(
            self,
            AppError::MissingCode | AppError::ExchangeFailed(_) | AppError::Unauthorized
        )
    }

    /// Location of the error view carrying this error's message.
    pub fn error_page_location(&self) -> String {
        format!(
            "{}?message={}",
            ERROR_PAGE,
            urlencoding::encode(&self.to_string())
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingCode | AppError::ExchangeFailed(_) | AppError::Unauthorized => {
                tracing::warn!(error = %self, "Redirecting to error page");
                return crate::routes::found(&self.error_page_location());
            }
            AppError::UpstreamFailed(msg) => {
                tracing::warn!(error = %msg, "Strava API error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::StoreUnavailable(msg) => {
                tracing::error!(error = %msg, "Credential store error");
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
