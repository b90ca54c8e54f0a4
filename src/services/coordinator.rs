// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth authorization lifecycle for the single Strava athlete.
//!
//! The coordinator owns the current access token. It is written only on
//! startup load and when an authorization completes; status reads never
//! touch it.

use crate::db::CredentialStore;
use crate::error::AppError;
use crate::models::Credential;
use crate::services::token_exchange::TokenExchanger;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Scopes requested at consent time.
pub const SCOPES: &str = "read,activity:read,activity:read_all";

/// In-memory copy of the stored access token.
#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// What `complete_authorization` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    /// A valid credential was already stored; no exchange happened.
    AlreadyAuthorized,
    /// The code was exchanged and the new credential stored.
    Exchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "public/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationStatus {
    pub is_authorized: bool,
}

/// Orchestrates the redirect flow, the credential store and the token cache.
#[derive(Clone)]
pub struct AuthCoordinator {
    exchanger: TokenExchanger,
    store: CredentialStore,
    current: Arc<RwLock<Option<CachedToken>>>,
    authorize_url: String,
    client_id: String,
    redirect_uri: String,
}

impl AuthCoordinator {
    pub fn new(
        exchanger: TokenExchanger,
        store: CredentialStore,
        oauth_url: &str,
        client_id: String,
        redirect_uri: String,
    ) -> Self {
        Self {
            exchanger,
            store,
            current: Arc::new(RwLock::new(None)),
            authorize_url: format!("{}/authorize", oauth_url.trim_end_matches('/')),
            client_id,
            redirect_uri,
        }
    }

    /// Load the stored credential into the token cache.
    ///
    /// Returns whether a credential was found. Store errors are returned
    /// unchanged so startup can abort on them.
    pub async fn load_initial(&self) -> Result<bool, AppError> {
        match self.store.get().await? {
            Some(credential) => {
                if !credential.is_valid() {
                    tracing::info!(
                        expires_at = %credential.expires_at,
                        "Stored credential has expired, re-authorization required"
                    );
                }
                self.refresh_current_token(&credential).await;
                Ok(true)
            }
            None => {
                tracing::info!("No stored credential, waiting for authorization");
                Ok(false)
            }
        }
    }

    /// URL of the Strava consent page to redirect the browser to.
    pub fn begin_authorization(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}",
            self.authorize_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            SCOPES
        )
    }

    /// Finish the redirect flow with the code Strava handed back.
    ///
    /// The code is only exchanged when no valid credential is stored.
    pub async fn complete_authorization(
        &self,
        code: Option<&str>,
    ) -> Result<AuthorizationOutcome, AppError> {
        let code = code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(AppError::MissingCode)?;

        let existing = match self.store.get().await {
            Ok(existing) => existing,
            Err(e) => {
                tracing::warn!(error = %e, "Credential lookup failed, exchanging code anyway");
                None
            }
        };

        if let Some(credential) = existing.filter(Credential::is_valid) {
            tracing::info!("Valid credential already stored, skipping code exchange");
            self.refresh_current_token(&credential).await;
            return Ok(AuthorizationOutcome::AlreadyAuthorized);
        }

        tracing::info!("Exchanging authorization code for tokens");
        let response = self.exchanger.exchange(code).await?;
        let credential = Credential::from_exchange(response, Utc::now())?;

        // The token is usable even if persisting it failed
        if let Err(e) = self.store.put(&credential).await {
            tracing::error!(error = %e, "Failed to store credential, authorization will not survive restart");
        }
        self.refresh_current_token(&credential).await;

        tracing::info!(
            expires_at = %credential.expires_at,
            athlete_id = %credential.athlete.get("id").unwrap_or(&serde_json::Value::Null),
            "Authorization complete"
        );

        Ok(AuthorizationOutcome::Exchanged)
    }

    /// Whether a valid credential is stored. Does not update the token cache.
    ///
    /// A missing credential, or a store that cannot be read, reports
    /// `is_authorized: false`.
    pub async fn status(&self) -> AuthorizationStatus {
        let is_authorized = match self.store.get().await {
            Ok(credential) => credential.is_some_and(|c| c.is_valid()),
            Err(e) => {
                tracing::warn!(error = %e, "Credential lookup failed during status check");
                false
            }
        };

        AuthorizationStatus { is_authorized }
    }

    /// Current access token, or `None` when not authorized or expired.
    pub async fn current_access_token(&self) -> Option<String> {
        let now = Utc::now();
        self.current
            .read()
            .await
            .as_ref()
            .filter(|cached| now < cached.expires_at)
            .map(|cached| cached.access_token.clone())
    }

    async fn refresh_current_token(&self, credential: &Credential) {
        *self.current.write().await = Some(CachedToken {
            access_token: credential.access_token.clone(),
            expires_at: credential.expires_at,
        });
    }
}
