// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Persisted OAuth credential for the single authorized athlete.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::token_exchange::TokenExchangeResponse;

/// The one credential record the store holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token for the Strava data API
    pub access_token: String,
    /// Long-lived token (kept, not yet used for rotation)
    pub refresh_token: String,
    /// Instant after which `access_token` must not be used
    pub expires_at: DateTime<Utc>,
    /// Athlete profile returned with the token, stored as-is
    pub athlete: serde_json::Value,
}

impl Credential {
    /// Build a credential from a token exchange completed at `now`.
    ///
    /// `expires_in` must be positive and small enough to land on a
    /// representable instant.
    pub fn from_exchange(
        response: TokenExchangeResponse,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let expires_at = Some(response.expires_in)
            .filter(|secs| *secs > 0)
            .and_then(TimeDelta::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::ExchangeFailed(format!("invalid expires_in {}", response.expires_in))
            })?;

        Ok(Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at,
            athlete: response.athlete,
        })
    }

    /// A credential is valid strictly before its expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn response_expiring_in(expires_in: i64) -> TokenExchangeResponse {
        TokenExchangeResponse {
            access_token: "A".to_string(),
            refresh_token: "R".to_string(),
            expires_in,
            athlete: serde_json::json!({ "id": 1 }),
        }
    }

    fn credential_expiring_at(expires_at: DateTime<Utc>) -> Credential {
        Credential {
            access_token: "A".to_string(),
            refresh_token: "R".to_string(),
            expires_at,
            athlete: serde_json::json!({ "id": 1 }),
        }
    }

    #[test]
    fn test_from_exchange_sets_absolute_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap();
        let credential = Credential::from_exchange(response_expiring_in(3600), now).unwrap();

        assert_eq!(credential.access_token, "A");
        assert_eq!(credential.refresh_token, "R");
        assert_eq!(credential.expires_at, now + Duration::seconds(3600));
        assert_eq!(credential.athlete["id"], 1);
    }

    #[test]
    fn test_from_exchange_rejects_unusable_lifetimes() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap();

        for expires_in in [0, -1, i64::MIN, i64::MAX, i64::MAX / 1000] {
            let err = Credential::from_exchange(response_expiring_in(expires_in), now).unwrap_err();
            match err {
                AppError::ExchangeFailed(msg) => {
                    assert_eq!(msg, format!("invalid expires_in {}", expires_in))
                }
                other => panic!("expires_in {}: unexpected {:?}", expires_in, other),
            }
        }
    }

    #[test]
    fn test_validity_depends_only_on_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap();

        assert!(credential_expiring_at(now + Duration::seconds(1)).is_valid_at(now));
        assert!(credential_expiring_at(now + Duration::days(30)).is_valid_at(now));
        assert!(!credential_expiring_at(now - Duration::seconds(1)).is_valid_at(now));
        // Expiry instant itself is already invalid
        assert!(!credential_expiring_at(now).is_valid_at(now));
    }
}
