// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper for the credential document.

use crate::db::collections;
use crate::error::AppError;
use crate::models::Credential;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Document id of the single credential record.
const CREDENTIAL_DOC_ID: &str = "current";

/// Credential as stored in Firestore.
///
/// The athlete profile is an arbitrary JSON tree, so it is kept as a
/// serialized string rather than a nested Firestore map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialDocument {
    pub access_token: String,
    pub refresh_token: String,
    /// When the access token expires (RFC 3339)
    pub expires_at: String,
    /// Athlete profile (JSON)
    pub athlete_json: String,
    /// When this document was written (RFC 3339)
    pub updated_at: String,
}

impl CredentialDocument {
    fn from_credential(credential: &Credential) -> Result<Self, AppError> {
        let athlete_json = serde_json::to_string(&credential.athlete)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode athlete: {}", e)))?;

        Ok(Self {
            access_token: credential.access_token.clone(),
            refresh_token: credential.refresh_token.clone(),
            expires_at: credential.expires_at.to_rfc3339(),
            athlete_json,
            updated_at: Utc::now().to_rfc3339(),
        })
    }

    fn into_credential(self) -> Result<Credential, AppError> {
        let expires_at = DateTime::parse_from_rfc3339(&self.expires_at)
            .map_err(|e| AppError::StoreUnavailable(format!("Corrupt credential expiry: {}", e)))?
            .with_timezone(&Utc);
        let athlete = serde_json::from_str(&self.athlete_json)
            .map_err(|e| AppError::StoreUnavailable(format!("Corrupt athlete profile: {}", e)))?;

        Ok(Credential {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            athlete,
        })
    }
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id).await.map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to connect to Firestore: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::StoreUnavailable(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a disconnected client for testing.
    ///
    /// All database operations will return `StoreUnavailable`.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client.as_ref().ok_or_else(|| {
            AppError::StoreUnavailable("Database not connected (offline mode)".to_string())
        })
    }

    /// Get the stored credential, if one has ever been written.
    pub async fn get_credential(&self) -> Result<Option<Credential>, AppError> {
        let doc: Option<CredentialDocument> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::CREDENTIALS)
            .obj()
            .one(CREDENTIAL_DOC_ID)
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;

        doc.map(CredentialDocument::into_credential).transpose()
    }

    /// Replace the stored credential.
    pub async fn put_credential(&self, credential: &Credential) -> Result<(), AppError> {
        let doc = CredentialDocument::from_credential(credential)?;

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::CREDENTIALS)
            .document_id(CREDENTIAL_DOC_ID)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_document_roundtrip_preserves_credential() {
        let credential = Credential {
            access_token: "A".to_string(),
            refresh_token: "R".to_string(),
            expires_at: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            athlete: serde_json::json!({ "id": 1, "firstname": "Ada", "bikes": [] }),
        };

        let doc = CredentialDocument::from_credential(&credential).unwrap();
        assert_eq!(doc.expires_at, "2024-05-01T10:00:00+00:00");

        assert_eq!(doc.into_credential().unwrap(), credential);
    }

    #[test]
    fn test_corrupt_document_is_store_error() {
        let doc = CredentialDocument {
            access_token: "A".to_string(),
            refresh_token: "R".to_string(),
            expires_at: "yesterday".to_string(),
            athlete_json: "{}".to_string(),
            updated_at: String::new(),
        };

        assert!(matches!(
            doc.into_credential(),
            Err(AppError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_offline_client_reports_store_unavailable() {
        let db = FirestoreDb::new_mock();

        assert!(matches!(
            db.get_credential().await,
            Err(AppError::StoreUnavailable(_))
        ));
    }
}
