//! Credential storage layer (Firestore or in-memory).

pub mod firestore;
pub mod memory;

pub use self::firestore::FirestoreDb;
pub use self::memory::MemoryStore;

use crate::config::{Config, StoreBackend};
use crate::error::AppError;
use crate::models::Credential;

/// Collection names as constants.
pub mod collections {
    /// Holds the single credential document
    pub const CREDENTIALS: &str = "credentials";
}

/// Storage for the one credential this service holds.
///
/// `put` replaces any previous credential wholesale.
#[derive(Clone)]
pub enum CredentialStore {
    Firestore(FirestoreDb),
    Memory(MemoryStore),
}

impl CredentialStore {
    /// Open the backend selected in `config`.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        match config.credential_store {
            StoreBackend::Firestore => {
                let project_id = config.gcp_project_id.as_deref().ok_or_else(|| {
                    AppError::StoreUnavailable("GCP_PROJECT_ID is not configured".to_string())
                })?;
                Ok(Self::Firestore(FirestoreDb::new(project_id).await?))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory credential store, authorization will not survive restarts");
                Ok(Self::Memory(MemoryStore::new()))
            }
        }
    }

    /// Fresh empty in-memory store.
    pub fn in_memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub async fn get(&self) -> Result<Option<Credential>, AppError> {
        match self {
            Self::Firestore(db) => db.get_credential().await,
            Self::Memory(store) => Ok(store.get().await),
        }
    }

    pub async fn put(&self, credential: &Credential) -> Result<(), AppError> {
        match self {
            Self::Firestore(db) => db.put_credential(credential).await,
            Self::Memory(store) => {
                store.put(credential).await;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn credential(token: &str) -> Credential {
        Credential {
            access_token: token.to_string(),
            refresh_token: format!("{}-refresh", token),
            expires_at: Utc::now() + Duration::hours(6),
            athlete: serde_json::json!({ "id": 7, "username": "tester" }),
        }
    }

    #[tokio::test]
    async fn test_empty_store_returns_none() {
        let store = CredentialStore::in_memory();
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get_returns_equal_credential() {
        let store = CredentialStore::in_memory();
        let stored = credential("A");

        store.put(&stored).await.unwrap();

        assert_eq!(store.get().await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_put_replaces_previous_credential() {
        let store = CredentialStore::in_memory();

        store.put(&credential("first")).await.unwrap();
        store.put(&credential("second")).await.unwrap();

        let current = store.get().await.unwrap().unwrap();
        assert_eq!(current.access_token, "second");
        assert_eq!(current.refresh_token, "second-refresh");
    }

    #[tokio::test]
    async fn test_offline_firestore_store_fails() {
        let store = CredentialStore::Firestore(FirestoreDb::new_mock());
        assert!(matches!(
            store.put(&credential("A")).await,
            Err(AppError::StoreUnavailable(_))
        ));
    }
}
