//! Application configuration loaded from environment variables.
//!
//! Client credentials are never compiled in. For local development they can
//! live in a `.env` file next to the binary.

use std::env;

const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/strava-redirect";
const DEFAULT_OAUTH_URL: &str = "https://www.strava.com/oauth";
const DEFAULT_API_URL: &str = "https://www.strava.com/api/v3";

/// Which backend holds the persisted credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Durable storage in Firestore (or the Firestore emulator).
    Firestore,
    /// Process memory only; lost on restart.
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(StoreBackend::Firestore),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                name: "CREDENTIAL_STORE",
                value: other.to_string(),
            }),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Strava OAuth application ---
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Callback URL registered with Strava (points at `/strava-redirect`)
    pub strava_redirect_uri: String,
    /// Base URL of the Strava OAuth endpoints (`/authorize`, `/token`)
    pub strava_oauth_url: String,
    /// Base URL of the Strava data API
    pub strava_api_url: String,

    // --- Persistence ---
    pub credential_store: StoreBackend,
    /// GCP project ID, required when `credential_store` is Firestore
    pub gcp_project_id: Option<String>,

    // --- Server ---
    /// Server port
    pub port: u16,
    /// Directory of static front-end files served as the fallback route
    pub static_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let credential_store = match env::var("CREDENTIAL_STORE") {
            Ok(v) => v.parse()?,
            Err(_) => StoreBackend::Firestore,
        };

        let gcp_project_id = env::var("GCP_PROJECT_ID").ok();
        if credential_store == StoreBackend::Firestore && gcp_project_id.is_none() {
            return Err(ConfigError::Missing("GCP_PROJECT_ID"));
        }

        Ok(Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            strava_redirect_uri: env::var("STRAVA_REDIRECT_URI")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
            strava_oauth_url: env::var("STRAVA_OAUTH_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_OAUTH_URL.to_string()),
            strava_api_url: env::var("STRAVA_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            credential_store,
            gcp_project_id,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }

    /// Config for tests: in-memory store, production Strava URLs.
    pub fn test_default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            strava_redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            strava_oauth_url: DEFAULT_OAUTH_URL.to_string(),
            strava_api_url: DEFAULT_API_URL.to_string(),
            credential_store: StoreBackend::Memory,
            gcp_project_id: None,
            port: 3000,
            static_dir: "public".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("STRAVA_CLIENT_ID", "test_id");
        env::set_var("STRAVA_CLIENT_SECRET", " test_secret\n");
        env::set_var("CREDENTIAL_STORE", "memory");
        env::set_var("STRAVA_API_URL", "http://127.0.0.1:9999/api/v3/");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.strava_client_id, "test_id");
        assert_eq!(config.strava_client_secret, "test_secret");
        assert_eq!(config.credential_store, StoreBackend::Memory);
        assert_eq!(config.strava_api_url, "http://127.0.0.1:9999/api/v3");
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(
            "Firestore".parse::<StoreBackend>().unwrap(),
            StoreBackend::Firestore
        );
        assert_eq!(
            " memory ".parse::<StoreBackend>().unwrap(),
            StoreBackend::Memory
        );
        assert!("mongodb".parse::<StoreBackend>().is_err());
    }
}
