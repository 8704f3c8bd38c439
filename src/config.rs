//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// File backing the durable settings store
    pub storage_path: PathBuf,
    /// Optional JSON roster replacing the demo users
    pub users_path: Option<PathBuf>,
    /// HS256 key for session tokens (raw bytes)
    pub session_signing_key: Vec<u8>,
    /// Session token lifetime in hours
    pub session_ttl_hours: u64,
}

impl Config {
    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            storage_path: PathBuf::from("data/test_storage.json"),
            users_path: None,
            session_signing_key: b"test_session_key_32_bytes_minimum".to_vec(),
            session_ttl_hours: 12,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let session_signing_key = env::var("SESSION_SIGNING_KEY")
            .map(|v| v.trim().to_string())
            .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?;
        if session_signing_key.len() < 32 {
            return Err(ConfigError::Invalid(
                "SESSION_SIGNING_KEY",
                "must be at least 32 bytes".to_string(),
            ));
        }

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            storage_path: env::var("IRONPULSE_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/ironpulse_storage.json")),
            users_path: env::var("IRONPULSE_USERS_PATH").ok().map(PathBuf::from),
            session_signing_key: session_signing_key.into_bytes(),
            session_ttl_hours: match env::var("SESSION_TTL_HOURS") {
                Ok(v) => v.parse().map_err(|_| {
                    ConfigError::Invalid("SESSION_TTL_HOURS", format!("not a number: {v}"))
                })?,
                Err(_) => 12,
            },
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
