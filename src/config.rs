//! Application configuration module
//!
//! Handles loading and validating configuration from environment variables.

use std::net::Ipv4Addr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::new(0, 0, 0, 0), // Bind to 0.0.0.0 for Docker
            port: 3000,
        }
    }
}

/// Where persisted documents live
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub seo_document_path: PathBuf,
    pub presence_config_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seo_document_path: PathBuf::from("data/seo.json"),
            presence_config_path: PathBuf::from("data/online-presence.json"),
        }
    }
}

/// Write-endpoint authorization
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    /// HS256 secret; when unset only header presence is checked
    pub jwt_secret: Option<String>,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3001".to_string()],
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub cors: CorsConfig,
}

impl Settings {
    /// Load settings from `.env` and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server = ServerConfig {
            host: match lookup("HOST") {
                Some(h) => h
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(format!("HOST '{}' is not an IPv4 address", h)))?,
                None => ServerConfig::default().host,
            },
            port: match lookup("PORT") {
                Some(p) => p
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(format!("PORT '{}' is not a valid port", p)))?,
                None => ServerConfig::default().port,
            },
        };

        let defaults = StorageConfig::default();
        let storage = StorageConfig {
            seo_document_path: lookup("SEO_DOCUMENT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.seo_document_path),
            presence_config_path: lookup("PRESENCE_CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.presence_config_path),
        };

        let auth = AuthConfig {
            jwt_secret: lookup("SEO_JWT_SECRET").filter(|s| !s.trim().is_empty()),
        };

        let cors = CorsConfig {
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|| CorsConfig::default().allowed_origins),
        };

        Ok(Self {
            server,
            storage,
            auth,
            cors,
        })
    }
}
