//! Application state management
//!
//! Contains shared state accessible across all handlers.

use crate::auth::{HeaderPresenceVerifier, JwtVerifier, TokenVerifier};
use crate::config::Settings;
use crate::presence::PresenceConfig;
use crate::seo::SeoDocument;
use crate::store::{DocumentStore, FileBackend, MemoryBackend, StorageBackend};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

const MEMORY_PATH: &str = ":memory:";

/// Application state shared across all handlers
pub struct AppState {
    /// SEO authoring document (global defaults + page overrides)
    pub seo: DocumentStore<SeoDocument>,

    /// Online presence widget configuration
    pub presence: DocumentStore<PresenceConfig>,

    /// Write-endpoint token check
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(
        seo_backend: Arc<dyn StorageBackend>,
        presence_backend: Arc<dyn StorageBackend>,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Self {
        Self {
            seo: DocumentStore::new(seo_backend),
            presence: DocumentStore::new(presence_backend),
            verifier,
        }
    }

    /// File-backed state as configured
    pub fn from_settings(settings: &Settings) -> Self {
        let verifier: Arc<dyn TokenVerifier> = match settings.auth.jwt_secret.as_deref() {
            Some(secret) => Arc::new(JwtVerifier::new(secret)),
            None => {
                warn!("⚠️  SEO_JWT_SECRET not set, write endpoints only check header presence");
                Arc::new(HeaderPresenceVerifier)
            }
        };

        Self::new(
            backend_for(&settings.storage.seo_document_path),
            backend_for(&settings.storage.presence_config_path),
            verifier,
        )
    }
}

/// `:memory:` keeps the document in-process; anything else is a file path
fn backend_for(path: &Path) -> Arc<dyn StorageBackend> {
    if path.as_os_str() == MEMORY_PATH {
        warn!("⚠️  Using in-memory storage, documents are lost on restart");
        Arc::new(MemoryBackend::new())
    } else {
        Arc::new(FileBackend::new(path))
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
