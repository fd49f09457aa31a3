//! Document store
//!
//! Loads and saves a single JSON document through an injected backend.
//! `load` never fails: absent or corrupt state falls back to the document's
//! default. `save` propagates every I/O failure to the caller.
//!
//! Writes are serialized by `write_lock`. The read cache is only populated or
//! replaced while that lock is held, so a reader never observes a document
//! older than the last completed save.
//!
//! Backends do blocking I/O, so every backend call runs on the blocking pool.

mod backend;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};

use serde::{de::DeserializeOwned, Serialize};
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A document persisted whole through a [`DocumentStore`]
pub trait StoredDocument: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Short name used in logs
    const KIND: &'static str;

    /// Document substituted when nothing usable is stored
    fn fallback() -> Self;

    /// Applied on every load and save
    fn normalize(self) -> Self {
        self
    }
}

pub struct DocumentStore<T: StoredDocument> {
    backend: Arc<dyn StorageBackend>,
    cache: RwLock<Option<T>>,
    write_lock: Mutex<()>,
}

impl<T: StoredDocument> DocumentStore<T> {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            cache: RwLock::new(None),
            write_lock: Mutex::new(()),
        }
    }

    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Current document, or the fallback when absent/unreadable
    pub async fn load(&self) -> T {
        if let Some(doc) = self.cache.read().await.as_ref() {
            debug!(kind = T::KIND, "document cache hit");
            return doc.clone();
        }

        let _guard = self.write_lock.lock().await;
        // a save may have filled the cache while we waited
        if let Some(doc) = self.cache.read().await.as_ref() {
            return doc.clone();
        }

        debug!(kind = T::KIND, location = %self.backend.location(), "document cache miss");
        let doc = self.read_backend().await;
        *self.cache.write().await = Some(doc.clone());
        doc
    }

    /// Replace the stored document; returns what was persisted
    pub async fn save(&self, doc: T) -> Result<T, StoreError> {
        let doc = doc.normalize();
        let bytes = serde_json::to_vec_pretty(&doc)?;

        let len = bytes.len();

        let _guard = self.write_lock.lock().await;
        self.blocking(move |backend| backend.write(&bytes)).await?;
        *self.cache.write().await = Some(doc.clone());

        info!(
            kind = T::KIND,
            location = %self.backend.location(),
            bytes = len,
            "document saved"
        );
        Ok(doc)
    }

    /// Run a backend call on the blocking pool
    async fn blocking<R, F>(&self, f: F) -> io::Result<R>
    where
        F: FnOnce(&dyn StorageBackend) -> io::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || f(backend.as_ref()))
            .await
            .map_err(io::Error::other)?
    }

    async fn read_backend(&self) -> T {
        let location = self.backend.location();
        match self.blocking(|backend| backend.read()).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<T>(&bytes) {
                Ok(doc) => doc.normalize(),
                Err(e) => {
                    warn!(kind = T::KIND, %location, error = %e, "stored document is corrupt, using defaults");
                    T::fallback().normalize()
                }
            },
            Ok(None) => {
                let doc = T::fallback().normalize();
                let seeded = match serde_json::to_vec_pretty(&doc) {
                    Ok(bytes) => self
                        .blocking(move |backend| backend.write(&bytes))
                        .await
                        .map_err(StoreError::from),
                    Err(e) => Err(StoreError::from(e)),
                };
                match seeded {
                    Ok(()) => info!(kind = T::KIND, %location, "seeded default document"),
                    Err(e) => warn!(kind = T::KIND, %location, error = %e, "could not seed default document"),
                }
                doc
            }
            Err(e) => {
                warn!(kind = T::KIND, %location, error = %e, "failed to read stored document, using defaults");
                T::fallback().normalize()
            }
        }
    }
}
