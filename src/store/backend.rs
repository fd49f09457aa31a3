//! Storage backends
//!
//! A backend holds exactly one serialized document. The store above it owns
//! encoding, defaults and caching.

use std::fs;
use std::io::{self, Write as _};
use std::path::PathBuf;
use std::sync::Mutex;

pub trait StorageBackend: Send + Sync {
    /// Stored bytes, or `None` when nothing has been written yet
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    /// Replace the stored bytes. Must be durable when this returns `Ok`.
    fn write(&self, bytes: &[u8]) -> io::Result<()>;

    /// Human-readable location for logs
    fn location(&self) -> String;
}

/// One JSON file on disk, replaced atomically on write
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let tmp = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

        {
            let mut f = fs::File::create(&tmp)?;
            f.write_all(bytes)?;
            f.sync_all()?;
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        if let Ok(dir) = fs::File::open(&parent) {
            let _ = dir.sync_all();
        }
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Process-local backend, used for tests and ephemeral deployments
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: Mutex<Option<Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Mutex::new(Some(bytes.into())),
        }
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        Ok(data.clone())
    }

    fn write(&self, bytes: &[u8]) -> io::Result<()> {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        *data = Some(bytes.to_vec());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
