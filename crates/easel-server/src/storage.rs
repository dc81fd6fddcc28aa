//! Filesystem storage for uploaded images and exported PDFs.

use bytes::Bytes;
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use uuid::Uuid;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

fn ensure_dir(dir: &Path) -> StorageResult<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            StorageError::Io(format!("Failed to create directory {}: {}", dir.display(), e))
        })?;
    }
    Ok(())
}

/// Where uploaded image bytes are kept.
///
/// `store` returns the path string that image elements record and the
/// renderer later reads back.
pub trait UploadStore: Send + Sync {
    /// Persist an upload and return its path.
    fn store<'a>(&'a self, file_name: Option<&'a str>, bytes: Bytes) -> BoxFuture<'a, StorageResult<String>>;

    /// Directory served under `/uploads`.
    fn dir(&self) -> &Path;
}

/// Writes each upload to `<dir>/<uuid>.<ext>`.
pub struct FsUploadStore {
    dir: PathBuf,
}

impl FsUploadStore {
    /// Create the store, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    fn file_name_for(original: Option<&str>) -> String {
        let ext = original
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .unwrap_or_else(|| "bin".to_string());
        format!("{}.{}", Uuid::new_v4(), ext)
    }
}

impl UploadStore for FsUploadStore {
    fn store<'a>(&'a self, file_name: Option<&'a str>, bytes: Bytes) -> BoxFuture<'a, StorageResult<String>> {
        let path = self.dir.join(Self::file_name_for(file_name));
        Box::pin(async move {
            tokio::fs::write(&path, &bytes).await.map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            Ok(path.to_string_lossy().into_owned())
        })
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Writes exported PDFs and names them after their canvas.
pub struct ExportStore {
    dir: PathBuf,
}

impl ExportStore {
    /// URL prefix the export directory is served under.
    pub const URL_PREFIX: &'static str = "/exports";

    /// Create the store, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `canvas-{id}-{timestamp}.pdf`, with the id made safe for a file name.
    pub fn file_name(canvas_id: &str, timestamp_ms: u128) -> String {
        let safe_id: String = canvas_id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("canvas-{safe_id}-{timestamp_ms}.pdf")
    }

    /// Write a PDF stamped with the current time and return its URL.
    pub async fn write(&self, canvas_id: &str, pdf: &[u8]) -> StorageResult<String> {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        self.write_at(canvas_id, timestamp_ms, pdf).await
    }

    /// Write a PDF under an explicit timestamp and return its URL.
    pub async fn write_at(&self, canvas_id: &str, timestamp_ms: u128, pdf: &[u8]) -> StorageResult<String> {
        let name = Self::file_name(canvas_id, timestamp_ms);
        let path = self.dir.join(&name);
        tokio::fs::write(&path, pdf).await.map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;
        Ok(format!("{}/{}", Self::URL_PREFIX, name))
    }
}
