//! Loading of externally stored image bytes.

use crate::error::{RenderResult, RendererError};
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

/// Boxed future returned by asset loaders.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of the binary payloads that image elements reference by path.
pub trait AssetLoader: Send + Sync {
    /// Load the bytes stored at `path`.
    fn load<'a>(&'a self, path: &'a str) -> BoxFuture<'a, RenderResult<Vec<u8>>>;
}

/// Reads assets from the filesystem.
///
/// Relative paths are resolved against `root` when one is set, otherwise
/// against the working directory.
#[derive(Debug, Clone, Default)]
pub struct FsAssetLoader {
    root: Option<PathBuf>,
}

impl FsAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths under `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl AssetLoader for FsAssetLoader {
    fn load<'a>(&'a self, path: &'a str) -> BoxFuture<'a, RenderResult<Vec<u8>>> {
        let resolved = self.resolve(path);
        Box::pin(async move {
            tokio::fs::read(&resolved)
                .await
                .map_err(|e| RendererError::AssetLoad {
                    path: path.to_string(),
                    message: e.to_string(),
                })
        })
    }
}

/// In-memory assets keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetLoader {
    assets: HashMap<String, Vec<u8>>,
}

impl MemoryAssetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.assets.insert(path.into(), bytes);
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load<'a>(&'a self, path: &'a str) -> BoxFuture<'a, RenderResult<Vec<u8>>> {
        let result = self
            .assets
            .get(path)
            .cloned()
            .ok_or_else(|| RendererError::AssetLoad {
                path: path.to_string(),
                message: "not found".to_string(),
            });
        Box::pin(async move { result })
    }
}
