//! Shared application state.

use crate::config::Config;
use crate::storage::{ExportStore, FsUploadStore, StorageError, StorageResult, UploadStore};
use easel_core::CanvasStore;
use easel_render::{FontBook, FsAssetLoader, RasterRenderer};
use std::fs;
use std::sync::Arc;

/// Handles shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CanvasStore>,
    pub renderer: Arc<RasterRenderer>,
    pub uploads: Arc<dyn UploadStore>,
    pub exports: Arc<ExportStore>,
}

impl AppState {
    pub fn new(
        store: CanvasStore,
        renderer: RasterRenderer,
        uploads: Arc<dyn UploadStore>,
        exports: ExportStore,
    ) -> Self {
        Self {
            store: Arc::new(store),
            renderer: Arc::new(renderer),
            uploads,
            exports: Arc::new(exports),
        }
    }

    /// Build state from configuration, creating storage directories.
    pub fn from_config(config: &Config) -> StorageResult<Self> {
        let uploads = FsUploadStore::new(&config.upload_dir)?;
        let exports = ExportStore::new(&config.export_dir)?;
        let store = CanvasStore::new()
            .with_update_mode(config.update_mode())
            .with_history_limit(config.history_limit);
        let fonts = match &config.font_file {
            Some(path) => {
                let data = fs::read(path).map_err(|e| {
                    StorageError::Io(format!("Failed to read font {}: {}", path.display(), e))
                })?;
                FontBook::from_font_data(data)
            }
            None => FontBook::system(&config.font_family),
        };
        let renderer = RasterRenderer::new(fonts, Arc::new(FsAssetLoader::new()));
        Ok(Self::new(store, renderer, Arc::new(uploads), exports))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(dir: &std::path::Path, extra: &[&str]) -> Config {
        let uploads = dir.join("uploads");
        let exports = dir.join("exports");
        let mut args = vec![
            "easel-server".to_string(),
            "--upload-dir".to_string(),
            uploads.display().to_string(),
            "--export-dir".to_string(),
            exports.display().to_string(),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        Config::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_from_config_creates_dirs_with_bad_font() {
        let dir = tempfile::tempdir().unwrap();
        let font = dir.path().join("face.ttf");
        fs::write(&font, b"not a font").unwrap();
        let config = config(dir.path(), &["--font-file", font.to_str().unwrap()]);

        // An unusable font only disables text.
        let state = AppState::from_config(&config).unwrap();
        assert!(dir.path().join("uploads").is_dir());
        assert!(dir.path().join("exports").is_dir());
        assert!(state.store.get("c1").is_err());
    }

    #[test]
    fn test_missing_font_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.ttf");
        let config = config(dir.path(), &["--font-file", missing.to_str().unwrap()]);
        assert!(matches!(AppState::from_config(&config), Err(StorageError::Io(_))));
    }
}
