//! Renderer errors.

use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Cannot allocate a {width}x{height} surface")]
    InvalidSurface { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("Failed to load asset {path}: {message}")]
    AssetLoad { path: String, message: String },
    #[error("Failed to decode image: {0}")]
    Decode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;
