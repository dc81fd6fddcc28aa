//! Errors surfaced by canvas operations.

use crate::shapes::ElementId;
use thiserror::Error;

/// Canvas operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanvasError {
    #[error("Canvas not found: {0}")]
    CanvasNotFound(String),
    #[error("Element {element} not found in canvas {canvas}")]
    ElementNotFound { canvas: String, element: ElementId },
    #[error("No history to undo for canvas {0}")]
    NoHistory(String),
}

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;
