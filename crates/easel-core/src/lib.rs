//! Easel Core Library
//!
//! Canvas documents, the element model, bounded undo history and
//! hit-testing for the Easel drawing backend.

pub mod canvas;
pub mod error;
pub mod history;
pub mod patch;
pub mod shapes;
pub mod store;

pub use canvas::CanvasDocument;
pub use error::{CanvasError, CanvasResult};
pub use history::{History, HISTORY_LIMIT};
pub use hit_test::element_at;
pub use patch::{ElementPatch, UpdateMode};
pub use shapes::{Circle, Element, ElementId, Image, Line, Rectangle, Rgba, Shape, ShapeTrait, Text};
pub use store::CanvasStore;
