//! Easel Render Library
//!
//! Replays a canvas's element list onto a CPU raster surface and encodes
//! the result as PNG (preview) or a single-page PDF (export).

mod assets;
mod encode;
mod error;
mod pdf;
mod raster;
mod text;

pub use assets::{AssetLoader, BoxFuture, FsAssetLoader, MemoryAssetLoader};
pub use encode::encode_png;
pub use error::{RenderResult, RendererError};
pub use pdf::encode_pdf;
pub use raster::{BACKGROUND, RasterRenderer, STROKE_WIDTH};
pub use text::FontBook;

pub use tiny_skia::{Color, Pixmap};
