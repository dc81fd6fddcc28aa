//! CPU rasterization of an element list.

use crate::assets::AssetLoader;
use crate::encode::encode_png;
use crate::error::{RenderResult, RendererError};
use crate::pdf::encode_pdf;
use crate::text::FontBook;
use easel_core::{Element, Image, Rgba, Shape, ShapeTrait};
use kurbo::{BezPath, PathEl};
use std::sync::Arc;
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, Paint, Path, PathBuilder, Pattern, Pixmap, Rect,
    SpreadMode, Stroke, Transform,
};

/// Outline width for lines and unfilled shapes.
pub const STROKE_WIDTH: f32 = 2.0;

/// Surface color before any element is drawn.
pub const BACKGROUND: Rgba = Rgba::white();

/// Replays elements, in order, onto a fresh white surface.
///
/// Shared by PNG preview and PDF export. Rendering holds no locks; callers
/// pass a copy of the canvas's element list.
pub struct RasterRenderer {
    fonts: FontBook,
    assets: Arc<dyn AssetLoader>,
}

impl RasterRenderer {
    pub fn new(fonts: FontBook, assets: Arc<dyn AssetLoader>) -> Self {
        Self { fonts, assets }
    }

    /// Rasterize `elements` onto a `width` x `height` surface.
    pub async fn render(&self, width: u32, height: u32, elements: &[Element]) -> RenderResult<Pixmap> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RendererError::InvalidSurface { width, height })?;
        pixmap.fill(Color::from_rgba8(BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, BACKGROUND.a));

        for element in elements {
            match &element.shape {
                Shape::Image(image) => {
                    if let Err(e) = self.draw_image(&mut pixmap, image).await {
                        log::warn!("Skipping image element {}: {e}", element.id);
                    }
                }
                shape => draw_shape(&mut pixmap, &self.fonts, shape),
            }
        }

        log::debug!("Rendered {} elements at {width}x{height}", elements.len());
        Ok(pixmap)
    }

    /// Render and encode as PNG.
    pub async fn render_png(&self, width: u32, height: u32, elements: &[Element]) -> RenderResult<Vec<u8>> {
        let pixmap = self.render(width, height, elements).await?;
        encode_png(&pixmap)
    }

    /// Render and embed the raster as a single full-page PDF image.
    pub async fn render_pdf(&self, width: u32, height: u32, elements: &[Element]) -> RenderResult<Vec<u8>> {
        let pixmap = self.render(width, height, elements).await?;
        encode_pdf(&pixmap)
    }

    async fn draw_image(&self, pixmap: &mut Pixmap, image: &Image) -> RenderResult<()> {
        let Some(dest) = image_rect(image) else {
            return Ok(());
        };
        let bytes = self.assets.load(&image.path).await?;
        let source = decode_image(&bytes)?;

        // Signed scale: a negative extent mirrors the image about its origin.
        let sx = image.width as f32 / source.width() as f32;
        let sy = image.height as f32 / source.height() as f32;
        let paint = Paint {
            shader: Pattern::new(
                source.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Bilinear,
                1.0,
                Transform::from_row(sx, 0.0, 0.0, sy, image.x as f32, image.y as f32),
            ),
            anti_alias: true,
            ..Paint::default()
        };
        pixmap.fill_rect(dest, &paint, Transform::identity(), None);
        Ok(())
    }
}

fn draw_shape(pixmap: &mut Pixmap, fonts: &FontBook, shape: &Shape) {
    let paint = paint_for(shape.color().unwrap_or_default());
    match shape {
        Shape::Rectangle(rect) => {
            if !is_finite(rect.x, rect.y, rect.width, rect.height) {
                return;
            }
            draw_outline(pixmap, &shape.to_path(), &paint, rect.is_filled);
        }
        Shape::Circle(circle) => {
            if !(circle.x.is_finite() && circle.y.is_finite() && circle.radius.is_finite()) {
                return;
            }
            draw_outline(pixmap, &shape.to_path(), &paint, circle.is_filled);
        }
        Shape::Line(_) => draw_outline(pixmap, &shape.to_path(), &paint, false),
        Shape::Text(text) => {
            fonts.draw_text(pixmap, text, &paint);
        }
        Shape::Image(_) => {}
    }
}

fn draw_outline(pixmap: &mut Pixmap, path: &BezPath, paint: &Paint, filled: bool) {
    let Some(path) = to_skia_path(path) else {
        return;
    };
    if filled {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    } else {
        let stroke = Stroke {
            width: STROKE_WIDTH,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, paint, &stroke, Transform::identity(), None);
    }
}

fn paint_for(color: &str) -> Paint<'static> {
    let rgba = Rgba::from_css(color);
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
    paint.anti_alias = true;
    paint
}

fn is_finite(x: f64, y: f64, width: f64, height: f64) -> bool {
    x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()
}

/// Normalized destination box. `None` when non-finite or without area.
fn image_rect(image: &Image) -> Option<Rect> {
    if !is_finite(image.x, image.y, image.width, image.height) || image.width == 0.0 || image.height == 0.0 {
        return None;
    }
    let dest = image.bounds();
    Rect::from_ltrb(dest.x0 as f32, dest.y0 as f32, dest.x1 as f32, dest.y1 as f32)
}

/// Convert a kurbo path to tiny-skia. Returns `None` for empty or non-finite paths.
pub(crate) fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn decode_image(bytes: &[u8]) -> RenderResult<Pixmap> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| RendererError::Decode(e.to_string()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| RendererError::Decode(format!("empty image ({width}x{height})")))?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(decoded.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}
