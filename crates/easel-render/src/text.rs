//! Font lookup and glyph outline drawing.

use crate::raster::to_skia_path;
use easel_core::Text;
use fontdb::{Database, Family, Query};
use kurbo::{Affine, BezPath};
use tiny_skia::{FillRule, Paint, Pixmap, Transform};

/// Family used when the configured one is not installed.
const FALLBACK_FAMILY: Family<'static> = Family::SansSerif;

/// The font used to draw text elements.
///
/// Resolves one face up front: the configured family if installed, else the
/// database's sans-serif family. With no face, text elements are skipped.
pub struct FontBook {
    db: Database,
    face: Option<fontdb::ID>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .field("face", &self.face)
            .finish()
    }
}

impl FontBook {
    /// Load system fonts and resolve `family`.
    pub fn system(family: &str) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        Self::resolve(db, family)
    }

    /// Use the first face of an explicit font file.
    pub fn from_font_data(data: Vec<u8>) -> Self {
        let mut db = Database::new();
        db.load_font_data(data);
        let face = db.faces().next().map(|face| face.id);
        if face.is_none() {
            log::warn!("Font data holds no usable face; text elements will be skipped");
        }
        Self { db, face }
    }

    /// A book with no fonts. Text elements are not drawn.
    pub fn empty() -> Self {
        Self {
            db: Database::new(),
            face: None,
        }
    }

    fn resolve(db: Database, family: &str) -> Self {
        let families = [Family::Name(family), FALLBACK_FAMILY];
        let face = db.query(&Query {
            families: &families,
            ..Query::default()
        });
        match face.and_then(|id| db.face(id)) {
            Some(info) => log::info!(
                "Text font: {}",
                info.families
                    .first()
                    .map(|(name, _)| name.as_str())
                    .unwrap_or(info.post_script_name.as_str())
            ),
            None => log::warn!("No font found for {family:?}; text elements will be skipped"),
        }
        Self { db, face }
    }

    pub fn has_font(&self) -> bool {
        self.face.is_some()
    }

    /// Fill the glyph outlines of `text` with its baseline at `y + fontSize`.
    ///
    /// Returns false when nothing could be drawn.
    pub(crate) fn draw_text(&self, pixmap: &mut Pixmap, text: &Text, paint: &Paint) -> bool {
        let Some(id) = self.face else {
            log::warn!("No font available, skipping text {:?}", text.text);
            return false;
        };
        if !(text.x.is_finite() && text.baseline().is_finite()) || text.font_size <= 0.0 {
            return false;
        }

        self.db
            .with_face_data(id, |data, index| {
                let face = match ttf_parser::Face::parse(data, index) {
                    Ok(face) => face,
                    Err(e) => {
                        log::warn!("Failed to parse font face: {e}");
                        return false;
                    }
                };
                let scale = text.font_size / face.units_per_em() as f64;
                let mut pen_x = text.x;
                let mut drew = false;

                for ch in text.text.chars() {
                    let Some(glyph) = face.glyph_index(ch) else {
                        continue;
                    };
                    let mut outline = GlyphOutline(BezPath::new());
                    if face.outline_glyph(glyph, &mut outline).is_some() {
                        let placed = glyph_transform(pen_x, text.baseline(), scale) * outline.0;
                        if let Some(path) = to_skia_path(&placed) {
                            pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
                            drew = true;
                        }
                    }
                    pen_x += face.glyph_hor_advance(glyph).unwrap_or(0) as f64 * scale;
                }
                drew
            })
            .unwrap_or(false)
    }
}

/// Collects a glyph outline in font units (y up).
struct GlyphOutline(BezPath);

impl ttf_parser::OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to((x1 as f64, y1 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0
            .curve_to((x1 as f64, y1 as f64), (x2 as f64, y2 as f64), (x as f64, y as f64));
    }

    fn close(&mut self) {
        self.0.close_path();
    }
}

/// Maps font units onto the surface: scaled, y flipped, origin at the pen.
fn glyph_transform(pen_x: f64, baseline: f64, scale: f64) -> Affine {
    Affine::new([scale, 0.0, 0.0, -scale, pen_x, baseline])
}
