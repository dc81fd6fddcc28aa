//! Text shape.

use super::ShapeTrait;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A single line of text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub x: f64,
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub y: f64,
    /// The text content.
    #[serde(default)]
    pub text: String,
    /// Font size in pixels.
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub font_size: f64,
    #[serde(default)]
    pub color: String,
}

impl Text {
    /// Create a new text shape.
    pub fn new(x: f64, y: f64, text: impl Into<String>, font_size: f64, color: impl Into<String>) -> Self {
        Self {
            x,
            y,
            text: text.into(),
            font_size,
            color: color.into(),
        }
    }

    /// Approximate rendered width: half the font size per character.
    pub fn approx_width(&self) -> f64 {
        self.text.chars().count() as f64 * self.font_size / 2.0
    }

    /// Baseline y coordinate used when drawing.
    pub fn baseline(&self) -> f64 {
        self.y + self.font_size
    }

    fn approx_rect(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.x + self.approx_width(),
            self.y + self.font_size,
        )
    }
}

impl ShapeTrait for Text {
    fn bounds(&self) -> Rect {
        self.approx_rect().abs()
    }

    fn hit_test(&self, point: Point) -> bool {
        let width = self.approx_width();
        point.x >= self.x
            && point.x <= self.x + width
            && point.y >= self.y
            && point.y <= self.y + self.font_size
    }

    fn to_path(&self) -> BezPath {
        // Glyph outlines are produced by the renderer; this is the layout box.
        self.approx_rect().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_width() {
        let text = Text::new(0.0, 0.0, "hello", 20.0, "#000");
        assert!((text.approx_width() - 50.0).abs() < f64::EPSILON);
        assert!((text.baseline() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_box() {
        let text = Text::new(10.0, 10.0, "abcd", 10.0, "#000");
        // Box is [10, 30] x [10, 20].
        assert!(text.hit_test(Point::new(10.0, 10.0)));
        assert!(text.hit_test(Point::new(30.0, 20.0)));
        assert!(!text.hit_test(Point::new(31.0, 15.0)));
        assert!(!text.hit_test(Point::new(15.0, 21.0)));
    }

    #[test]
    fn test_empty_text_hits_left_edge_only() {
        let text = Text::new(10.0, 10.0, "", 10.0, "#000");
        assert!(text.hit_test(Point::new(10.0, 15.0)));
        assert!(!text.hit_test(Point::new(11.0, 15.0)));
    }
}
