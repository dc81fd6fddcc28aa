//! Image shape referencing an externally stored raster file.

use super::ShapeTrait;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An image drawn scaled into its box.
///
/// Only the storage path is kept; the bytes live with the upload store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub x: f64,
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub y: f64,
    /// Display width.
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub width: f64,
    /// Display height.
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub height: f64,
    /// Path returned by the upload store.
    #[serde(default)]
    pub path: String,
}

impl Image {
    pub fn new(x: f64, y: f64, width: f64, height: f64, path: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            path: path.into(),
        }
    }

    /// Get the destination rectangle.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl ShapeTrait for Image {
    fn bounds(&self) -> Rect {
        self.as_rect().abs()
    }

    /// Images are not selectable by point.
    fn hit_test(&self, _point: Point) -> bool {
        false
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_hit_inside_box() {
        let image = Image::new(0.0, 0.0, 100.0, 100.0, "uploads/a.png");
        assert!(!image.hit_test(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_bounds() {
        let image = Image::new(10.0, 20.0, 30.0, 40.0, "uploads/a.png");
        let bounds = image.bounds();
        assert!((bounds.x1 - 40.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 60.0).abs() < f64::EPSILON);
    }
}
