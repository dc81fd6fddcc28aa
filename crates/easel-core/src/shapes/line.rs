//! Line shape.

use super::ShapeTrait;
use kurbo::{BezPath, Line as KurboLine, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A single straight segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub start_x: f64,
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub start_y: f64,
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub end_x: f64,
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub end_y: f64,
    #[serde(default)]
    pub color: String,
}

impl Line {
    /// Create a new line.
    pub fn new(start_x: f64, start_y: f64, end_x: f64, end_y: f64, color: impl Into<String>) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
            color: color.into(),
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.start_x, self.start_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Get as a kurbo Line.
    pub fn as_kurbo(&self) -> KurboLine {
        KurboLine::new(self.start(), self.end())
    }
}

impl ShapeTrait for Line {
    fn bounds(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    /// Lines are not selectable by point.
    fn hit_test(&self, _point: Point) -> bool {
        false
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_never_hit() {
        let line = Line::new(0.0, 0.0, 100.0, 0.0, "#000");
        assert!(!line.hit_test(Point::new(50.0, 0.0)));
        assert!(!line.hit_test(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_bounds() {
        let line = Line::new(50.0, 80.0, 10.0, 20.0, "#000");
        let bounds = line.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 80.0).abs() < f64::EPSILON);
    }
}
