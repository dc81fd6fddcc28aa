//! Circle shape.

use super::ShapeTrait;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle positioned by the top-left corner of its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    /// Left edge of the bounding box.
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub x: f64,
    /// Top edge of the bounding box.
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub y: f64,
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub radius: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub is_filled: bool,
}

impl Circle {
    /// Create a new circle.
    pub fn new(x: f64, y: f64, radius: f64, color: impl Into<String>, is_filled: bool) -> Self {
        Self {
            x,
            y,
            radius,
            color: color.into(),
            is_filled,
        }
    }

    /// Center derived from the bounding box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.radius, self.y + self.radius)
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center(), self.radius)
    }
}

impl ShapeTrait for Circle {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.x,
            self.y,
            self.x + 2.0 * self.radius,
            self.y + 2.0 * self.radius,
        )
        .abs()
    }

    fn hit_test(&self, point: Point) -> bool {
        point.distance(self.center()) <= self.radius
    }

    fn to_path(&self) -> BezPath {
        // A non-positive radius draws nothing.
        if self.radius.is_nan() || self.radius <= 0.0 {
            return BezPath::new();
        }
        self.as_kurbo().to_path(0.1)
    }
}
