//! Rectangle shape.

use super::ShapeTrait;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, filled or outlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    /// Left edge.
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub x: f64,
    /// Top edge.
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub y: f64,
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub width: f64,
    #[serde(default = "super::nan", deserialize_with = "super::nan_if_null")]
    pub height: f64,
    /// CSS color string.
    #[serde(default)]
    pub color: String,
    /// Fill the interior instead of stroking the outline.
    #[serde(default)]
    pub is_filled: bool,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64, color: impl Into<String>, is_filled: bool) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color: color.into(),
            is_filled,
        }
    }

    /// Get the rectangle as a kurbo Rect.
    ///
    /// Not normalized: a negative width yields `x1 < x0`.
    pub fn as_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

impl ShapeTrait for Rectangle {
    fn bounds(&self) -> Rect {
        self.as_rect().abs()
    }

    fn hit_test(&self, point: Point) -> bool {
        // Inclusive on every edge; negative extents never match.
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}
