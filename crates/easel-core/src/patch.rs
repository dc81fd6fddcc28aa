//! Field updates applied to existing elements.

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};

/// How absent position/style fields are treated by [`ElementPatch::apply`].
///
/// `radius`, `width` and `height` are only ever written when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// `x`, `y`, `color` and `isFilled` are always written. Absent values
    /// become NaN, the empty color and `false`.
    #[default]
    Overwrite,
    /// Absent fields keep their current value.
    Partial,
}

/// Request body for an element update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_filled: Option<bool>,
    /// Circles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Rectangles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Rectangles only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

fn assign<T: Clone>(slot: &mut T, value: Option<&T>, absent: impl FnOnce() -> T, mode: UpdateMode) {
    match (value, mode) {
        (Some(value), _) => *slot = value.clone(),
        (None, UpdateMode::Overwrite) => *slot = absent(),
        (None, UpdateMode::Partial) => {}
    }
}

impl ElementPatch {
    /// Apply this patch to a shape. Fields the variant lacks are ignored.
    pub fn apply(&self, shape: &mut Shape, mode: UpdateMode) {
        let nan = || f64::NAN;
        match shape {
            Shape::Rectangle(rect) => {
                assign(&mut rect.x, self.x.as_ref(), nan, mode);
                assign(&mut rect.y, self.y.as_ref(), nan, mode);
                assign(&mut rect.color, self.color.as_ref(), String::new, mode);
                assign(&mut rect.is_filled, self.is_filled.as_ref(), || false, mode);
                if let Some(width) = self.width {
                    rect.width = width;
                }
                if let Some(height) = self.height {
                    rect.height = height;
                }
            }
            Shape::Circle(circle) => {
                assign(&mut circle.x, self.x.as_ref(), nan, mode);
                assign(&mut circle.y, self.y.as_ref(), nan, mode);
                assign(&mut circle.color, self.color.as_ref(), String::new, mode);
                assign(&mut circle.is_filled, self.is_filled.as_ref(), || false, mode);
                if let Some(radius) = self.radius {
                    circle.radius = radius;
                }
            }
            Shape::Text(text) => {
                assign(&mut text.x, self.x.as_ref(), nan, mode);
                assign(&mut text.y, self.y.as_ref(), nan, mode);
                assign(&mut text.color, self.color.as_ref(), String::new, mode);
            }
            Shape::Line(line) => {
                assign(&mut line.color, self.color.as_ref(), String::new, mode);
            }
            Shape::Image(image) => {
                assign(&mut image.x, self.x.as_ref(), nan, mode);
                assign(&mut image.y, self.y.as_ref(), nan, mode);
            }
        }
    }
}
