//! Element definitions for the canvas.

mod circle;
mod color;
mod image;
mod line;
mod rectangle;
mod text;

pub use circle::Circle;
pub use color::{Rgba, parse_color};
pub use image::Image;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned to elements by the canvas store.
pub type ElementId = u64;

// Missing or null geometry becomes NaN; such shapes draw nothing and never hit.
fn nan() -> f64 {
    f64::NAN
}

fn nan_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// Common trait for all element shapes.
pub trait ShapeTrait {
    /// Get the bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in canvas coordinates) hits this shape.
    fn hit_test(&self, point: Point) -> bool;

    /// Get the outline path used for rendering.
    fn to_path(&self) -> BezPath;
}

/// Closed set of drawable shapes, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Text(Text),
    Line(Line),
    Image(Image),
}

impl Shape {
    /// Wire name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Circle(_) => "circle",
            Shape::Text(_) => "text",
            Shape::Line(_) => "line",
            Shape::Image(_) => "image",
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point),
            Shape::Circle(s) => s.hit_test(point),
            Shape::Text(s) => s.hit_test(point),
            Shape::Line(s) => s.hit_test(point),
            Shape::Image(s) => s.hit_test(point),
        }
    }

    pub fn to_path(&self) -> BezPath {
        match self {
            Shape::Rectangle(s) => s.to_path(),
            Shape::Circle(s) => s.to_path(),
            Shape::Text(s) => s.to_path(),
            Shape::Line(s) => s.to_path(),
            Shape::Image(s) => s.to_path(),
        }
    }

    /// The CSS color string, for shapes that carry one.
    pub fn color(&self) -> Option<&str> {
        match self {
            Shape::Rectangle(s) => Some(&s.color),
            Shape::Circle(s) => Some(&s.color),
            Shape::Text(s) => Some(&s.color),
            Shape::Line(s) => Some(&s.color),
            Shape::Image(_) => None,
        }
    }
}

/// A shape placed on a canvas under a store-assigned id.
///
/// Serializes flat: `{"id": 1, "type": "rectangle", "x": ..., ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub shape: Shape,
}

impl Element {
    pub fn new(id: ElementId, shape: Shape) -> Self {
        Self { id, shape }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.shape.hit_test(point)
    }
}
