//! Canvas document.

use crate::hit_test;
use crate::shapes::{Element, ElementId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A named drawing surface with fixed dimensions and an ordered element list.
///
/// `elements` is the paint order: later entries are drawn on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasDocument {
    /// Caller-supplied identifier.
    pub id: String,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Elements in paint order (back to front).
    pub elements: Vec<Element>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Append an element on top of the stack.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Get an element by ID.
    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Remove an element, keeping the order of the rest.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(index))
    }

    /// Clear all elements from the document.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// First element in paint order containing the point.
    pub fn element_at(&self, point: Point) -> Option<&Element> {
        hit_test::element_at(&self.elements, point)
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }
}
