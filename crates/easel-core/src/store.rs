//! Process-wide owner of canvas documents and their undo histories.

use crate::canvas::CanvasDocument;
use crate::error::{CanvasError, CanvasResult};
use crate::history::{History, HISTORY_LIMIT};
use crate::patch::{ElementPatch, UpdateMode};
use crate::shapes::{Circle, Element, ElementId, Image, Line, Rectangle, Shape, Text};
use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use kurbo::Point;
use std::sync::atomic::{AtomicU64, Ordering};

/// A document together with its history.
#[derive(Debug, Clone)]
struct CanvasEntry {
    document: CanvasDocument,
    history: History,
}

impl CanvasEntry {
    /// Snapshot the current elements ahead of a mutation.
    fn push_undo(&mut self) {
        self.history.push(&self.document.elements);
    }
}

/// Owns every canvas and allocates element ids.
///
/// Each operation holds the canvas's map entry for its whole
/// snapshot-and-mutate sequence, so concurrent requests against the same
/// canvas are serialized. Element ids come from one counter shared by all
/// canvases and are never reused.
#[derive(Debug)]
pub struct CanvasStore {
    canvases: DashMap<String, CanvasEntry>,
    next_element_id: AtomicU64,
    update_mode: UpdateMode,
    history_limit: usize,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            canvases: DashMap::new(),
            next_element_id: AtomicU64::new(1),
            update_mode: UpdateMode::default(),
            history_limit: HISTORY_LIMIT,
        }
    }

    /// Set how `update_element` treats absent fields.
    pub fn with_update_mode(mut self, mode: UpdateMode) -> Self {
        self.update_mode = mode;
        self
    }

    /// Set the undo depth for canvases initialized from now on.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Create or overwrite a canvas with no elements and no history.
    pub fn initialize(&self, id: impl Into<String>, width: u32, height: u32) -> CanvasDocument {
        let id = id.into();
        let document = CanvasDocument::new(id.clone(), width, height);
        let entry = CanvasEntry {
            document: document.clone(),
            history: History::with_capacity(self.history_limit),
        };
        if self.canvases.insert(id.clone(), entry).is_some() {
            log::debug!("Canvas {id} re-initialized");
        } else {
            log::debug!("Canvas {id} initialized ({width}x{height})");
        }
        document
    }

    /// Get a copy of a canvas.
    pub fn get(&self, id: &str) -> CanvasResult<CanvasDocument> {
        self.canvases
            .get(id)
            .map(|entry| entry.document.clone())
            .ok_or_else(|| CanvasError::CanvasNotFound(id.to_string()))
    }

    /// Check if a canvas exists.
    pub fn contains(&self, id: &str) -> bool {
        self.canvases.contains_key(id)
    }

    /// Number of canvases.
    pub fn len(&self) -> usize {
        self.canvases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canvases.is_empty()
    }

    /// Number of undo states held for a canvas.
    pub fn history_depth(&self, id: &str) -> CanvasResult<usize> {
        self.canvases
            .get(id)
            .map(|entry| entry.history.depth())
            .ok_or_else(|| CanvasError::CanvasNotFound(id.to_string()))
    }

    /// Push the current elements of a canvas onto its history.
    ///
    /// Does nothing if the canvas does not exist.
    pub fn snapshot(&self, id: &str) {
        if let Some(mut entry) = self.canvases.get_mut(id) {
            entry.push_undo();
        }
    }

    fn entry_mut(&self, id: &str) -> CanvasResult<RefMut<'_, String, CanvasEntry>> {
        self.canvases
            .get_mut(id)
            .ok_or_else(|| CanvasError::CanvasNotFound(id.to_string()))
    }

    fn allocate_id(&self) -> ElementId {
        self.next_element_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Snapshot, then append a new element with a fresh id.
    pub fn add_element(&self, canvas_id: &str, shape: Shape) -> CanvasResult<Element> {
        let mut guard = self.entry_mut(canvas_id)?;
        let entry = &mut *guard;
        entry.push_undo();
        let element = Element::new(self.allocate_id(), shape);
        entry.document.push(element.clone());
        log::debug!(
            "Added {} {} to canvas {canvas_id}",
            element.shape.kind(),
            element.id
        );
        Ok(element)
    }

    pub fn add_rectangle(&self, canvas_id: &str, rectangle: Rectangle) -> CanvasResult<Element> {
        self.add_element(canvas_id, Shape::Rectangle(rectangle))
    }

    pub fn add_circle(&self, canvas_id: &str, circle: Circle) -> CanvasResult<Element> {
        self.add_element(canvas_id, Shape::Circle(circle))
    }

    pub fn add_text(&self, canvas_id: &str, text: Text) -> CanvasResult<Element> {
        self.add_element(canvas_id, Shape::Text(text))
    }

    pub fn add_line(&self, canvas_id: &str, line: Line) -> CanvasResult<Element> {
        self.add_element(canvas_id, Shape::Line(line))
    }

    /// Add an image whose bytes were already stored at `image.path`.
    pub fn add_image(&self, canvas_id: &str, image: Image) -> CanvasResult<Element> {
        self.add_element(canvas_id, Shape::Image(image))
    }

    /// Apply a patch to an element and return the updated element.
    pub fn update_element(
        &self,
        canvas_id: &str,
        element_id: ElementId,
        patch: &ElementPatch,
    ) -> CanvasResult<Element> {
        let mut guard = self.entry_mut(canvas_id)?;
        let entry = &mut *guard;
        if entry.document.get_element(element_id).is_none() {
            return Err(CanvasError::ElementNotFound {
                canvas: canvas_id.to_string(),
                element: element_id,
            });
        }
        entry.push_undo();

        let element = entry
            .document
            .get_element_mut(element_id)
            .ok_or_else(|| CanvasError::ElementNotFound {
                canvas: canvas_id.to_string(),
                element: element_id,
            })?;
        patch.apply(&mut element.shape, self.update_mode);
        log::debug!("Updated element {element_id} in canvas {canvas_id}");
        Ok(element.clone())
    }

    /// Remove an element and return it.
    pub fn delete_element(&self, canvas_id: &str, element_id: ElementId) -> CanvasResult<Element> {
        let mut guard = self.entry_mut(canvas_id)?;
        let entry = &mut *guard;
        if entry.document.get_element(element_id).is_none() {
            return Err(CanvasError::ElementNotFound {
                canvas: canvas_id.to_string(),
                element: element_id,
            });
        }
        entry.push_undo();
        entry
            .document
            .remove_element(element_id)
            .ok_or_else(|| CanvasError::ElementNotFound {
                canvas: canvas_id.to_string(),
                element: element_id,
            })
    }

    /// Remove every element (undoable).
    pub fn clear(&self, canvas_id: &str) -> CanvasResult<CanvasDocument> {
        let mut guard = self.entry_mut(canvas_id)?;
        let entry = &mut *guard;
        entry.push_undo();
        entry.document.clear();
        Ok(entry.document.clone())
    }

    /// Restore the elements captured before the most recent mutation.
    pub fn undo(&self, canvas_id: &str) -> CanvasResult<CanvasDocument> {
        let mut guard = self.entry_mut(canvas_id)?;
        let entry = &mut *guard;
        let snapshot = entry
            .history
            .pop()
            .ok_or_else(|| CanvasError::NoHistory(canvas_id.to_string()))?;
        entry.document.elements = snapshot;
        log::debug!(
            "Undo on canvas {canvas_id}, {} states left",
            entry.history.depth()
        );
        Ok(entry.document.clone())
    }

    /// First element, in insertion order, containing the point.
    pub fn element_at(&self, canvas_id: &str, x: f64, y: f64) -> CanvasResult<Option<Element>> {
        let entry = self
            .canvases
            .get(canvas_id)
            .ok_or_else(|| CanvasError::CanvasNotFound(canvas_id.to_string()))?;
        Ok(entry.document.element_at(Point::new(x, y)).cloned())
    }
}
