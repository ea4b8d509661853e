//! The design document: canvas dimensions plus an ordered element list.

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult, Element, ElementId};

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: f32 = 800.0;

/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: f32 = 600.0;

/// A document containing all elements of one editor session.
///
/// Elements are kept in insertion order; paint and hit-test order comes from
/// `zIndex`, with insertion order breaking ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
    /// All elements in insertion order.
    #[serde(default)]
    elements: Vec<Element>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Document {
    /// Create a new empty document with the given canvas size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
        }
    }

    /// Create a document from an existing element list.
    #[must_use]
    pub fn with_elements(width: f32, height: f32, elements: Vec<Element>) -> Self {
        Self {
            width,
            height,
            elements,
        }
    }

    /// Append an element.
    pub fn push(&mut self, element: Element) -> ElementId {
        let id = element.id.clone();
        self.elements.push(element);
        id
    }

    /// Remove an element by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn remove(&mut self, id: &ElementId) -> CanvasResult<Element> {
        let index = self
            .position(id)
            .ok_or_else(|| CanvasError::ElementNotFound(id.to_string()))?;
        Ok(self.elements.remove(index))
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    /// Whether an element with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    /// Elements in insertion order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Mutable access to all elements in insertion order.
    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    /// Replace the element list wholesale.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Elements sorted by z-index (bottom first). Ties keep insertion order.
    #[must_use]
    pub fn z_ordered(&self) -> Vec<&Element> {
        let mut ordered: Vec<_> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.transform.z_index);
        ordered
    }

    /// The highest z-index in use, if any element exists.
    #[must_use]
    pub fn max_z_index(&self) -> Option<i32> {
        self.elements.iter().map(|e| e.transform.z_index).max()
    }

    /// A z-index that places an element above everything currently present.
    #[must_use]
    pub fn next_z_index(&self) -> i32 {
        self.max_z_index().map_or(0, |z| z.saturating_add(1))
    }

    /// Find the element at the given canvas coordinates.
    ///
    /// Returns the ID of the topmost visible, unlocked element whose bounds
    /// contain the point. Among equal z-indices the later-inserted element
    /// is on top.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.z_ordered()
            .into_iter()
            .rev()
            .find(|e| e.is_hit_target() && e.contains_point(x, y))
            .map(|e| e.id.clone())
    }

    /// Get the number of elements in the document.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CanvasResult<String> {
        serde_json::to_string(self).map_err(CanvasError::Serialization)
    }

    /// Deserialize a document from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        serde_json::from_str(json).map_err(CanvasError::Serialization)
    }
}
