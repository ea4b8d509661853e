//! Single-element selection tracking.

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// At most one selected element, held by id.
///
/// The selection never validates its id against the document. The element
/// store clears it when the referenced element is removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    current: Option<ElementId>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Select an element, replacing any previous selection.
    pub fn select(&mut self, id: ElementId) {
        self.current = Some(id);
    }

    /// Clear the selection.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The selected element id, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&ElementId> {
        self.current.as_ref()
    }

    /// Whether `id` is the selected element.
    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.current.as_ref() == Some(id)
    }

    /// Clear the selection if it refers to `id`.
    pub fn clear_if(&mut self, id: &ElementId) {
        if self.is_selected(id) {
            self.current = None;
        }
    }

    /// Whether nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
