//! Document-editing operations on the element store.
//!
//! Each operation returns whether persisted state changed. Missing ids and
//! unusable numbers are no-ops, never errors.

use serde::{Deserialize, Serialize};

use crate::{ElementId, ElementKind, ElementStore};

/// Offset applied to duplicated elements, in canvas pixels.
pub const DUPLICATE_OFFSET: (f32, f32) = (20.0, 20.0);

/// Direction for [`ElementStore::reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderDirection {
    /// Towards the viewer.
    Up,
    /// Away from the viewer.
    Down,
}

/// Direction for nudging the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NudgeDirection {
    /// Negative y.
    Up,
    /// Positive y.
    Down,
    /// Negative x.
    Left,
    /// Positive x.
    Right,
}

impl NudgeDirection {
    /// Delta for a nudge of `amount` pixels.
    #[must_use]
    pub fn delta(self, amount: f32) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -amount),
            Self::Down => (0.0, amount),
            Self::Left => (-amount, 0.0),
            Self::Right => (amount, 0.0),
        }
    }
}

/// Parse a numeric field typed into a panel. Blank, non-numeric and
/// non-finite input yields `None`.
#[must_use]
pub fn parse_dimension(input: &str) -> Option<f32> {
    input
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
}

impl ElementStore {
    /// Move by a delta, clamping the origin to non-negative coordinates.
    pub fn move_by(&mut self, id: &ElementId, dx: f32, dy: f32) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        let t = &mut element.transform;
        let x = (t.x + dx).max(0.0);
        let y = (t.y + dy).max(0.0);
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let changed = x != t.x || y != t.y;
        t.x = x;
        t.y = y;
        changed
    }

    /// Place the origin exactly, without clamping. Used while dragging.
    pub fn set_position(&mut self, id: &ElementId, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        let t = &mut element.transform;
        let changed = x != t.x || y != t.y;
        t.x = x;
        t.y = y;
        changed
    }

    /// Set width and height. Non-finite values are rejected.
    pub fn resize(&mut self, id: &ElementId, width: f32, height: f32) -> bool {
        if !width.is_finite() || !height.is_finite() {
            tracing::debug!("Ignoring non-finite resize of {id}");
            return false;
        }
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        let t = &mut element.transform;
        let changed = width != t.width || height != t.height;
        t.width = width;
        t.height = height;
        changed
    }

    /// Set rotation in degrees. The value is stored as given.
    pub fn rotate(&mut self, id: &ElementId, degrees: f32) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        let changed = element.transform.rotation != degrees;
        element.transform.rotation = degrees;
        changed
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, id: &ElementId, value: f32) -> bool {
        if value.is_nan() {
            return false;
        }
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        let opacity = value.clamp(0.0, 1.0);
        let changed = element.opacity != opacity;
        element.opacity = opacity;
        changed
    }

    /// Set the primary color: text color, shape fill or background color.
    /// Images have no primary color.
    pub fn recolor(&mut self, id: &ElementId, new_color: &str) -> bool {
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        let target = match &mut element.kind {
            ElementKind::Text { color, .. } | ElementKind::Background { color } => color,
            ElementKind::Rectangle { fill, .. } | ElementKind::Circle { fill, .. } => fill,
            ElementKind::Image { .. } => return false,
        };
        if target.as_str() == new_color {
            return false;
        }
        *target = new_color.to_string();
        true
    }

    /// Copy an element under a new id, offset by [`DUPLICATE_OFFSET`] and
    /// stacked above everything else. The copy becomes the selection.
    pub fn duplicate(&mut self, id: &ElementId) -> Option<ElementId> {
        let mut copy = self.document.get(id)?.clone();
        copy.id = ElementId::new();
        copy.transform.x += DUPLICATE_OFFSET.0;
        copy.transform.y += DUPLICATE_OFFSET.1;
        copy.transform.z_index = self.document.next_z_index();
        let new_id = self.document.push(copy);
        self.selection.select(new_id.clone());
        Some(new_id)
    }

    /// Swap an element with its neighbour in z-order.
    ///
    /// On success every element is re-ranked `0..n` in the new order, so
    /// ranks are gapless and unique afterwards. Moving the top element up
    /// or the bottom element down changes nothing.
    pub fn reorder(&mut self, id: &ElementId, direction: ReorderDirection) -> bool {
        let mut order: Vec<ElementId> = self
            .document
            .z_ordered()
            .into_iter()
            .map(|e| e.id.clone())
            .collect();
        let Some(index) = order.iter().position(|e| e == id) else {
            return false;
        };
        let target = match direction {
            ReorderDirection::Up if index + 1 < order.len() => index + 1,
            ReorderDirection::Down if index > 0 => index - 1,
            _ => return false,
        };
        order.swap(index, target);

        for (rank, element_id) in order.iter().enumerate() {
            if let Some(element) = self.document.get_mut(element_id) {
                element.transform.z_index = i32::try_from(rank).unwrap_or(i32::MAX);
            }
        }
        true
    }

    /// Flip visibility.
    pub fn toggle_visible(&mut self, id: &ElementId) -> bool {
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        element.visible = !element.visible;
        true
    }

    /// Flip the lock flag.
    pub fn toggle_locked(&mut self, id: &ElementId) -> bool {
        let Some(element) = self.document.get_mut(id) else {
            return false;
        };
        element.locked = !element.locked;
        true
    }
}
