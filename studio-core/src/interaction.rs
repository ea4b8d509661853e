//! # Canvas Interaction
//!
//! Maps pointer and keyboard input onto editor mutations.
//!
//! ```text
//! down(x, y)  hit-test topmost visible, unlocked element
//!             hit  -> select, start drag with pointer offset
//!             miss -> clear selection
//! move(x, y)  origin = canvas(x, y) - offset   (no clamp, no history)
//! up(x, y)    one history entry if the element moved
//! ```
//!
//! Keyboard shortcuts are ignored while a drag is in progress so that the
//! gesture and the history it produces stay in step.

use serde::{Deserialize, Serialize};

use crate::editor::Editor;
use crate::event::{InputEvent, KeyEvent, PointerEvent, PointerPhase};
use crate::history::SnapshotStorage;
use crate::mutation::NudgeDirection;
use crate::ElementId;

/// Smallest zoom factor offered by the zoom control.
pub const MIN_ZOOM: f32 = 0.25;
/// Largest zoom factor offered by the zoom control.
pub const MAX_ZOOM: f32 = 2.0;
/// Zoom control step.
pub const ZOOM_STEP: f32 = 0.25;

/// Screen-to-canvas coordinate mapping.
///
/// Zoom always stays within `MIN_ZOOM..=MAX_ZOOM` and pan is always finite,
/// including for deserialized values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawViewport")]
pub struct Viewport {
    zoom: f32,
    pan_x: f32,
    pan_y: f32,
}

#[derive(Deserialize)]
struct RawViewport {
    zoom: f32,
    #[serde(default)]
    pan_x: f32,
    #[serde(default)]
    pan_y: f32,
}

impl From<RawViewport> for Viewport {
    fn from(raw: RawViewport) -> Self {
        let mut viewport = Self::default();
        viewport.set_zoom(raw.zoom);
        viewport.set_pan(raw.pan_x, raw.pan_y);
        viewport
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    /// Convert a screen point to canvas coordinates.
    #[must_use]
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pan_x) / self.zoom, (y - self.pan_y) / self.zoom)
    }

    /// Zoom factor (1.0 = 100%).
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Pan offset in screen pixels.
    #[must_use]
    pub const fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    /// Set the zoom factor, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Set the pan offset. Non-finite offsets are ignored.
    pub fn set_pan(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.pan_x = x;
            self.pan_y = y;
        }
    }

    /// Step the zoom in.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + ZOOM_STEP);
    }

    /// Step the zoom out.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - ZOOM_STEP);
    }

    /// Zoom as a whole percentage, for display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn zoom_percent(&self) -> i32 {
        (self.zoom * 100.0).round() as i32
    }
}

/// An in-progress drag of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Element being dragged.
    pub element: ElementId,
    /// Pointer position minus element origin at pointer-down.
    pub offset: (f32, f32),
    /// Element origin at pointer-down.
    pub start: (f32, f32),
}

/// A keyboard shortcut recognised by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Undo the last action.
    Undo,
    /// Redo the last undone action.
    Redo,
    /// Duplicate the selection.
    Duplicate,
    /// Delete the selection.
    Delete,
    /// Move the selection one step.
    Nudge {
        /// Direction of travel.
        direction: NudgeDirection,
        /// Use the large step (Shift held).
        large: bool,
    },
}

impl Shortcut {
    /// Recognise a shortcut from a key press.
    #[must_use]
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        let mods = event.modifiers;
        if mods.command() {
            return match event.key.to_ascii_lowercase().as_str() {
                "z" if mods.shift => Some(Self::Redo),
                "z" => Some(Self::Undo),
                "y" => Some(Self::Redo),
                "d" | "c" => Some(Self::Duplicate),
                _ => None,
            };
        }
        let direction = match event.key.as_str() {
            "Delete" | "Backspace" => return Some(Self::Delete),
            "ArrowUp" => NudgeDirection::Up,
            "ArrowDown" => NudgeDirection::Down,
            "ArrowLeft" => NudgeDirection::Left,
            "ArrowRight" => NudgeDirection::Right,
            _ => return None,
        };
        Some(Self::Nudge {
            direction,
            large: mods.shift,
        })
    }
}

/// Pointer and keyboard state for one canvas surface.
#[derive(Debug, Clone, Default)]
pub struct CanvasInteraction {
    viewport: Viewport,
    drag: Option<DragSession>,
}

impl CanvasInteraction {
    /// Create an interaction layer with the identity viewport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable viewport, for zoom and pan controls.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The drag in progress, if any.
    #[must_use]
    pub const fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Handle a button press at a screen point. Returns the hit element.
    pub fn pointer_down<S: SnapshotStorage>(
        &mut self,
        editor: &mut Editor<S>,
        x: f32,
        y: f32,
    ) -> Option<ElementId> {
        if self.drag.is_some() {
            self.end_drag(editor);
        }

        let (cx, cy) = self.viewport.to_canvas(x, y);
        let Some(id) = editor.document().element_at(cx, cy) else {
            tracing::debug!("Pointer down at ({cx}, {cy}) hit nothing");
            editor.clear_selection();
            return None;
        };

        let origin = editor
            .get_element(&id)
            .map(|e| (e.transform.x, e.transform.y))?;
        editor.select(id.clone());
        self.drag = Some(DragSession {
            element: id.clone(),
            offset: (cx - origin.0, cy - origin.1),
            start: origin,
        });
        tracing::debug!("Drag started on {id}");
        Some(id)
    }

    /// Handle pointer motion. Returns whether an element moved.
    pub fn pointer_move<S: SnapshotStorage>(
        &mut self,
        editor: &mut Editor<S>,
        x: f32,
        y: f32,
    ) -> bool {
        let Some(drag) = &self.drag else {
            return false;
        };
        let (cx, cy) = self.viewport.to_canvas(x, y);
        editor.drag_to(&drag.element, cx - drag.offset.0, cy - drag.offset.1)
    }

    /// Handle a button release. Returns whether a history entry was
    /// committed for the gesture.
    pub fn pointer_up<S: SnapshotStorage>(
        &mut self,
        editor: &mut Editor<S>,
        x: f32,
        y: f32,
    ) -> bool {
        self.pointer_move(editor, x, y);
        self.end_drag(editor)
    }

    /// Abort the gesture where it stands. Any movement so far is kept and
    /// committed, like a release at the last known position.
    pub fn cancel<S: SnapshotStorage>(&mut self, editor: &mut Editor<S>) -> bool {
        self.end_drag(editor)
    }

    fn end_drag<S: SnapshotStorage>(&mut self, editor: &mut Editor<S>) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        let moved = editor
            .get_element(&drag.element)
            .is_some_and(|e| (e.transform.x, e.transform.y) != drag.start);
        if moved {
            editor.commit();
            tracing::debug!("Drag of {} committed", drag.element);
        }
        moved
    }

    /// Handle a key press. Returns the shortcut that ran, if it changed
    /// anything.
    pub fn handle_key<S: SnapshotStorage>(
        &mut self,
        editor: &mut Editor<S>,
        event: &KeyEvent,
    ) -> Option<Shortcut> {
        if self.drag.is_some() {
            return None;
        }
        let shortcut = Shortcut::from_key(event)?;
        let changed = match shortcut {
            Shortcut::Undo => editor.undo(),
            Shortcut::Redo => editor.redo(),
            Shortcut::Duplicate => editor.duplicate_selected().is_some(),
            Shortcut::Delete => editor.delete_selected(),
            Shortcut::Nudge { direction, large } => editor.nudge(direction, large),
        };
        tracing::debug!("Shortcut {shortcut:?} applied: {changed}");
        changed.then_some(shortcut)
    }

    /// Dispatch any input event. Returns whether the document or selection
    /// may have changed.
    pub fn handle_event<S: SnapshotStorage>(
        &mut self,
        editor: &mut Editor<S>,
        event: &InputEvent,
    ) -> bool {
        match event {
            InputEvent::Pointer(PointerEvent { phase, x, y }) => match phase {
                PointerPhase::Down => {
                    self.pointer_down(editor, *x, *y);
                    true
                }
                PointerPhase::Move => self.pointer_move(editor, *x, *y),
                PointerPhase::Up => self.pointer_up(editor, *x, *y),
                PointerPhase::Cancel => self.cancel(editor),
            },
            InputEvent::Key(key) => self.handle_key(editor, key).is_some(),
        }
    }
}
