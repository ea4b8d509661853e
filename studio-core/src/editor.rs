//! Editor session: element store, snapshot history and remote request
//! tracking for one open document.
//!
//! Every method that changes persisted state commits exactly one history
//! entry. Calls that change nothing (unknown ids, rejected numbers, bounds)
//! commit nothing and return `false`/`None`.

use serde::{Deserialize, Serialize};

use crate::history::{History, MemorySnapshots, SnapshotStorage};
use crate::mutation::{parse_dimension, NudgeDirection, ReorderDirection};
use crate::presets::{CanvasPreset, ExportFormat, QualityPreset};
use crate::remote::{
    AiEditRequest, AiEditResponse, ExportRequest, RemoteAction, RemoteOutcome, RemoteTicket,
    RequestTracker, StaleResponsePolicy,
};
use crate::validation::validate_elements;
use crate::{
    CanvasError, CanvasResult, Document, Element, ElementId, ElementPatch, ElementStore,
    ElementType, Selection,
};

/// Tunable editor behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How to treat remote responses that predate local edits.
    pub stale_response_policy: StaleResponsePolicy,
    /// Pixels per arrow-key nudge.
    pub nudge_step: f32,
    /// Pixels per arrow-key nudge with Shift held.
    pub nudge_step_large: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            stale_response_policy: StaleResponsePolicy::LastResponseWins,
            nudge_step: 1.0,
            nudge_step_large: 10.0,
        }
    }
}

/// One editor session over a single document.
#[derive(Debug, Clone)]
pub struct Editor<S = MemorySnapshots> {
    store: ElementStore,
    history: History<S>,
    config: EditorConfig,
    requests: RequestTracker,
    revision: u64,
    last_error: Option<String>,
}

impl Editor<MemorySnapshots> {
    /// Create an editor over an empty canvas of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_document(Document::new(width, height))
    }

    /// Create an editor over an existing document with in-memory history.
    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self::with_storage(document, MemorySnapshots::new(), EditorConfig::default())
    }
}

impl Default for Editor<MemorySnapshots> {
    fn default() -> Self {
        Self::with_document(Document::default())
    }
}

impl<S: SnapshotStorage> Editor<S> {
    /// Create an editor with injected snapshot storage.
    ///
    /// The initial document is committed as the baseline entry, so undo
    /// never goes past it.
    pub fn with_storage(document: Document, storage: S, config: EditorConfig) -> Self {
        let mut editor = Self {
            store: ElementStore::new(document),
            history: History::with_storage(storage),
            config,
            requests: RequestTracker::new(),
            revision: 0,
            last_error: None,
        };
        editor.commit();
        editor
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    /// The current document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        self.store.document()
    }

    /// The element store.
    #[must_use]
    pub const fn store(&self) -> &ElementStore {
        &self.store
    }

    /// The selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        self.store.selection()
    }

    /// The history stack.
    #[must_use]
    pub const fn history(&self) -> &History<S> {
        &self.history
    }

    /// Editor configuration.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Look up an element.
    #[must_use]
    pub fn get_element(&self, id: &ElementId) -> Option<&Element> {
        self.store.get_element(id)
    }

    /// Elements in z-order, as a fresh snapshot.
    #[must_use]
    pub fn list_elements(&self) -> Vec<Element> {
        self.store.list_elements()
    }

    /// The selected element, if it still exists.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.store.selected_element()
    }

    /// Monotonic counter bumped whenever the document changes.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The most recent failure message, for transient display.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Clear the failure message.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Select an element.
    pub fn select(&mut self, id: ElementId) {
        self.store.select(id);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.store.clear_selection();
    }

    // -----------------------------------------------------------------------
    // History
    // -----------------------------------------------------------------------

    /// Record the current document as one history entry.
    pub(crate) fn commit(&mut self) {
        self.revision += 1;
        if let Err(e) = self.history.commit(self.store.document()) {
            tracing::warn!("Failed to record history snapshot: {e}");
            self.last_error = Some(e.to_string());
        }
    }

    fn commit_if(&mut self, changed: bool) -> bool {
        if changed {
            self.commit();
        }
        changed
    }

    /// Undo the last action. Returns whether the document changed.
    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo();
        self.restore(restored)
    }

    /// Redo the last undone action. Returns whether the document changed.
    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo();
        self.restore(restored)
    }

    fn restore(&mut self, restored: CanvasResult<Option<Document>>) -> bool {
        match restored {
            Ok(Some(document)) => {
                self.store.replace_document(document);
                self.revision += 1;
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("History restore failed, keeping current document: {e}");
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Whether undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a new element with type defaults and select it.
    pub fn add_element(&mut self, element_type: ElementType) -> ElementId {
        let id = self.store.add_element(element_type).id;
        self.store.select(id.clone());
        self.commit();
        id
    }

    /// Merge a patch into an element. Works on locked elements.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(before) = self.store.get_element(id).cloned() else {
            return false;
        };
        let changed = self
            .store
            .update_element(id, patch)
            .is_some_and(|after| after != before);
        self.commit_if(changed)
    }

    /// Move by a delta, clamped to non-negative coordinates.
    pub fn move_by(&mut self, id: &ElementId, dx: f32, dy: f32) -> bool {
        let changed = self.store.move_by(id, dx, dy);
        self.commit_if(changed)
    }

    /// Move the selected element by the configured nudge step.
    pub fn nudge(&mut self, direction: NudgeDirection, large: bool) -> bool {
        let Some(id) = self.store.selection().current().cloned() else {
            return false;
        };
        let amount = if large {
            self.config.nudge_step_large
        } else {
            self.config.nudge_step
        };
        let (dx, dy) = direction.delta(amount);
        self.move_by(&id, dx, dy)
    }

    /// Set width and height.
    pub fn resize(&mut self, id: &ElementId, width: f32, height: f32) -> bool {
        let changed = self.store.resize(id, width, height);
        self.commit_if(changed)
    }

    /// Set width and height from panel text. Non-numeric input is ignored.
    pub fn resize_from_input(&mut self, id: &ElementId, width: &str, height: &str) -> bool {
        match (parse_dimension(width), parse_dimension(height)) {
            (Some(w), Some(h)) => self.resize(id, w, h),
            _ => false,
        }
    }

    /// Set rotation in degrees.
    pub fn rotate(&mut self, id: &ElementId, degrees: f32) -> bool {
        let changed = self.store.rotate(id, degrees);
        self.commit_if(changed)
    }

    /// Set opacity, clamped to `[0, 1]`.
    pub fn set_opacity(&mut self, id: &ElementId, value: f32) -> bool {
        let changed = self.store.set_opacity(id, value);
        self.commit_if(changed)
    }

    /// Change the element's primary color.
    pub fn recolor(&mut self, id: &ElementId, color: &str) -> bool {
        let changed = self.store.recolor(id, color);
        self.commit_if(changed)
    }

    /// Duplicate an element; the copy becomes the selection.
    pub fn duplicate(&mut self, id: &ElementId) -> Option<ElementId> {
        let new_id = self.store.duplicate(id)?;
        self.commit();
        Some(new_id)
    }

    /// Duplicate the selected element.
    pub fn duplicate_selected(&mut self) -> Option<ElementId> {
        let id = self.store.selection().current().cloned()?;
        self.duplicate(&id)
    }

    /// Swap an element with its z-order neighbour.
    pub fn reorder(&mut self, id: &ElementId, direction: ReorderDirection) -> bool {
        let changed = self.store.reorder(id, direction);
        self.commit_if(changed)
    }

    /// Flip visibility.
    pub fn toggle_visible(&mut self, id: &ElementId) -> bool {
        let changed = self.store.toggle_visible(id);
        self.commit_if(changed)
    }

    /// Flip the lock flag.
    pub fn toggle_locked(&mut self, id: &ElementId) -> bool {
        let changed = self.store.toggle_locked(id);
        self.commit_if(changed)
    }

    /// Delete an element, clearing the selection if it pointed at it.
    pub fn delete(&mut self, id: &ElementId) -> bool {
        let changed = self.store.remove_element(id).is_some();
        self.commit_if(changed)
    }

    /// Delete the selected element.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.store.selection().current().cloned() else {
            return false;
        };
        self.delete(&id)
    }

    /// Change the canvas size.
    pub fn set_canvas_size(&mut self, width: f32, height: f32) -> bool {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return false;
        }
        let document = &mut self.store.document;
        let changed = document.width != width || document.height != height;
        document.width = width;
        document.height = height;
        self.commit_if(changed)
    }

    /// Resize the canvas to a preset.
    pub fn apply_canvas_preset(&mut self, preset: &CanvasPreset) -> bool {
        self.set_canvas_size(preset.width, preset.height)
    }

    /// Replace every element at once.
    ///
    /// The list is validated as a whole first; if anything is invalid the
    /// document is left untouched and the error is recorded.
    ///
    /// # Errors
    ///
    /// Returns the validation failure.
    pub fn replace_all(&mut self, elements: Vec<Element>) -> CanvasResult<()> {
        if let Err(e) = validate_elements(&elements) {
            let err = CanvasError::from(e);
            self.last_error = Some(err.to_string());
            return Err(err);
        }
        self.install_elements(elements);
        Ok(())
    }

    /// Replace every element from a raw JSON array.
    ///
    /// # Errors
    ///
    /// Returns the parse or validation failure; the document is untouched.
    pub fn replace_all_json(&mut self, value: &serde_json::Value) -> CanvasResult<()> {
        match crate::schema::parse_elements(value) {
            Ok(elements) => {
                self.install_elements(elements);
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn install_elements(&mut self, elements: Vec<Element>) {
        let mut document = self.store.document().clone();
        document.set_elements(elements);
        self.store.replace_document(document);
        self.last_error = None;
        self.commit();
    }

    /// Place an element exactly, bypassing clamping and history. The
    /// interaction layer commits once when the gesture ends.
    pub(crate) fn drag_to(&mut self, id: &ElementId, x: f32, y: f32) -> bool {
        let changed = self.store.set_position(id, x, y);
        if changed {
            self.revision += 1;
        }
        changed
    }

    // -----------------------------------------------------------------------
    // Remote requests
    // -----------------------------------------------------------------------

    /// Whether a request for `action` is outstanding.
    #[must_use]
    pub fn is_busy(&self, action: RemoteAction) -> bool {
        self.requests.is_busy(action)
    }

    /// Start an AI edit of the current document.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Busy`] if an AI edit is already in flight.
    pub fn begin_ai_edit(
        &mut self,
        document_id: &str,
        instruction: &str,
    ) -> CanvasResult<(RemoteTicket, AiEditRequest)> {
        let ticket = self.requests.begin(RemoteAction::AiEdit, self.revision)?;
        let request = AiEditRequest {
            document_id: document_id.to_string(),
            instruction: instruction.to_string(),
            elements: self.list_elements(),
            selected_element_id: self.store.selected_element().map(|e| e.id.clone()),
        };
        tracing::debug!(
            "AI edit started (generation {}) for {document_id}",
            ticket.generation()
        );
        Ok((ticket, request))
    }

    /// Apply the outcome of an AI edit request.
    ///
    /// `response` is `Err` with a message when the call itself failed
    /// (network, status, undecodable body).
    pub fn finish_ai_edit(
        &mut self,
        ticket: &RemoteTicket,
        response: Result<AiEditResponse, String>,
    ) -> RemoteOutcome {
        if !self.requests.finish(ticket) {
            tracing::debug!(
                "Discarding AI edit response for abandoned generation {}",
                ticket.generation()
            );
            return RemoteOutcome::Discarded;
        }

        let elements = match response
            .map_err(CanvasError::Remote)
            .and_then(AiEditResponse::into_elements)
        {
            Ok(elements) => elements,
            Err(e) => {
                tracing::info!("AI edit rejected: {e}");
                self.last_error = Some(e.to_string());
                return RemoteOutcome::Rejected(e.to_string());
            }
        };

        let overwrote_local_edits = self.revision != ticket.base_revision();
        if overwrote_local_edits {
            match self.config.stale_response_policy {
                StaleResponsePolicy::DiscardStale => {
                    tracing::info!("Discarding AI edit computed against an older document");
                    return RemoteOutcome::Discarded;
                }
                StaleResponsePolicy::LastResponseWins => {
                    tracing::warn!(
                        "AI edit response overwrites local edits made while it was pending"
                    );
                }
            }
        }

        self.install_elements(elements);
        tracing::info!("AI edit applied ({} elements)", self.document().element_count());
        RemoteOutcome::Applied {
            overwrote_local_edits,
        }
    }

    /// Start an export of the current document.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Busy`] if an export is already in flight.
    pub fn begin_export(
        &mut self,
        document_id: &str,
        format: ExportFormat,
        quality: QualityPreset,
    ) -> CanvasResult<(RemoteTicket, ExportRequest)> {
        let ticket = self.requests.begin(RemoteAction::Export, self.revision)?;
        let request = ExportRequest::new(document_id, self.list_elements(), format, quality);
        Ok((ticket, request))
    }

    /// Settle an export request. Exports never change the document.
    pub fn finish_export(
        &mut self,
        ticket: &RemoteTicket,
        result: Result<(), String>,
    ) -> RemoteOutcome {
        if !self.requests.finish(ticket) {
            return RemoteOutcome::Discarded;
        }
        match result {
            Ok(()) => RemoteOutcome::Completed,
            Err(message) => {
                tracing::info!("Export failed: {message}");
                self.last_error = Some(message.clone());
                RemoteOutcome::Rejected(message)
            }
        }
    }

    /// Give up on an outstanding request; its response will be discarded.
    pub fn abandon(&mut self, action: RemoteAction) {
        self.requests.abandon(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Element, ElementType, Transform};
    use serde_json::json;

    fn text_at(id: &str, x: f32, y: f32) -> Element {
        Element::new(ElementType::Text.default_kind())
            .with_id(id)
            .with_transform(Transform {
                x,
                y,
                ..Transform::default()
            })
    }

    fn editor_with(elements: Vec<Element>) -> Editor {
        Editor::with_document(Document::with_elements(800.0, 600.0, elements))
    }

    #[test]
    fn test_new_editor_has_baseline_entry() {
        let editor = Editor::new(800.0, 600.0);
        assert_eq!(editor.history().len(), 1);
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_undo_on_empty_document() {
        let mut editor = Editor::default();
        assert!(!editor.undo());
        assert!(editor.document().is_empty());
        assert!(editor.last_error().is_none());
    }

    #[test]
    fn test_each_mutation_commits_once() {
        let mut editor = Editor::default();
        let id = editor.add_element(ElementType::Rectangle);
        assert_eq!(editor.history().len(), 2);

        editor.move_by(&id, 5.0, 5.0);
        editor.resize(&id, 50.0, 60.0);
        editor.rotate(&id, 30.0);
        editor.set_opacity(&id, 0.5);
        editor.recolor(&id, "#000000");
        editor.toggle_visible(&id);
        editor.toggle_locked(&id);
        assert_eq!(editor.history().len(), 9);

        let patch = ElementPatch {
            x: Some(1.0),
            y: Some(2.0),
            width: Some(3.0),
            ..ElementPatch::default()
        };
        assert!(editor.update_element(&id, &patch));
        assert_eq!(editor.history().len(), 10);
    }

    #[test]
    fn test_overflowing_move_keeps_history_restorable() {
        let mut editor = editor_with(vec![text_at("t1", 3e38, 10.0)]);
        assert!(!editor.move_by(&"t1".into(), 3e38, 0.0));
        assert_eq!(editor.history().len(), 1);

        assert!(editor.move_by(&"t1".into(), 0.0, 5.0));
        assert!(editor.undo());
        assert!(editor.last_error().is_none());
        let t = editor.get_element(&"t1".into()).expect("t1").transform;
        assert!((t.y - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_noop_mutations_do_not_commit() {
        let mut editor = editor_with(vec![text_at("t1", 0.0, 0.0)]);
        let ghost = ElementId::from("ghost");

        assert!(!editor.move_by(&ghost, 1.0, 1.0));
        assert!(!editor.move_by(&"t1".into(), -5.0, -5.0));
        assert!(!editor.resize(&"t1".into(), f32::NAN, 1.0));
        assert!(!editor.resize_from_input(&"t1".into(), "wide", "10"));
        assert!(!editor.update_element(&ghost, &ElementPatch::default()));
        assert!(!editor.delete(&ghost));
        assert!(editor.duplicate(&ghost).is_none());
        assert!(!editor.reorder(&"t1".into(), ReorderDirection::Up));
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_move_clamp_scenario() {
        let mut editor = editor_with(vec![text_at("t1", 10.0, 10.0)]);
        assert!(editor.move_by(&"t1".into(), -50.0, -50.0));
        let t = editor.get_element(&"t1".into()).expect("t1").transform;
        assert!(t.x.abs() < f32::EPSILON);
        assert!(t.y.abs() < f32::EPSILON);
    }

    #[test]
    fn test_undo_redo_restores_exact_document() {
        let mut editor = Editor::default();
        let id = editor.add_element(ElementType::Text);
        editor.move_by(&id, 30.0, 40.0);
        let before_undo = editor.document().clone();

        assert!(editor.undo());
        assert_ne!(editor.document(), &before_undo);
        assert!(editor.redo());
        assert_eq!(editor.document(), &before_undo);
        assert!(!editor.redo());
        assert_eq!(editor.document(), &before_undo);
    }

    #[test]
    fn test_undo_stops_at_baseline() {
        let mut editor = Editor::default();
        editor.add_element(ElementType::Circle);
        assert!(editor.undo());
        assert!(editor.document().is_empty());
        assert!(!editor.undo());
        assert!(editor.document().is_empty());
    }

    #[test]
    fn test_undo_clears_selection_of_vanished_element() {
        let mut editor = Editor::default();
        let id = editor.add_element(ElementType::Image);
        assert_eq!(editor.selection().current(), Some(&id));
        editor.undo();
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn test_delete_selected() {
        let mut editor = Editor::default();
        let id = editor.add_element(ElementType::Text);
        assert!(editor.delete_selected());
        assert!(editor.get_element(&id).is_none());
        assert!(editor.selection().is_empty());
        assert!(!editor.delete_selected());
    }

    #[test]
    fn test_duplicate_selected_selects_copy() {
        let mut editor = Editor::default();
        let id = editor.add_element(ElementType::Rectangle);
        let copy = editor.duplicate_selected().expect("copy");
        assert_ne!(copy, id);
        assert_eq!(editor.selection().current(), Some(&copy));
        assert_eq!(editor.document().element_count(), 2);
    }

    #[test]
    fn test_nudge_uses_config_steps() {
        let mut editor = editor_with(vec![text_at("t1", 100.0, 100.0)]);
        assert!(!editor.nudge(NudgeDirection::Left, false));

        editor.select("t1".into());
        editor.nudge(NudgeDirection::Left, false);
        editor.nudge(NudgeDirection::Down, true);
        let t = editor.get_element(&"t1".into()).expect("t1").transform;
        assert!((t.x - 99.0).abs() < f32::EPSILON);
        assert!((t.y - 110.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_locked_elements_accept_panel_edits() {
        let mut editor = editor_with(vec![text_at("t1", 0.0, 0.0).with_locked(true)]);
        assert!(editor.resize(&"t1".into(), 10.0, 10.0));
        assert!(editor.recolor(&"t1".into(), "#ff0000"));
    }

    #[test]
    fn test_canvas_preset() {
        let mut editor = Editor::default();
        let preset = crate::presets::canvas_preset("Banner").expect("preset");
        assert!(editor.apply_canvas_preset(preset));
        assert!((editor.document().width - 728.0).abs() < f32::EPSILON);
        assert!(!editor.apply_canvas_preset(preset));
        assert!(!editor.set_canvas_size(-1.0, 10.0));
    }

    #[test]
    fn test_replace_all_rejects_missing_fields() {
        let mut editor = editor_with(vec![text_at("t1", 10.0, 10.0)]);
        let before = editor.document().clone();

        let payload = json!([
            {"id": "a", "type": "text", "x": 0, "y": 0, "width": 10, "height": 10},
            {"id": "b", "type": "rectangle", "x": 0, "y": 0}
        ]);
        assert!(editor.replace_all_json(&payload).is_err());
        assert_eq!(editor.document(), &before);
        assert!(editor.last_error().is_some());
        assert_eq!(editor.history().len(), 1);
    }

    #[test]
    fn test_replace_all_rejects_duplicate_ids() {
        let mut editor = Editor::default();
        let result = editor.replace_all(vec![text_at("a", 0.0, 0.0), text_at("a", 1.0, 1.0)]);
        assert!(result.is_err());
        assert!(editor.document().is_empty());
        assert!(editor.last_error().is_some());
    }

    #[test]
    fn test_replace_all_commits_once_and_is_undoable() {
        let mut editor = editor_with(vec![text_at("t1", 10.0, 10.0)]);
        editor
            .replace_all(vec![text_at("x", 1.0, 1.0), text_at("y", 2.0, 2.0)])
            .expect("replace");
        assert_eq!(editor.document().element_count(), 2);
        assert_eq!(editor.history().len(), 2);

        editor.undo();
        assert!(editor.get_element(&"t1".into()).is_some());
    }

    #[test]
    fn test_ai_edit_applies_response() {
        let mut editor = editor_with(vec![text_at("t1", 10.0, 10.0)]);
        editor.select("t1".into());
        let (ticket, request) = editor.begin_ai_edit("doc-1", "make it red").expect("begin");
        assert_eq!(request.selected_element_id, Some("t1".into()));
        assert!(editor.is_busy(RemoteAction::AiEdit));

        let response = AiEditResponse {
            success: true,
            elements: Some(json!([
                {"id": "t1", "type": "text", "color": "#ff0000", "x": 10, "y": 10, "width": 200, "height": 40}
            ])),
            error: None,
        };
        let outcome = editor.finish_ai_edit(&ticket, Ok(response));
        assert_eq!(
            outcome,
            RemoteOutcome::Applied {
                overwrote_local_edits: false
            }
        );
        assert!(!editor.is_busy(RemoteAction::AiEdit));
        assert_eq!(editor.history().len(), 2);
    }

    #[test]
    fn test_ai_edit_is_not_reentrant() {
        let mut editor = Editor::default();
        let _pending = editor.begin_ai_edit("doc", "one").expect("begin");
        assert!(matches!(
            editor.begin_ai_edit("doc", "two"),
            Err(CanvasError::Busy(_))
        ));
        // Other edits are still allowed while busy.
        editor.add_element(ElementType::Text);
        assert_eq!(editor.document().element_count(), 1);
    }

    #[test]
    fn test_ai_edit_failure_leaves_document() {
        let mut editor = editor_with(vec![text_at("t1", 10.0, 10.0)]);
        let before = editor.document().clone();

        let (ticket, _) = editor.begin_ai_edit("doc", "x").expect("begin");
        let outcome = editor.finish_ai_edit(
            &ticket,
            Ok(AiEditResponse {
                success: false,
                elements: None,
                error: None,
            }),
        );
        assert!(matches!(outcome, RemoteOutcome::Rejected(_)));
        assert_eq!(editor.document(), &before);

        let (ticket, _) = editor.begin_ai_edit("doc", "x").expect("begin again");
        let outcome = editor.finish_ai_edit(&ticket, Err("connection refused".to_string()));
        assert!(matches!(outcome, RemoteOutcome::Rejected(_)));
        assert_eq!(editor.document(), &before);
        assert!(editor.last_error().is_some_and(|e| e.contains("connection refused")));
    }

    fn replacement() -> AiEditResponse {
        AiEditResponse {
            success: true,
            elements: Some(json!([
                {"id": "ai", "type": "circle", "x": 0, "y": 0, "width": 10, "height": 10}
            ])),
            error: None,
        }
    }

    #[test]
    fn test_late_response_overwrites_by_default() {
        let mut editor = Editor::default();
        let (ticket, _) = editor.begin_ai_edit("doc", "x").expect("begin");
        editor.add_element(ElementType::Text);

        let outcome = editor.finish_ai_edit(&ticket, Ok(replacement()));
        assert_eq!(
            outcome,
            RemoteOutcome::Applied {
                overwrote_local_edits: true
            }
        );
        assert!(editor.get_element(&"ai".into()).is_some());
        assert_eq!(editor.document().element_count(), 1);
    }

    #[test]
    fn test_late_response_discarded_when_configured() {
        let config = EditorConfig {
            stale_response_policy: StaleResponsePolicy::DiscardStale,
            ..EditorConfig::default()
        };
        let mut editor = Editor::with_storage(Document::default(), MemorySnapshots::new(), config);
        let (ticket, _) = editor.begin_ai_edit("doc", "x").expect("begin");
        editor.add_element(ElementType::Text);

        assert_eq!(
            editor.finish_ai_edit(&ticket, Ok(replacement())),
            RemoteOutcome::Discarded
        );
        assert!(editor.get_element(&"ai".into()).is_none());
        assert!(!editor.is_busy(RemoteAction::AiEdit));
    }

    #[test]
    fn test_abandoned_request_is_discarded() {
        let mut editor = Editor::default();
        let (ticket, _) = editor.begin_ai_edit("doc", "x").expect("begin");
        editor.abandon(RemoteAction::AiEdit);

        assert_eq!(
            editor.finish_ai_edit(&ticket, Ok(replacement())),
            RemoteOutcome::Discarded
        );
        assert!(editor.document().is_empty());
    }

    #[test]
    fn test_export_does_not_touch_document() {
        let mut editor = editor_with(vec![text_at("t1", 0.0, 0.0)]);
        let before = editor.document().clone();
        let (ticket, request) = editor
            .begin_export("doc", ExportFormat::Png, QualityPreset::High)
            .expect("begin");
        assert_eq!(request.elements.len(), 1);
        assert!(editor.begin_export("doc", ExportFormat::Png, QualityPreset::High).is_err());

        assert_eq!(editor.finish_export(&ticket, Ok(())), RemoteOutcome::Completed);
        assert_eq!(editor.document(), &before);
        assert!(!editor.is_busy(RemoteAction::Export));
    }

    #[test]
    fn test_corrupt_history_is_a_noop_restore() {
        let mut storage = MemorySnapshots::new();
        storage.push("corrupted".to_string());
        let mut editor =
            Editor::with_storage(Document::default(), storage, EditorConfig::default());
        editor.add_element(ElementType::Text);
        editor.undo();
        let current = editor.document().clone();

        // Entry 0 is the unparseable snapshot.
        assert!(!editor.undo());
        assert_eq!(editor.document(), &current);
        assert!(editor.last_error().is_some_and(|e| e.contains("Corrupted")));
    }
}
