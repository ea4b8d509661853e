//! WebAssembly bindings for studio-core.
//!
//! This module provides JavaScript-callable functions when compiled to WASM.
//! Elements and events cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::{
    CanvasInteraction, Editor, ElementId, ElementPatch, ElementType, InputEvent, ReorderDirection,
};

/// Initialize the studio WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Editor instance for WASM.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: Editor,
    canvas: CanvasInteraction,
}

#[wasm_bindgen]
impl WasmEditor {
    /// Create an editor over an empty canvas.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            editor: Editor::new(width, height),
            canvas: CanvasInteraction::new(),
        }
    }

    /// Get the current document as JSON.
    #[wasm_bindgen(js_name = getDocumentJson)]
    #[must_use]
    pub fn get_document_json(&self) -> String {
        self.editor.document().to_json().unwrap_or_default()
    }

    /// Get the elements in z-order as a JSON array.
    #[wasm_bindgen(js_name = listElementsJson)]
    #[must_use]
    pub fn list_elements_json(&self) -> String {
        serde_json::to_string(&self.editor.list_elements()).unwrap_or_default()
    }

    /// Id of the selected element, if any.
    #[wasm_bindgen(js_name = selectedId)]
    #[must_use]
    pub fn selected_id(&self) -> Option<String> {
        self.editor.selection().current().map(ToString::to_string)
    }

    /// Add an element by type name and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error string for an unknown type name.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&mut self, element_type: &str) -> Result<String, String> {
        let element_type: ElementType = element_type.parse()?;
        Ok(self.editor.add_element(element_type).to_string())
    }

    /// Merge a JSON patch into an element.
    ///
    /// # Errors
    ///
    /// Returns an error string if the patch is not valid JSON.
    #[wasm_bindgen(js_name = updateElement)]
    pub fn update_element(&mut self, id: &str, patch_json: &str) -> Result<bool, String> {
        let patch: ElementPatch = serde_json::from_str(patch_json).map_err(|e| e.to_string())?;
        Ok(self.editor.update_element(&ElementId::from(id), &patch))
    }

    /// Delete an element.
    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&mut self, id: &str) -> bool {
        self.editor.delete(&ElementId::from(id))
    }

    /// Duplicate an element and return the copy's id.
    #[wasm_bindgen(js_name = duplicateElement)]
    pub fn duplicate_element(&mut self, id: &str) -> Option<String> {
        self.editor
            .duplicate(&ElementId::from(id))
            .map(|id| id.to_string())
    }

    /// Move an element one layer up (`"up"`) or down (`"down"`).
    #[wasm_bindgen(js_name = moveLayer)]
    pub fn move_layer(&mut self, id: &str, direction: &str) -> bool {
        let direction = match direction {
            "up" => ReorderDirection::Up,
            "down" => ReorderDirection::Down,
            _ => return false,
        };
        self.editor.reorder(&ElementId::from(id), direction)
    }

    /// Replace every element from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error string if the payload is invalid; the document is
    /// unchanged in that case.
    #[wasm_bindgen(js_name = replaceAllJson)]
    pub fn replace_all_json(&mut self, json: &str) -> Result<(), String> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
        self.editor
            .replace_all_json(&value)
            .map_err(|e| e.to_string())
    }

    /// Feed one input event (JSON-encoded [`InputEvent`]).
    ///
    /// # Errors
    ///
    /// Returns an error string if the event cannot be parsed.
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event_json: &str) -> Result<bool, String> {
        let event: InputEvent = serde_json::from_str(event_json).map_err(|e| e.to_string())?;
        Ok(self.canvas.handle_event(&mut self.editor, &event))
    }

    /// Set the zoom factor.
    #[wasm_bindgen(js_name = setZoom)]
    pub fn set_zoom(&mut self, zoom: f32) {
        self.canvas.viewport_mut().set_zoom(zoom);
    }

    /// Undo the last action.
    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    /// Redo the last undone action.
    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    /// Whether undo is available.
    #[wasm_bindgen(js_name = canUndo)]
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    /// Whether redo is available.
    #[wasm_bindgen(js_name = canRedo)]
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Take the last error message, clearing it.
    #[wasm_bindgen(js_name = takeError)]
    pub fn take_error(&mut self) -> Option<String> {
        let message = self.editor.last_error().map(ToString::to_string);
        self.editor.clear_error();
        message
    }
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new(crate::document::DEFAULT_WIDTH, crate::document::DEFAULT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasm_editor_starts_empty() {
        let editor = WasmEditor::default();
        assert_eq!(editor.list_elements_json(), "[]");
        assert!(!editor.can_undo());
    }

    #[test]
    fn add_and_undo_through_bindings() {
        let mut editor = WasmEditor::default();
        let id = editor.add_element("circle").expect("add");
        assert_eq!(editor.selected_id(), Some(id));
        assert!(editor.undo());
        assert_eq!(editor.list_elements_json(), "[]");
        assert!(editor.add_element("triangle").is_err());
    }

    #[test]
    fn replace_all_rejects_bad_payload() {
        let mut editor = WasmEditor::default();
        assert!(editor.replace_all_json(r#"[{"id":"a","type":"text"}]"#).is_err());
        assert!(editor.take_error().is_some());
        assert!(editor.take_error().is_none());
    }

    #[test]
    fn handle_event_drags_element() {
        let mut editor = WasmEditor::default();
        let id = editor.add_element("rectangle").expect("add");
        editor
            .handle_event(r#"{"type":"Pointer","data":{"phase":"down","x":60,"y":60}}"#)
            .expect("down");
        editor
            .handle_event(r#"{"type":"Pointer","data":{"phase":"up","x":70,"y":60}}"#)
            .expect("up");
        let doc: serde_json::Value =
            serde_json::from_str(&editor.get_document_json()).expect("json");
        assert_eq!(doc["elements"][0]["id"], id.as_str());
        assert_eq!(doc["elements"][0]["x"], 60.0);
    }
}
