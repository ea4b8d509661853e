//! Element store: the current document plus the selection that points into it.
//!
//! The store performs no history bookkeeping. [`Editor`](crate::Editor)
//! commits one snapshot after each logical user action.

use serde::{Deserialize, Serialize};

use crate::{
    Document, Element, ElementId, ElementKind, ElementType, ImageFit, Selection, TextAlign,
    Transform,
};

/// A partial set of attributes to merge into an element.
///
/// Fields left as `None` are untouched. Fields that do not apply to the
/// element's kind (for example `fill` on text) are ignored, as are
/// non-finite numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)] // Field names mirror the element attributes they patch
pub struct ElementPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub rotation: Option<f32>,
    pub z_index: Option<i32>,
    pub opacity: Option<f32>,
    pub visible: Option<bool>,
    pub locked: Option<bool>,
    #[serde(alias = "text")]
    pub content: Option<String>,
    pub font_size: Option<f32>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<String>,
    pub text_decoration: Option<String>,
    pub text_align: Option<TextAlign>,
    pub color: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    pub border_radius: Option<f32>,
    pub src: Option<String>,
    pub fit: Option<ImageFit>,
}

fn set_finite(target: &mut f32, value: Option<f32>) {
    if let Some(v) = value.filter(|v| v.is_finite()) {
        *target = v;
    }
}

fn set_value<T>(target: &mut T, value: Option<&T>)
where
    T: Clone,
{
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl ElementPatch {
    /// Merge this patch into `element`.
    pub fn apply_to(&self, element: &mut Element) {
        let t = &mut element.transform;
        set_finite(&mut t.x, self.x);
        set_finite(&mut t.y, self.y);
        set_finite(&mut t.width, self.width);
        set_finite(&mut t.height, self.height);
        set_finite(&mut t.rotation, self.rotation);
        if let Some(z) = self.z_index {
            t.z_index = z;
        }
        if let Some(opacity) = self.opacity.filter(|v| !v.is_nan()) {
            element.opacity = opacity.clamp(0.0, 1.0);
        }
        set_value(&mut element.visible, self.visible.as_ref());
        set_value(&mut element.locked, self.locked.as_ref());

        match &mut element.kind {
            ElementKind::Text {
                content,
                font_size,
                font_family,
                font_weight,
                font_style,
                text_decoration,
                color,
                text_align,
            } => {
                set_value(content, self.content.as_ref());
                set_finite(font_size, self.font_size);
                set_value(font_family, self.font_family.as_ref());
                set_value(font_weight, self.font_weight.as_ref());
                set_value(font_style, self.font_style.as_ref());
                set_value(text_decoration, self.text_decoration.as_ref());
                set_value(color, self.color.as_ref());
                set_value(text_align, self.text_align.as_ref());
            }
            ElementKind::Rectangle {
                fill,
                stroke,
                stroke_width,
                border_radius,
            } => {
                set_value(fill, self.fill.as_ref());
                set_value(stroke, self.stroke.as_ref());
                set_finite(stroke_width, self.stroke_width);
                set_finite(border_radius, self.border_radius);
            }
            ElementKind::Circle {
                fill,
                stroke,
                stroke_width,
            } => {
                set_value(fill, self.fill.as_ref());
                set_value(stroke, self.stroke.as_ref());
                set_finite(stroke_width, self.stroke_width);
            }
            ElementKind::Image { src, fit } => {
                if let Some(new_src) = &self.src {
                    *src = Some(new_src.clone());
                }
                set_value(fit, self.fit.as_ref());
            }
            ElementKind::Background { color } => {
                set_value(color, self.color.as_ref());
            }
        }
    }
}

/// The current document and selection of one editor session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementStore {
    pub(crate) document: Document,
    pub(crate) selection: Selection,
}

impl ElementStore {
    /// Create a store over an existing document with nothing selected.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: Selection::new(),
        }
    }

    /// The current document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Select an element by id. Unknown ids are stored as given.
    pub fn select(&mut self, id: ElementId) {
        self.selection.select(id);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The selected element, resolved against the current document.
    #[must_use]
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection
            .current()
            .and_then(|id| self.document.get(id))
    }

    /// Add a new element of the given type with default content and geometry.
    ///
    /// Backgrounds cover the whole canvas from the origin; everything else
    /// lands at [`DEFAULT_ORIGIN`](crate::element::DEFAULT_ORIGIN). The new
    /// element is placed above all existing ones.
    pub fn add_element(&mut self, element_type: ElementType) -> Element {
        let mut element = Element::new(element_type.default_kind());
        if element_type == ElementType::Background {
            element.transform = Transform {
                x: 0.0,
                y: 0.0,
                width: self.document.width,
                height: self.document.height,
                ..element.transform
            };
        }
        element.transform.z_index = self.document.next_z_index();
        self.document.push(element.clone());
        tracing::debug!("Added {} element {}", element_type.as_str(), element.id);
        element
    }

    /// Insert a fully built element as-is.
    pub fn insert(&mut self, element: Element) -> ElementId {
        self.document.push(element)
    }

    /// Look up an element. Missing ids yield `None`.
    #[must_use]
    pub fn get_element(&self, id: &ElementId) -> Option<&Element> {
        self.document.get(id)
    }

    /// Merge `patch` into an element and return the updated copy.
    ///
    /// Returns `None` without touching anything when the id is unknown.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> Option<Element> {
        let element = self.document.get_mut(id)?;
        patch.apply_to(element);
        Some(element.clone())
    }

    /// Remove an element, clearing the selection if it pointed at it.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let removed = self.document.remove(id).ok()?;
        self.selection.clear_if(id);
        Some(removed)
    }

    /// A fresh snapshot of all elements in z-order (bottom first).
    #[must_use]
    pub fn list_elements(&self) -> Vec<Element> {
        self.document.z_ordered().into_iter().cloned().collect()
    }

    /// Swap in a whole document (undo/redo, bulk replacement).
    ///
    /// The selection survives only if its element still exists.
    pub fn replace_document(&mut self, document: Document) {
        self.document = document;
        if let Some(id) = self.selection.current().cloned() {
            if !self.document.contains(&id) {
                self.selection.clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_element_stacks_on_top() {
        let mut store = ElementStore::default();
        let a = store.add_element(ElementType::Text);
        let b = store.add_element(ElementType::Rectangle);

        assert_ne!(a.id, b.id);
        assert_eq!(a.transform.z_index, 0);
        assert_eq!(b.transform.z_index, 1);
        assert_eq!(store.document().element_count(), 2);
        assert!(store.selection().is_empty());
    }

    #[test]
    fn test_add_background_covers_canvas() {
        let mut store = ElementStore::new(Document::new(400.0, 300.0));
        let bg = store.add_element(ElementType::Background);
        assert!((bg.transform.x).abs() < f32::EPSILON);
        assert!((bg.transform.width - 400.0).abs() < f32::EPSILON);
        assert!((bg.transform.height - 300.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_get_missing_element_is_none() {
        let store = ElementStore::default();
        assert!(store.get_element(&"nope".into()).is_none());
    }

    #[test]
    fn test_update_element_merges_applicable_fields() {
        let mut store = ElementStore::default();
        let id = store.add_element(ElementType::Text).id;

        let patch = ElementPatch {
            x: Some(12.0),
            content: Some("Happy Birthday!".to_string()),
            fill: Some("#00ff00".to_string()),
            width: Some(f32::NAN),
            ..ElementPatch::default()
        };
        let updated = store.update_element(&id, &patch).expect("updated");

        assert!((updated.transform.x - 12.0).abs() < f32::EPSILON);
        assert!((updated.transform.width - 200.0).abs() < f32::EPSILON);
        assert_eq!(updated.kind.text_content(), Some("Happy Birthday!"));
    }

    #[test]
    fn test_update_missing_element_is_noop() {
        let mut store = ElementStore::default();
        store.add_element(ElementType::Circle);
        let before = store.clone();

        let patch = ElementPatch {
            x: Some(1.0),
            ..ElementPatch::default()
        };
        assert!(store.update_element(&"ghost".into(), &patch).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_patch_deserializes_from_camel_case() {
        let patch: ElementPatch =
            serde_json::from_str(r#"{"zIndex":3,"strokeWidth":4,"text":"Hi"}"#).expect("parse");
        assert_eq!(patch.z_index, Some(3));
        assert_eq!(patch.stroke_width, Some(4.0));
        assert_eq!(patch.content.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_patch_sets_text_styling() {
        let mut store = ElementStore::default();
        let id = store.add_element(ElementType::Text).id;

        let patch: ElementPatch = serde_json::from_value(serde_json::json!({
            "fontWeight": "bold",
            "fontStyle": "italic",
            "textDecoration": "underline",
            "textAlign": "center"
        }))
        .expect("parse");
        let updated = store.update_element(&id, &patch).expect("updated");

        let ElementKind::Text {
            font_weight,
            font_style,
            text_decoration,
            text_align,
            ..
        } = &updated.kind
        else {
            panic!("expected text element");
        };
        assert_eq!(font_weight, "bold");
        assert_eq!(font_style, "italic");
        assert_eq!(text_decoration, "underline");
        assert_eq!(*text_align, TextAlign::Center);
    }

    #[test]
    fn test_patch_sets_image_fit() {
        let mut store = ElementStore::default();
        let id = store.add_element(ElementType::Image).id;

        let patch: ElementPatch = serde_json::from_str(r#"{"fit":"contain"}"#).expect("parse");
        let updated = store.update_element(&id, &patch).expect("updated");
        assert!(matches!(
            updated.kind,
            ElementKind::Image {
                fit: ImageFit::Contain,
                ..
            }
        ));
    }

    #[test]
    fn test_remove_clears_selection() {
        let mut store = ElementStore::default();
        let id = store.add_element(ElementType::Image).id;
        store.select(id.clone());

        assert!(store.remove_element(&id).is_some());
        assert!(store.selection().is_empty());
        assert!(store.remove_element(&id).is_none());
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let mut store = ElementStore::default();
        let keep = store.add_element(ElementType::Image).id;
        let other = store.add_element(ElementType::Image).id;
        store.select(keep.clone());

        store.remove_element(&other);
        assert_eq!(store.selection().current(), Some(&keep));
    }

    #[test]
    fn test_list_elements_is_a_snapshot() {
        let mut store = ElementStore::default();
        let id = store.add_element(ElementType::Rectangle).id;
        let listed = store.list_elements();

        store.remove_element(&id);
        assert_eq!(listed.len(), 1);
        assert!(store.list_elements().is_empty());
    }

    #[test]
    fn test_selected_element_resolves_lazily() {
        let mut store = ElementStore::default();
        store.select("missing".into());
        assert!(store.selected_element().is_none());
        assert!(!store.selection().is_empty());
    }

    #[test]
    fn test_replace_document_drops_stale_selection() {
        let mut store = ElementStore::default();
        let id = store.add_element(ElementType::Text).id;
        store.select(id);

        store.replace_document(Document::default());
        assert!(store.selection().is_empty());
    }
}
