//! Parsing of element lists supplied by external collaborators.

use serde_json::Value;

use crate::validation::{validate_element, validate_elements};
use crate::{CanvasError, CanvasResult, Element};

/// Parse and validate a JSON array of elements.
///
/// The whole payload is rejected if any entry is malformed, invalid, or
/// shares an id with another entry.
///
/// # Errors
///
/// Returns [`CanvasError::InvalidPayload`] if the value is not an array or an
/// entry cannot be parsed, [`CanvasError::InvalidElement`] if an entry breaks
/// a validation rule, or [`CanvasError::Validation`] for list-level rules.
pub fn parse_elements(value: &Value) -> CanvasResult<Vec<Element>> {
    let entries = value
        .as_array()
        .ok_or_else(|| CanvasError::InvalidPayload("elements must be an array".to_string()))?;

    let mut elements = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let element: Element = serde_json::from_value(entry.clone())
            .map_err(|e| CanvasError::InvalidPayload(format!("element {index}: {e}")))?;
        validate_element(&element).map_err(|source| CanvasError::InvalidElement {
            id: element.id.to_string(),
            source,
        })?;
        elements.push(element);
    }

    validate_elements(&elements)?;
    Ok(elements)
}
