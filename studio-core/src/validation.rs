//! Validation for element data arriving from outside the editor.
//!
//! Elements supplied by remote services MUST pass these checks before they
//! replace the document.

use std::collections::HashSet;

use thiserror::Error;

use crate::Element;

/// Maximum length for element IDs (UUIDs are 36 chars).
pub const MAX_ELEMENT_ID_LEN: usize = 64;
/// Maximum text content length in elements.
pub const MAX_TEXT_CONTENT_LEN: usize = 1_048_576; // 1MB
/// Maximum elements per document.
pub const MAX_ELEMENTS_PER_DOCUMENT: usize = 10_000;

/// Validation error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Element ID exceeds maximum length.
    #[error("element_id too long (max {MAX_ELEMENT_ID_LEN} chars)")]
    ElementIdTooLong,
    /// Element ID is empty or contains invalid characters.
    #[error("element_id contains invalid characters")]
    ElementIdInvalidChars,
    /// Two elements share an id.
    #[error("duplicate element_id: {0}")]
    DuplicateElementId(String),
    /// Text content exceeds maximum length.
    #[error("text content too long (max {MAX_TEXT_CONTENT_LEN} bytes)")]
    TextContentTooLong,
    /// Too many elements in the document.
    #[error("too many elements (max {MAX_ELEMENTS_PER_DOCUMENT})")]
    TooManyElements,
    /// Geometry is NaN or infinite.
    #[error("invalid transform: {0}")]
    InvalidTransform(String),
    /// Opacity is NaN or outside `0.0..=1.0`.
    #[error("invalid opacity: {0}")]
    InvalidOpacity(String),
}

fn is_valid_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

/// Validate an element ID.
///
/// Valid element IDs:
/// - 1-64 characters
/// - Alphanumeric, hyphen, underscore only (UUIDs are valid)
///
/// # Errors
///
/// Returns [`ValidationError::ElementIdTooLong`] if the ID exceeds 64 characters.
/// Returns [`ValidationError::ElementIdInvalidChars`] if the ID is empty or contains invalid characters.
pub fn validate_element_id(id: &str) -> Result<(), ValidationError> {
    if id.len() > MAX_ELEMENT_ID_LEN {
        return Err(ValidationError::ElementIdTooLong);
    }
    if id.is_empty() || !id.chars().all(is_valid_id_char) {
        return Err(ValidationError::ElementIdInvalidChars);
    }
    Ok(())
}

/// Validate text content length.
///
/// # Errors
///
/// Returns [`ValidationError::TextContentTooLong`] if the text exceeds 1MB.
pub fn validate_text_content(text: &str) -> Result<(), ValidationError> {
    if text.len() > MAX_TEXT_CONTENT_LEN {
        return Err(ValidationError::TextContentTooLong);
    }
    Ok(())
}

/// Validate element count in a document.
///
/// # Errors
///
/// Returns [`ValidationError::TooManyElements`] if the count reaches the limit.
pub fn validate_element_count(count: usize) -> Result<(), ValidationError> {
    if count >= MAX_ELEMENTS_PER_DOCUMENT {
        return Err(ValidationError::TooManyElements);
    }
    Ok(())
}

/// Validate a single element's id, geometry, opacity and text.
///
/// # Errors
///
/// Returns the first rule the element breaks.
pub fn validate_element(element: &Element) -> Result<(), ValidationError> {
    validate_element_id(element.id.as_str())?;
    if !element.transform.is_finite() {
        return Err(ValidationError::InvalidTransform(
            "coordinates must be finite".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&element.opacity) {
        return Err(ValidationError::InvalidOpacity(element.opacity.to_string()));
    }
    if let Some(text) = element.kind.text_content() {
        validate_text_content(text)?;
    }
    Ok(())
}

/// Validate a whole element list: count, per-element rules and id uniqueness.
///
/// # Errors
///
/// Returns the first rule any element breaks.
pub fn validate_elements(elements: &[Element]) -> Result<(), ValidationError> {
    validate_element_count(elements.len())?;
    let mut seen = HashSet::with_capacity(elements.len());
    for element in elements {
        validate_element(element)?;
        if !seen.insert(element.id.as_str()) {
            return Err(ValidationError::DuplicateElementId(element.id.to_string()));
        }
    }
    Ok(())
}
