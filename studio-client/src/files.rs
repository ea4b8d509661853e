//! Document files on disk.
//!
//! A document file holds either a full document (`{"width", "height",
//! "elements"}`) or a bare element array, which is placed on a default-size
//! canvas.

use std::fs;
use std::path::Path;

use anyhow::Context;
use studio_core::validation::validate_elements;
use studio_core::{schema, Document};

/// Read and validate a document file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not JSON, or holds
/// invalid elements.
pub fn load_document(path: &Path) -> anyhow::Result<Document> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;

    if value.is_array() {
        let elements = schema::parse_elements(&value)
            .with_context(|| format!("invalid elements in {}", path.display()))?;
        let mut document = Document::default();
        document.set_elements(elements);
        return Ok(document);
    }

    let document: Document = serde_json::from_value(value)
        .with_context(|| format!("invalid document in {}", path.display()))?;
    validate_elements(document.elements())
        .with_context(|| format!("invalid elements in {}", path.display()))?;
    Ok(document)
}

/// Write a document as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_document(path: &Path, document: &Document) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!("Saved {} elements to {}", document.element_count(), path.display());
    Ok(())
}

/// Write exported file bytes.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_export(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
