//! # Remote Requests
//!
//! Contracts for the external AI-edit and export services, and the
//! bookkeeping that keeps their asynchronous responses from corrupting the
//! document.
//!
//! ```text
//! begin(action)  -> ticket { generation, base_revision }   (busy until finish/abandon)
//! ...user keeps editing, revision advances...
//! finish(ticket) -> generation current?  no  -> Discarded
//!                   base_revision stale? yes -> StaleResponsePolicy decides
//! ```
//!
//! A response whose ticket generation is no longer current (the request was
//! abandoned) is always discarded. A response computed against an older
//! document revision is applied under [`StaleResponsePolicy::LastResponseWins`]
//! and dropped under [`StaleResponsePolicy::DiscardStale`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::presets::{ExportFormat, QualityPreset, QualitySettings};
use crate::schema::parse_elements;
use crate::{CanvasError, CanvasResult, Element, ElementId};

/// Outbound actions that are guarded by a busy flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteAction {
    /// AI element edit.
    AiEdit,
    /// Export rendering.
    Export,
}

impl std::fmt::Display for RemoteAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AiEdit => f.write_str("ai_edit"),
            Self::Export => f.write_str("export"),
        }
    }
}

/// What to do with a response computed against an older document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaleResponsePolicy {
    /// Apply it anyway, overwriting newer local edits.
    #[default]
    LastResponseWins,
    /// Drop it and keep the local edits.
    DiscardStale,
}

/// Handle for one outstanding remote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteTicket {
    action: RemoteAction,
    generation: u64,
    base_revision: u64,
}

impl RemoteTicket {
    /// The guarded action.
    #[must_use]
    pub const fn action(&self) -> RemoteAction {
        self.action
    }

    /// Generation number issued for this request.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Document revision when the request was built.
    #[must_use]
    pub const fn base_revision(&self) -> u64 {
        self.base_revision
    }
}

/// Busy flags and generation counters per action.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generations: HashMap<RemoteAction, u64>,
    in_flight: HashMap<RemoteAction, u64>,
}

impl RequestTracker {
    /// Create a tracker with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `action`.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Busy`] if the same action is already in flight.
    pub fn begin(&mut self, action: RemoteAction, revision: u64) -> CanvasResult<RemoteTicket> {
        if self.is_busy(action) {
            return Err(CanvasError::Busy(action.to_string()));
        }
        let generation = self.generations.entry(action).or_insert(0);
        *generation += 1;
        let generation = *generation;
        self.in_flight.insert(action, generation);
        Ok(RemoteTicket {
            action,
            generation,
            base_revision: revision,
        })
    }

    /// Whether a request for `action` is outstanding.
    #[must_use]
    pub fn is_busy(&self, action: RemoteAction) -> bool {
        self.in_flight.contains_key(&action)
    }

    /// Forget the outstanding request for `action`. Its response will be
    /// discarded if it ever arrives.
    pub fn abandon(&mut self, action: RemoteAction) {
        self.in_flight.remove(&action);
    }

    /// Settle a ticket. Returns `true` if it belonged to the request in
    /// flight, which clears the busy flag.
    pub fn finish(&mut self, ticket: &RemoteTicket) -> bool {
        if self.in_flight.get(&ticket.action) == Some(&ticket.generation) {
            self.in_flight.remove(&ticket.action);
            true
        } else {
            false
        }
    }
}

/// Result of settling a remote request against the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// The response replaced the document.
    Applied {
        /// Local edits made after the request started were overwritten.
        overwrote_local_edits: bool,
    },
    /// The request finished with no document change (exports).
    Completed,
    /// The response was unusable; the document is untouched.
    Rejected(String),
    /// The response was ignored (abandoned or stale).
    Discarded,
}

/// Request body for the AI element edit service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiEditRequest {
    /// Document the edit applies to.
    pub document_id: String,
    /// Natural-language instruction.
    pub instruction: String,
    /// Current elements in z-order.
    pub elements: Vec<Element>,
    /// Selected element, if any.
    pub selected_element_id: Option<ElementId>,
}

/// Response body from the AI element edit service.
///
/// `elements` is kept as raw JSON so that malformed entries are reported
/// as validation failures instead of transport errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiEditResponse {
    /// Whether the service produced an edit.
    pub success: bool,
    /// Full replacement element list.
    #[serde(default)]
    pub elements: Option<serde_json::Value>,
    /// Service-provided failure message.
    #[serde(default)]
    pub error: Option<String>,
}

impl AiEditResponse {
    /// Extract and validate the replacement elements.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Remote`] when `success` is false, or a payload
    /// error when the element list is missing or invalid.
    pub fn into_elements(self) -> CanvasResult<Vec<Element>> {
        if !self.success {
            return Err(CanvasError::Remote(
                self.error
                    .unwrap_or_else(|| "service reported failure".to_string()),
            ));
        }
        let elements = self
            .elements
            .ok_or_else(|| CanvasError::InvalidPayload("response has no elements".to_string()))?;
        parse_elements(&elements)
    }
}

/// Request body for the export service. The response is a binary blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Document being exported.
    pub document_id: String,
    /// Elements in z-order.
    pub elements: Vec<Element>,
    /// Output format.
    pub format: ExportFormat,
    /// Named quality preset.
    pub quality_preset: QualityPreset,
    /// Resolution implied by the preset.
    pub quality: QualitySettings,
}

impl ExportRequest {
    /// Build an export request for the given elements.
    #[must_use]
    pub fn new(
        document_id: impl Into<String>,
        elements: Vec<Element>,
        format: ExportFormat,
        quality_preset: QualityPreset,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            elements,
            format,
            quality_preset,
            quality: quality_preset.settings(),
        }
    }

    /// Suggested download file name.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("design-{}.{}", self.document_id, self.format.extension())
    }
}
