//! Drives an editor through remote AI-edit and export round trips.

use studio_core::{
    Editor, ElementId, ExportFormat, QualityPreset, RemoteAction, RemoteOutcome,
};

use crate::client::DesignService;

/// An editor bound to a document id and a design service.
pub struct DesignSession<C> {
    editor: Editor,
    service: C,
    document_id: String,
}

impl<C: DesignService> DesignSession<C> {
    /// Create a session.
    pub fn new(editor: Editor, service: C, document_id: impl Into<String>) -> Self {
        Self {
            editor,
            service,
            document_id: document_id.into(),
        }
    }

    /// The editor.
    #[must_use]
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Mutable access to the editor.
    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    /// Consume the session and return the editor.
    #[must_use]
    pub fn into_editor(self) -> Editor {
        self.editor
    }

    /// Document id sent with every request.
    #[must_use]
    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// Select an element to send with the next AI edit.
    pub fn select(&mut self, id: &str) {
        self.editor.select(ElementId::from(id));
    }

    /// Send the document to the AI service and apply its answer.
    ///
    /// Transport failures are reported as [`RemoteOutcome::Rejected`] and
    /// leave the document untouched.
    ///
    /// # Errors
    ///
    /// Returns [`studio_core::CanvasError::Busy`] if an AI edit is already
    /// running on this editor.
    pub async fn ai_edit(&mut self, instruction: &str) -> studio_core::CanvasResult<RemoteOutcome> {
        let (ticket, request) = self.editor.begin_ai_edit(&self.document_id, instruction)?;
        tracing::info!("Requesting AI edit: {instruction}");

        let response = self
            .service
            .ai_edit(&request)
            .await
            .map_err(|e| e.to_string());
        let outcome = self.editor.finish_ai_edit(&ticket, response);
        tracing::info!("AI edit outcome: {outcome:?}");
        Ok(outcome)
    }

    /// Render the document through the export service.
    ///
    /// Returns the file bytes, or `None` if the export failed; the failure
    /// message is kept as the editor's last error.
    ///
    /// # Errors
    ///
    /// Returns [`studio_core::CanvasError::Busy`] if an export is already
    /// running on this editor.
    pub async fn export(
        &mut self,
        format: ExportFormat,
        quality: QualityPreset,
    ) -> studio_core::CanvasResult<Option<Vec<u8>>> {
        let (ticket, request) = self.editor.begin_export(&self.document_id, format, quality)?;
        tracing::info!("Exporting {}", request.file_name());

        match self.service.export(&request).await {
            Ok(bytes) => {
                self.editor.finish_export(&ticket, Ok(()));
                tracing::info!("Export finished ({} bytes)", bytes.len());
                Ok(Some(bytes))
            }
            Err(e) => {
                self.editor.finish_export(&ticket, Err(e.to_string()));
                Ok(None)
            }
        }
    }

    /// Whether a request for `action` is outstanding.
    #[must_use]
    pub fn is_busy(&self, action: RemoteAction) -> bool {
        self.editor.is_busy(action)
    }
}
