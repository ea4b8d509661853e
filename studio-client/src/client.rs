//! HTTP client for the design services.
//!
//! Two endpoints, both `POST` with a JSON body:
//!
//! - `/api/design/ai-edit` answers with `{success, elements?, error?}`
//! - `/api/design/export` answers with the rendered file bytes

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use studio_core::{AiEditRequest, AiEditResponse, ExportRequest};
use thiserror::Error;
use url::Url;

use crate::ClientConfig;

const AI_EDIT_PATH: &str = "api/design/ai-edit";
const EXPORT_PATH: &str = "api/design/export";

/// Errors that can occur when talking to the design services.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL provided is invalid.
    #[error("invalid design service URL: {0}")]
    InvalidUrl(String),
    /// HTTP layer failed (connection, timeout, etc.).
    #[error("design service HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// JSON parsing failed.
    #[error("failed to parse design service payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The service answered with a non-success status.
    #[error("design service returned {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },
}

/// The remote operations an editor session depends on.
#[async_trait]
pub trait DesignService: Send + Sync {
    /// Request an AI edit of the given elements.
    async fn ai_edit(&self, request: &AiEditRequest) -> Result<AiEditResponse, ClientError>;

    /// Render the given elements and return the file bytes.
    async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>, ClientError>;
}

/// reqwest-backed client for the design services.
#[derive(Clone)]
pub struct StudioClient {
    inner: Arc<InnerClient>,
}

struct InnerClient {
    http: Client,
    ai_edit_url: Url,
    export_url: Url,
}

impl StudioClient {
    /// Create a client from configuration.
    ///
    /// `base_url` may carry a path prefix (`https://host/studio`); the
    /// service paths are appended to it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the URL is malformed.
    /// Returns [`ClientError::Http`] if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut base =
            Url::parse(&config.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let join = |path: &str| {
            base.join(path)
                .map_err(|e| ClientError::InvalidUrl(e.to_string()))
        };
        let ai_edit_url = join(AI_EDIT_PATH)?;
        let export_url = join(EXPORT_PATH)?;

        let http = Client::builder()
            .user_agent(concat!("design-studio/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            // Disable proxy detection to avoid macOS system-configuration panic
            .no_proxy()
            .build()?;

        Ok(Self {
            inner: Arc::new(InnerClient {
                http,
                ai_edit_url,
                export_url,
            }),
        })
    }

    /// Full URL of the AI edit endpoint.
    #[must_use]
    pub fn ai_edit_url(&self) -> &Url {
        &self.inner.ai_edit_url
    }

    /// Full URL of the export endpoint.
    #[must_use]
    pub fn export_url(&self) -> &Url {
        &self.inner.export_url
    }

    async fn post<T: serde::Serialize + Sync>(
        &self,
        url: &Url,
        body: &T,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self.inner.http.post(url.clone()).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let mut body = response.text().await.unwrap_or_default();
        truncate_on_char_boundary(&mut body, 512);
        tracing::debug!("{url} answered {status}");
        Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl DesignService for StudioClient {
    async fn ai_edit(&self, request: &AiEditRequest) -> Result<AiEditResponse, ClientError> {
        tracing::debug!(
            "POST {} ({} elements)",
            self.inner.ai_edit_url,
            request.elements.len()
        );
        let response = self.post(&self.inner.ai_edit_url, request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn export(&self, request: &ExportRequest) -> Result<Vec<u8>, ClientError> {
        tracing::debug!(
            "POST {} ({:?}, {:?})",
            self.inner.export_url,
            request.format,
            request.quality_preset
        );
        let response = self.post(&self.inner.export_url, request).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}
