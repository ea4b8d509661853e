//! # Design Studio Client
//!
//! Connects a `studio-core` editor to the remote AI-edit and export
//! services, and hosts the `design-studio` command-line tool.
//!
//! ## Usage
//!
//! ```bash
//! design-studio --url http://localhost:8000 ai-edit card.json "make the title red"
//! design-studio export card.json --format pdf --quality ultra
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ClientConfig` - Service URL, document id and request timeout
//! - `StudioClient` - reqwest client for the two service endpoints
//! - `DesignSession` - drives an `Editor` through remote round trips

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod client;
mod files;
mod session;

pub use client::{ClientError, DesignService, StudioClient};
pub use files::{load_document, save_document, write_export};
pub use session::DesignSession;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use studio_core::{ExportFormat, QualityPreset};

/// Default service base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for design-studio.
#[derive(Debug, Clone, Parser)]
#[command(name = "design-studio")]
#[command(about = "Edit and export design documents through the design services")]
#[command(version)]
pub struct CliArgs {
    /// Design service base URL (e.g., <http://localhost:8000>)
    #[arg(long, env = "DESIGN_STUDIO_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Document ID sent with every request
    #[arg(long, env = "DESIGN_STUDIO_DOCUMENT_ID")]
    pub document_id: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "DESIGN_STUDIO_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Action to run
    #[command(subcommand)]
    pub command: Command,
}

/// design-studio subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Ask the AI service to edit a document file in place
    AiEdit {
        /// Document JSON file
        document: PathBuf,
        /// Natural-language instruction
        instruction: String,
        /// Element to send as the selection
        #[arg(long)]
        select: Option<String>,
        /// Write the result here instead of overwriting the input
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Render a document file through the export service
    Export {
        /// Document JSON file
        document: PathBuf,
        /// Output format (png, jpeg, svg, pdf)
        #[arg(long, default_value = "png")]
        format: ExportFormat,
        /// Quality preset (low, medium, high, ultra)
        #[arg(long, default_value = "high")]
        quality: QualityPreset,
        /// Output file; defaults to `design-<document-id>.<ext>`
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service base URL.
    pub base_url: String,
    /// Document ID sent with every request.
    pub document_id: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            document_id: "untitled".to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl From<&CliArgs> for ClientConfig {
    fn from(args: &CliArgs) -> Self {
        let defaults = Self::new();
        Self {
            base_url: args.url.clone(),
            document_id: args.document_id.clone().unwrap_or(defaults.document_id),
            timeout: Duration::from_secs(args.timeout_secs),
        }
    }
}
