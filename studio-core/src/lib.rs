//! # Design Studio Core
//!
//! Document model for an editable design canvas.
//! Compiles to WASM for use behind a browser editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   Editor                    │
//! ├─────────────────────────────────────────────┤
//! │  Element Store   │  Canvas Interaction      │
//! │  - Document      │  - Hit-testing           │
//! │  - Selection     │  - Drag to move          │
//! │  - Mutations     │  - Keyboard shortcuts    │
//! ├─────────────────────────────────────────────┤
//! │  History         │  Remote Requests         │
//! │  - Snapshots     │  - AI edit / export      │
//! │  - Undo / redo   │  - Busy + stale tracking │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)] // change detection compares stored values exactly

pub mod document;
pub mod editor;
pub mod element;
pub mod error;
pub mod event;
pub mod history;
pub mod interaction;
pub mod mutation;
pub mod presets;
pub mod remote;
pub mod schema;
pub mod selection;
pub mod store;
pub mod validation;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use document::Document;
pub use editor::{Editor, EditorConfig};
pub use element::{Element, ElementId, ElementKind, ElementType, ImageFit, TextAlign, Transform};
pub use error::{CanvasError, CanvasResult};
pub use event::{InputEvent, KeyEvent, KeyModifiers, PointerEvent, PointerPhase};
pub use history::{History, MemorySnapshots, SnapshotStorage};
pub use interaction::{CanvasInteraction, DragSession, Shortcut, Viewport};
pub use mutation::{NudgeDirection, ReorderDirection};
pub use presets::{CanvasPreset, ExportFormat, QualityPreset, QualitySettings};
pub use remote::{
    AiEditRequest, AiEditResponse, ExportRequest, RemoteAction, RemoteOutcome, RemoteTicket,
    RequestTracker, StaleResponsePolicy,
};
pub use selection::Selection;
pub use store::{ElementPatch, ElementStore};
pub use validation::ValidationError;

/// Studio core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
