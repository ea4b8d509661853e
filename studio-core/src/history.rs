//! # Snapshot History
//!
//! Linear undo/redo over serialized document snapshots.
//!
//! ```text
//! entries:  [s0] [s1] [s2] [s3]
//!                      ^ cursor
//! commit(d) drops s3, appends d, cursor -> 3
//! undo()    cursor -> 1, restore s1
//! redo()    cursor -> 3, restore s3
//! ```
//!
//! Snapshots are full JSON copies of the document. There is no compaction
//! and no size limit; documents hold tens of elements.

use crate::{CanvasError, CanvasResult, Document};

/// Backing storage for history snapshots.
///
/// The history owns cursor logic; storage only keeps an ordered list of
/// serialized snapshots.
pub trait SnapshotStorage {
    /// Number of stored snapshots.
    fn len(&self) -> usize;

    /// Whether no snapshots are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot at `index`, if present.
    fn get(&self, index: usize) -> Option<String>;

    /// Append a snapshot.
    fn push(&mut self, snapshot: String);

    /// Drop every snapshot at or after `len`.
    fn truncate(&mut self, len: usize);
}

/// In-memory snapshot storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySnapshots {
    entries: Vec<String>,
}

impl MemorySnapshots {
    /// Create empty storage.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl SnapshotStorage for MemorySnapshots {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, index: usize) -> Option<String> {
        self.entries.get(index).cloned()
    }

    fn push(&mut self, snapshot: String) {
        self.entries.push(snapshot);
    }

    fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }
}

/// Linear undo/redo log with a cursor.
///
/// `cursor` is `None` until the first commit.
#[derive(Debug, Clone, Default)]
pub struct History<S = MemorySnapshots> {
    storage: S,
    cursor: Option<usize>,
}

impl History<MemorySnapshots> {
    /// Create an empty in-memory history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            storage: MemorySnapshots::new(),
            cursor: None,
        }
    }
}

impl<S: SnapshotStorage> History<S> {
    /// Create a history over existing storage. The cursor starts at the
    /// newest stored snapshot.
    pub fn with_storage(storage: S) -> Self {
        let cursor = storage.len().checked_sub(1);
        Self { storage, cursor }
    }

    /// Record a snapshot of `document`, discarding any redo entries.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::Serialization`] if the document cannot be
    /// serialized; history is unchanged in that case.
    pub fn commit(&mut self, document: &Document) -> CanvasResult<()> {
        let snapshot = document.to_json()?;
        let keep = self.cursor.map_or(0, |c| c + 1);
        self.storage.truncate(keep);
        self.storage.push(snapshot);
        self.cursor = Some(keep);
        Ok(())
    }

    /// Step back one entry and return the document to restore.
    ///
    /// Returns `Ok(None)` when there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::CorruptSnapshot`] if the target snapshot cannot
    /// be parsed. The cursor does not move in that case.
    pub fn undo(&mut self) -> CanvasResult<Option<Document>> {
        match self.cursor {
            Some(cursor) if cursor > 0 => self.step_to(cursor - 1).map(Some),
            _ => Ok(None),
        }
    }

    /// Step forward one entry and return the document to restore.
    ///
    /// Returns `Ok(None)` at the newest entry.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::CorruptSnapshot`] if the target snapshot cannot
    /// be parsed. The cursor does not move in that case.
    pub fn redo(&mut self) -> CanvasResult<Option<Document>> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= self.storage.len() {
            return Ok(None);
        }
        self.step_to(next).map(Some)
    }

    fn step_to(&mut self, index: usize) -> CanvasResult<Document> {
        let snapshot = self
            .storage
            .get(index)
            .ok_or_else(|| CanvasError::CorruptSnapshot {
                index,
                reason: "snapshot missing from storage".to_string(),
            })?;
        let document =
            Document::from_json(&snapshot).map_err(|e| CanvasError::CorruptSnapshot {
                index,
                reason: e.to_string(),
            })?;
        self.cursor = Some(index);
        Ok(document)
    }

    /// Whether [`undo`](Self::undo) would step back.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    /// Whether [`redo`](Self::redo) would step forward.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.map_or(0, |c| c + 1) < self.storage.len()
    }

    /// Current cursor position.
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Borrow the backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}
