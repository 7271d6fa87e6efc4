//! Persistence and history
//!
//! [`ChangeSink`] is the collaborator that receives committed changes. The in-memory
//! [`HistoryBackend`] keeps a serialized mirror of the document, applies every
//! committed change to it and stacks the changes for undo/redo.

use glyphcolor_model::{Change, CustomData, FontDocument, custom_data};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{EditError, Result};

/// Receives committed edits.
pub trait ChangeSink {
    /// Applies and stores one edit.
    ///
    /// # Errors
    ///
    /// A rejected commit is returned as is; callers must not update their own state
    /// in that case.
    fn commit(&mut self, change: &Change, rollback_change: &Change, description: &str) -> Result<()>;
}

/// Trait for types that support undo/redo operations
pub trait UndoState {
    fn undo_description(&self) -> Option<String>;
    fn can_undo(&self) -> bool;
    fn undo(&mut self) -> Result<()>;

    fn redo_description(&self) -> Option<String>;
    fn can_redo(&self) -> bool;
    fn redo(&mut self) -> Result<()>;
}

/// One committed edit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub change: Change,
    pub rollback_change: Change,
    pub description: String,
}

#[derive(Debug)]
pub struct HistoryBackend {
    document: Value,
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    history_limit: Option<usize>,
    is_dirty: bool,
}

impl HistoryBackend {
    pub fn new(document: &FontDocument) -> Result<Self> {
        Ok(Self {
            document: serde_json::to_value(document)?,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            history_limit: None,
            is_dirty: false,
        })
    }

    /// Keeps at most `limit` undo entries; older ones are dropped.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    /// The stored document tree.
    pub fn document_value(&self) -> &Value {
        &self.document
    }

    pub fn font_document(&self) -> Result<FontDocument> {
        Ok(serde_json::from_value(self.document.clone())?)
    }

    /// The stored custom data of a glyph as an external glyph lib, i.e. with the
    /// canonical layer mapping key.
    pub fn glyph_lib(&self, glyph_name: &str) -> Result<Option<CustomData>> {
        let Some(glyph) = self.font_document()?.glyphs.remove(glyph_name) else {
            return Ok(None);
        };
        Ok(Some(custom_data::demote_glyph_custom_data(&glyph.custom_data)?))
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.undo_stack
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    /// Applies `change` to a copy of the stored tree and keeps it only on success.
    fn apply(&mut self, change: &Change) -> Result<()> {
        let mut tree = self.document.clone();
        change.apply(&mut tree)?;
        self.document = tree;
        self.is_dirty = true;
        Ok(())
    }

    /// Undoes the last entry and returns the rollback change that was applied.
    pub fn undo_change(&mut self) -> Result<Option<Change>> {
        let Some(entry) = self.undo_stack.pop() else {
            return Ok(None);
        };
        if let Err(err) = self.apply(&entry.rollback_change) {
            self.undo_stack.push(entry);
            return Err(err);
        }
        let change = entry.rollback_change.clone();
        self.redo_stack.push(entry);
        Ok(Some(change))
    }

    /// Redoes the last undone entry and returns the forward change that was applied.
    pub fn redo_change(&mut self) -> Result<Option<Change>> {
        let Some(entry) = self.redo_stack.pop() else {
            return Ok(None);
        };
        if let Err(err) = self.apply(&entry.change) {
            self.redo_stack.push(entry);
            return Err(err);
        }
        let change = entry.change.clone();
        self.undo_stack.push(entry);
        Ok(Some(change))
    }
}

impl ChangeSink for HistoryBackend {
    fn commit(&mut self, change: &Change, rollback_change: &Change, description: &str) -> Result<()> {
        self.apply(change).map_err(|err| EditError::commit_rejected(format!("{description}: {err}")))?;
        log::debug!("committed '{}' ({} op(s))", description, change.ops().len());

        self.undo_stack.push(HistoryEntry {
            change: change.clone(),
            rollback_change: rollback_change.clone(),
            description: description.to_string(),
        });
        if let Some(limit) = self.history_limit {
            let excess = self.undo_stack.len().saturating_sub(limit);
            self.undo_stack.drain(..excess);
        }
        self.redo_stack.clear();
        Ok(())
    }
}

impl UndoState for HistoryBackend {
    fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(|e| e.description.clone())
    }

    fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    fn undo(&mut self) -> Result<()> {
        self.undo_change().map(|_| ())
    }

    fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(|e| e.description.clone())
    }

    fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn redo(&mut self) -> Result<()> {
        self.redo_change().map(|_| ())
    }
}
