//! Document edit session
//!
//! The only place that installs edited values into the in-memory document. Every
//! edit runs through the change recorder; the resulting changes are committed to the
//! [`ChangeSink`] first and installed only after the commit succeeded.

use std::sync::Arc;

use glyphcolor_model::{Change, FontDocument, VariableGlyph};
use parking_lot::Mutex;
use serde::Serialize;

use crate::recorder::{self, ChangeRecord, Recorded};
use crate::{ChangeSink, EditError, Result, SceneSettings};

pub type SharedDocument = Arc<Mutex<FontDocument>>;
pub type SharedSink = Arc<Mutex<dyn ChangeSink + Send>>;

/// What an edit request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Changes were committed and installed.
    Committed,
    /// The mutator produced no difference; nothing was committed.
    NoChange,
    NoGlyphSelected,
    NoPalette,
    /// The edit referred to a layer position that no longer exists and was dropped.
    StaleIndex,
}

impl EditOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, EditOutcome::Committed)
    }
}

/// Shared handles panels edit through. Cloning is cheap.
#[derive(Clone)]
pub struct EditSession {
    document: SharedDocument,
    scene: Arc<SceneSettings>,
    sink: SharedSink,
}

impl EditSession {
    pub fn new(document: SharedDocument, scene: Arc<SceneSettings>, sink: SharedSink) -> Self {
        Self { document, scene, sink }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    pub fn scene(&self) -> &Arc<SceneSettings> {
        &self.scene
    }

    pub fn selected_glyph_name(&self) -> Option<String> {
        self.scene.selected_glyph_name()
    }

    pub fn read_document<R>(&self, f: impl FnOnce(&FontDocument) -> R) -> R {
        f(&self.document.lock())
    }

    /// A copy of the selected glyph, `None` if nothing is selected or the glyph is missing.
    pub fn selected_glyph(&self) -> Option<VariableGlyph> {
        let name = self.selected_glyph_name()?;
        self.document.lock().glyph(&name).cloned()
    }

    /// Runs `mutate` on a copy of the selected glyph and commits the difference.
    ///
    /// The changes are committed relative to the document root
    /// (`["glyphs", name, ...]`) and the edited glyph replaces the live one after
    /// the commit. The document is locked while `mutate` runs; it must not call back
    /// into the session.
    pub fn edit_glyph_and_record_changes<F>(&self, mutate: F) -> Result<EditOutcome>
    where
        F: FnOnce(&mut VariableGlyph) -> Result<String>,
    {
        let Some(glyph_name) = self.selected_glyph_name() else {
            return Ok(EditOutcome::NoGlyphSelected);
        };

        let mut document = self.document.lock();
        let Some(glyph) = document.glyph(&glyph_name) else {
            return Err(EditError::GlyphNotFound { name: glyph_name });
        };
        let Recorded { value, record } = recorder::record(glyph, mutate)?;
        if !record.has_change() {
            log::debug!("'{}' on glyph '{}' produced no change", record.description, glyph_name);
            return Ok(EditOutcome::NoChange);
        }

        let prefix = FontDocument::glyph_path(&glyph_name);
        self.post_change(&record.change.prefixed(&prefix), &record.rollback_change.prefixed(&prefix), &record.description)?;
        document.glyphs.insert(glyph_name, value);
        Ok(EditOutcome::Committed)
    }

    /// Records the changes `mutate` makes to a copy of `root`, without committing.
    pub fn record_changes<T, D, F>(&self, root: &T, mutate: F) -> Result<Recorded<T, D>>
    where
        T: Clone + Serialize,
        F: FnOnce(&mut T) -> Result<D>,
    {
        recorder::record(root, mutate)
    }

    pub fn post_change(&self, change: &Change, rollback_change: &Change, description: &str) -> Result<()> {
        self.sink.lock().commit(change, rollback_change, description)
    }

    /// Commits a record whose paths are relative to the document root and, once
    /// committed, applies it to the in-memory document.
    pub fn commit_document_change(&self, record: &ChangeRecord<String>) -> Result<EditOutcome> {
        if !record.has_change() {
            log::debug!("'{}' produced no change", record.description);
            return Ok(EditOutcome::NoChange);
        }
        self.post_change(&record.change, &record.rollback_change, &record.description)?;
        record.change.apply_to(&mut *self.document.lock())?;
        Ok(EditOutcome::Committed)
    }

    /// Applies a change that did not originate from this session, e.g. an undo
    /// performed by the history backend, and notifies current glyph listeners.
    pub fn apply_external_change(&self, change: &Change) -> Result<()> {
        change.apply_to(&mut *self.document.lock())?;
        self.scene.notify_current_glyph_changed();
        Ok(())
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession").field("scene", &self.scene).finish_non_exhaustive()
    }
}
