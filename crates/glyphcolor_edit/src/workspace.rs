//! Wiring of document, history backend, selection and both panels.

use std::sync::Arc;

use glyphcolor_model::FontDocument;
use parking_lot::Mutex;

use crate::panels::{ColorLayersPanel, ColorPalettesPanel};
use crate::{ColorPanelsConfig, EditSession, HistoryBackend, ListenerId, Result, SceneSettings, SharedSink, UndoState};

/// A font opened for color editing, backed by an in-memory [`HistoryBackend`].
pub struct ColorWorkspace {
    session: EditSession,
    backend: Arc<Mutex<HistoryBackend>>,
    color_layers: Arc<Mutex<ColorLayersPanel>>,
    color_palettes: Arc<Mutex<ColorPalettesPanel>>,
    listener_ids: Vec<ListenerId>,
}

impl ColorWorkspace {
    pub fn open(document: FontDocument, config: ColorPanelsConfig) -> Result<Self> {
        let backend = Arc::new(Mutex::new(HistoryBackend::new(&document)?.with_history_limit(config.history_limit)));
        let sink: SharedSink = backend.clone();
        let session = EditSession::new(Arc::new(Mutex::new(document)), Arc::new(SceneSettings::new()), sink);

        let (color_layers, listener_ids) = ColorLayersPanel::register(session.clone(), config.clone());
        let color_palettes = Arc::new(Mutex::new(ColorPalettesPanel::new(session.clone(), config)));
        color_layers.lock().update()?;
        color_palettes.lock().setup_ui()?;

        Ok(Self {
            session,
            backend,
            color_layers,
            color_palettes,
            listener_ids,
        })
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn backend(&self) -> &Arc<Mutex<HistoryBackend>> {
        &self.backend
    }

    pub fn color_layers(&self) -> &Arc<Mutex<ColorLayersPanel>> {
        &self.color_layers
    }

    pub fn color_palettes(&self) -> &Arc<Mutex<ColorPalettesPanel>> {
        &self.color_palettes
    }

    pub fn select_glyph(&self, glyph_name: Option<&str>) {
        self.session.scene().set_selected_glyph_name(glyph_name.map(str::to_string));
    }

    /// Undoes the last committed edit in the backend and the in-memory document.
    ///
    /// Returns false if there was nothing to undo. Must not be called while a panel
    /// lock is held.
    pub fn undo(&self) -> Result<bool> {
        let change = self.backend.lock().undo_change()?;
        self.sync_history_change(change)
    }

    pub fn redo(&self) -> Result<bool> {
        let change = self.backend.lock().redo_change()?;
        self.sync_history_change(change)
    }

    pub fn undo_description(&self) -> Option<String> {
        self.backend.lock().undo_description()
    }

    fn sync_history_change(&self, change: Option<glyphcolor_model::Change>) -> Result<bool> {
        let Some(change) = change else {
            return Ok(false);
        };
        self.session.apply_external_change(&change)?;
        self.color_palettes.lock().setup_ui()?;
        Ok(true)
    }
}

impl Drop for ColorWorkspace {
    fn drop(&mut self) {
        for id in self.listener_ids.drain(..) {
            self.session.scene().remove_listener(id);
        }
    }
}
