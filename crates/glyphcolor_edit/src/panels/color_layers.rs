use std::sync::Arc;

use glyphcolor_model::{LayerMapping, LayerMappingEntry, Palette};
use parking_lot::Mutex;

use super::{FieldDescription, FormAction, messages};
use crate::{ColorPanelsConfig, EditError, EditOutcome, EditSession, ListenerId, Result, SceneEventKind};

/// Edits the color layer mapping of the selected glyph.
///
/// Keeps nothing but the derived form; every operation re-reads the document.
pub struct ColorLayersPanel {
    session: EditSession,
    config: ColorPanelsConfig,
    form: Vec<FieldDescription>,
}

impl ColorLayersPanel {
    pub const IDENTIFIER: &'static str = "color-layers";

    pub fn new(session: EditSession, config: ColorPanelsConfig) -> Self {
        Self {
            session,
            config,
            form: Vec::new(),
        }
    }

    /// Creates the panel and refreshes it on selection and current glyph changes.
    pub fn register(session: EditSession, config: ColorPanelsConfig) -> (Arc<Mutex<Self>>, Vec<ListenerId>) {
        let scene = session.scene().clone();
        let panel = Arc::new(Mutex::new(Self::new(session, config)));
        let ids: Vec<ListenerId> = [SceneEventKind::SelectedGlyph, SceneEventKind::CurrentGlyph]
            .into_iter()
            .map(|kind| {
                let panel = Arc::downgrade(&panel);
                scene.add_listener(kind, move |_| {
                    let Some(panel) = panel.upgrade() else {
                        return;
                    };
                    let result = panel.lock().update();
                    if let Err(err) = result {
                        log::error!("Failed to refresh color layers panel: {err}");
                    }
                })
            })
            .collect();
        (panel, ids)
    }

    pub fn form(&self) -> &[FieldDescription] {
        &self.form
    }

    pub fn toggle(&mut self, on: bool) -> Result<()> {
        if on {
            self.update()?;
        }
        Ok(())
    }

    fn active_palette(&self) -> Result<Option<Palette>> {
        let palette = self.session.read_document(|doc| doc.active_palette())?;
        Ok(palette.filter(|p| !p.is_empty()))
    }

    /// Mapping of the selected glyph as currently stored in the document.
    fn current_mapping(&self) -> Result<Option<LayerMapping>> {
        match self.session.selected_glyph() {
            Some(glyph) => Ok(Some(glyph.layer_mapping()?)),
            None => Ok(None),
        }
    }

    /// Rebuilds the form from the document.
    pub fn update(&mut self) -> Result<()> {
        let Some(palette) = self.active_palette()? else {
            self.form = vec![FieldDescription::text(messages::NO_PALETTE)];
            return Ok(());
        };
        if self.session.selected_glyph_name().is_none() {
            self.form = vec![FieldDescription::text(messages::NO_GLYPH_SELECTED)];
            return Ok(());
        }
        let mapping = self.current_mapping()?.unwrap_or_default();

        let mut form = vec![FieldDescription::header(messages::COLOR_LAYERS_TITLE, Some(FormAction::AddLayer))];
        if mapping.is_empty() {
            form.push(FieldDescription::text(messages::NO_LAYERS_YET));
        }
        for (i, entry) in mapping.iter().enumerate() {
            form.push(FieldDescription::header(entry.layer_name.clone(), Some(FormAction::RemoveLayer { index: i })));
            form.push(FieldDescription::EditNumber {
                key: serde_json::json!(["colorIndex", i]).to_string(),
                label: messages::COLOR_INDEX.to_string(),
                value: entry.color_index,
                min_value: 0,
                max_value: palette.len() as i64 - 1,
                layer_index: i,
            });
        }
        self.form = form;
        Ok(())
    }

    /// Runs a form action.
    pub fn perform(&mut self, action: FormAction) -> Result<EditOutcome> {
        match action {
            FormAction::AddLayer => self.add_layer(),
            FormAction::RemoveLayer { index } => self.remove_layer(index),
        }
    }

    /// Appends a layer with a fresh name and creates an empty layer for it if needed.
    pub fn add_layer(&mut self) -> Result<EditOutcome> {
        let Some(palette) = self.active_palette()? else {
            return Ok(EditOutcome::NoPalette);
        };
        let palette_size = palette.len();
        let prefix = self.config.layer_name_prefix.clone();

        let outcome = self.session.edit_glyph_and_record_changes(|glyph| {
            let mut mapping = glyph.layer_mapping()?;
            let layer_name = mapping.next_layer_name(&prefix);
            let color_index = mapping.next_color_index(palette_size);
            glyph.ensure_layer(&layer_name);
            mapping.push(LayerMappingEntry::new(layer_name, color_index));
            glyph.set_layer_mapping(&mapping)?;
            Ok(messages::ADD_LAYER.to_string())
        })?;
        self.update()?;
        Ok(outcome)
    }

    /// Removes the mapping entry at `index`. The layer itself is kept.
    ///
    /// # Errors
    ///
    /// [`EditError::LayerOutOfRange`] if `index` is not a position of the current mapping.
    pub fn remove_layer(&mut self, index: usize) -> Result<EditOutcome> {
        let outcome = self.session.edit_glyph_and_record_changes(|glyph| {
            let mut mapping = glyph.layer_mapping()?;
            if mapping.remove(index).is_none() {
                return Err(EditError::LayerOutOfRange { index, max: mapping.len() });
            }
            glyph.set_layer_mapping(&mapping)?;
            Ok(messages::EDIT_COLOR_LAYERS.to_string())
        })?;
        self.update()?;
        Ok(outcome)
    }

    /// Sets the color index of mapping entry `index`.
    ///
    /// An `index` that does not exist in the current mapping comes from an outdated
    /// view; the edit is dropped and [`EditOutcome::StaleIndex`] returned.
    pub fn set_color_index(&mut self, index: usize, value: i64) -> Result<EditOutcome> {
        let Some(mapping) = self.current_mapping()? else {
            return Ok(EditOutcome::NoGlyphSelected);
        };
        if mapping.is_empty() || index >= mapping.len() {
            self.report_stale_index(index, mapping.len());
            return Ok(EditOutcome::StaleIndex);
        }

        let outcome = self.session.edit_glyph_and_record_changes(|glyph| {
            if let Some(mapping) = glyph.layer_mapping()?.with_color_index(index, value) {
                glyph.set_layer_mapping(&mapping)?;
            }
            Ok(messages::EDIT_COLOR_LAYERS.to_string())
        })?;
        self.update()?;
        Ok(outcome)
    }

    fn report_stale_index(&self, index: usize, len: usize) {
        if self.config.report_dropped_edits {
            log::warn!("Dropped color index edit for stale layer position {index} (mapping has {len} entries)");
        } else {
            log::debug!("Dropped color index edit for stale layer position {index} (mapping has {len} entries)");
        }
    }
}
