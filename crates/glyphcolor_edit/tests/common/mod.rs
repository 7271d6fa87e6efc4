//! Shared test helpers

#![allow(dead_code)]

use glyphcolor_edit::{ChangeSink, Color, ColorPanelsConfig, ColorWorkspace, EditError, FontDocument, Palette, VariableGlyph};
use glyphcolor_model::Change;
use serde_json::Value;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A document with one palette of `palette_size` black colors and glyphs "A" and "B".
pub fn create_document(palette_size: usize) -> FontDocument {
    let mut doc = FontDocument::new();
    if palette_size > 0 {
        doc.set_palettes(&[Palette::from_slice(&vec![Color::BLACK; palette_size])]).unwrap();
    }
    doc.add_glyph(VariableGlyph::new("A"));
    doc.add_glyph(VariableGlyph::new("B"));
    doc
}

/// A document with font custom data taken verbatim from `custom_data`, as loaded
/// from a source file, and glyphs "A" and "B".
pub fn create_document_from_json(custom_data: Value) -> FontDocument {
    serde_json::from_value(serde_json::json!({
        "customData": custom_data,
        "glyphs": {
            "A": { "name": "A" },
            "B": { "name": "B" },
        },
    }))
    .unwrap()
}

/// Opens `doc` and selects glyph "A".
pub fn open_workspace(doc: FontDocument) -> ColorWorkspace {
    init_logging();
    let workspace = ColorWorkspace::open(doc, ColorPanelsConfig::default()).unwrap();
    workspace.select_glyph(Some("A"));
    workspace
}

/// Glyph custom data as stored by the history backend.
pub fn stored_glyph_custom_data(workspace: &ColorWorkspace, glyph_name: &str) -> Value {
    workspace.backend().lock().document_value()["glyphs"][glyph_name]["customData"].clone()
}

/// Glyph custom data of the in-memory document.
pub fn live_glyph_custom_data(workspace: &ColorWorkspace, glyph_name: &str) -> Value {
    workspace.session().read_document(|doc| Value::Object(doc.glyph(glyph_name).unwrap().custom_data.clone()))
}

/// A persistence collaborator that is offline.
pub struct RejectingSink;

impl ChangeSink for RejectingSink {
    fn commit(&mut self, _change: &Change, _rollback_change: &Change, _description: &str) -> glyphcolor_edit::Result<()> {
        Err(EditError::commit_rejected("backend offline"))
    }
}

/// Records every commit.
#[derive(Default)]
pub struct RecordingSink {
    pub commits: Vec<(Change, Change, String)>,
}

impl ChangeSink for RecordingSink {
    fn commit(&mut self, change: &Change, rollback_change: &Change, description: &str) -> glyphcolor_edit::Result<()> {
        self.commits.push((change.clone(), rollback_change.clone(), description.to_string()));
        Ok(())
    }
}
