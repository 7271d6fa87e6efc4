//! Tests for the edit session, history and settings

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::*;
use glyphcolor_edit::{
    ChangeSink, ColorPanelsConfig, EditError, EditOutcome, EditSession, FontDocument, LayerMapping, LayerMappingEntry, PathElement, SceneEvent,
    SceneEventKind, SceneSettings, SharedSink, UndoState,
};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::json;

fn create_session(doc: FontDocument, sink: SharedSink) -> EditSession {
    init_logging();
    let session = EditSession::new(Arc::new(Mutex::new(doc)), Arc::new(SceneSettings::new()), sink);
    session.scene().set_selected_glyph_name(Some("A".to_string()));
    session
}

fn add_mapping(glyph: &mut glyphcolor_edit::VariableGlyph) -> glyphcolor_edit::Result<String> {
    glyph.set_layer_mapping(&LayerMapping::from(vec![LayerMappingEntry::new("color.0", 0)]))?;
    Ok("Edit color layers".to_string())
}

// ============================================================================
// Glyph Edits
// ============================================================================

#[test]
fn test_glyph_changes_are_relative_to_document_root() {
    let sink = Arc::new(Mutex::new(RecordingSink::default()));
    let session = create_session(create_document(1), sink.clone());

    let outcome = session.edit_glyph_and_record_changes(add_mapping).unwrap();

    assert_eq!(outcome, EditOutcome::Committed);
    let sink = sink.lock();
    assert_eq!(sink.commits.len(), 1);
    let (change, rollback_change, description) = &sink.commits[0];
    assert_eq!(description, "Edit color layers");
    let prefix = [PathElement::from("glyphs"), PathElement::from("A")];
    for op in change.ops().iter().chain(rollback_change.ops()) {
        assert_eq!(&op.path()[..2], prefix.as_slice());
    }
    assert_eq!(
        serde_json::to_value(change).unwrap(),
        json!([{ "f": "=", "p": ["glyphs", "A", "customData", "colorLayerMapping"], "v": [["color.0", 0]] }])
    );
    assert_eq!(
        serde_json::to_value(rollback_change).unwrap(),
        json!([{ "f": "d", "p": ["glyphs", "A", "customData", "colorLayerMapping"] }])
    );
}

#[test]
fn test_rejected_commit_leaves_document_unchanged() {
    let session = create_session(create_document(1), Arc::new(Mutex::new(RejectingSink)));
    let before = session.read_document(|doc| doc.clone());

    let result = session.edit_glyph_and_record_changes(add_mapping);

    assert!(matches!(result, Err(EditError::CommitRejected { .. })));
    assert_eq!(session.read_document(|doc| doc.clone()), before);
}

#[test]
fn test_rejected_palette_commit_leaves_document_unchanged() {
    let session = create_session(create_document(1), Arc::new(Mutex::new(RejectingSink)));
    let mut panel = glyphcolor_edit::panels::ColorPalettesPanel::new(session.clone(), ColorPanelsConfig::default());
    panel.setup_ui().unwrap();
    let before = session.read_document(|doc| doc.clone());

    let result = panel.change_color(0, 0, "#ff0000");

    assert!(matches!(result, Err(EditError::CommitRejected { .. })));
    assert_eq!(session.read_document(|doc| doc.clone()), before);
    assert_eq!(panel.sections()[0].swatches[0].hex, "#000000");
}

#[test]
fn test_failing_mutator_records_nothing() {
    let sink = Arc::new(Mutex::new(RecordingSink::default()));
    let session = create_session(create_document(1), sink.clone());

    let result = session.edit_glyph_and_record_changes(|glyph| {
        add_mapping(glyph)?;
        Err(EditError::generic("abort"))
    });

    assert!(matches!(result, Err(EditError::Generic(_))));
    assert!(sink.lock().commits.is_empty());
    assert!(session.selected_glyph().unwrap().custom_data.is_empty());
}

#[test]
fn test_missing_glyph_is_an_error() {
    let session = create_session(create_document(1), Arc::new(Mutex::new(RecordingSink::default())));
    session.scene().set_selected_glyph_name(Some("Z".to_string()));

    let result = session.edit_glyph_and_record_changes(add_mapping);

    assert!(matches!(result, Err(EditError::GlyphNotFound { name }) if name == "Z"));
}

#[test]
fn test_unchanged_glyph_is_not_committed() {
    let sink = Arc::new(Mutex::new(RecordingSink::default()));
    let session = create_session(create_document(1), sink.clone());

    let outcome = session.edit_glyph_and_record_changes(|_| Ok("nothing".to_string())).unwrap();

    assert_eq!(outcome, EditOutcome::NoChange);
    assert!(sink.lock().commits.is_empty());
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_external_change_notifies_current_glyph_listeners() {
    let sink = Arc::new(Mutex::new(RecordingSink::default()));
    let session = create_session(create_document(1), sink.clone());
    session.edit_glyph_and_record_changes(add_mapping).unwrap();
    let rollback_change = sink.lock().commits[0].1.clone();

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    session.scene().add_listener(SceneEventKind::CurrentGlyph, move |event| {
        assert_eq!(event, &SceneEvent::CurrentGlyphChanged { glyph_name: Some("A".to_string()) });
        counter.fetch_add(1, Ordering::SeqCst);
    });

    session.apply_external_change(&rollback_change).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(session.selected_glyph().unwrap().custom_data.is_empty());
}

#[test]
fn test_panel_edits_do_not_notify() {
    let workspace = open_workspace(create_document(2));
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    workspace.session().scene().add_listener(SceneEventKind::CurrentGlyph, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    workspace.color_layers().lock().add_layer().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dropping_workspace_removes_listeners() {
    let workspace = open_workspace(create_document(1));
    let scene = workspace.session().scene().clone();
    assert_eq!(scene.listener_count(), 2);

    drop(workspace);

    assert_eq!(scene.listener_count(), 0);
}

// ============================================================================
// History
// ============================================================================

#[test]
fn test_undo_redo_round_trip() {
    let workspace = open_workspace(create_document(2));
    workspace.color_layers().lock().add_layer().unwrap();
    workspace.color_layers().lock().add_layer().unwrap();
    let after_edits = stored_glyph_custom_data(&workspace, "A");

    assert!(workspace.undo().unwrap());
    assert!(workspace.undo().unwrap());
    assert!(!workspace.undo().unwrap());
    assert_eq!(stored_glyph_custom_data(&workspace, "A"), json!({}));
    assert_eq!(live_glyph_custom_data(&workspace, "A"), json!({}));

    assert!(workspace.redo().unwrap());
    assert!(workspace.redo().unwrap());
    assert!(!workspace.redo().unwrap());
    assert_eq!(stored_glyph_custom_data(&workspace, "A"), after_edits);
    assert_eq!(live_glyph_custom_data(&workspace, "A"), after_edits);
}

#[test]
fn test_new_edit_clears_redo() {
    let workspace = open_workspace(create_document(2));
    workspace.color_layers().lock().add_layer().unwrap();
    workspace.undo().unwrap();
    assert!(workspace.backend().lock().can_redo());

    workspace.color_layers().lock().add_layer().unwrap();

    assert!(!workspace.backend().lock().can_redo());
    assert!(workspace.backend().lock().is_dirty());
}

#[test]
fn test_history_limit_drops_oldest_entries() {
    init_logging();
    let config = ColorPanelsConfig {
        history_limit: Some(2),
        ..Default::default()
    };
    let workspace = glyphcolor_edit::ColorWorkspace::open(create_document(3), config).unwrap();
    workspace.select_glyph(Some("A"));

    for _ in 0..3 {
        workspace.color_layers().lock().add_layer().unwrap();
    }

    assert_eq!(workspace.backend().lock().undo_len(), 2);
}

#[test]
fn test_backend_rejects_change_with_missing_parent() {
    let mut backend = glyphcolor_edit::HistoryBackend::new(&create_document(1)).unwrap();
    let change: glyphcolor_edit::Change = serde_json::from_value(json!([
        { "f": "=", "p": ["glyphs", "missing", "customData", "x"], "v": 1 }
    ]))
    .unwrap();

    let result = backend.commit(&change, &glyphcolor_edit::Change::default(), "broken");

    assert!(matches!(result, Err(EditError::CommitRejected { .. })));
    assert_eq!(backend.undo_len(), 0);
    assert_eq!(backend.font_document().unwrap(), create_document(1));
}

// ============================================================================
// Settings
// ============================================================================

#[test]
fn test_config_partial_file_uses_defaults() {
    let config = ColorPanelsConfig::from_toml_str("layer_name_prefix = \"layer.\"\n").unwrap();

    assert_eq!(config.layer_name_prefix, "layer.");
    assert_eq!(config.version, 1);
    assert!(config.report_dropped_edits);
    assert_eq!(config.history_limit, None);
}

#[test]
fn test_config_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("color_panels.toml");
    let config = ColorPanelsConfig {
        report_dropped_edits: false,
        history_limit: Some(50),
        ..Default::default()
    };

    config.save(&path).unwrap();
    let loaded = ColorPanelsConfig::load(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn test_layer_name_prefix_is_used_for_new_layers() {
    init_logging();
    let config = ColorPanelsConfig {
        layer_name_prefix: "layer.".to_string(),
        ..Default::default()
    };
    let workspace = glyphcolor_edit::ColorWorkspace::open(create_document(1), config).unwrap();
    workspace.select_glyph(Some("A"));

    workspace.color_layers().lock().add_layer().unwrap();

    assert_eq!(stored_glyph_custom_data(&workspace, "A"), json!({ "colorLayerMapping": [["layer.0", 0]] }));
}
