//! Editing layer for glyph color data.
//!
//! Provides the change recorder, the edit session that commits recorded changes to
//! a persistence collaborator, and the controllers of the color layers and color
//! palettes panels.

mod error;
pub use error::*;

pub mod recorder;
pub use recorder::{ChangeRecord, Recorded};

mod history;
pub use history::{ChangeSink, HistoryBackend, HistoryEntry, UndoState};

mod scene;
pub use scene::{ListenerId, SceneEvent, SceneEventKind, SceneSettings};

mod session;
pub use session::{EditOutcome, EditSession, SharedDocument, SharedSink};

mod config;
pub use config::ColorPanelsConfig;

pub mod panels;

mod workspace;
pub use workspace::ColorWorkspace;

pub use glyphcolor_model::{
    Change, ChangeOp, Color, CustomData, FontDocument, LayerMapping, LayerMappingEntry, ModelError, Palette, PathElement, VariableGlyph,
};
