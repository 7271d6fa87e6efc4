//! Error types for glyph color editing

use glyphcolor_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Commit Errors ===
    #[error("Commit rejected: {message}")]
    CommitRejected { message: String },

    // === Document Errors ===
    #[error("Glyph '{name}' not found")]
    GlyphNotFound { name: String },

    #[error("Layer {index} out of range (0..{max})")]
    LayerOutOfRange { index: usize, max: usize },

    #[error("Palette {index} out of range (0..{max})")]
    PaletteOutOfRange { index: usize, max: usize },

    #[error("Color {index} out of range in palette {palette} (0..{max})")]
    ColorOutOfRange { palette: usize, index: usize, max: usize },

    // === Configuration Errors ===
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to write configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, EditError>;

impl EditError {
    pub fn commit_rejected(msg: impl std::fmt::Display) -> Self {
        Self::CommitRejected { message: msg.to_string() }
    }

    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }
}
