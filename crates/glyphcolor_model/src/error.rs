//! Unified error types for glyphcolor_model

use thiserror::Error;

/// Main error type for document model operations
#[derive(Debug, Error)]
pub enum ModelError {
    // === Color Errors ===
    #[error("Invalid hex color: {value}")]
    InvalidHexColor { value: String },

    // === Custom Data Errors ===
    #[error("Invalid custom data under '{key}': {message}")]
    InvalidCustomData { key: String, message: String },

    // === Change Errors ===
    #[error("Change path not found: {path}")]
    PathNotFound { path: String },

    #[error("Invalid change path {path}: {message}")]
    InvalidPath { path: String, message: String },

    // === External Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    pub fn invalid_custom_data(key: impl Into<String>, msg: impl std::fmt::Display) -> Self {
        Self::InvalidCustomData {
            key: key.into(),
            message: msg.to_string(),
        }
    }

    pub fn invalid_path(path: impl std::fmt::Display, msg: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            message: msg.into(),
        }
    }
}
