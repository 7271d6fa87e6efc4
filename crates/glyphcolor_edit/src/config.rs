//! Settings for the color panels
//!
//! Stored as TOML. Every field has a default so partial files load.

use std::path::Path;

use glyphcolor_model::{Color, DEFAULT_LAYER_NAME_PREFIX};
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorPanelsConfig {
    /// Version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Prefix of generated color layer names
    #[serde(default = "default_layer_name_prefix")]
    pub layer_name_prefix: String,

    /// Color used for new palette slots and new palettes
    #[serde(default)]
    pub default_color: Color,

    /// Log dropped stale edits as warnings instead of debug messages
    #[serde(default = "default_true")]
    pub report_dropped_edits: bool,

    /// Maximum number of undo entries kept by the history backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
}

fn default_version() -> u32 {
    1
}
fn default_layer_name_prefix() -> String {
    DEFAULT_LAYER_NAME_PREFIX.to_string()
}
fn default_true() -> bool {
    true
}

impl Default for ColorPanelsConfig {
    fn default() -> Self {
        Self {
            version: 1,
            layer_name_prefix: default_layer_name_prefix(),
            default_color: Color::BLACK,
            report_dropped_edits: true,
            history_limit: None,
        }
    }
}

impl ColorPanelsConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(ColorPanelsConfig::from_toml_str("").unwrap(), ColorPanelsConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = ColorPanelsConfig::from_toml_str("layer_name_prefix = \"layer.\"\ndefault_color = [1, 1, 1, 0.5]\nhistory_limit = 10\n").unwrap();
        assert_eq!(config.layer_name_prefix, "layer.");
        assert_eq!(config.default_color, Color::new(1.0, 1.0, 1.0, 0.5));
        assert_eq!(config.history_limit, Some(10));
        assert!(config.report_dropped_edits);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = ColorPanelsConfig {
            report_dropped_edits: false,
            history_limit: Some(3),
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(ColorPanelsConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        assert!(matches!(ColorPanelsConfig::from_toml_str("version = \"x\""), Err(crate::EditError::Config(_))));
    }
}
