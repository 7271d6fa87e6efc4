//! Per-glyph mapping from color layers to palette indices.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Name prefix used when generating fresh color layer names.
pub const DEFAULT_LAYER_NAME_PREFIX: &str = "color.";

/// One `[layerName, colorIndex]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, i64)", into = "(String, i64)")]
pub struct LayerMappingEntry {
    pub layer_name: String,
    pub color_index: i64,
}

impl LayerMappingEntry {
    pub fn new(layer_name: impl Into<String>, color_index: i64) -> Self {
        Self {
            layer_name: layer_name.into(),
            color_index,
        }
    }
}

impl From<(String, i64)> for LayerMappingEntry {
    fn from((layer_name, color_index): (String, i64)) -> Self {
        Self { layer_name, color_index }
    }
}

impl From<LayerMappingEntry> for (String, i64) {
    fn from(entry: LayerMappingEntry) -> Self {
        (entry.layer_name, entry.color_index)
    }
}

/// Ordered color layer mapping of a single glyph.
///
/// Color indices are not validated on write; a palette may shrink after the
/// mapping was written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMapping {
    entries: Vec<LayerMappingEntry>,
}

impl LayerMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LayerMappingEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&LayerMappingEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LayerMappingEntry> {
        self.entries.iter()
    }

    pub fn push(&mut self, entry: LayerMappingEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry at `index`, `None` if the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<LayerMappingEntry> {
        if index < self.entries.len() { Some(self.entries.remove(index)) } else { None }
    }

    pub fn contains_layer(&self, layer_name: &str) -> bool {
        self.entries.iter().any(|e| e.layer_name == layer_name)
    }

    /// First name of the form `{prefix}0`, `{prefix}1`, ... not used by this mapping.
    pub fn next_layer_name(&self, prefix: &str) -> String {
        let existing: HashSet<&str> = self.entries.iter().map(|e| e.layer_name.as_str()).collect();
        let mut i = 0;
        loop {
            let name = format!("{prefix}{i}");
            if !existing.contains(name.as_str()) {
                return name;
            }
            i += 1;
        }
    }

    /// Color index for a new layer: the next positional index while the palette has
    /// unused slots, 0 once the mapping is as long as the palette.
    pub fn next_color_index(&self, palette_size: usize) -> i64 {
        if self.entries.len() < palette_size { self.entries.len() as i64 } else { 0 }
    }

    /// Returns a copy with the color index at `index` replaced.
    ///
    /// `None` if `index` is out of range. The receiver is left untouched.
    pub fn with_color_index(&self, index: usize, color_index: i64) -> Option<LayerMapping> {
        if index >= self.entries.len() {
            return None;
        }
        let mut entries = self.entries.clone();
        entries[index].color_index = color_index;
        Some(LayerMapping { entries })
    }

    /// Duplicate layer names only appear in hand-edited data.
    pub fn has_duplicate_names(&self) -> bool {
        let mut seen = HashSet::new();
        !self.entries.iter().all(|e| seen.insert(e.layer_name.as_str()))
    }
}

impl From<Vec<LayerMappingEntry>> for LayerMapping {
    fn from(entries: Vec<LayerMappingEntry>) -> Self {
        Self { entries }
    }
}

impl FromIterator<LayerMappingEntry> for LayerMapping {
    fn from_iter<T: IntoIterator<Item = LayerMappingEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
