use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CustomData, Palette, PathElement, Result, VariableGlyph, custom_data};

/// Document key holding the font custom data.
pub const CUSTOM_DATA_FIELD: &str = "customData";

/// Document key holding the glyphs.
pub const GLYPHS_FIELD: &str = "glyphs";

/// In-memory font document.
///
/// Serialized as `{ "customData": {...}, "glyphs": { name: glyph } }`; change paths
/// are addressed against that shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontDocument {
    #[serde(default)]
    pub custom_data: CustomData,
    #[serde(default)]
    pub glyphs: BTreeMap<String, VariableGlyph>,
}

impl FontDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_glyph(&mut self, glyph: VariableGlyph) {
        self.glyphs.insert(glyph.name.clone(), glyph);
    }

    pub fn glyph(&self, name: &str) -> Option<&VariableGlyph> {
        self.glyphs.get(name)
    }

    /// All palettes, empty when the font defines none.
    pub fn palettes(&self) -> Result<Vec<Palette>> {
        Ok(custom_data::read_palettes(&self.custom_data)?.unwrap_or_default())
    }

    /// The palette layer mappings refer to.
    pub fn active_palette(&self) -> Result<Option<Palette>> {
        Ok(self.palettes()?.into_iter().next())
    }

    pub fn set_palettes(&mut self, palettes: &[Palette]) -> Result<()> {
        custom_data::write_palettes(&mut self.custom_data, palettes)
    }

    /// Path of a glyph inside the serialized document.
    pub fn glyph_path(glyph_name: &str) -> Vec<PathElement> {
        vec![PathElement::from(GLYPHS_FIELD), PathElement::from(glyph_name)]
    }
}
