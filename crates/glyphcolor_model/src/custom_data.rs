//! Custom data keys and typed access to them.
//!
//! Font level custom data stores the palettes under their canonical ufo2ft key.
//! Glyph level custom data stores the layer mapping under the short alias
//! [`LAYER_MAPPING_ALIAS_KEY`]; the canonical key only exists in the external glyph
//! lib. [`promote_glyph_lib`] and [`demote_glyph_custom_data`] translate between the
//! two at the storage boundary.

use serde_json::Value;

use crate::{LayerMapping, ModelError, Palette, Result};

/// Arbitrary keyed metadata attached to a font or glyph.
pub type CustomData = serde_json::Map<String, Value>;

pub const PALETTES_KEY: &str = "com.github.googlei18n.ufo2ft.colorPalettes";

pub const LAYER_MAPPING_KEY: &str = "com.github.googlei18n.ufo2ft.colorLayerMapping";

pub const LAYER_MAPPING_ALIAS_KEY: &str = "colorLayerMapping";

/// Reads the palettes, `None` when the key is absent.
pub fn read_palettes(custom_data: &CustomData) -> Result<Option<Vec<Palette>>> {
    match custom_data.get(PALETTES_KEY) {
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|e| ModelError::invalid_custom_data(PALETTES_KEY, e)),
        None => Ok(None),
    }
}

pub fn write_palettes(custom_data: &mut CustomData, palettes: &[Palette]) -> Result<()> {
    custom_data.insert(PALETTES_KEY.to_string(), serde_json::to_value(palettes)?);
    Ok(())
}

/// Reads the glyph layer mapping from the alias key. Absent reads as empty.
pub fn read_layer_mapping(custom_data: &CustomData) -> Result<LayerMapping> {
    read_mapping_under(custom_data, LAYER_MAPPING_ALIAS_KEY)
}

/// Writes the glyph layer mapping under the alias key.
///
/// An empty mapping removes the key; it is never stored as an empty sequence.
pub fn write_layer_mapping(custom_data: &mut CustomData, mapping: &LayerMapping) -> Result<()> {
    write_mapping_under(custom_data, LAYER_MAPPING_ALIAS_KEY, mapping)
}

fn read_mapping_under(data: &CustomData, key: &str) -> Result<LayerMapping> {
    let Some(value) = data.get(key) else {
        return Ok(LayerMapping::new());
    };
    let mapping: LayerMapping = serde_json::from_value(value.clone()).map_err(|e| ModelError::invalid_custom_data(key, e))?;
    if mapping.has_duplicate_names() {
        log::warn!("layer mapping under '{key}' contains duplicate layer names");
    }
    Ok(mapping)
}

fn write_mapping_under(data: &mut CustomData, key: &str, mapping: &LayerMapping) -> Result<()> {
    if mapping.is_empty() {
        data.remove(key);
    } else {
        data.insert(key.to_string(), serde_json::to_value(mapping)?);
    }
    Ok(())
}

/// Converts an external glyph lib into glyph custom data.
///
/// The canonical mapping key becomes the alias key; every other entry is kept as is.
pub fn promote_glyph_lib(lib: &CustomData) -> Result<CustomData> {
    let mut custom_data = lib.clone();
    let mapping = read_mapping_under(&custom_data, LAYER_MAPPING_KEY)?;
    custom_data.remove(LAYER_MAPPING_KEY);
    write_mapping_under(&mut custom_data, LAYER_MAPPING_ALIAS_KEY, &mapping)?;
    Ok(custom_data)
}

/// Converts glyph custom data into an external glyph lib.
///
/// The alias key becomes the canonical mapping key; every other entry is kept as is.
pub fn demote_glyph_custom_data(custom_data: &CustomData) -> Result<CustomData> {
    let mut lib = custom_data.clone();
    let mapping = read_mapping_under(&lib, LAYER_MAPPING_ALIAS_KEY)?;
    lib.remove(LAYER_MAPPING_ALIAS_KEY);
    write_mapping_under(&mut lib, LAYER_MAPPING_KEY, &mapping)?;
    Ok(lib)
}
