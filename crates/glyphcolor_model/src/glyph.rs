use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CustomData, LayerMapping, Result, custom_data};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub point_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contour {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub is_closed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    #[serde(default)]
    pub contours: Vec<Contour>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub location: BTreeMap<String, f64>,
}

/// Outline data of one layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticGlyph {
    #[serde(default)]
    pub path: Path,
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_advance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub glyph: StaticGlyph,
}

impl Layer {
    /// A layer with an empty outline and no components.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A glyph with its named layers and custom data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableGlyph {
    pub name: String,
    #[serde(default)]
    pub layers: BTreeMap<String, Layer>,
    #[serde(default)]
    pub custom_data: CustomData,
}

impl VariableGlyph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn layer_mapping(&self) -> Result<LayerMapping> {
        custom_data::read_layer_mapping(&self.custom_data)
    }

    /// Stores `mapping`; an empty mapping removes the custom data key.
    pub fn set_layer_mapping(&mut self, mapping: &LayerMapping) -> Result<()> {
        custom_data::write_layer_mapping(&mut self.custom_data, mapping)
    }

    pub fn has_layer(&self, layer_name: &str) -> bool {
        self.layers.contains_key(layer_name)
    }

    /// Inserts an empty layer under `layer_name` unless one exists.
    ///
    /// Returns true if a layer was created.
    pub fn ensure_layer(&mut self, layer_name: &str) -> bool {
        if self.layers.contains_key(layer_name) {
            return false;
        }
        self.layers.insert(layer_name.to_string(), Layer::empty());
        true
    }
}
