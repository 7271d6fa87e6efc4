//! Document model for glyph color editing: palettes, per-glyph color layer
//! mappings, the glyph/font document they live in, and structural changes against
//! that document.

mod error;
pub use error::*;

mod color;
pub use color::Color;

mod palette;
pub use palette::Palette;

mod layer_mapping;
pub use layer_mapping::{DEFAULT_LAYER_NAME_PREFIX, LayerMapping, LayerMappingEntry};

pub mod custom_data;
pub use custom_data::{CustomData, LAYER_MAPPING_ALIAS_KEY, LAYER_MAPPING_KEY, PALETTES_KEY};

mod glyph;
pub use glyph::{Component, Contour, Layer, Path, Point, StaticGlyph, VariableGlyph};

mod font;
pub use font::{CUSTOM_DATA_FIELD, FontDocument, GLYPHS_FIELD};

mod change;
pub use change::{Change, ChangeOp, PathElement};
