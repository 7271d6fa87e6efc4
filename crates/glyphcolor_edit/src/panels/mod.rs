//! Panel controllers
//!
//! Panels translate user actions into mutators run by the [`EditSession`](crate::EditSession)
//! and derive their view model from the document after every edit.

mod color_layers;
mod color_palettes;
mod form;

pub use color_layers::ColorLayersPanel;
pub use color_palettes::{ColorPalettesPanel, PaletteSection, Swatch};
pub use form::{FieldDescription, FormAction};

/// User facing strings.
pub mod messages {
    pub const COLOR_LAYERS_TITLE: &str = "Color layers";
    pub const NO_PALETTE: &str = "The font has no color palette";
    pub const NO_GLYPH_SELECTED: &str = "No glyph selected";
    pub const NO_LAYERS_YET: &str = "No color layers yet";
    pub const ADD_LAYER: &str = "Add color layer";
    pub const REMOVE_LAYER: &str = "Remove color layer";
    pub const COLOR_INDEX: &str = "Color index";
    pub const EDIT_COLOR_LAYERS: &str = "Edit color layers";

    pub const COLOR_PALETTES_TITLE: &str = "Color palettes";
    pub const ADD_PALETTE: &str = "Add palette";
    pub const EDIT_COLOR_PALETTES: &str = "Edit color palettes";

    pub fn palette_label(index: usize) -> String {
        format!("Palette {index}")
    }

    pub fn color_index_tooltip(index: usize) -> String {
        format!("Color index {index}")
    }
}
