use glyphcolor_model::{CustomData, Palette, custom_data};
use serde::Serialize;

use super::messages;
use crate::{ColorPanelsConfig, EditError, EditOutcome, EditSession, Result};

/// One color of a palette as shown in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swatch {
    pub color_index: usize,
    pub hex: String,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSection {
    pub label: String,
    pub swatches: Vec<Swatch>,
}

/// `{ customData }` projection of the document that palette edits are recorded on.
/// Its paths coincide with the document's.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomDataRoot {
    custom_data: CustomData,
}

/// Edits the font wide color palettes.
pub struct ColorPalettesPanel {
    session: EditSession,
    config: ColorPanelsConfig,
    palettes: Vec<Palette>,
}

impl ColorPalettesPanel {
    pub const IDENTIFIER: &'static str = "color-palettes-panel";

    pub fn new(session: EditSession, config: ColorPanelsConfig) -> Self {
        Self {
            session,
            config,
            palettes: Vec::new(),
        }
    }

    /// Palettes as last shown.
    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn sections(&self) -> Vec<PaletteSection> {
        self.palettes
            .iter()
            .enumerate()
            .map(|(pi, palette)| PaletteSection {
                label: messages::palette_label(pi),
                swatches: palette
                    .iter()
                    .enumerate()
                    .map(|(ci, color)| Swatch {
                        color_index: ci,
                        hex: color.to_hex(),
                        tooltip: messages::color_index_tooltip(ci),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Palettes stored in the document, or a single palette holding the default
    /// color when the font has none.
    fn current_palettes(&self) -> Result<Vec<Palette>> {
        let palettes = self.session.read_document(|doc| custom_data::read_palettes(&doc.custom_data))?;
        Ok(palettes.unwrap_or_else(|| vec![Palette::with_default_color(self.config.default_color)]))
    }

    /// Rebuilds the view from the document.
    pub fn setup_ui(&mut self) -> Result<()> {
        self.palettes = self.current_palettes()?;
        Ok(())
    }

    pub fn add_color(&mut self, palette_index: usize) -> Result<EditOutcome> {
        let mut palettes = self.current_palettes()?;
        let max = palettes.len();
        let palette = palettes.get_mut(palette_index).ok_or(EditError::PaletteOutOfRange { index: palette_index, max })?;
        palette.push(self.config.default_color);
        self.save_palettes(palettes)
    }

    pub fn add_palette(&mut self) -> Result<EditOutcome> {
        let mut palettes = self.current_palettes()?;
        palettes.push(Palette::with_default_color(self.config.default_color));
        self.save_palettes(palettes)
    }

    /// Replaces the rgb channels of one color from `#rrggbb`, keeping its alpha.
    pub fn change_color(&mut self, palette_index: usize, color_index: usize, hex: &str) -> Result<EditOutcome> {
        let mut palettes = self.current_palettes()?;
        let max = palettes.len();
        let palette = palettes.get_mut(palette_index).ok_or(EditError::PaletteOutOfRange { index: palette_index, max })?;
        let max = palette.len();
        let color = palette.get_mut(color_index).ok_or(EditError::ColorOutOfRange {
            palette: palette_index,
            index: color_index,
            max,
        })?;
        *color = color.with_hex_rgb(hex)?;
        self.save_palettes(palettes)
    }

    /// Records `palettes` against the custom data, commits if anything changed and
    /// refreshes the view.
    pub fn save_palettes(&mut self, palettes: Vec<Palette>) -> Result<EditOutcome> {
        let root = CustomDataRoot {
            custom_data: self.session.read_document(|doc| doc.custom_data.clone()),
        };
        let recorded = self.session.record_changes(&root, |root| {
            custom_data::write_palettes(&mut root.custom_data, &palettes)?;
            Ok(messages::EDIT_COLOR_PALETTES.to_string())
        })?;
        let outcome = self.session.commit_document_change(&recorded.record)?;
        self.setup_ui()?;
        Ok(outcome)
    }
}
