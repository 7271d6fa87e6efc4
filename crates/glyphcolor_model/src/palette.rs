use serde::{Deserialize, Serialize};

use crate::Color;

/// Ordered list of colors. Layer mappings refer to colors by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(colors: &[Color]) -> Self {
        Self { colors: colors.to_vec() }
    }

    /// A palette holding one color, used when a font defines none.
    pub fn with_default_color(color: Color) -> Self {
        Self { colors: vec![color] }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Color> {
        self.colors.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Color> {
        self.colors.get_mut(index)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn push(&mut self, color: Color) {
        self.colors.push(color);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Color> {
        self.colors.iter()
    }

    /// Checks whether `color_index` addresses a color of this palette.
    pub fn contains_index(&self, color_index: i64) -> bool {
        color_index >= 0 && (color_index as usize) < self.colors.len()
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Self { colors }
    }
}
