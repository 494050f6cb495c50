//! Figure themes

use crate::style::Color;
use serde::{Deserialize, Serialize};

/// Non-data appearance of a figure
///
/// Sizes are in pixels. Title, subtitle and caption sizes derive from
/// `base_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub font_family: String,
    pub base_size: u32,
    pub background: Color,
    pub panel_background: Color,
    /// Major grid lines; `None` hides the grid
    pub grid_colour: Option<Color>,
    pub text_colour: Color,
    /// Outer margin in pixels
    pub margin: u32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            base_size: 14,
            background: Color::WHITE,
            panel_background: Color::WHITE,
            grid_colour: Some(Color::GREY92),
            text_colour: Color::BLACK,
            margin: 10,
        }
    }
}

impl Theme {
    /// Default theme without grid lines
    pub fn classic() -> Self {
        Self {
            grid_colour: None,
            ..Self::default()
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_base_size(mut self, size: u32) -> Self {
        self.base_size = size;
        self
    }

    pub fn with_grid_colour(mut self, colour: Option<Color>) -> Self {
        self.grid_colour = colour;
        self
    }

    pub fn title_size(&self) -> u32 {
        self.base_size * 13 / 10
    }

    pub fn subtitle_size(&self) -> u32 {
        self.base_size
    }

    pub fn caption_size(&self) -> u32 {
        (self.base_size * 17 / 20).max(1)
    }

    pub fn tick_size(&self) -> u32 {
        (self.base_size * 4 / 5).max(1)
    }
}
