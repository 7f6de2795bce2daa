//! Display configuration options for filenav.
//!
//! Read from the `[display]` table of filenav.toml.

use ratatui::widgets::BorderType;
use serde::Deserialize;

/// Display configuration options.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Display {
    icons: bool,
    titles: bool,
    show_size: bool,
    section_headers: bool,
    border_shape: BorderShape,
    scroll_padding: usize,
}

impl Display {
    /// Nerd Font icons in front of every row.
    pub fn icons(&self) -> bool {
        self.icons
    }

    /// The breadcrumb header with the titles of the view stack.
    pub fn titles(&self) -> bool {
        self.titles
    }

    /// The short size appended to the type description of files.
    pub fn show_size(&self) -> bool {
        self.show_size
    }

    pub fn section_headers(&self) -> bool {
        self.section_headers
    }

    pub fn border_shape(&self) -> &BorderShape {
        &self.border_shape
    }

    pub fn scroll_padding(&self) -> usize {
        self.scroll_padding
    }
}

impl Default for Display {
    fn default() -> Self {
        Display {
            icons: false,
            titles: true,
            show_size: true,
            section_headers: true,
            border_shape: BorderShape::Rounded,
            scroll_padding: 3,
        }
    }
}

/// Border shape options.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BorderShape {
    Square,
    Rounded,
    Double,
    Thick,
}

impl BorderShape {
    pub fn as_border_type(&self) -> BorderType {
        match self {
            BorderShape::Square => BorderType::Plain,
            BorderShape::Rounded => BorderType::Rounded,
            BorderShape::Double => BorderType::Double,
            BorderShape::Thick => BorderType::Thick,
        }
    }
}
