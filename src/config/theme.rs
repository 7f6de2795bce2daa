//! Theme configuration options for filenav.
//!
//! Read from the `[theme]` table of filenav.toml. Every entry is a fg/bg [ColorPair];
//! colors left at `default` fall back to the internal theme.

use crate::utils::parse_color;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use std::sync::LazyLock;

/// Theme configuration options.
/// # Examples
/// ```toml
/// [theme.selection]
/// bg = "#303030"
/// [theme.directory]
/// fg = "cyan"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Theme {
    accent: ColorPair,
    selection: ColorPair,
    entry: ColorPair,
    directory: ColorPair,
    detail: ColorPair,
    section: ColorPair,
    path: ColorPair,
    editing: ColorPair,
    status_line: ColorPair,
    message: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            accent: ColorPair::fg(Color::Indexed(238)),
            selection: ColorPair::bg(Color::Indexed(236)),
            entry: ColorPair::default(),
            directory: ColorPair::fg(Color::Blue),
            detail: ColorPair::fg(Color::DarkGray),
            section: ColorPair::fg(Color::Yellow),
            path: ColorPair::fg(Color::Magenta),
            editing: ColorPair::fg(Color::Red),
            status_line: ColorPair::default(),
            message: ColorPair::default(),
        }
    }
}

impl Theme {
    /// Internal default theme, used as fallback when a color is left at Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn accent_style(&self) -> Style {
        self.accent.style_or(&Theme::internal_defaults().accent)
    }

    pub fn selection_style(&self) -> Style {
        self.selection.style_or(&Theme::internal_defaults().selection)
    }

    pub fn entry_style(&self) -> Style {
        self.entry.style_or(&Theme::internal_defaults().entry)
    }

    pub fn directory_style(&self) -> Style {
        self.directory.style_or(&Theme::internal_defaults().directory)
    }

    pub fn detail_style(&self) -> Style {
        self.detail.style_or(&Theme::internal_defaults().detail)
    }

    pub fn section_style(&self) -> Style {
        self.section
            .style_or(&Theme::internal_defaults().section)
            .add_modifier(Modifier::BOLD)
    }

    pub fn path_style(&self) -> Style {
        self.path.style_or(&Theme::internal_defaults().path)
    }

    pub fn editing_style(&self) -> Style {
        self.editing.style_or(&Theme::internal_defaults().editing)
    }

    pub fn status_line_style(&self) -> Style {
        self.status_line.style_or(&Theme::internal_defaults().status_line)
    }

    pub fn message_style(&self) -> Style {
        self.message.style_or(&Theme::internal_defaults().message)
    }
}

/// Foreground and background color of one themed element.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bg: Color::Reset,
        }
    }

    const fn bg(bg: Color) -> Self {
        Self {
            fg: Color::Reset,
            bg,
        }
    }

    /// Replaces Reset colors with those of `other`.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
