//! Dialog building blocks shared by the overlay draw functions in [draw].
//!
//! A dialog is a bordered, cleared box placed relative to the frame by a [DialogPosition]
//! and a [DialogSize].

mod draw;

pub(crate) use draw::{draw_keybind_help, draw_message_overlay};

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Span, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

/// Where a dialog sits inside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPosition {
    Center,
    BottomRight,
}

/// Width and height, clamped to the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogSize(pub u16, pub u16);

impl DialogSize {
    fn dimensions(self, area: Rect) -> (u16, u16) {
        (self.0.min(area.width), self.1.min(area.height))
    }
}

pub struct DialogStyle<'a> {
    pub border: Borders,
    pub border_style: Style,
    pub text_style: Style,
    pub title: Option<Span<'a>>,
}

pub struct DialogLayout {
    pub area: Rect,
    pub position: DialogPosition,
    pub size: DialogSize,
}

/// Computes the rectangle of a dialog of `size` at `position` inside `area`.
pub fn dialog_area(area: Rect, size: DialogSize, position: DialogPosition) -> Rect {
    let (width, height) = size.dimensions(area);
    let free_x = area.width - width;
    let free_y = area.height - height;

    let (x, y) = match position {
        DialogPosition::Center => (free_x / 2, free_y / 2),
        DialogPosition::BottomRight => (free_x.saturating_sub(1), free_y.saturating_sub(1)),
    };

    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height,
    }
}

/// Clears the dialog area and draws `content` inside a bordered block.
pub fn draw_dialog<'a, T>(
    frame: &mut Frame,
    layout: DialogLayout,
    border_type: BorderType,
    style: &DialogStyle<'a>,
    content: T,
    alignment: Option<Alignment>,
) where
    T: Into<Text<'a>>,
{
    let rect = dialog_area(layout.area, layout.size, layout.position);
    frame.render_widget(Clear, rect);

    let mut block = Block::default()
        .borders(style.border)
        .border_type(border_type)
        .border_style(style.border_style);
    if let Some(title) = &style.title {
        block = block.title(title.clone());
    }

    let paragraph = Paragraph::new(content)
        .block(block)
        .style(style.text_style)
        .wrap(Wrap { trim: false })
        .alignment(alignment.unwrap_or(Alignment::Left));

    frame.render_widget(paragraph, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialog_area_stays_inside() {
        let area = Rect::new(0, 0, 80, 24);

        let center = dialog_area(area, DialogSize(40, 10), DialogPosition::Center);
        assert_eq!(center, Rect::new(20, 7, 40, 10));

        let corner = dialog_area(area, DialogSize(30, 3), DialogPosition::BottomRight);
        assert_eq!(corner, Rect::new(49, 20, 30, 3));

        let oversized = dialog_area(area, DialogSize(200, 50), DialogPosition::Center);
        assert_eq!(oversized, area);
    }
}
