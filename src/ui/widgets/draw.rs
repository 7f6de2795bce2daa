//! Draw functions for the overlays: HUD messages and the keybind help.
//!
//! Both use the dialog helpers from [super] and are called by ui::render.

use crate::app::AppState;
use crate::ui::widgets::{DialogLayout, DialogPosition, DialogSize, DialogStyle, draw_dialog};

use ratatui::{
    Frame,
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Borders,
};
use unicode_width::UnicodeWidthStr;

/// Draws a message box at the bottom right, above the footer.
/// Used for launch failures, favorites errors and confirmations.
pub(crate) fn draw_message_overlay(
    frame: &mut Frame,
    app: &AppState,
    accent_style: Style,
    text: &str,
) {
    let theme = app.config().theme();
    let border_type = app.config().display().border_shape().as_border_type();

    let mut max_line_width = 0;
    let mut line_count = 0;
    for line in text.lines() {
        max_line_width = max_line_width.max(line.width());
        line_count += 1;
    }

    let min_width = 27;
    let border_pad = 2;
    let right_pad = 2;
    let area = frame.area();

    let width =
        ((max_line_width + right_pad).max(min_width) + border_pad).min(area.width as usize) as u16;
    let height = ((line_count.max(1) + border_pad).min(area.height as usize)) as u16;

    let dialog_style = DialogStyle {
        border: Borders::ALL,
        border_style: accent_style,
        text_style: theme.message_style(),
        title: Some(Span::styled(" Message ", theme.path_style())),
    };

    // Keep the footer line visible.
    let mut layout_area = area;
    layout_area.height = layout_area.height.saturating_sub(1);

    draw_dialog(
        frame,
        DialogLayout {
            area: layout_area,
            position: DialogPosition::BottomRight,
            size: DialogSize(width, height),
        },
        border_type,
        &dialog_style,
        text,
        Some(Alignment::Left),
    );
}

pub(crate) fn draw_keybind_help(frame: &mut Frame, app: &AppState, accent_style: Style) {
    let keys = app.config().keys();
    let theme = app.config().theme();
    let area = frame.area();

    let size = DialogSize(
        area.width.saturating_sub(6).clamp(40, 72),
        area.height.saturating_sub(4).clamp(12, 26),
    );

    let border_type = app.config().display().border_shape().as_border_type();

    let fmt_keys = |list: &[String]| -> String {
        if list.is_empty() {
            "-".to_string()
        } else {
            list.join(", ")
        }
    };

    let sections: Vec<(&str, Vec<(String, &'static str)>)> = vec![
        (
            "Navigation",
            vec![
                (fmt_keys(keys.go_up()), "Move selection up"),
                (fmt_keys(keys.go_down()), "Move selection down"),
                (fmt_keys(keys.go_to_top()), "Go to first row"),
                (fmt_keys(keys.go_to_bottom()), "Go to last row"),
                (fmt_keys(keys.back()), "Back to previous view"),
            ],
        ),
        (
            "Rows",
            vec![
                (fmt_keys(keys.select()), "Open folder / file"),
                (fmt_keys(keys.info()), "Show info and actions"),
                (fmt_keys(keys.add_favorite()), "Add folder to favorites"),
                (fmt_keys(keys.reload()), "Reload view"),
            ],
        ),
        (
            "Favorites",
            vec![
                (fmt_keys(keys.toggle_edit()), "Edit / Done"),
                (fmt_keys(keys.delete()), "Delete row (editing)"),
                (fmt_keys(keys.move_up()), "Move row up (editing)"),
                (fmt_keys(keys.move_down()), "Move row down (editing)"),
            ],
        ),
        (
            "System",
            vec![
                (fmt_keys(keys.keybind_help()), "Toggle keybind help"),
                (fmt_keys(keys.quit()), "Quit"),
            ],
        ),
    ];

    let header_style = theme.section_style();
    let key_style = accent_style.add_modifier(Modifier::BOLD);
    let key_width = sections
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|(k, _)| k.width()))
        .max()
        .unwrap_or(0)
        .min(24);

    let mut all_rows: Vec<Line> = Vec::new();
    for (section_name, rows) in sections {
        all_rows.push(Line::from(Span::styled(
            format!("{section_name}:"),
            header_style,
        )));
        for (k, desc) in rows {
            let pad = key_width.saturating_sub(k.width());
            all_rows.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(k, key_style),
                Span::raw(" ".repeat(pad + 2)),
                Span::raw(desc),
            ]));
        }
        all_rows.push(Line::raw(""));
    }

    while matches!(all_rows.last(), Some(l) if l.width() == 0) {
        all_rows.pop();
    }

    let dialog_style = DialogStyle {
        border: Borders::ALL,
        border_style: accent_style,
        text_style: theme.entry_style(),
        title: Some(Span::styled(" Keybinds ", theme.path_style())),
    };

    draw_dialog(
        frame,
        DialogLayout {
            area,
            position: DialogPosition::Center,
            size,
        },
        border_type,
        &dialog_style,
        Text::from(all_rows),
        Some(Alignment::Left),
    );
}
