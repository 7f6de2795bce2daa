//! UI renderer implementation.
//!
//! Contains the top-level `render` entry point used by the terminal loop. Draws the top
//! view of the stack as a sectioned table inside a bordered frame: the breadcrumb and
//! Edit/Done state in the header, the directory and cursor position in the footer.
//!
//! This module should stay "pure rendering": it reads state + config and produces widgets.

use crate::app::{Accessory, AppState, Cell, CellStyle, IndexPath, View};
use crate::core::sanitize_to_exact_width;
use crate::ui::{overlays::Overlay, widgets};
use crate::utils::shorten_home_path;

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use unicode_width::UnicodeWidthStr;

const CRUMB_SEP: &str = " › ";
const VALUE2_LABEL_WIDTH: usize = 18;

/// Styles and switches used to turn cells into list items.
#[derive(Clone, Copy)]
struct RowStyles {
    entry: Style,
    directory: Style,
    detail: Style,
    section: Style,
    editing: Style,
    icons: bool,
    headers: bool,
}

/// Render function which renders the entire terminal UI for filenav on each frame.
pub fn render(frame: &mut Frame, app: &AppState) {
    let cfg = app.config();
    let display_cfg = cfg.display();
    let theme_cfg = cfg.theme();
    let accent_style = theme_cfg.accent_style();
    let border_type = display_cfg.border_shape().as_border_type();
    let view = app.view();
    let area = frame.area();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(accent_style)
        .border_type(border_type);

    if display_cfg.titles() {
        let titles: Vec<String> = app.stack().iter().map(View::title).collect();
        let crumb = breadcrumb(&titles, (area.width as usize).saturating_sub(14));
        block = block.title(Line::from(vec![
            Span::raw(" "),
            Span::styled(crumb, theme_cfg.path_style()),
            Span::raw(" "),
        ]));

        if view.source().is_editable() {
            let (label, style) = if view.editing() {
                (" Done ", theme_cfg.editing_style())
            } else {
                (" Edit ", theme_cfg.detail_style())
            };
            block = block.title(Line::from(Span::styled(label, style)).right_aligned());
        }
    }

    if let Some(dir) = view.source().path() {
        block = block.title_bottom(Line::from(vec![
            Span::raw(" "),
            Span::styled(shorten_home_path(dir), theme_cfg.status_line_style()),
            Span::raw(" "),
        ]));
    }
    block = block.title_bottom(
        Line::from(Span::styled(
            format!(" {} ", position_text(view)),
            theme_cfg.status_line_style(),
        ))
        .right_aligned(),
    );

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let styles = RowStyles {
        entry: theme_cfg.entry_style(),
        directory: theme_cfg.directory_style(),
        detail: theme_cfg.detail_style(),
        section: theme_cfg.section_style(),
        editing: theme_cfg.editing_style(),
        icons: display_cfg.icons(),
        headers: display_cfg.section_headers(),
    };
    draw_table(frame, app, inner, styles);
    render_overlays(frame, app, accent_style);
}

/// Draws the rows of the top view, or a placeholder when it has none.
fn draw_table(frame: &mut Frame, app: &AppState, area: Rect, styles: RowStyles) {
    let view = app.view();

    if view.total_rows() == 0 {
        let text = match view.source().path() {
            Some(_) => "Empty folder".to_string(),
            None if view.source().is_editable() => {
                let key = app
                    .config()
                    .keys()
                    .add_favorite()
                    .first()
                    .cloned()
                    .unwrap_or_default();
                format!("No favorites yet. Press {key} in a folder to add it.")
            }
            None => "Nothing to show".to_string(),
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, styles.detail)).alignment(Alignment::Center),
            area,
        );
        return;
    }

    let (items, selected_item) = table_items(view, area.width as usize, styles);
    let list = List::new(items)
        .highlight_style(app.config().theme().selection_style())
        .scroll_padding(app.config().display().scroll_padding());
    let mut state = ListState::default().with_selected(selected_item);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Builds the list items of `view`: section headers followed by their rows.
///
/// Returns the items and the item index of the selected row.
fn table_items(
    view: &View,
    width: usize,
    styles: RowStyles,
) -> (Vec<ListItem<'static>>, Option<usize>) {
    let source = view.source();
    let mut items = Vec::with_capacity(view.total_rows() + source.number_of_sections());
    let mut selected_item = None;
    let mut flat = 0;

    for section in 0..source.number_of_sections() {
        let rows = source.number_of_rows(section);
        if rows == 0 {
            continue;
        }
        if styles.headers
            && let Some(header) = source.title_for_header(section)
        {
            items.push(ListItem::new(Line::from(Span::styled(
                header.to_string(),
                styles.section,
            ))));
        }

        for row in 0..rows {
            let index = IndexPath::new(section, row);
            if flat == view.selected() {
                selected_item = Some(items.len());
            }
            let marker = view.editing() && source.can_delete(index);
            items.push(cell_item(source.cell_for_row(index), width, styles, marker));
            flat += 1;
        }
    }
    (items, selected_item)
}

fn accessory_symbol(accessory: Accessory) -> &'static str {
    match accessory {
        Accessory::None => "",
        Accessory::Detail => " ⓘ",
        Accessory::DetailDisclosure => " ⓘ ›",
    }
}

/// Lays out one cell as a list item of one (value2) or two (subtitle) lines.
fn cell_item(
    cell: Cell,
    width: usize,
    styles: RowStyles,
    delete_marker: bool,
) -> ListItem<'static> {
    let mut lead: Vec<Span<'static>> = vec![Span::raw(" ")];
    if delete_marker {
        lead.push(Span::styled("⊖ ", styles.editing));
    }

    match cell.style {
        CellStyle::Value2 => {
            let label = sanitize_to_exact_width(&cell.text, VALUE2_LABEL_WIDTH);
            let used = lead.iter().map(|s| s.width()).sum::<usize>() + VALUE2_LABEL_WIDTH + 1;
            let value = sanitize_to_exact_width(&cell.detail, width.saturating_sub(used));
            lead.push(Span::styled(label, styles.detail));
            lead.push(Span::raw(" "));
            lead.push(Span::styled(value, styles.entry));
            ListItem::new(Line::from(lead))
        }
        CellStyle::Subtitle => {
            if styles.icons && !cell.icon.is_empty() {
                lead.push(Span::raw(format!("{} ", cell.icon)));
            }
            let indent = lead.iter().map(|s| s.width()).sum::<usize>();
            let accessory = accessory_symbol(cell.accessory);
            let text_width = width.saturating_sub(indent + accessory.width() + 1);

            let text_style = if cell.directory {
                styles.directory
            } else {
                styles.entry
            };

            let mut first = lead;
            first.push(Span::styled(
                sanitize_to_exact_width(&cell.text, text_width),
                text_style,
            ));
            first.push(Span::styled(accessory, styles.detail));

            let second = Line::from(vec![
                Span::raw(" ".repeat(indent)),
                Span::styled(
                    sanitize_to_exact_width(&cell.detail, width.saturating_sub(indent + 1)),
                    styles.detail,
                ),
            ]);
            ListItem::new(Text::from(vec![Line::from(first), second]))
        }
    }
}

/// Joins the view titles, dropping the oldest ones until the result fits `max_width`.
fn breadcrumb(titles: &[String], max_width: usize) -> String {
    let mut start = 0;
    loop {
        let mut crumb = titles[start..].join(CRUMB_SEP);
        if start > 0 {
            crumb = format!("…{CRUMB_SEP}{crumb}");
        }
        if crumb.width() <= max_width || start + 1 >= titles.len() {
            return crumb;
        }
        start += 1;
    }
}

/// Cursor position as `current/total`.
fn position_text(view: &View) -> String {
    match view.total_rows() {
        0 => "0/0".to_string(),
        total => format!("{}/{}", view.selected() + 1, total),
    }
}

/// Renders any active overlays such as the keybind help or message boxes.
fn render_overlays(frame: &mut Frame, app: &AppState, accent_style: Style) {
    for overlay in app.overlays().iter() {
        match overlay {
            Overlay::Message { text } => {
                widgets::draw_message_overlay(frame, app, accent_style, text);
            }
            Overlay::KeybindHelp => {
                widgets::draw_keybind_help(frame, app, accent_style);
            }
        }
    }
}

/// render integration tests
#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::Config;
    use ratatui::{Terminal, backend::TestBackend};
    use std::{error, fs};
    use tempfile::{TempDir, tempdir};

    fn config_in(dir: &TempDir) -> Result<Config, Box<dyn error::Error>> {
        let toml = format!(
            "[general]\nfavorites = {:?}\n",
            dir.path().join("favorites.json").to_string_lossy()
        );
        Ok(Config::parse(&toml)?)
    }

    fn screen(app: &AppState) -> Result<String, Box<dyn error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(70, 20))?;
        terminal.draw(|f| render(f, app))?;
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        Ok(out)
    }

    #[test]
    fn breadcrumb_drops_oldest_titles() {
        let titles: Vec<String> = ["Favorites", "home", "user", "projects"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(breadcrumb(&titles, 80), "Favorites › home › user › projects");
        assert_eq!(breadcrumb(&titles, 20), "… › user › projects");
        assert_eq!(breadcrumb(&titles, 3), "… › projects");
    }

    #[test]
    fn listing_shows_sections_and_rows() -> Result<(), Box<dyn error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        let dir = temp.path().join("work");
        fs::create_dir_all(dir.join("src"))?;
        fs::write(dir.join("main.py"), "print(1)\n")?;
        let app = AppState::from_dir(&config, &dir)?;

        let out = screen(&app)?;
        assert!(out.contains("Favorites › work"));
        assert!(out.contains("Folders"));
        assert!(out.contains("Files"));
        assert!(out.contains("main.py"));
        assert!(out.contains("Python Script (9 bytes)"));
        assert!(out.contains("1/2"));
        Ok(())
    }

    #[test]
    fn empty_favorites_hint_and_edit_label() -> Result<(), Box<dyn error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        let app = AppState::favorites_only(&config);

        let out = screen(&app)?;
        assert!(out.contains("No favorites yet"));
        assert!(out.contains(" Edit "));
        assert!(out.contains("0/0"));
        Ok(())
    }

    #[test]
    fn message_overlay_is_drawn() -> Result<(), Box<dyn error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        let mut app = AppState::favorites_only(&config);
        app.push_overlay_message("Failed to Open".to_string(), std::time::Duration::from_secs(3));

        let out = screen(&app)?;
        assert!(out.contains("Failed to Open"));
        assert!(out.contains("Message"));
        Ok(())
    }
}
