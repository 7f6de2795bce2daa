//! UI-related tests for filenav
//!
//! These tests drive the public [AppState] with key events and render it into a
//! ratatui TestBackend, checking what ends up on screen.
//!
//! Temporary directories are created for every scenario and cleaned up afterwards.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use filenav::app::AppState;
use filenav::config::Config;
use filenav::ui;
use ratatui::{Terminal, backend::TestBackend};
use std::{error, fs};
use tempfile::{TempDir, tempdir};

fn config_in(dir: &TempDir) -> Result<Config, Box<dyn error::Error>> {
    let toml = format!(
        "[general]\nfavorites = {:?}\n\n[display]\nborder_shape = \"square\"\n",
        dir.path().join("favorites.json").to_string_lossy()
    );
    Ok(Config::parse(&toml)?)
}

fn draw(app: &AppState, width: u16, height: u16) -> Result<Vec<String>, Box<dyn error::Error>> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| ui::render(f, app))?;
    let buffer = terminal.backend().buffer();
    Ok((0..height)
        .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
        .collect())
}

fn press(app: &mut AppState, code: KeyCode) {
    app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE));
}

#[cfg(unix)]
#[test]
fn test_long_and_tabbed_names_fit_their_row() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let config = config_in(&temp)?;
    let root = temp.path().join("names");
    fs::create_dir(&root)?;
    let long = "a_very_long_file_name_that_cannot_possibly_fit_in_the_frame.txt";
    fs::write(root.join(long), "x")?;
    fs::write(root.join("tabs\tname.txt"), "x")?;
    let app = AppState::from_dir(&config, &root)?;

    let lines = draw(&app, 40, 12)?;
    let long_row = lines
        .iter()
        .find(|l| l.contains("a_very_long_file"))
        .ok_or("no row for the long name")?;
    assert!(!long_row.contains("frame.txt"));
    // Truncation leaves room for the accessory and the border.
    assert!(long_row.ends_with("ⓘ │"));

    assert!(lines.iter().all(|l| !l.contains('\t')));
    assert!(lines.iter().any(|l| l.contains("tabs    name.txt")));
    Ok(())
}

#[test]
fn test_listing_renders_folders_before_files() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let config = config_in(&temp)?;
    let root = temp.path().join("site");
    fs::create_dir_all(root.join("assets"))?;
    fs::write(root.join("index.html"), "<html></html>")?;
    let app = AppState::from_dir(&config, &root)?;

    let lines = draw(&app, 60, 16)?;
    let row_of = |needle: &str| lines.iter().position(|l| l.contains(needle));

    let folders = row_of("Folders").ok_or("no Folders header")?;
    let assets = row_of("assets").ok_or("no assets row")?;
    let files = row_of("Files").ok_or("no Files header")?;
    let index = row_of("index.html").ok_or("no index.html row")?;
    assert!(folders < assets && assets < files && files < index);

    assert!(lines[0].contains("Favorites › site"));
    assert!(lines.iter().any(|l| l.contains("HTML Document")));
    Ok(())
}

#[test]
fn test_stat_view_renders_after_info_key() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let config = config_in(&temp)?;
    fs::write(temp.path().join("song.mp3"), [0u8; 10])?;
    let mut app = AppState::from_dir(&config, temp.path())?;

    press(&mut app, KeyCode::Char('i'));
    let lines = draw(&app, 60, 24)?;

    assert!(lines[0].contains("song.mp3"));
    assert!(lines.iter().any(|l| l.contains("Actions")));
    assert!(lines.iter().any(|l| l.contains("Play Sound")));
    assert!(lines.iter().any(|l| l.contains("Quick Look")));
    Ok(())
}

#[test]
fn test_keybind_help_overlay() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let config = config_in(&temp)?;
    let mut app = AppState::from_dir(&config, temp.path())?;

    press(&mut app, KeyCode::Char('?'));
    let lines = draw(&app, 80, 30)?;
    assert!(lines.iter().any(|l| l.contains("Keybinds")));
    assert!(lines.iter().any(|l| l.contains("Add folder to favorites")));

    press(&mut app, KeyCode::Esc);
    let lines = draw(&app, 80, 30)?;
    assert!(!lines.iter().any(|l| l.contains("Keybinds")));
    Ok(())
}

#[test]
fn test_edit_label_follows_editing() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let config = config_in(&temp)?;
    let mut app = AppState::favorites_only(&config);

    assert!(draw(&app, 60, 10)?[0].contains(" Edit "));
    press(&mut app, KeyCode::Char('e'));
    assert!(draw(&app, 60, 10)?[0].contains(" Done "));
    Ok(())
}
