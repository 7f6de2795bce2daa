//! Input action handler methods for filenav.
//!
//! This module implements [AppState] methods that process navigation, row and system
//! actions, apply the [Outcome] a view returned and run launches.

use crate::app::keymap::{NavAction, RowAction, SystemAction};
use crate::app::state::{AppState, KeypressResult};
use crate::app::view::Outcome;
use crate::core::worker::{WorkerTask, spawn_detached};
use crate::core::{Favorite, Favorites, FileItem, Launch, LaunchPlan, Launcher};
use crate::ui::overlays::Overlay;
use crate::utils::run_foreground;

use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

/// AppState input and action handlers
impl<'a> AppState<'a> {
    /// Handles navigation actions (up, down, back, etc).
    /// Returns a [KeypressResult] indicating how the action was handled.
    pub(super) fn handle_nav_action(&mut self, action: NavAction) -> KeypressResult {
        let view = self.stack.top_mut();
        match action {
            NavAction::GoUp => {
                view.move_up();
            }
            NavAction::GoDown => {
                view.move_down();
            }
            NavAction::GoToTop => view.move_to_top(),
            NavAction::GoToBottom => view.move_to_bottom(),
            NavAction::Back => self.handle_back(),
        }
        KeypressResult::Continue
    }

    /// Handles actions on the selected row and the current view.
    pub(super) fn handle_row_action(&mut self, action: RowAction) -> KeypressResult {
        let view = self.stack.top_mut();
        let outcome = match action {
            RowAction::Select => view.select(),
            RowAction::Info => view.tap_accessory(),
            RowAction::ToggleEdit => {
                if !view.toggle_editing() {
                    self.push_overlay_message(
                        "Nothing to edit here".to_string(),
                        Duration::from_secs(2),
                    );
                }
                Outcome::None
            }
            RowAction::Delete => view.delete_selected(),
            RowAction::MoveUp => view.move_selected(true),
            RowAction::MoveDown => view.move_selected(false),
            RowAction::Reload => view.reload(),
            RowAction::AddFavorite => {
                self.add_favorite();
                Outcome::None
            }
        };
        self.apply_outcome(outcome)
    }

    pub(super) fn handle_sys_action(&mut self, action: SystemAction) -> KeypressResult {
        match action {
            SystemAction::Quit => KeypressResult::Quit,
            SystemAction::KeyBindHelp => {
                self.toggle_keybind_help();
                KeypressResult::Consumed
            }
        }
    }

    /// Esc closes the keybind help first, then leaves edit mode, then goes back.
    pub(super) fn handle_esc_close_overlays(&mut self, key: &KeyEvent) -> Option<KeypressResult> {
        if key.code != KeyCode::Esc {
            return None;
        }

        if self
            .overlays()
            .iter()
            .any(|o| matches!(o, Overlay::KeybindHelp))
        {
            self.overlays_mut()
                .retain(|o| !matches!(o, Overlay::KeybindHelp));
            return Some(KeypressResult::Consumed);
        }

        self.handle_back();
        Some(KeypressResult::Consumed)
    }

    /// Leaves edit mode if active, otherwise pops the top view.
    fn handle_back(&mut self) {
        if self.stack.top_mut().finish_editing() {
            return;
        }
        if self.stack.pop().is_some() {
            // Parents may be stale, e.g. a file was edited further down.
            let outcome = self.stack.top_mut().reload();
            self.apply_outcome(outcome);
        }
    }

    /// Carries out what a view asked for.
    pub(super) fn apply_outcome(&mut self, outcome: Outcome) -> KeypressResult {
        match outcome {
            Outcome::None => KeypressResult::Continue,
            Outcome::Push(view) => {
                self.stack.push(view);
                KeypressResult::Consumed
            }
            Outcome::Message(text) => {
                self.push_overlay_message(text, Duration::from_secs(3));
                KeypressResult::Consumed
            }
            Outcome::Launch(launch, item) => self.handle_launch(launch, item),
        }
    }

    /// Runs `launch` for `item`.
    ///
    /// The editor gets the terminal, everything else goes to the worker. With
    /// `close_after_open` set, launches that close the app end the session afterwards.
    fn handle_launch(&mut self, launch: Launch, item: FileItem) -> KeypressResult {
        let config = self.config;
        let launcher = Launcher::new(config.commands(), config.general().temp_dir());

        let plan = match launcher.prepare(launch, &item) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!(?launch, path = %item.path().display(), error = %e, "launch failed");
                self.push_overlay_message(e.to_string(), Duration::from_secs(3));
                return KeypressResult::Consumed;
            }
        };
        let close = launch.closes_app() && config.general().close_after_open();

        match plan {
            LaunchPlan::Foreground(cmd) => {
                match run_foreground(&cmd) {
                    Ok(status) if !status.success() => {
                        tracing::warn!(
                            program = %cmd.program,
                            %status,
                            "editor exited with failure"
                        );
                        self.push_overlay_message(launch.failure_text(), Duration::from_secs(3));
                    }
                    Err(e) => {
                        tracing::error!(program = %cmd.program, error = %e, "editor failed");
                        self.push_overlay_message(
                            format!("{}: {}", launch.failure_text(), e),
                            Duration::from_secs(3),
                        );
                    }
                    Ok(_) => {}
                }
                if close {
                    return KeypressResult::Quit;
                }
                let outcome = self.stack.top_mut().reload();
                self.apply_outcome(outcome);
                KeypressResult::OpenedEditor
            }
            LaunchPlan::Detached(cmd) if close => {
                // Spawned here, the worker would not get to it before exit.
                if let Err(e) = spawn_detached(&cmd) {
                    tracing::error!(program = %cmd.program, error = %e, "spawn failed");
                    self.push_overlay_message(launch.failure_text(), Duration::from_secs(3));
                    return KeypressResult::Consumed;
                }
                KeypressResult::Quit
            }
            LaunchPlan::Detached(command) => {
                self.next_request_id += 1;
                let task = WorkerTask::Spawn {
                    command,
                    launch,
                    request_id: self.next_request_id,
                };
                if self.workers.launch_tx().send(task).is_err() {
                    tracing::error!("launch worker is gone");
                    self.push_overlay_message(launch.failure_text(), Duration::from_secs(3));
                }
                KeypressResult::Consumed
            }
        }
    }

    /// Adds the directory of the current view to the favorites and refreshes the list.
    fn add_favorite(&mut self) {
        let Some(dir) = self.stack.top().source().path().map(FileItem::from_resolved) else {
            self.push_overlay_message("No folder to add".to_string(), Duration::from_secs(2));
            return;
        };

        let fav = Favorite::new(dir.path().to_string_lossy(), dir.basename());
        let result = Favorites::load(self.config.general().favorites())
            .and_then(|mut favs| favs.add(fav));

        let msg = match result {
            Ok(()) => {
                tracing::info!(path = %dir.path().display(), "favorite added");
                let outcome = self.stack.root_mut().reload();
                self.apply_outcome(outcome);
                format!("Added {} to Favorites", dir.title())
            }
            Err(e) => {
                tracing::warn!(error = %e, "adding favorite failed");
                e.to_string()
            }
        };
        self.push_overlay_message(msg, Duration::from_secs(2));
    }

    fn toggle_keybind_help(&mut self) {
        let is_open = self
            .overlays()
            .iter()
            .any(|o| matches!(o, Overlay::KeybindHelp));

        if is_open {
            self.overlays_mut()
                .retain(|o| !matches!(o, Overlay::KeybindHelp));
        } else {
            self.overlays_mut().push(Overlay::KeybindHelp);
        }
    }

    /// Pushes a message overlay that lasts for the specified duration.
    pub(crate) fn push_overlay_message(&mut self, text: String, duration: Duration) {
        self.notification_time = Some(Instant::now() + duration);

        if matches!(self.overlays.top(), Some(Overlay::Message { .. })) {
            self.overlays_mut().pop();
        }

        self.overlays_mut().push(Overlay::Message { text });
    }
}

#[cfg(test)]
mod tests {
    use crate::app::state::{AppState, KeypressResult};
    use crate::config::Config;
    use crate::core::Favorites;
    use crate::ui::overlays::Overlay;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn config_in(dir: &TempDir) -> Result<Config, Box<dyn std::error::Error>> {
        let toml = format!(
            "[general]\nfavorites = {:?}\n\n[commands]\nopener = \"filenav-no-such-opener\"\n",
            dir.path().join("favorites.json").to_string_lossy(),
        );
        Ok(Config::parse(&toml)?)
    }

    fn press(app: &mut AppState, code: KeyCode) -> KeypressResult {
        app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn message(app: &AppState) -> Option<String> {
        app.overlays().iter().find_map(|o| match o {
            Overlay::Message { text } => Some(text.clone()),
            _ => None,
        })
    }

    #[test]
    fn add_favorite_persists_and_refreshes_root() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        let browsed = temp.path().join("Projects");
        fs::create_dir(&browsed)?;
        let mut app = AppState::from_dir(&config, &browsed)?;

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(message(&app).as_deref(), Some("Added Projects to Favorites"));

        let favs = Favorites::load(&temp.path().join("favorites.json"))?;
        assert_eq!(favs.len(), 1);
        assert_eq!(favs.entries()[0].label(), "Projects");

        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.view().title(), "Favorites");
        assert_eq!(app.view().total_rows(), 1);
        Ok(())
    }

    #[test]
    fn favorites_root_cannot_be_added() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        let mut app = AppState::favorites_only(&config);
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(message(&app).as_deref(), Some("No folder to add"));
        Ok(())
    }

    #[test]
    fn edit_mode_on_favorites() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        let mut app = AppState::from_dir(&config, temp.path())?;

        // Listings are not editable.
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(message(&app).as_deref(), Some("Nothing to edit here"));
        assert!(!app.view().editing());

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('e'));
        assert!(app.view().editing());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.view().total_rows(), 0);
        assert!(Favorites::load(&temp.path().join("favorites.json"))?.is_empty());

        // Esc leaves edit mode before anything else.
        press(&mut app, KeyCode::Esc);
        assert!(!app.view().editing());
        Ok(())
    }

    #[test]
    fn keybind_help_toggles_and_esc_closes() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        let mut app = AppState::from_dir(&config, temp.path())?;

        assert_eq!(press(&mut app, KeyCode::Char('?')), KeypressResult::Consumed);
        assert!(matches!(app.overlays().top(), Some(Overlay::KeybindHelp)));

        assert_eq!(press(&mut app, KeyCode::Esc), KeypressResult::Consumed);
        assert!(app.overlays().is_empty());
        assert_eq!(app.stack().len(), 2);
        Ok(())
    }

    #[test]
    fn missing_command_is_reported() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        fs::write(temp.path().join("archive.zip"), b"PK")?;
        let mut app = AppState::from_dir(&config, temp.path())?;

        press(&mut app, KeyCode::Enter);
        let text = message(&app).ok_or("expected a message")?;
        assert!(text.contains("filenav-no-such-opener"));
        assert_eq!(app.stack().len(), 2);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn close_after_open_quits_on_launch() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let favorites = temp.path().join("favorites.json");
        let browsed = temp.path().join("downloads");
        fs::create_dir(&browsed)?;
        fs::write(browsed.join("archive.zip"), b"PK")?;

        for (close, expected) in [
            (true, KeypressResult::Quit),
            (false, KeypressResult::Consumed),
        ] {
            let toml = format!(
                "[general]\nfavorites = {:?}\nclose_after_open = {close}\n\n\
                 [commands]\nopener = \"true\"\n",
                favorites.to_string_lossy(),
            );
            let config = Config::parse(&toml)?;
            let mut app = AppState::from_dir(&config, &browsed)?;

            assert_eq!(press(&mut app, KeyCode::Enter), expected);
            assert_eq!(message(&app), None);
        }
        Ok(())
    }

    #[test]
    fn stat_view_opens_with_info() -> Result<(), Box<dyn std::error::Error>> {
        let temp = tempdir()?;
        let config = config_in(&temp)?;
        fs::write(temp.path().join("notes.txt"), "x")?;
        let mut app = AppState::from_dir(&config, temp.path())?;

        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.view().title(), "notes.txt");
        assert_eq!(app.view().source().title_for_header(2), Some("Flags"));
        Ok(())
    }
}
