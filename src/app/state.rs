//! Application State and main controller module for filenav.
//!
//! This module defines the overall [AppState] struct, which holds all major application
//! information and passes it to the UI/Terminal functions:
//! - Configuration (loaded from config files) and the keymap built from it
//! - The navigation stack of table views, rooted at the favorites list
//! - Communication with the launch worker via crossbeam_channel
//! - Notification and overlay handling
//!
//! This is the primary context/state object passed to most UI/Terminal event logic.

use crate::app::favorites::FavoritesSource;
use crate::app::files::FileListSource;
use crate::app::keymap::{Action, Keymap};
use crate::app::view::{ListOptions, View, ViewStack};
use crate::config::Config;
use crate::core::worker::{WorkerResponse, Workers};
use crate::core::{Favorites, FileItem};
use crate::ui::overlays::{Overlay, OverlayStack};

use crossterm::event::KeyEvent;

use std::path::Path;
use std::time::{Duration, Instant};

/// Enumeration for each individual keypress result processed.
///
/// Is used by the event loop to decide on redraws and exit.
#[derive(Debug, PartialEq, Eq)]
pub enum KeypressResult {
    Continue,
    Consumed,
    Quit,
    /// A foreground program owned the terminal, the screen needs a full clear.
    OpenedEditor,
}

/// Main struct which holds the central application state of filenav.
pub struct AppState<'a> {
    pub(super) config: &'a Config,
    pub(super) keymap: Keymap,
    pub(super) options: ListOptions,

    pub(super) stack: ViewStack,

    pub(super) workers: Workers,
    pub(super) next_request_id: u64,

    pub(super) notification_time: Option<Instant>,
    pub(super) overlays: OverlayStack,
}

impl<'a> AppState<'a> {
    /// Favorites with the working directory pushed on top.
    pub fn new(config: &'a Config) -> std::io::Result<Self> {
        let current_dir = std::env::current_dir()?;
        Self::from_dir(config, &current_dir)
    }

    /// Favorites with `initial_path` pushed on top. Anything but a directory falls back to
    /// the working directory.
    pub fn from_dir(config: &'a Config, initial_path: &Path) -> std::io::Result<Self> {
        let start_dir = if initial_path.is_dir() {
            initial_path.to_path_buf()
        } else {
            std::env::current_dir()?
        };

        let mut app = Self::favorites_only(config);
        app.stack
            .push(FileListSource::view(FileItem::new(&start_dir), app.options));
        Ok(app)
    }

    /// Only the favorites list, nothing pushed.
    pub fn favorites_only(config: &'a Config) -> Self {
        let general = config.general();
        let options = ListOptions {
            show_hidden: general.show_hidden(),
            case_insensitive: general.case_insensitive(),
            show_size: config.display().show_size(),
        };

        let mut startup_error = None;
        let favorites = match Favorites::load(general.favorites()) {
            Ok(favs) => favs,
            Err(e) => {
                tracing::warn!(error = %e, "favorites unreadable, starting with an empty list");
                startup_error = Some(e.to_string());
                Favorites::empty(general.favorites())
            }
        };

        let mut app = Self {
            config,
            keymap: Keymap::from_config(config),
            options,
            stack: ViewStack::new(FavoritesSource::view(favorites, options)),
            workers: Workers::spawn(),
            next_request_id: 0,
            notification_time: None,
            overlays: OverlayStack::new(),
        };

        if let Some(msg) = startup_error {
            app.push_overlay_message(msg, Duration::from_secs(7));
        }
        app
    }

    // Getters/ accessors

    #[inline]
    pub fn config(&self) -> &Config {
        self.config
    }

    #[inline]
    pub fn stack(&self) -> &ViewStack {
        &self.stack
    }

    #[inline]
    pub fn view(&self) -> &View {
        self.stack.top()
    }

    #[inline]
    pub fn workers(&self) -> &Workers {
        &self.workers
    }

    #[inline]
    pub fn list_options(&self) -> ListOptions {
        self.options
    }

    #[inline]
    pub fn notification_time(&self) -> &Option<Instant> {
        &self.notification_time
    }

    #[inline]
    pub fn overlays(&self) -> &OverlayStack {
        &self.overlays
    }

    #[inline]
    pub fn overlays_mut(&mut self) -> &mut OverlayStack {
        &mut self.overlays
    }

    /// Updates state on every loop iteration: expires messages and drains worker responses.
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = false;

        if let Some(expiry) = self.notification_time
            && Instant::now() >= expiry
        {
            self.notification_time = None;

            self.overlays_mut()
                .retain(|o| !matches!(o, Overlay::Message { .. }));

            changed = true;
        }

        while let Ok(response) = self.workers.response_rx().try_recv() {
            match response {
                WorkerResponse::Exited {
                    launch,
                    success,
                    request_id,
                } => {
                    tracing::debug!(?launch, success, request_id, "launch finished");
                    if !success {
                        self.push_overlay_message(launch.failure_text(), Duration::from_secs(3));
                        changed = true;
                    }
                }
                WorkerResponse::Error {
                    launch,
                    message,
                    request_id,
                } => {
                    tracing::warn!(?launch, request_id, error = %message, "launch failed");
                    self.push_overlay_message(
                        format!("{}: {}", launch.failure_text(), message),
                        Duration::from_secs(5),
                    );
                    changed = true;
                }
            }
        }
        changed
    }

    /// Central key handler
    ///
    /// Coordinates the action and handler module functions.
    pub fn handle_keypress(&mut self, key: KeyEvent) -> KeypressResult {
        if let Some(res) = self.handle_esc_close_overlays(&key) {
            return res;
        }

        if let Some(action) = self.keymap.lookup(key) {
            return match action {
                Action::System(sys_act) => self.handle_sys_action(sys_act),
                Action::Nav(nav_act) => self.handle_nav_action(nav_act),
                Action::Row(row_act) => self.handle_row_action(row_act),
            };
        }

        KeypressResult::Continue
    }
}
