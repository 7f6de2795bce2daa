//! Core runtime logic for filenav.
//!
//! This module contains the non-UI pieces used by the application:
//! - [filetypes]: static extension tables and the type groups they map to.
//! - [fm]: path metadata and directory listing (see [browse_dir], [FileItem], [FileInfo]).
//! - [formatter]: sizes, times, permission bits and the rows of the stat view.
//! - [favorites]: the favorites list and its JSON file.
//! - [launch]: per-file-type dispatch and the external commands behind it.
//! - [worker]: background thread running detached commands.
//! - [terminal]: terminal setup/teardown and the crossterm/ratatui event loop.

pub mod favorites;
pub mod filetypes;
pub mod fm;
pub mod formatter;
pub mod launch;
pub mod terminal;
pub mod worker;

pub use favorites::{Favorite, Favorites, FavoritesError};
pub use filetypes::FileGroup;
pub use fm::{FileInfo, FileItem, browse_dir};
pub use formatter::{
    StatRow, flag_rows, format_attributes, format_size, format_utc, has_flags,
    sanitize_to_exact_width, stat_rows,
};
pub use launch::{Launch, LaunchError, LaunchPlan, Launcher, StatAction, dispatch_for, stat_actions};
