//! Application layer for filenav.
//!
//! - [view]: the table view model ([view::TableSource], cells, cursor) and the view stack.
//! - [favorites], [files], [stat]: the three table sources shown by the browser.
//! - [keymap]: key parsing and key to action mapping.
//! - [state] and handlers: the [AppState] controller tying it together.

pub mod favorites;
pub mod files;
mod handlers;
pub mod keymap;
pub mod state;
pub mod stat;
pub mod view;

pub use favorites::FavoritesSource;
pub use files::FileListSource;
pub use stat::StatSource;
pub use state::{AppState, KeypressResult};
pub use view::{
    Accessory, Cell, CellStyle, IndexPath, ListOptions, Outcome, TableSource, View, ViewStack,
};
