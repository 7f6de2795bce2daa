//! Terminal UI for filenav.
//!
//! [render] draws the top view of the stack with its breadcrumb header and footer,
//! [widgets] the dialogs drawn above it, [overlays] tracks which dialogs are open.

pub mod overlays;
pub mod render;
pub mod widgets;

pub use render::render;
