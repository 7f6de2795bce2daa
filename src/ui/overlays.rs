//! Overlay stack drawn on top of the table view.
//!
//! Holds timed HUD messages and the keybind help. Used by the handlers and ui::render.

use std::slice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Overlay {
    Message { text: String },
    KeybindHelp,
}

#[derive(Debug)]
pub struct OverlayStack {
    overlays: Vec<Overlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self {
            overlays: Vec::new(),
        }
    }

    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    pub fn pop(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }

    pub fn top(&self) -> Option<&Overlay> {
        self.overlays.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, Overlay> {
        self.overlays.iter()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Overlay) -> bool,
    {
        self.overlays.retain(f);
    }
}

impl Default for OverlayStack {
    fn default() -> Self {
        Self::new()
    }
}
