//! Table views and the navigation stack.
//!
//! A [View] pairs a [TableSource] with a cursor and an editing flag. Sources describe
//! sections of rows and react to selection; the [ViewStack] holds the pushed views, with
//! the favorites list as its root.

use crate::core::{FileItem, Launch};

/// Position of a row: section index and row within that section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPath {
    pub section: usize,
    pub row: usize,
}

impl IndexPath {
    pub fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }
}

/// The button at the end of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessory {
    None,
    /// Info only.
    Detail,
    /// Info plus a disclosure arrow, used for anything that can be entered.
    DetailDisclosure,
}

/// How a cell lays out its two labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    /// Text with a smaller detail line under it.
    Subtitle,
    /// Label and value on a single line.
    Value2,
}

/// Display data for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub detail: String,
    pub icon: &'static str,
    pub accessory: Accessory,
    pub style: CellStyle,
    pub directory: bool,
}

impl Cell {
    pub fn subtitle(
        text: impl Into<String>,
        detail: impl Into<String>,
        icon: &'static str,
    ) -> Self {
        Cell {
            text: text.into(),
            detail: detail.into(),
            icon,
            accessory: Accessory::None,
            style: CellStyle::Subtitle,
            directory: false,
        }
    }

    pub fn value2(label: impl Into<String>, value: impl Into<String>) -> Self {
        Cell {
            text: label.into(),
            detail: value.into(),
            icon: "",
            accessory: Accessory::None,
            style: CellStyle::Value2,
            directory: false,
        }
    }

    pub fn with_accessory(mut self, accessory: Accessory) -> Self {
        self.accessory = accessory;
        self
    }

    pub fn directory(mut self, directory: bool) -> Self {
        self.directory = directory;
        self
    }
}

/// What the controller has to do after a source handled an event.
pub enum Outcome {
    None,
    Push(View),
    Launch(Launch, FileItem),
    Message(String),
}

/// Listing options shared by every view that builds file lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub show_hidden: bool,
    pub case_insensitive: bool,
    pub show_size: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            case_insensitive: true,
            show_size: true,
        }
    }
}

/// A data source and delegate for a table view.
pub trait TableSource {
    fn title(&self) -> String;

    fn number_of_sections(&self) -> usize;

    fn number_of_rows(&self, section: usize) -> usize;

    fn cell_for_row(&self, index: IndexPath) -> Cell;

    fn title_for_header(&self, _section: usize) -> Option<&str> {
        None
    }

    /// Whether the view offers an Edit/Done toggle.
    fn is_editable(&self) -> bool {
        false
    }

    fn can_delete(&self, _index: IndexPath) -> bool {
        false
    }

    fn can_move(&self, _index: IndexPath) -> bool {
        false
    }

    fn delete(&mut self, _index: IndexPath) -> Outcome {
        Outcome::None
    }

    fn move_row(&mut self, _from: IndexPath, _to: IndexPath) -> Outcome {
        Outcome::None
    }

    fn did_select(&mut self, index: IndexPath) -> Outcome;

    fn accessory_tapped(&mut self, _index: IndexPath) -> Outcome {
        Outcome::None
    }

    fn reload(&mut self) -> Outcome;

    /// The directory this view shows, if any.
    fn path(&self) -> Option<&std::path::Path> {
        None
    }
}

/// A table view: a source plus cursor and editing state.
pub struct View {
    source: Box<dyn TableSource>,
    selected: usize,
    editing: bool,
}

impl View {
    pub fn new<S: TableSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
            selected: 0,
            editing: false,
        }
    }

    // Accessors

    #[inline]
    pub fn source(&self) -> &dyn TableSource {
        self.source.as_ref()
    }

    #[inline]
    pub fn source_mut(&mut self) -> &mut dyn TableSource {
        self.source.as_mut()
    }

    #[inline]
    pub fn selected(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn editing(&self) -> bool {
        self.editing
    }

    pub fn title(&self) -> String {
        self.source.title()
    }

    /// Number of rows over all sections.
    pub fn total_rows(&self) -> usize {
        (0..self.source.number_of_sections())
            .map(|s| self.source.number_of_rows(s))
            .sum()
    }

    /// Maps a flat row number to its section and row.
    pub fn index_of(&self, mut flat: usize) -> Option<IndexPath> {
        for section in 0..self.source.number_of_sections() {
            let rows = self.source.number_of_rows(section);
            if flat < rows {
                return Some(IndexPath::new(section, flat));
            }
            flat -= rows;
        }
        None
    }

    /// Maps a section and row back to a flat row number.
    pub fn flat_of(&self, index: IndexPath) -> usize {
        (0..index.section)
            .map(|s| self.source.number_of_rows(s))
            .sum::<usize>()
            + index.row
    }

    pub fn selected_index(&self) -> Option<IndexPath> {
        self.index_of(self.selected)
    }

    // Cursor

    pub fn move_up(&mut self) -> bool {
        if self.selected > 0 {
            self.selected -= 1;
            return true;
        }
        false
    }

    pub fn move_down(&mut self) -> bool {
        if self.selected + 1 < self.total_rows() {
            self.selected += 1;
            return true;
        }
        false
    }

    pub fn move_to_top(&mut self) {
        self.selected = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.selected = self.total_rows().saturating_sub(1);
    }

    fn clamp_cursor(&mut self) {
        self.selected = self.selected.min(self.total_rows().saturating_sub(1));
    }

    // Editing

    /// Flips between Edit and Done. Returns false when the view has no edit mode.
    pub fn toggle_editing(&mut self) -> bool {
        if !self.source.is_editable() {
            return false;
        }
        self.editing = !self.editing;
        true
    }

    /// Leaves edit mode if active. Returns whether anything changed.
    pub fn finish_editing(&mut self) -> bool {
        std::mem::replace(&mut self.editing, false)
    }

    // Events

    /// Selecting is disabled while editing.
    pub fn select(&mut self) -> Outcome {
        if self.editing {
            return Outcome::None;
        }
        match self.selected_index() {
            Some(index) => self.source.did_select(index),
            None => Outcome::None,
        }
    }

    pub fn tap_accessory(&mut self) -> Outcome {
        if self.editing {
            return Outcome::None;
        }
        match self.selected_index() {
            Some(index) => self.source.accessory_tapped(index),
            None => Outcome::None,
        }
    }

    /// Deletes the selected row. Only available while editing.
    pub fn delete_selected(&mut self) -> Outcome {
        let Some(index) = self.selected_index() else {
            return Outcome::None;
        };
        if !self.editing || !self.source.can_delete(index) {
            return Outcome::None;
        }
        let outcome = self.source.delete(index);
        self.clamp_cursor();
        outcome
    }

    /// Moves the selected row one up or down within its section. Only available while editing.
    pub fn move_selected(&mut self, up: bool) -> Outcome {
        let Some(from) = self.selected_index() else {
            return Outcome::None;
        };
        if !self.editing || !self.source.can_move(from) {
            return Outcome::None;
        }

        let rows = self.source.number_of_rows(from.section);
        let to_row = if up {
            match from.row.checked_sub(1) {
                Some(r) => r,
                None => return Outcome::None,
            }
        } else if from.row + 1 < rows {
            from.row + 1
        } else {
            return Outcome::None;
        };

        let to = IndexPath::new(from.section, to_row);
        let outcome = self.source.move_row(from, to);
        self.selected = self.flat_of(to);
        outcome
    }

    pub fn reload(&mut self) -> Outcome {
        let outcome = self.source.reload();
        self.clamp_cursor();
        outcome
    }
}

/// The navigation stack. The root view can never be popped.
pub struct ViewStack {
    views: Vec<View>,
}

impl ViewStack {
    pub fn new(root: View) -> Self {
        Self { views: vec![root] }
    }

    pub fn push(&mut self, view: View) {
        tracing::debug!(title = %view.title(), depth = self.views.len() + 1, "push view");
        self.views.push(view);
    }

    /// Pops the top view unless it is the root.
    pub fn pop(&mut self) -> Option<View> {
        if self.views.len() > 1 {
            self.views.pop()
        } else {
            None
        }
    }

    pub fn top(&self) -> &View {
        &self.views[self.views.len() - 1]
    }

    pub fn top_mut(&mut self) -> &mut View {
        let last = self.views.len() - 1;
        &mut self.views[last]
    }

    pub fn root_mut(&mut self) -> &mut View {
        &mut self.views[0]
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, View> {
        self.views.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two sections of numbered rows, the first one editable.
    struct Numbers {
        sections: Vec<Vec<u32>>,
        selected: Vec<IndexPath>,
    }

    impl Numbers {
        fn new() -> Self {
            Self {
                sections: vec![vec![1, 2, 3], vec![10, 20]],
                selected: Vec::new(),
            }
        }
    }

    impl TableSource for Numbers {
        fn title(&self) -> String {
            "Numbers".into()
        }

        fn number_of_sections(&self) -> usize {
            self.sections.len()
        }

        fn number_of_rows(&self, section: usize) -> usize {
            self.sections[section].len()
        }

        fn cell_for_row(&self, index: IndexPath) -> Cell {
            Cell::value2("n", self.sections[index.section][index.row].to_string())
        }

        fn is_editable(&self) -> bool {
            true
        }

        fn can_delete(&self, index: IndexPath) -> bool {
            index.section == 0
        }

        fn can_move(&self, index: IndexPath) -> bool {
            index.section == 0
        }

        fn delete(&mut self, index: IndexPath) -> Outcome {
            self.sections[index.section].remove(index.row);
            Outcome::None
        }

        fn move_row(&mut self, from: IndexPath, to: IndexPath) -> Outcome {
            let v = self.sections[from.section].remove(from.row);
            self.sections[to.section].insert(to.row, v);
            Outcome::None
        }

        fn did_select(&mut self, index: IndexPath) -> Outcome {
            self.selected.push(index);
            Outcome::Message(format!("{}:{}", index.section, index.row))
        }

        fn reload(&mut self) -> Outcome {
            Outcome::None
        }
    }

    fn values(view: &View) -> Vec<String> {
        (0..view.total_rows())
            .filter_map(|i| view.index_of(i))
            .map(|ip| view.source().cell_for_row(ip).detail)
            .collect()
    }

    #[test]
    fn flat_indices_span_sections() {
        let view = View::new(Numbers::new());
        assert_eq!(view.total_rows(), 5);
        assert_eq!(view.index_of(3), Some(IndexPath::new(1, 0)));
        assert_eq!(view.index_of(5), None);
        assert_eq!(view.flat_of(IndexPath::new(1, 1)), 4);
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut view = View::new(Numbers::new());
        assert!(!view.move_up());
        view.move_to_bottom();
        assert_eq!(view.selected(), 4);
        assert!(!view.move_down());
        view.move_to_top();
        assert!(view.move_down());
        assert_eq!(view.selected(), 1);
    }

    #[test]
    fn selection_disabled_while_editing() {
        let mut view = View::new(Numbers::new());
        view.move_to_bottom();
        assert!(matches!(view.select(), Outcome::Message(m) if m == "1:1"));

        assert!(view.toggle_editing());
        assert!(matches!(view.select(), Outcome::None));
        assert!(view.finish_editing());
        assert!(!view.editing());
    }

    #[test]
    fn delete_and_move_need_edit_mode() {
        let mut view = View::new(Numbers::new());
        view.delete_selected();
        assert_eq!(view.total_rows(), 5);

        view.toggle_editing();
        view.delete_selected();
        assert_eq!(values(&view), ["2", "3", "10", "20"]);

        view.move_selected(false);
        assert_eq!(values(&view), ["3", "2", "10", "20"]);
        assert_eq!(view.selected(), 1);

        // Never across a section boundary.
        view.move_selected(false);
        assert_eq!(values(&view), ["3", "2", "10", "20"]);

        view.move_to_bottom();
        view.delete_selected();
        assert_eq!(view.total_rows(), 4);
    }

    #[test]
    fn root_cannot_be_popped() {
        let mut stack = ViewStack::new(View::new(Numbers::new()));
        assert!(stack.pop().is_none());
        stack.push(View::new(Numbers::new()));
        assert_eq!(stack.len(), 2);
        assert!(stack.pop().is_some());
        assert!(stack.pop().is_none());
        assert_eq!(stack.len(), 1);
    }
}
