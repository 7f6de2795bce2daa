//! Stat view: actions, stat results and mode flags of a single path.

use crate::app::view::{Cell, IndexPath, Outcome, TableSource, View};
use crate::core::{FileItem, StatAction, StatRow, flag_rows, stat_actions, stat_rows};

pub struct StatSource {
    item: FileItem,
    actions: Vec<StatAction>,
    stats: Vec<StatRow>,
    flags: Vec<StatRow>,
}

const SECTIONS: [&str; 3] = ["Actions", "Stats", "Flags"];

impl StatSource {
    pub fn new(item: FileItem) -> Self {
        let mut source = Self {
            item,
            actions: Vec::new(),
            stats: Vec::new(),
            flags: Vec::new(),
        };
        source.load();
        source
    }

    pub fn view(item: FileItem) -> View {
        View::new(Self::new(item))
    }

    #[inline]
    pub fn item(&self) -> &FileItem {
        &self.item
    }

    fn load(&mut self) {
        self.actions = stat_actions(&self.item);
        self.stats = stat_rows(&self.item);
        self.flags = flag_rows(&self.item);
    }

    fn row(&self, index: IndexPath) -> Option<&StatRow> {
        match index.section {
            1 => self.stats.get(index.row),
            2 => self.flags.get(index.row),
            _ => None,
        }
    }
}

impl TableSource for StatSource {
    fn title(&self) -> String {
        self.item.title()
    }

    fn number_of_sections(&self) -> usize {
        SECTIONS.len()
    }

    fn number_of_rows(&self, section: usize) -> usize {
        match section {
            0 => self.actions.len(),
            1 => self.stats.len(),
            2 => self.flags.len(),
            _ => 0,
        }
    }

    fn cell_for_row(&self, index: IndexPath) -> Cell {
        if index.section == 0 {
            return match self.actions.get(index.row) {
                Some(action) => Cell::subtitle(action.title, action.subtitle, action.icon),
                None => Cell::value2("", ""),
            };
        }
        match self.row(index) {
            Some(row) => Cell::value2(row.label, row.value.clone()),
            None => Cell::value2("", ""),
        }
    }

    fn title_for_header(&self, section: usize) -> Option<&str> {
        SECTIONS.get(section).copied()
    }

    fn did_select(&mut self, index: IndexPath) -> Outcome {
        if index.section != 0 {
            return Outcome::None;
        }
        match self.actions.get(index.row) {
            Some(action) => Outcome::Launch(action.launch, self.item.clone()),
            None => Outcome::None,
        }
    }

    fn reload(&mut self) -> Outcome {
        self.item.reload();
        self.load();
        Outcome::None
    }
}
