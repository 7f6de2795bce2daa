//! Favorites view, the root of the navigation stack.
//!
//! Rows are deletable and movable in edit mode, every change is written back right away.

use crate::app::files::FileListSource;
use crate::app::stat::StatSource;
use crate::app::view::{Accessory, Cell, IndexPath, ListOptions, Outcome, TableSource, View};
use crate::core::{FileGroup, FileItem, Favorites, dispatch_for};

pub struct FavoritesSource {
    favorites: Favorites,
    options: ListOptions,
}

impl FavoritesSource {
    pub fn new(favorites: Favorites, options: ListOptions) -> Self {
        Self { favorites, options }
    }

    pub fn view(favorites: Favorites, options: ListOptions) -> View {
        View::new(Self::new(favorites, options))
    }

    #[inline]
    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }
}

impl TableSource for FavoritesSource {
    fn title(&self) -> String {
        "Favorites".to_string()
    }

    fn number_of_sections(&self) -> usize {
        1
    }

    fn number_of_rows(&self, _section: usize) -> usize {
        self.favorites.len()
    }

    fn cell_for_row(&self, index: IndexPath) -> Cell {
        match self.favorites.get(index.row) {
            Some(fav) => Cell::subtitle(fav.path(), fav.label(), FileGroup::Folder.icon())
                .with_accessory(Accessory::DetailDisclosure)
                .directory(true),
            None => Cell::value2("", ""),
        }
    }

    fn is_editable(&self) -> bool {
        true
    }

    fn can_delete(&self, _index: IndexPath) -> bool {
        true
    }

    fn can_move(&self, _index: IndexPath) -> bool {
        true
    }

    fn delete(&mut self, index: IndexPath) -> Outcome {
        match self.favorites.delete(index.row) {
            Ok(removed) => {
                tracing::info!(path = removed.path(), "favorite removed");
                Outcome::None
            }
            Err(e) => Outcome::Message(e.to_string()),
        }
    }

    fn move_row(&mut self, from: IndexPath, to: IndexPath) -> Outcome {
        match self.favorites.move_row(from.row, to.row) {
            Ok(()) => Outcome::None,
            Err(e) => Outcome::Message(e.to_string()),
        }
    }

    /// Folders open as a listing, files are dispatched like in a listing.
    fn did_select(&mut self, index: IndexPath) -> Outcome {
        let Some(fav) = self.favorites.get(index.row) else {
            return Outcome::None;
        };
        let item = FileItem::new(fav.path());
        if item.is_dir() {
            Outcome::Push(FileListSource::view(item, self.options))
        } else if item.stat().is_some() {
            Outcome::Launch(dispatch_for(&item), item)
        } else {
            Outcome::Message(format!("Not found: {}", fav.path()))
        }
    }

    fn accessory_tapped(&mut self, index: IndexPath) -> Outcome {
        match self.favorites.get(index.row) {
            Some(fav) => Outcome::Push(StatSource::view(FileItem::new(fav.path()))),
            None => Outcome::None,
        }
    }

    fn reload(&mut self) -> Outcome {
        match self.favorites.reload() {
            Ok(()) => Outcome::None,
            Err(e) => Outcome::Message(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::view::CellStyle;
    use crate::core::Favorite;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn source_with(
        favs_file: &Path,
        entries: &[(&str, &str)],
    ) -> Result<FavoritesSource, Box<dyn std::error::Error>> {
        let mut favorites = Favorites::load(favs_file)?;
        for (path, label) in entries {
            favorites.add(Favorite::new(*path, *label))?;
        }
        Ok(FavoritesSource::new(favorites, ListOptions::default()))
    }

    #[test]
    fn cells_show_path_and_label() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let source = source_with(&dir.path().join("favs.json"), &[("/tmp", "Temp")])?;

        let cell = source.cell_for_row(IndexPath::new(0, 0));
        assert_eq!(cell.text, "/tmp");
        assert_eq!(cell.detail, "Temp");
        assert_eq!(cell.style, CellStyle::Subtitle);
        assert_eq!(cell.accessory, Accessory::DetailDisclosure);
        assert_eq!(source.title_for_header(0), None);
        Ok(())
    }

    #[test]
    fn select_pushes_listing_or_reports_missing() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let listed = dir.path().join("listed");
        fs::create_dir(&listed)?;
        let listed_str = listed.to_string_lossy().into_owned();

        let mut source = source_with(
            &dir.path().join("favs.json"),
            &[(&listed_str, "Listed"), ("/filenav-missing", "Gone")],
        )?;

        match source.did_select(IndexPath::new(0, 0)) {
            Outcome::Push(view) => assert_eq!(view.title(), "listed"),
            _ => return Err("expected a pushed listing".into()),
        }
        match source.did_select(IndexPath::new(0, 1)) {
            Outcome::Message(m) => assert_eq!(m, "Not found: /filenav-missing"),
            _ => return Err("expected a message".into()),
        }
        assert!(matches!(
            source.accessory_tapped(IndexPath::new(0, 0)),
            Outcome::Push(_)
        ));
        Ok(())
    }

    #[test]
    fn edits_are_persisted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("favs.json");
        let mut view = View::new(source_with(&file, &[("/a", "A"), ("/b", "B"), ("/c", "C")])?);

        view.toggle_editing();
        view.move_selected(false);
        view.move_to_bottom();
        view.delete_selected();

        let on_disk = Favorites::load(&file)?;
        let labels: Vec<_> = on_disk.entries().iter().map(|f| f.label()).collect();
        assert_eq!(labels, ["B", "A"]);
        Ok(())
    }
}
