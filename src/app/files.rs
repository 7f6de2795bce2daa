//! Directory listing view.
//!
//! Shows the folders and files of one directory in two sections. Folders are entered,
//! files are dispatched by type and the accessory opens the stat view.

use crate::app::stat::StatSource;
use crate::app::view::{Accessory, Cell, IndexPath, ListOptions, Outcome, TableSource, View};
use crate::core::{FileItem, browse_dir, dispatch_for, format_size};

use std::path::Path;

pub struct FileListSource {
    dir: FileItem,
    options: ListOptions,
    folders: Vec<FileItem>,
    files: Vec<FileItem>,
}

impl FileListSource {
    pub fn new(dir: FileItem, options: ListOptions) -> Self {
        let mut source = Self {
            dir,
            options,
            folders: Vec::new(),
            files: Vec::new(),
        };
        source.load();
        source
    }

    /// A view listing `dir`.
    pub fn view(dir: FileItem, options: ListOptions) -> View {
        View::new(Self::new(dir, options))
    }

    #[inline]
    pub fn dir(&self) -> &FileItem {
        &self.dir
    }

    fn load(&mut self) {
        match browse_dir(&self.dir, self.options.show_hidden, self.options.case_insensitive) {
            Ok((folders, files)) => {
                tracing::debug!(
                    dir = %self.dir.path().display(),
                    folders = folders.len(),
                    files = files.len(),
                    "listed"
                );
                self.folders = folders;
                self.files = files;
            }
            Err(e) => {
                tracing::warn!(dir = %self.dir.path().display(), error = %e, "listing failed");
                self.folders.clear();
                self.files.clear();
            }
        }
    }

    fn item(&self, index: IndexPath) -> Option<&FileItem> {
        match index.section {
            0 => self.folders.get(index.row),
            1 => self.files.get(index.row),
            _ => None,
        }
    }

    fn cell_for(&self, item: &FileItem) -> Cell {
        let info = item.info();
        let mut detail = info.desc().to_string();
        if self.options.show_size
            && let Some(size) = item.size()
        {
            detail.push_str(&format!(" ({})", format_size(size, false)));
        }

        let accessory = if item.is_dir() {
            Accessory::DetailDisclosure
        } else {
            Accessory::Detail
        };
        Cell::subtitle(item.basename(), detail, info.icon())
            .with_accessory(accessory)
            .directory(item.is_dir())
    }
}

impl TableSource for FileListSource {
    fn title(&self) -> String {
        self.dir.title()
    }

    fn number_of_sections(&self) -> usize {
        2
    }

    fn number_of_rows(&self, section: usize) -> usize {
        match section {
            0 => self.folders.len(),
            1 => self.files.len(),
            _ => 0,
        }
    }

    fn cell_for_row(&self, index: IndexPath) -> Cell {
        match self.item(index) {
            Some(item) => self.cell_for(item),
            None => Cell::value2("", ""),
        }
    }

    fn title_for_header(&self, section: usize) -> Option<&str> {
        match section {
            0 => Some("Folders"),
            1 => Some("Files"),
            _ => Some("Unknown Section Header"),
        }
    }

    fn did_select(&mut self, index: IndexPath) -> Outcome {
        let Some(item) = self.item(index) else {
            return Outcome::None;
        };
        if index.section == 0 {
            Outcome::Push(FileListSource::view(item.clone(), self.options))
        } else {
            Outcome::Launch(dispatch_for(item), item.clone())
        }
    }

    fn accessory_tapped(&mut self, index: IndexPath) -> Outcome {
        match self.item(index) {
            Some(item) => Outcome::Push(StatSource::view(item.clone())),
            None => Outcome::None,
        }
    }

    fn reload(&mut self) -> Outcome {
        self.dir.reload();
        self.load();
        Outcome::None
    }

    fn path(&self) -> Option<&Path> {
        Some(self.dir.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Launch;
    use std::fs::{self, File};
    use tempfile::tempdir;

    fn tree() -> Result<tempfile::TempDir, Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("src"))?;
        fs::create_dir(dir.path().join("Docs"))?;
        fs::create_dir(dir.path().join(".git"))?;
        fs::write(dir.path().join("main.py"), "print('hi')\n")?;
        File::create(dir.path().join("index.html"))?;
        File::create(dir.path().join(".hidden"))?;
        Ok(dir)
    }

    fn texts(source: &FileListSource, section: usize) -> Vec<String> {
        (0..source.number_of_rows(section))
            .map(|row| source.cell_for_row(IndexPath::new(section, row)).text)
            .collect()
    }

    #[test]
    fn sections_split_folders_and_files() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tree()?;
        let source = FileListSource::new(FileItem::new(dir.path()), ListOptions::default());

        assert_eq!(texts(&source, 0), ["Docs", "src"]);
        assert_eq!(texts(&source, 1), ["index.html", "main.py"]);
        assert_eq!(source.title_for_header(0), Some("Folders"));
        assert_eq!(source.title_for_header(1), Some("Files"));
        Ok(())
    }

    #[test]
    fn hidden_entries_follow_options() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tree()?;
        let options = ListOptions {
            show_hidden: true,
            ..ListOptions::default()
        };
        let source = FileListSource::new(FileItem::new(dir.path()), options);
        assert!(texts(&source, 0).contains(&".git".to_string()));
        assert!(texts(&source, 1).contains(&".hidden".to_string()));
        Ok(())
    }

    #[test]
    fn cells_carry_type_and_size() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tree()?;
        let source = FileListSource::new(FileItem::new(dir.path()), ListOptions::default());

        let py = source.cell_for_row(IndexPath::new(1, 1));
        assert_eq!(py.detail, "Python Script (12 bytes)");
        assert_eq!(py.accessory, Accessory::Detail);

        let folder = source.cell_for_row(IndexPath::new(0, 0));
        assert!(folder.detail.starts_with("Folder"));
        assert_eq!(folder.accessory, Accessory::DetailDisclosure);
        assert!(folder.directory);

        let no_size = FileListSource::new(
            FileItem::new(dir.path()),
            ListOptions {
                show_size: false,
                ..ListOptions::default()
            },
        );
        assert_eq!(no_size.cell_for_row(IndexPath::new(1, 1)).detail, "Python Script");
        Ok(())
    }

    #[test]
    fn selecting_rows() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tree()?;
        let mut source = FileListSource::new(FileItem::new(dir.path()), ListOptions::default());

        match source.did_select(IndexPath::new(0, 1)) {
            Outcome::Push(view) => assert_eq!(view.title(), "src"),
            _ => return Err("expected a pushed file list".into()),
        }
        match source.did_select(IndexPath::new(1, 0)) {
            Outcome::Launch(launch, item) => {
                assert_eq!(launch, Launch::Browse);
                assert_eq!(item.basename(), "index.html");
            }
            _ => return Err("expected a launch".into()),
        }
        match source.accessory_tapped(IndexPath::new(1, 1)) {
            Outcome::Push(view) => assert_eq!(view.title(), "main.py"),
            _ => return Err("expected a pushed stat view".into()),
        }
        Ok(())
    }

    #[test]
    fn reload_picks_up_new_entries() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tree()?;
        let mut source = FileListSource::new(FileItem::new(dir.path()), ListOptions::default());
        File::create(dir.path().join("new.txt"))?;
        assert_eq!(source.number_of_rows(1), 2);
        source.reload();
        assert_eq!(source.number_of_rows(1), 3);
        Ok(())
    }

    #[test]
    fn root_title_is_slash() {
        let source = FileListSource::new(FileItem::new("/"), ListOptions::default());
        assert_eq!(source.title(), "/");
    }
}
