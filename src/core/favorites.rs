//! Favorites list persistence for filenav.
//!
//! The list is stored as a flat JSON array of `[path, label]` pairs, indented with four
//! spaces. Every mutation is written back to disk immediately.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while reading or writing the favorites file.
#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Failed to access favorites at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid favorites file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No favorite at row {0}")]
    OutOfRange(usize),
}

pub type FavoritesResult<T> = Result<T, FavoritesError>;

/// A single favorite, serialized as a two element array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite(pub String, pub String);

impl Favorite {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Favorite(path.into(), label.into())
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.1
    }
}

/// The favorites list and the file it is persisted to.
#[derive(Debug)]
pub struct Favorites {
    src: PathBuf,
    entries: Vec<Favorite>,
}

impl Favorites {
    /// Loads the list from `src`. A missing file is an empty list.
    pub fn load(src: &Path) -> FavoritesResult<Self> {
        let mut favs = Favorites::empty(src);
        favs.reload()?;
        Ok(favs)
    }

    /// An empty list bound to `src`, used when the file could not be read.
    /// The next mutation overwrites whatever is on disk.
    pub fn empty(src: &Path) -> Self {
        Favorites {
            src: src.to_path_buf(),
            entries: Vec::new(),
        }
    }

    /// Re-reads the file from disk.
    pub fn reload(&mut self) -> FavoritesResult<()> {
        let content = match fs::read_to_string(&self.src) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.src.display(), "no favorites file, starting empty");
                self.entries.clear();
                return Ok(());
            }
            Err(source) => {
                return Err(FavoritesError::Io {
                    path: self.src.clone(),
                    source,
                });
            }
        };

        self.entries = if content.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content).map_err(|source| FavoritesError::Json {
                path: self.src.clone(),
                source,
            })?
        };
        Ok(())
    }

    // Accessors

    #[inline]
    pub fn src(&self) -> &Path {
        &self.src
    }

    #[inline]
    pub fn entries(&self) -> &[Favorite] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Favorite> {
        self.entries.get(row)
    }

    /// Removes the favorite at `row` and saves.
    pub fn delete(&mut self, row: usize) -> FavoritesResult<Favorite> {
        if row >= self.entries.len() {
            return Err(FavoritesError::OutOfRange(row));
        }
        let mut entries = self.entries.clone();
        let removed = entries.remove(row);
        self.commit(entries)?;
        Ok(removed)
    }

    /// Moves the favorite at `from` so it ends up at `to`, then saves.
    pub fn move_row(&mut self, from: usize, to: usize) -> FavoritesResult<()> {
        if from >= self.entries.len() {
            return Err(FavoritesError::OutOfRange(from));
        }
        let mut entries = self.entries.clone();
        let fav = entries.remove(from);
        let to = to.min(entries.len());
        entries.insert(to, fav);
        self.commit(entries)
    }

    /// Appends a favorite and saves.
    pub fn add(&mut self, fav: Favorite) -> FavoritesResult<()> {
        let mut entries = self.entries.clone();
        entries.push(fav);
        self.commit(entries)
    }

    /// Replaces the entries only once `entries` is on disk.
    fn commit(&mut self, entries: Vec<Favorite>) -> FavoritesResult<()> {
        self.write(&entries)?;
        self.entries = entries;
        Ok(())
    }

    /// Writes `entries` to the file, creating the parent directory if needed.
    fn write(&self, entries: &[Favorite]) -> FavoritesResult<()> {
        let io_err = |source: io::Error| FavoritesError::Io {
            path: self.src.clone(),
            source,
        };

        if let Some(parent) = self.src.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut buf = Vec::with_capacity(64 * (entries.len() + 1));
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries
            .serialize(&mut ser)
            .map_err(|source| FavoritesError::Json {
                path: self.src.clone(),
                source,
            })?;

        fs::write(&self.src, buf).map_err(io_err)?;
        tracing::debug!(path = %self.src.display(), count = entries.len(), "favorites saved");
        Ok(())
    }
}
