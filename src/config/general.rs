//! The general configuration settings for filenav.
//!
//! [General] is deserialized from the `[general]` table of filenav.toml,
//! [InternalGeneral] holds the resolved values used at runtime.

use crate::config::load::config_dir;
use crate::utils::full_path;

use serde::Deserialize;

use std::env;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    show_hidden: bool,
    case_insensitive: bool,
    favorites: Option<String>,
    temp_dir: Option<String>,
    close_after_open: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            show_hidden: false,
            case_insensitive: true,
            favorites: None,
            temp_dir: None,
            close_after_open: false,
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    show_hidden: bool,
    case_insensitive: bool,
    favorites: PathBuf,
    temp_dir: PathBuf,
    close_after_open: bool,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        let favorites = match g.favorites.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => full_path(p),
            _ => config_dir().join("favorites.json"),
        };
        let temp_dir = match g.temp_dir.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => full_path(p),
            _ => env::temp_dir().join("filenav"),
        };
        Self {
            show_hidden: g.show_hidden,
            case_insensitive: g.case_insensitive,
            favorites,
            temp_dir,
            close_after_open: g.close_after_open,
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// The favorites JSON file.
    #[inline]
    pub fn favorites(&self) -> &Path {
        &self.favorites
    }

    /// Where "Copy & Open" puts its copies.
    #[inline]
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    #[inline]
    pub fn close_after_open(&self) -> bool {
        self.close_after_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_paths() {
        let general = InternalGeneral::from(General::default());
        assert!(general.favorites().ends_with("favorites.json"));
        assert!(general.temp_dir().ends_with("filenav"));
        assert!(!general.show_hidden());
        assert!(!general.close_after_open());
    }

    #[test]
    fn explicit_paths_are_expanded() -> Result<(), Box<dyn std::error::Error>> {
        let raw: General = toml::from_str(
            r#"
            favorites = "/srv/favs/../favs.json"
            temp_dir = "/srv/tmp"
            close_after_open = true
            "#,
        )?;
        let general = InternalGeneral::from(raw);
        assert_eq!(general.favorites(), Path::new("/srv/favs.json"));
        assert_eq!(general.temp_dir(), Path::new("/srv/tmp"));
        assert!(general.close_after_open());
        Ok(())
    }
}
