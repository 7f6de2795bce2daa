//! File and directory metadata for filenav.
//!
//! Provides [FileInfo], the extension derived display metadata of a name, and [FileItem],
//! a path together with its cached stat result and directory contents.
//! Both are used by every list in the app.

use crate::core::filetypes::{FILE_EXTS, FileGroup, TYPE_GROUPS};
use crate::utils::{absolute_path, full_path};

use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

/// Extensions which keep their own description and icon when attached to a folder.
const FOLDER_EXTS: [&str; 3] = ["app", "bundle", "git"];

/// Display metadata which only depends on the name of a path and whether it is a directory.
#[derive(Debug, Clone, PartialEq)]
pub struct FileInfo {
    dir: PathBuf,
    name: String,
    nameparts: Vec<String>,
    ext: Option<&'static str>,
    group: FileGroup,
    desc: &'static str,
    icon: &'static str,
}

impl FileInfo {
    /// Builds the info for `path`.
    ///
    /// The last name part found in the type table is the extension, so `"a.tar.gz"` resolves
    /// to `gz`. Folders keep the folder description and icon unless the extension is one of
    /// the folder-like types (`app`, `bundle`, `git`); the group is still updated.
    pub fn for_path(path: &Path, is_dir: bool) -> Self {
        let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let nameparts: Vec<String> = name.to_lowercase().split('.').map(String::from).collect();

        let basegroup = if is_dir {
            FileGroup::Folder
        } else {
            FileGroup::File
        };
        let mut group = basegroup;
        let mut desc = basegroup.description();
        let mut icon = basegroup.icon();

        let mut ext: Option<&'static str> = None;
        for part in &nameparts {
            if let Some((key, _)) = TYPE_GROUPS.get_entry(part.as_str()) {
                ext = Some(*key);
            }
        }

        if let Some(e) = ext {
            if let Some(g) = TYPE_GROUPS.get(e) {
                group = *g;
            }
            desc = match FILE_EXTS.get(e) {
                Some(&Some(d)) => d,
                Some(&None) => basegroup.description(),
                None => group.description(),
            };
            icon = group.icon();
        }

        if is_dir && !ext.is_some_and(|e| FOLDER_EXTS.contains(&e)) {
            desc = basegroup.description();
            icon = basegroup.icon();
        }

        FileInfo {
            dir,
            name,
            nameparts,
            ext,
            group,
            desc,
            icon,
        }
    }

    // Accessors

    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn nameparts(&self) -> &[String] {
        &self.nameparts
    }

    #[inline]
    pub fn ext(&self) -> Option<&'static str> {
        self.ext
    }

    #[inline]
    pub fn group(&self) -> FileGroup {
        self.group
    }

    #[inline]
    pub fn desc(&self) -> &'static str {
        self.desc
    }

    #[inline]
    pub fn icon(&self) -> &'static str {
        self.icon
    }

    /// True for `.htm` and `.html` files, which open in the browser rather than the editor.
    pub fn is_html(&self) -> bool {
        matches!(self.ext, Some("htm" | "html"))
    }
}

/// A path and everything filenav knows about it.
///
/// The stat result and directory contents are cached until [FileItem::reload] is called.
#[derive(Debug, Clone)]
pub struct FileItem {
    path: PathBuf,
    /// The path as given, before symlinks were resolved.
    origin: PathBuf,
    info: FileInfo,
    stat: Option<Metadata>,
    link_stat: Option<Metadata>,
    contents: Option<Vec<OsString>>,
}

impl FileItem {
    /// Creates an item for `path`, relative paths are resolved against the working directory.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let origin = absolute_path(path.as_ref());
        Self::with_paths(full_path(&origin), origin)
    }

    /// Creates an item for a path that is already absolute, such as an entry of a listed
    /// directory. No `~` or `$VAR` expansion happens and a symlink keeps its own name.
    pub fn from_resolved<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        Self::with_paths(path.clone(), path)
    }

    fn with_paths(path: PathBuf, origin: PathBuf) -> Self {
        let mut item = FileItem {
            path,
            origin,
            info: FileInfo::for_path(Path::new(""), false),
            stat: None,
            link_stat: None,
            contents: None,
        };
        item.reload();
        item
    }

    /// Re-examines the path on disk.
    ///
    /// A failed stat leaves `stat` empty, an unreadable directory gets empty contents.
    pub fn reload(&mut self) {
        let is_dir = self.path.is_dir();
        self.info = FileInfo::for_path(&self.path, is_dir);

        self.stat = match fs::metadata(&self.path) {
            Ok(md) => Some(md),
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "stat failed");
                None
            }
        };
        self.link_stat = fs::symlink_metadata(&self.origin)
            .ok()
            .filter(|md| md.file_type().is_symlink());

        self.contents = if is_dir {
            match fs::read_dir(&self.path) {
                Ok(rd) => Some(rd.filter_map(|e| e.ok().map(|e| e.file_name())).collect()),
                Err(e) => {
                    tracing::debug!(path = %self.path.display(), error = %e, "listdir failed");
                    Some(Vec::new())
                }
            }
        } else {
            None
        };
    }

    // Accessors

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn info(&self) -> &FileInfo {
        &self.info
    }

    #[inline]
    pub fn stat(&self) -> Option<&Metadata> {
        self.stat.as_ref()
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.link_stat.is_some()
    }

    /// Metadata of the link itself when the item was reached through a symlink.
    #[inline]
    pub fn link_stat(&self) -> Option<&Metadata> {
        self.link_stat.as_ref()
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.contents.is_some()
    }

    #[inline]
    pub fn is_file(&self) -> bool {
        self.contents.is_none()
    }

    #[inline]
    pub fn basename(&self) -> &str {
        self.info.name()
    }

    #[inline]
    pub fn dirname(&self) -> &Path {
        self.info.dir()
    }

    pub fn split(&self) -> (&Path, &str) {
        (self.info.dir(), self.info.name())
    }

    pub fn join<P: AsRef<Path>>(&self, child: P) -> PathBuf {
        self.path.join(child)
    }

    /// Title used for lists showing this item: `/` for the root, the basename otherwise.
    pub fn title(&self) -> String {
        if self.path.parent().is_none() {
            self.path.display().to_string()
        } else {
            self.basename().to_string()
        }
    }

    /// Names of the directory entries, read when the item was last loaded.
    pub fn listdir(&self) -> io::Result<&[OsString]> {
        match &self.contents {
            Some(names) => Ok(names),
            None => Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("Not a directory: {}", self.path.display()),
            )),
        }
    }

    /// Path of this item relative to `start`.
    pub fn relpath<P: AsRef<Path>>(&self, start: P) -> PathBuf {
        let start = full_path(start.as_ref());
        let ours: Vec<Component> = self.path.components().collect();
        let theirs: Vec<Component> = start.components().collect();
        let common = ours
            .iter()
            .zip(theirs.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let mut rel = PathBuf::new();
        for _ in common..theirs.len() {
            rel.push("..");
        }
        for comp in &ours[common..] {
            rel.push(comp.as_os_str());
        }
        if rel.as_os_str().is_empty() {
            rel.push(".");
        }
        rel
    }

    /// Longest leading run of path components shared by this item and all `others`.
    pub fn commonprefix<P: AsRef<Path>>(&self, others: &[P]) -> PathBuf {
        let mut prefix: Vec<Component> = self.path.components().collect();
        for other in others {
            let other = other.as_ref();
            let shared = prefix
                .iter()
                .zip(other.components())
                .take_while(|(a, b)| **a == *b)
                .count();
            prefix.truncate(shared);
        }
        prefix.iter().map(|c| c.as_os_str()).collect()
    }

    /// Whether `other` refers to the same file on disk.
    pub fn samefile<P: AsRef<Path>>(&self, other: P) -> bool {
        let Ok(ours) = fs::metadata(&self.path) else {
            return false;
        };
        let Ok(theirs) = fs::metadata(other.as_ref()) else {
            return false;
        };

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            ours.dev() == theirs.dev() && ours.ino() == theirs.ino()
        }
        #[cfg(not(unix))]
        {
            let _ = (ours, theirs);
            match (fs::canonicalize(&self.path), fs::canonicalize(other.as_ref())) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            }
        }
    }

    /// Size in bytes, if the item could be stat'ed.
    pub fn size(&self) -> Option<u64> {
        self.stat.as_ref().map(Metadata::len)
    }
}

impl PartialEq for FileItem {
    fn eq(&self, other: &Self) -> bool {
        self.samefile(&other.path)
    }
}

/// Lists a directory as two sorted vectors: folders and files.
///
/// Hidden entries (leading dot) are skipped unless `show_hidden` is set.
/// # Returns
/// An error if `dir` is not a directory.
pub fn browse_dir(
    dir: &FileItem,
    show_hidden: bool,
    case_insensitive: bool,
) -> io::Result<(Vec<FileItem>, Vec<FileItem>)> {
    let names = dir.listdir()?;
    let mut folders = Vec::new();
    let mut files = Vec::new();

    for name in names {
        if !show_hidden && name.to_string_lossy().starts_with('.') {
            continue;
        }
        let item = FileItem::from_resolved(dir.join(name));
        if item.is_dir() {
            folders.push(item);
        } else {
            files.push(item);
        }
    }

    sort_items(&mut folders, case_insensitive);
    sort_items(&mut files, case_insensitive);
    Ok((folders, files))
}

fn sort_items(items: &mut [FileItem], case_insensitive: bool) {
    if case_insensitive {
        items.sort_by_cached_key(|i| i.basename().to_lowercase());
    } else {
        items.sort_by(|a, b| a.basename().cmp(b.basename()));
    }
}
