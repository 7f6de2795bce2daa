//! File-type dispatch for filenav.
//!
//! Decides what happens when a file is selected in a listing or when an action row of the
//! stat view is chosen, and turns that decision into an external command line.
//!
//! The editor runs in the foreground with the TUI suspended. Everything else is handed to
//! the launch worker, see [crate::core::worker].

use crate::config::Commands;
use crate::core::{FileGroup, FileItem};

use thiserror::Error;

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Something filenav can do with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    Browse,
    Edit,
    CopyEdit { as_txt: bool },
    PlaySound,
    ShowImage,
    QuickLook,
    OpenIn,
}

impl Launch {
    /// Whether the browser should close once this launch went through.
    pub fn closes_app(self) -> bool {
        matches!(
            self,
            Launch::Browse | Launch::Edit | Launch::CopyEdit { .. } | Launch::QuickLook
        )
    }

    /// Runs with the terminal handed over instead of in the background.
    pub fn is_foreground(self) -> bool {
        matches!(self, Launch::Edit | Launch::CopyEdit { .. })
    }

    pub fn label(self) -> &'static str {
        match self {
            Launch::Browse => "Open Website",
            Launch::Edit => "Open in Editor",
            Launch::CopyEdit { as_txt: false } => "Copy & Open",
            Launch::CopyEdit { as_txt: true } => "Copy & Open as .txt",
            Launch::PlaySound => "Play Sound",
            Launch::ShowImage => "Show Image",
            Launch::QuickLook => "Preview",
            Launch::OpenIn => "Open In and Share",
        }
    }

    /// The message shown when the launch fails.
    pub fn failure_text(self) -> String {
        match self {
            Launch::OpenIn => "Failed to Open".to_string(),
            other => format!("{} failed", other.label()),
        }
    }
}

/// What selecting a file in a directory listing does.
pub fn dispatch_for(item: &FileItem) -> Launch {
    let info = item.info();
    if info.is_html() {
        return Launch::Browse;
    }
    match info.group() {
        FileGroup::Code | FileGroup::CodeTags | FileGroup::Text => Launch::Edit,
        FileGroup::Audio => Launch::PlaySound,
        FileGroup::Image => Launch::ShowImage,
        _ => Launch::QuickLook,
    }
}

/// One row of the "Actions" section of the stat view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatAction {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
    pub launch: Launch,
}

impl StatAction {
    const fn new(
        title: &'static str,
        subtitle: &'static str,
        icon: &'static str,
        launch: Launch,
    ) -> Self {
        StatAction {
            title,
            subtitle,
            icon,
            launch,
        }
    }
}

const FILE_ACTIONS: [StatAction; 5] = [
    StatAction::new("Preview", "Quick Look", "\u{f06e}", Launch::QuickLook),
    StatAction::new("Open in Editor", "editor", "\u{f044}", Launch::Edit),
    StatAction::new(
        "Copy & Open",
        "editor",
        "\u{f0c5}",
        Launch::CopyEdit { as_txt: false },
    ),
    StatAction::new(
        "Copy & Open as .txt",
        "editor",
        "\u{f15c}",
        Launch::CopyEdit { as_txt: true },
    ),
    StatAction::new("Open In and Share", "External Apps", "\u{f1d8}", Launch::OpenIn),
];

/// The actions offered for `item` in the stat view. Folders and missing paths have none.
pub fn stat_actions(item: &FileItem) -> Vec<StatAction> {
    if item.is_dir() || item.stat().is_none() {
        return Vec::new();
    }

    let mut actions = Vec::with_capacity(FILE_ACTIONS.len() + 1);
    let info = item.info();
    if info.is_html() {
        actions.push(StatAction::new(
            "Open Website",
            "browser",
            "\u{f0ac}",
            Launch::Browse,
        ));
    } else if info.group() == FileGroup::Image {
        actions.push(StatAction::new(
            "Show Image",
            "viewer",
            "\u{f03e}",
            Launch::ShowImage,
        ));
    } else if info.group() == FileGroup::Audio {
        actions.push(StatAction::new(
            "Play Sound",
            "player",
            "\u{f04b}",
            Launch::PlaySound,
        ));
    }
    actions.extend_from_slice(&FILE_ACTIONS);
    actions
}

/// Errors raised while preparing a launch.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No command configured for {0}")]
    NoCommand(&'static str),
    #[error("Command not found: {0}")]
    MissingCommand(String),
    #[error("Not a file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A resolved command line, ready to be spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<OsString>,
}

/// How a prepared launch has to be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchPlan {
    Foreground(CommandLine),
    Detached(CommandLine),
}

impl LaunchPlan {
    pub fn command(&self) -> &CommandLine {
        match self {
            LaunchPlan::Foreground(cmd) | LaunchPlan::Detached(cmd) => cmd,
        }
    }
}

/// Maps [Launch] requests onto the configured commands.
pub struct Launcher<'a> {
    commands: &'a Commands,
    temp_dir: &'a Path,
}

impl<'a> Launcher<'a> {
    pub fn new(commands: &'a Commands, temp_dir: &'a Path) -> Self {
        Self { commands, temp_dir }
    }

    /// Resolves `launch` for `item`.
    ///
    /// Copy launches do their copy here, so the editor is pointed at the copy.
    pub fn prepare(&self, launch: Launch, item: &FileItem) -> Result<LaunchPlan, LaunchError> {
        if item.stat().is_none() {
            return Err(LaunchError::NotFound(item.path().to_path_buf()));
        }
        if !item.is_file() {
            return Err(LaunchError::NotAFile(item.path().to_path_buf()));
        }

        let plan = match launch {
            Launch::Edit => {
                LaunchPlan::Foreground(self.command("editor", self.commands.editor(), item.path())?)
            }
            Launch::CopyEdit { as_txt } => {
                let cmd = self.command("editor", self.commands.editor(), item.path())?;
                let dest = copy_for_edit(item, self.temp_dir, as_txt)?;
                LaunchPlan::Foreground(CommandLine {
                    args: replace_last(cmd.args, dest.into_os_string()),
                    ..cmd
                })
            }
            Launch::Browse => {
                let url = format!("file://{}", item.path().display());
                LaunchPlan::Detached(self.command("browser", self.commands.browser(), url)?)
            }
            Launch::PlaySound => {
                LaunchPlan::Detached(self.command("audio", self.commands.audio(), item.path())?)
            }
            Launch::ShowImage => {
                LaunchPlan::Detached(self.command("image", self.commands.image(), item.path())?)
            }
            Launch::QuickLook | Launch::OpenIn => {
                LaunchPlan::Detached(self.command("opener", self.commands.opener(), item.path())?)
            }
        };

        tracing::info!(?launch, program = %plan.command().program, "launch prepared");
        Ok(plan)
    }

    fn command(
        &self,
        role: &'static str,
        line: &str,
        target: impl Into<OsString>,
    ) -> Result<CommandLine, LaunchError> {
        let mut parts = line.split_whitespace();
        let program = parts.next().ok_or(LaunchError::NoCommand(role))?;
        if which::which(program).is_err() {
            return Err(LaunchError::MissingCommand(program.to_string()));
        }

        let mut args: Vec<OsString> = parts.map(OsString::from).collect();
        args.push(target.into());
        Ok(CommandLine {
            program: program.to_string(),
            args,
        })
    }
}

fn replace_last(mut args: Vec<OsString>, value: OsString) -> Vec<OsString> {
    if let Some(last) = args.last_mut() {
        *last = value;
    } else {
        args.push(value);
    }
    args
}

/// Where a copy of `item` lands inside `temp_dir`.
///
/// Leading dots are stripped so the copy is not hidden.
pub fn copy_target(item: &FileItem, temp_dir: &Path, as_txt: bool) -> PathBuf {
    let base = item.basename();
    let mut name = match base.trim_start_matches('.') {
        "" => base.to_string(),
        stripped => stripped.to_string(),
    };
    if as_txt {
        name.push_str(".txt");
    }
    temp_dir.join(name)
}

/// Copies `item` into `temp_dir`, creating the directory when needed.
/// An existing copy is overwritten.
pub fn copy_for_edit(
    item: &FileItem,
    temp_dir: &Path,
    as_txt: bool,
) -> Result<PathBuf, LaunchError> {
    let dest = copy_target(item, temp_dir, as_txt);
    let copy_err = |source| LaunchError::Copy {
        from: item.path().to_path_buf(),
        to: dest.clone(),
        source,
    };

    fs::create_dir_all(temp_dir).map_err(copy_err)?;
    fs::copy(item.path(), &dest).map_err(copy_err)?;
    tracing::debug!(from = %item.path().display(), to = %dest.display(), "copied for editing");
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    fn item_in(dir: &Path, name: &str) -> Result<FileItem, Box<dyn std::error::Error>> {
        let path = dir.join(name);
        File::create(&path)?;
        Ok(FileItem::new(path))
    }

    #[test]
    fn dispatch_by_type() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let cases = [
            ("index.html", Launch::Browse),
            ("page.htm", Launch::Browse),
            ("script.py", Launch::Edit),
            ("style.css", Launch::Edit),
            ("notes.txt", Launch::Edit),
            ("song.mp3", Launch::PlaySound),
            ("photo.png", Launch::ShowImage),
            ("archive.zip", Launch::QuickLook),
            ("no_extension", Launch::QuickLook),
        ];
        for (name, expected) in cases {
            let item = item_in(dir.path(), name)?;
            assert_eq!(dispatch_for(&item), expected, "{name}");
        }
        Ok(())
    }

    #[test]
    fn closing_launches() {
        assert!(Launch::Browse.closes_app());
        assert!(Launch::Edit.closes_app());
        assert!(Launch::CopyEdit { as_txt: true }.closes_app());
        assert!(Launch::QuickLook.closes_app());
        assert!(!Launch::PlaySound.closes_app());
        assert!(!Launch::ShowImage.closes_app());
        assert!(!Launch::OpenIn.closes_app());
    }

    #[test]
    fn stat_actions_prepend_by_type() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;

        let plain = stat_actions(&item_in(dir.path(), "data.bin")?);
        let titles: Vec<_> = plain.iter().map(|a| a.title).collect();
        assert_eq!(
            titles,
            [
                "Preview",
                "Open in Editor",
                "Copy & Open",
                "Copy & Open as .txt",
                "Open In and Share"
            ]
        );

        let html = stat_actions(&item_in(dir.path(), "index.html")?);
        assert_eq!(html.len(), 6);
        assert_eq!(html[0].launch, Launch::Browse);

        let image = stat_actions(&item_in(dir.path(), "a.jpg")?);
        assert_eq!(image[0].title, "Show Image");

        let audio = stat_actions(&item_in(dir.path(), "a.wav")?);
        assert_eq!(audio[0].launch, Launch::PlaySound);

        assert!(stat_actions(&FileItem::new(dir.path())).is_empty());
        Ok(())
    }

    #[test]
    fn copy_target_strips_leading_dots() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let temp = dir.path().join("temp");

        let hidden = item_in(dir.path(), ".bashrc")?;
        assert_eq!(copy_target(&hidden, &temp, false), temp.join("bashrc"));
        assert_eq!(copy_target(&hidden, &temp, true), temp.join("bashrc.txt"));

        let plain = item_in(dir.path(), "main.rs")?;
        assert_eq!(copy_target(&plain, &temp, true), temp.join("main.rs.txt"));
        Ok(())
    }

    #[test]
    fn copy_for_edit_creates_dir_and_overwrites() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let src = dir.path().join(".profile");
        fs::write(&src, "first")?;
        let item = FileItem::new(&src);
        let temp = dir.path().join("nested").join("temp");

        let dest = copy_for_edit(&item, &temp, false)?;
        assert_eq!(fs::read_to_string(&dest)?, "first");

        fs::write(&src, "second")?;
        let dest = copy_for_edit(&item, &temp, false)?;
        assert_eq!(fs::read_to_string(dest)?, "second");
        Ok(())
    }

    #[test]
    fn prepare_rejects_folders() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let commands = Commands::default();
        let launcher = Launcher::new(&commands, dir.path());
        let folder = FileItem::new(dir.path());
        assert!(matches!(
            launcher.prepare(Launch::Edit, &folder),
            Err(LaunchError::NotAFile(_))
        ));
        Ok(())
    }

    #[test]
    fn missing_paths_cannot_launch() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let commands = Commands::default();
        let launcher = Launcher::new(&commands, dir.path());
        let gone = FileItem::new(dir.path().join("moved-away.zip"));

        assert!(stat_actions(&gone).is_empty());
        for launch in [Launch::QuickLook, Launch::OpenIn, Launch::Edit] {
            assert!(matches!(
                launcher.prepare(launch, &gone),
                Err(LaunchError::NotFound(_))
            ));
        }
        Ok(())
    }

    #[test]
    fn failure_text_for_open_in() {
        assert_eq!(Launch::OpenIn.failure_text(), "Failed to Open");
        assert_eq!(Launch::PlaySound.failure_text(), "Play Sound failed");
    }
}
