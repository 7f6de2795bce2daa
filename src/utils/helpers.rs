//! Helpers for filenav.
//!
//! - Path normalization ([full_path]) and `~` handling for display
//! - Color parsing from names, palette indices or hex codes
//! - Running a command in the foreground with the TUI suspended
//! - Locating the log file

use crate::core::launch::CommandLine;

use ratatui::style::Color;

use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::{env, fs, io};

/// Returns the home directory of the current user.
#[inline]
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a path to an absolute, normalized form.
///
/// `~` and environment variables are expanded, relative paths are resolved against the
/// working directory, and symlinks are resolved when the path exists.
pub fn full_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let absolute = absolute_path(path);
    fs::canonicalize(&absolute).unwrap_or_else(|_| normalize_lexically(&absolute))
}

/// Expands `~` and environment variables and makes the path absolute.
/// Symlinks are left alone.
pub fn absolute_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let expanded = expand_vars(&expand_home_path(path.as_ref()));
    if expanded.is_absolute() {
        expanded
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    }
}

/// Replaces a leading `~` with the home directory.
pub fn expand_home_path(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match get_home() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Expands `$NAME` and `${NAME}`. Unknown variables are left untouched.
pub fn expand_vars(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };
    if !s.contains('$') {
        return path.to_path_buf();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed) = if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => (&braced[..end], end + 2),
                None => ("", 0),
            }
        } else {
            let end = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..end], end)
        };

        match env::var(name) {
            Ok(value) if !name.is_empty() => out.push_str(&value),
            _ => out.push_str(&rest[pos..pos + 1 + consumed]),
        }
        rest = &after[consumed..];
    }
    out.push_str(rest);
    PathBuf::from(out)
}

/// Resolves `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(comp);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Util function to shorten home directory to ~.
/// Used for the header breadcrumb and favorites labels.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Parses a color name, a palette index (`"238"`) or a hex value (`#RRGGBB`, `#RGB`).
/// Anything else falls back to [Color::Reset].
pub fn parse_color(s: &str) -> Color {
    let lower = s.trim().to_lowercase();
    match lower.as_str() {
        "default" | "reset" | "" => Color::Reset,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "green" => Color::Green,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "black" => Color::Black,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        other => {
            if let Ok(idx) = other.parse::<u8>() {
                return Color::Indexed(idx);
            }
            let Some(hex) = other.strip_prefix('#') else {
                return Color::Reset;
            };
            let expanded = match hex.len() {
                6 => hex.to_string(),
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                _ => return Color::Reset,
            };
            match u32::from_str_radix(&expanded, 16) {
                Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
                Err(_) => Color::Reset,
            }
        }
    }
}

/// Runs `cmd` with the terminal handed over.
///
/// Temporary disables raw mode and leaves the alternate screen while the command runs,
/// both are restored afterwards even if the command could not be started.
pub fn run_foreground(cmd: &CommandLine) -> io::Result<ExitStatus> {
    use crossterm::{
        cursor::{Hide, Show},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    };

    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;

    let status = Command::new(&cmd.program).args(&cmd.args).status();

    execute!(io::stdout(), EnterAlternateScreen, Hide)?;
    enable_raw_mode()?;
    status
}

/// Default location of the log file: `<data dir>/filenav/filenav.log`.
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .or_else(get_home)
        .unwrap_or_else(env::temp_dir)
        .join("filenav")
        .join("filenav.log")
}
