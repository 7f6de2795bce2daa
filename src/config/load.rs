//! The main config loading module for filenav.
//!
//! Handles loading and deserializing settings from `filenav.toml` into [Config],
//! through the owned [RawConfig] used for parsing.
//!
//! Also writes the default config for `fnav --init`.

use crate::config::{Commands, Display, General, InternalGeneral, Keys, Theme};
use crate::utils::get_home;

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Raw configuration as read from the toml file.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    display: Display,
    theme: Theme,
    commands: Commands,
    keys: Keys,
}

/// Processed configuration used by filenav.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    display: Display,
    theme: Theme,
    commands: Commands,
    keys: Keys,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            display: raw.display,
            theme: raw.theme,
            commands: raw.commands,
            keys: raw.keys,
        }
    }
}

impl Config {
    /// Load configuration from [Config::default_path].
    /// A missing or invalid file yields the defaults.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using internal defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "config loaded");
                config
            }
            Err(e) => {
                eprintln!("Error parsing config: {}", e);
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "invalid config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Reads and parses the config at `path`.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn display(&self) -> &Display {
        &self.display
    }

    #[inline]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    #[inline]
    pub fn commands(&self) -> &Commands {
        &self.commands
    }

    #[inline]
    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    /// Determine the configuration file path.
    /// Checks FILENAV_CONFIG first, then XDG_CONFIG_HOME,
    /// then defaults to ~/.config/filenav/filenav.toml.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("FILENAV_CONFIG")
            && !path.trim().is_empty()
        {
            return PathBuf::from(path);
        }
        config_dir().join("filenav.toml")
    }

    /// Generate a default configuration file at `path`.
    /// If the file already exists, returns an error.
    pub fn generate_default(path: &Path) -> io::Result<()> {
        if path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("Config file already exists at {:?}", path),
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, DEFAULT_TOML)?;
        println!("Default config generated at {:?}", path);
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

/// Directory holding filenav.toml and, unless configured otherwise, favorites.json.
pub fn config_dir() -> PathBuf {
    if let Ok(path) = std::env::var("FILENAV_CONFIG")
        && let Some(parent) = Path::new(&path).parent()
        && !parent.as_os_str().is_empty()
    {
        return parent.to_path_buf();
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.trim().is_empty()
    {
        return PathBuf::from(xdg_config).join("filenav");
    }

    match get_home() {
        Some(home) => home.join(".config").join("filenav"),
        None => PathBuf::from("."),
    }
}

const DEFAULT_TOML: &str = r##"# filenav.toml - default configuration for filenav

# Note:
# Commented values are the internal defaults of filenav.
# Use hex codes (eg. "#RRGGBB"), palette indices ("238") or terminal colors ("cyan").

[general]
# show_hidden = false
# case_insensitive = true
# favorites = "~/.config/filenav/favorites.json"
# temp_dir = "/tmp/filenav"
# close_after_open = false

[display]
# icons = false
# titles = true
# show_size = true
# section_headers = true
# border_shape = "rounded"
# scroll_padding = 3

[commands]
# Each command gets the target path appended as its last argument.
# editor = ""               # empty: $VISUAL, then $EDITOR, then vi
# opener = "xdg-open"
# browser = ""              # empty: opener
# audio = ""                # empty: opener
# image = ""                # empty: opener

# [theme.accent]
# fg = "238"
# [theme.selection]
# bg = "236"
# [theme.entry]
# fg = "default"
# [theme.directory]
# fg = "blue"
# [theme.detail]
# fg = "darkgray"
# [theme.section]
# fg = "yellow"
# [theme.path]
# fg = "magenta"
# [theme.editing]
# fg = "red"
# [theme.status_line]
# fg = "default"
# [theme.message]
# fg = "default"

# [keys]
# select = ["Enter", "l", "Right"]
# info = ["i", "Tab"]
# back = ["h", "Left", "Backspace"]
# go_up = ["k", "Up"]
# go_down = ["j", "Down"]
# go_to_top = ["g", "Home"]
# go_to_bottom = ["Shift+g", "End"]
# toggle_edit = ["e"]
# delete = ["d"]
# move_up = ["Shift+k"]
# move_down = ["Shift+j"]
# add_favorite = ["a"]
# reload = ["r", "Ctrl+r"]
# keybind_help = ["?"]
# quit = ["q", "Ctrl+c"]
"##;
