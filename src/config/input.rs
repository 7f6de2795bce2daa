//! Input and command configuration options for filenav.
//!
//! [Keys] is read from `[keys]`, [Commands] from `[commands]` in filenav.toml.

use serde::Deserialize;

/// Key bindings of all actions.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    select: Vec<String>,
    info: Vec<String>,
    back: Vec<String>,
    go_up: Vec<String>,
    go_down: Vec<String>,
    go_to_top: Vec<String>,
    go_to_bottom: Vec<String>,
    toggle_edit: Vec<String>,
    delete: Vec<String>,
    move_up: Vec<String>,
    move_down: Vec<String>,
    add_favorite: Vec<String>,
    reload: Vec<String>,
    keybind_help: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    select,
    info,
    back,
    go_up,
    go_down,
    go_to_top,
    go_to_bottom,
    toggle_edit,
    delete,
    move_up,
    move_down,
    add_favorite,
    reload,
    keybind_help,
    quit,
);

impl Default for Keys {
    fn default() -> Self {
        Keys {
            select: vec!["Enter".into(), "l".into(), "Right".into()],
            info: vec!["i".into(), "Tab".into()],
            back: vec!["h".into(), "Left".into(), "Backspace".into()],
            go_up: vec!["k".into(), "Up".into()],
            go_down: vec!["j".into(), "Down".into()],
            go_to_top: vec!["g".into(), "Home".into()],
            go_to_bottom: vec!["Shift+g".into(), "End".into()],

            toggle_edit: vec!["e".into()],
            delete: vec!["d".into()],
            move_up: vec!["Shift+k".into()],
            move_down: vec!["Shift+j".into()],
            add_favorite: vec!["a".into()],
            reload: vec!["r".into(), "Ctrl+r".into()],

            keybind_help: vec!["?".into()],
            quit: vec!["q".into(), "Ctrl+c".into()],
        }
    }
}

/// External commands standing in for the editor, browser, player, viewer and opener.
///
/// Each entry is a command line; the target path is appended as the last argument.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Commands {
    editor: String,
    opener: String,
    browser: String,
    audio: String,
    image: String,
}

impl Commands {
    /// The editor. Defaults to `$VISUAL` or `$EDITOR`, a blank value means `vi`.
    pub fn editor(&self) -> &str {
        let trimmed = self.editor.trim();
        if trimmed.is_empty() { "vi" } else { trimmed }
    }

    pub fn opener(&self) -> &str {
        self.opener.trim()
    }

    /// Falls back to the opener when empty.
    pub fn browser(&self) -> &str {
        Self::or_opener(&self.browser, &self.opener)
    }

    /// Falls back to the opener when empty.
    pub fn audio(&self) -> &str {
        Self::or_opener(&self.audio, &self.opener)
    }

    /// Falls back to the opener when empty.
    pub fn image(&self) -> &str {
        Self::or_opener(&self.image, &self.opener)
    }

    fn or_opener<'a>(cmd: &'a str, opener: &'a str) -> &'a str {
        let trimmed = cmd.trim();
        if trimmed.is_empty() {
            opener.trim()
        } else {
            trimmed
        }
    }
}

impl Default for Commands {
    fn default() -> Self {
        let editor = std::env::var("VISUAL")
            .or_else(|_| std::env::var("EDITOR"))
            .unwrap_or_default();
        let opener = if cfg!(target_os = "macos") {
            "open"
        } else if cfg!(windows) {
            "explorer"
        } else {
            "xdg-open"
        };
        Commands {
            editor,
            opener: opener.into(),
            browser: String::new(),
            audio: String::new(),
            image: String::new(),
        }
    }
}
