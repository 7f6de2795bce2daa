//! Key mapping and action dispatch for filenav
//!
//! Maps keys to actions, parsing them from the `[keys]` table, and defines the
//! navigation, row and system actions of the browser.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, row, or system.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Action {
    Nav(NavAction),
    Row(RowAction),
    System(SystemAction),
}

/// Cursor and stack movement.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum NavAction {
    GoUp,
    GoDown,
    GoToTop,
    GoToBottom,
    Back,
}

/// Actions on the selected row or the current view.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum RowAction {
    Select,
    Info,
    ToggleEdit,
    Delete,
    MoveUp,
    MoveDown,
    AddFavorite,
    Reload,
}

/// System actions (quit, help)
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum SystemAction {
    Quit,
    KeyBindHelp,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) struct Key {
    pub(crate) code: KeyCode,
    pub(crate) modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built in the config
pub(crate) struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub(crate) fn from_config(config: &crate::config::Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use RowAction as R;
        use SystemAction as S;

        // NavActions
        bind!(keys.go_up(),         Action::Nav(N::GoUp));
        bind!(keys.go_down(),       Action::Nav(N::GoDown));
        bind!(keys.go_to_top(),     Action::Nav(N::GoToTop));
        bind!(keys.go_to_bottom(),  Action::Nav(N::GoToBottom));
        bind!(keys.back(),          Action::Nav(N::Back));

        // RowActions
        bind!(keys.select(),        Action::Row(R::Select));
        bind!(keys.info(),          Action::Row(R::Info));
        bind!(keys.toggle_edit(),   Action::Row(R::ToggleEdit));
        bind!(keys.delete(),        Action::Row(R::Delete));
        bind!(keys.move_up(),       Action::Row(R::MoveUp));
        bind!(keys.move_down(),     Action::Row(R::MoveDown));
        bind!(keys.add_favorite(),  Action::Row(R::AddFavorite));
        bind!(keys.reload(),        Action::Row(R::Reload));

        // SystemActions
        bind!(keys.keybind_help(),  Action::System(S::KeyBindHelp));
        bind!(keys.quit(),          Action::System(S::Quit));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub(crate) fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        // Some terminals report `?` or `G` with SHIFT, others without.
        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }
}

pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => code = Some(KeyCode::PageDown),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "delete" | "del" => code = Some(KeyCode::Delete),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, ?action, "ignoring unparsable keybinding"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_key_forms() {
        assert_eq!(
            parse_key("Ctrl+r"),
            Some(Key {
                code: KeyCode::Char('r'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(
            parse_key("<C-c>"),
            Some(Key {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(
            parse_key("Shift+g"),
            Some(Key {
                code: KeyCode::Char('G'),
                modifiers: KeyModifiers::SHIFT
            })
        );
        assert_eq!(parse_key("Home").map(|k| k.code), Some(KeyCode::Home));
        assert_eq!(parse_key("F5").map(|k| k.code), Some(KeyCode::F(5)));
        assert_eq!(parse_key("nonsense"), None);
        assert_eq!(parse_key("<x-q>"), None);
    }

    #[test]
    fn default_bindings_resolve() {
        let keymap = Keymap::from_config(&Config::default());

        assert_eq!(
            keymap.lookup(press(KeyCode::Enter, KeyModifiers::NONE)),
            Some(Action::Row(RowAction::Select))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('j'), KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoDown))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::Nav(NavAction::GoToBottom))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('K'), KeyModifiers::SHIFT)),
            Some(Action::Row(RowAction::MoveUp))
        );
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(keymap.lookup(press(KeyCode::Char('z'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn shifted_symbols_fall_back() {
        let keymap = Keymap::from_config(&Config::default());
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('?'), KeyModifiers::SHIFT)),
            Some(Action::System(SystemAction::KeyBindHelp))
        );
    }

    #[test]
    fn config_overrides_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config = Config::parse("[keys]\nquit = [\"x\"]\n")?;
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.lookup(press(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(Action::System(SystemAction::Quit))
        );
        assert_eq!(keymap.lookup(press(KeyCode::Char('q'), KeyModifiers::NONE)), None);
        Ok(())
    }
}
