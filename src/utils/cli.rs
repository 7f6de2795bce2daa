//! Command-line argument parsing and help for filenav.
//!
//! When invoked with no args (`fnav`), filenav opens the favorites list with the working
//! directory pushed on top. A single path argument opens that directory instead.

use crate::config::Config;

pub enum CliAction {
    RunApp,
    RunAppAtPath(String),
    Exit,
}

pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().collect();
    parse_args(&args)
}

fn parse_args(args: &[String]) -> CliAction {
    if args.len() < 2 {
        return CliAction::RunApp;
    }

    if args.len() > 2 {
        eprintln!("Error: filenav accepts only one argument at a time.");
        eprintln!("Usage: fnav [PATH] or fnav [OPTION]");
        return CliAction::Exit;
    }

    match args[1].as_str() {
        "--version" | "-v" => {
            print_version();
            CliAction::Exit
        }
        "-h" | "--help" => {
            print_help();
            CliAction::Exit
        }
        "--keybinds" | "--keys" => {
            print_keybinds();
            CliAction::Exit
        }
        "--init" => {
            let config_path = Config::default_path();
            if let Err(e) = Config::generate_default(&config_path) {
                eprintln!("Error: {}", e);
            }
            CliAction::Exit
        }
        arg if !arg.starts_with('-') && !arg.trim().is_empty() => {
            CliAction::RunAppAtPath(arg.to_string())
        }
        arg => {
            eprintln!("Unknown argument: {}", arg);
            eprintln!("Try --help for available options");
            CliAction::Exit
        }
    }
}

fn print_version() {
    println!("filenav {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    println!(
        r#"filenav - browse files, favorites and file stats from the terminal

USAGE:
  fnav [PATH]

PATH:
  Directory to open on top of the favorites list (defaults to the current directory)

OPTIONS:
      --init              Generate a default configuration
      --keybinds          Display the default keybinds
  -h, --help              Print help information
  -v, --version           Display the installed version of filenav

ENVIRONMENT:
  FILENAV_CONFIG          Override the default config path
  FILENAV_LOG             Log filter, e.g. "debug" or "filenav=trace" (default: info)
"#
    );
}

const KEYBINDS_TEXT: &str = r##"
=========================
 Key Bindings
=========================
[keys]
  select                    ["enter", "l", "right"]
  info                      ["i", "tab"]
  back                      ["h", "left", "backspace"]
  go_up                     ["k", "up"]
  go_down                   ["j", "down"]
  go_to_top                 ["g", "home"]
  go_to_bottom              ["G", "end"]
  toggle_edit               ["e"]
  delete                    ["d"]          (edit mode only)
  move_up                   ["K"]          (edit mode only)
  move_down                 ["J"]          (edit mode only)
  add_favorite              ["a"]
  reload                    ["r", "<c-r>"]
  keybind_help              ["?"]
  quit                      ["q", "<c-c>"]

  Syntax Reference:
    Modifiers: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
    Standard:  ctrl+x, alt+x, shift+x, meta+x
    Special:   " ", "space", "back", "enter", "esc", "tab", "home", "end"
"##;

fn print_keybinds() {
    println!("{}", KEYBINDS_TEXT);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_runs_app() {
        assert!(matches!(parse_args(&args(&["fnav"])), CliAction::RunApp));
    }

    #[test]
    fn path_arg_runs_at_path() {
        match parse_args(&args(&["fnav", "~/src"])) {
            CliAction::RunAppAtPath(p) => assert_eq!(p, "~/src"),
            _ => panic!("expected RunAppAtPath"),
        }
    }

    #[test]
    fn too_many_and_unknown_args_exit() {
        assert!(matches!(
            parse_args(&args(&["fnav", "a", "b"])),
            CliAction::Exit
        ));
        assert!(matches!(
            parse_args(&args(&["fnav", "--bogus"])),
            CliAction::Exit
        ));
    }
}
