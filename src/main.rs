//! main.rs
//! Entry point for filenav

use filenav::app::AppState;
use filenav::config::Config;
use filenav::core::terminal;
use filenav::utils::cli::{CliAction, handle_args};
use filenav::utils::{default_log_path, full_path};

use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = crossterm::execute!(
            stdout,
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        tracing::error!(%info, "panic");
        eprintln!("\n[filenav] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let action = handle_args();

    let path_arg = match action {
        CliAction::Exit => return Ok(()),
        CliAction::RunApp => None,
        CliAction::RunAppAtPath(path_arg) => Some(path_arg),
    };

    init_tracing();
    let config = Config::load();

    let mut app = match path_arg {
        Some(path_arg) => {
            let target = full_path(&path_arg);
            if !target.is_dir() {
                eprintln!("\n[filenav] Error: Path '{}' cannot be opened.", path_arg);
                std::process::exit(1);
            }
            AppState::from_dir(&config, &target)?
        }
        None => AppState::new(&config)?,
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "filenav started");
    let result = terminal::run_terminal(&mut app);
    tracing::info!("filenav exited");
    result
}

/// Logs go to a file, the terminal belongs to the UI. `FILENAV_LOG` sets the filter.
fn init_tracing() {
    let path = default_log_path();
    if let Some(dir) = path.parent()
        && fs::create_dir_all(dir).is_err()
    {
        return;
    }

    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env("FILENAV_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
