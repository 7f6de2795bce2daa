//! Miscellaneous utility functions for filenav.
//!
//! [helpers] holds path normalization, color parsing and the foreground command runner,
//! [cli] handles command-line flags.

pub mod cli;
pub mod helpers;

pub use helpers::{
    absolute_path, default_log_path, expand_home_path, expand_vars, full_path, get_home,
    normalize_lexically, parse_color, run_foreground, shorten_home_path,
};
