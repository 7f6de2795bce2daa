//! Internal library crate for filenav.
//!
//! The shipped application is the `fnav` binary (`src/main.rs`).
//!
//! This library exists to share code between targets (binary, tests) and to keep modules organized.
//! This API is only used to build the `fnav` binary and the integration tests.
//! It is not considered a library for external use.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
