//! Configuration for filenav.
//!
//! [load] reads `filenav.toml` into [Config]; the remaining modules hold the
//! individual tables.

pub mod display;
pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use display::{BorderShape, Display};
pub use general::{General, InternalGeneral};
pub use input::{Commands, Keys};
pub use load::{Config, RawConfig, config_dir};
pub use theme::{ColorPair, Theme};
