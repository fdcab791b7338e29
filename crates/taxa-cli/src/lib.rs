//! Taxa CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (filter, show, report)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    handle_filter, handle_report, handle_show, init_logging, load_settings, FilterArgs,
};
