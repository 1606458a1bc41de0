//! CLI module for classboard
//!
//! Provides command-line interface for:
//! - init: create the data directory and seed it
//! - serve: run the HTTP server

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
