//! ShelfMark command-line application
//!
//! - `cli`: Argument parsing
//! - `config`: Layered configuration (file, environment, flags)
//! - `runner`: Loads the export, runs the migration and writes the report

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::Cli;
pub use config::{RunConfig, Settings};
pub use runner::{exit_code, run, EXIT_FATAL, EXIT_SUCCESS, EXIT_UPDATE_FAILURES};
