//! Core library entry for the `playport` CLI.
//!
//! Migrates a Selenium Java test suite to Playwright TypeScript by sending
//! each pass's source files to a code-generation service in one request and
//! pairing the delimited response segments back to the files by position.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod migrate;
pub mod ports;
pub mod project;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    execute(&cli)
}

/// Run an already parsed command line.
///
/// # Errors
///
/// Returns an error string when command execution fails.
pub fn execute(cli: &cli::Cli) -> Result<(), String> {
    commands::dispatch(&cli.global, cli.command)
}
