//! keycalc CLI library
//!
//! Argument parsing, configuration, logging setup and the two front ends:
//! the interactive terminal calculator and the non-interactive key replay.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
mod runner;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, FormatArg, TuiArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::LogTarget;
pub use output::{EvalReport, EvalStep, OutputFormat, ReportPrinter};
pub use runner::{event_loop, handle_event, parse_keys, read_keys_file, run_tui, KeyReplay};

/// Builds the configuration shared by every subcommand
#[must_use]
pub fn build_config(cli: &Cli) -> CliConfig {
    let tape_size = match &cli.command {
        Some(Commands::Tui(args)) => args.tape_size,
        _ => TuiArgs::default().tape_size,
    };

    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_tape_size(tape_size)
        .with_log_file(cli.log_file.clone())
}
