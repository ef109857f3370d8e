//! keycalc: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! keycalc                          # Interactive calculator
//! keycalc tui --tape-size 20       # Keep 20 calculations on the tape
//! keycalc eval "12+7="             # Replay keys, print the display
//! keycalc eval "7+2+1=" --steps    # Print the display after every key
//! keycalc eval --keys-file k.txt --format json
//! ```

use clap::Parser;
use keycalc_cli::{
    build_config, logging, read_keys_file, run_tui, Cli, CliConfig, CliError, CliResult,
    Commands, EvalArgs, KeyReplay, LogTarget, ReportPrinter,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    console::set_colors_enabled(config.color.should_color());

    match cli.command {
        Some(Commands::Eval(args)) => {
            logging::init(&config, LogTarget::Stderr)?;
            run_eval(&config, &args)
        }
        Some(Commands::Tui(_)) | None => {
            if config.tape_size == 0 {
                return Err(CliError::invalid_argument("--tape-size must be at least 1"));
            }
            logging::init(&config, LogTarget::FileOnly)?;
            run_tui(&config)
        }
    }
}

fn run_eval(config: &CliConfig, args: &EvalArgs) -> CliResult<()> {
    let keys = match (&args.keys, &args.keys_file) {
        (Some(keys), _) => keys.clone(),
        (None, Some(path)) => read_keys_file(path)?,
        (None, None) => return Err(CliError::invalid_argument("no keys given")),
    };

    let report = KeyReplay::new(config).with_steps(args.steps).run(&keys)?;
    // exit status stays zero when the display shows Error
    ReportPrinter::new(args.format.into(), config.color.should_color()).print(&report)
}
