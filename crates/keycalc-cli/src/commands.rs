//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// keycalc: keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to `tui`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive calculator
    Tui(TuiArgs),

    /// Replay a key sequence and print the display
    ///
    /// Keys: 0-9 . + - * x / = % n (sign) c (clear) b (backspace).
    /// Whitespace is ignored.
    Eval(EvalArgs),
}

/// Arguments for the tui command
#[derive(Args, Debug, Clone)]
pub struct TuiArgs {
    /// Number of calculations kept on the tape
    #[arg(long, default_value_t = 100)]
    pub tape_size: usize,
}

impl Default for TuiArgs {
    fn default() -> Self {
        Self { tape_size: 100 }
    }
}

/// Arguments for the eval command
#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    /// Keys to press, e.g. "12+7="
    #[arg(required_unless_present = "keys_file", conflicts_with = "keys_file")]
    pub keys: Option<String>,

    /// Read keys from a file instead
    #[arg(long, value_name = "PATH")]
    pub keys_file: Option<PathBuf>,

    /// Print the display after every key
    #[arg(long)]
    pub steps: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: FormatArg,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Plain text
    #[default]
    Text,
    /// JSON report
    Json,
}

impl From<FormatArg> for crate::output::OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;
    use crate::output::OutputFormat;

    mod cli_tests {
        use super::*;

        #[test]
        fn test_no_subcommand_defaults_to_none() {
            let cli = Cli::parse_from(["keycalc"]);
            assert!(cli.command.is_none());
            assert_eq!(cli.verbose, 0);
            assert!(!cli.quiet);
        }

        #[test]
        fn test_parse_tui_with_tape_size() {
            let cli = Cli::parse_from(["keycalc", "tui", "--tape-size", "5"]);
            if let Some(Commands::Tui(args)) = cli.command {
                assert_eq!(args.tape_size, 5);
            } else {
                panic!("expected Tui command");
            }
        }

        #[test]
        fn test_parse_eval_keys() {
            let cli = Cli::parse_from(["keycalc", "eval", "5+3="]);
            if let Some(Commands::Eval(args)) = cli.command {
                assert_eq!(args.keys.as_deref(), Some("5+3="));
                assert!(!args.steps);
                assert_eq!(args.format, FormatArg::Text);
            } else {
                panic!("expected Eval command");
            }
        }

        #[test]
        fn test_parse_eval_options() {
            let cli = Cli::parse_from(["keycalc", "eval", "1+1=", "--steps", "--format", "json"]);
            if let Some(Commands::Eval(args)) = cli.command {
                assert!(args.steps);
                assert_eq!(args.format, FormatArg::Json);
            } else {
                panic!("expected Eval command");
            }
        }

        #[test]
        fn test_parse_eval_keys_file() {
            let cli = Cli::parse_from(["keycalc", "eval", "--keys-file", "keys.txt"]);
            if let Some(Commands::Eval(args)) = cli.command {
                assert!(args.keys.is_none());
                assert_eq!(args.keys_file, Some(PathBuf::from("keys.txt")));
            } else {
                panic!("expected Eval command");
            }
        }

        #[test]
        fn test_eval_requires_keys() {
            assert!(Cli::try_parse_from(["keycalc", "eval"]).is_err());
        }

        #[test]
        fn test_eval_keys_conflict_with_file() {
            let result = Cli::try_parse_from(["keycalc", "eval", "1=", "--keys-file", "k.txt"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from([
                "keycalc",
                "-vv",
                "--color",
                "never",
                "--log-file",
                "out.log",
                "eval",
                "1",
            ]);
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
            assert_eq!(cli.log_file, Some(PathBuf::from("out.log")));
        }

        #[test]
        fn test_global_flags_after_subcommand() {
            let cli = Cli::parse_from(["keycalc", "eval", "1", "-q"]);
            assert!(cli.quiet);
        }
    }

    mod conversion_tests {
        use super::*;

        #[test]
        fn test_color_arg_conversion() {
            assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
            assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
            assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        }

        #[test]
        fn test_format_arg_conversion() {
            assert_eq!(OutputFormat::from(FormatArg::Text), OutputFormat::Text);
            assert_eq!(OutputFormat::from(FormatArg::Json), OutputFormat::Json);
        }

        #[test]
        fn test_tui_args_default() {
            assert_eq!(TuiArgs::default().tape_size, 100);
        }
    }
}
