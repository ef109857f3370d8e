//! Output formatting for key replays

use console::{style, Term};
use serde::{Deserialize, Serialize};

use crate::error::CliResult;

/// Output format for replay results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Display after a single key of a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalStep {
    /// Keypad label of the key, e.g. `"×"`
    pub key: String,
    /// Display after the key
    pub display: String,
}

/// Outcome of replaying a key sequence
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvalReport {
    /// Final display
    pub display: String,
    /// Final operation label
    pub expression: Option<String>,
    /// Final status line
    pub status: String,
    /// Whether the display shows the error marker
    pub error: bool,
    /// Per-key displays, empty unless steps were requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<EvalStep>,
    /// Completed calculations, oldest first
    pub tape: Vec<String>,
}

/// Writes replay results to stdout
#[derive(Debug)]
pub struct ReportPrinter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Output format
    pub format: OutputFormat,
}

impl ReportPrinter {
    /// Create a printer writing to stdout
    #[must_use]
    pub fn new(format: OutputFormat, use_color: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            format,
        }
    }

    /// Print a report in the configured format
    pub fn print(&self, report: &EvalReport) -> CliResult<()> {
        for line in self.render(report)? {
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    /// Lines that [`ReportPrinter::print`] writes
    pub fn render(&self, report: &EvalReport) -> CliResult<Vec<String>> {
        match self.format {
            OutputFormat::Json => Ok(vec![serde_json::to_string_pretty(report)?]),
            OutputFormat::Text => Ok(self.render_text(report)),
        }
    }

    fn render_text(&self, report: &EvalReport) -> Vec<String> {
        let mut lines: Vec<String> = report
            .steps
            .iter()
            .map(|step| {
                let key = if self.use_color {
                    style(format!("{:>2}", step.key)).cyan().to_string()
                } else {
                    format!("{:>2}", step.key)
                };
                format!("{key}  {}", step.display)
            })
            .collect();

        lines.push(self.paint_display(report));
        lines
    }

    fn paint_display(&self, report: &EvalReport) -> String {
        if !self.use_color {
            return report.display.clone();
        }
        if report.error {
            style(&report.display).red().bold().to_string()
        } else {
            style(&report.display).green().bold().to_string()
        }
    }
}
