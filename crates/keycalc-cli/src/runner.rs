//! Key replay and the interactive terminal loop

use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keycalc::core::history::Tape;
use keycalc::core::{CalcError, Engine, Key};
use keycalc::tui::{render, CalculatorApp, InputHandler};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{debug, info};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{EvalReport, EvalStep};

/// Replays key sequences against a fresh engine
#[derive(Debug)]
pub struct KeyReplay {
    engine: Engine,
    record_steps: bool,
}

impl KeyReplay {
    /// Create a replay using the configured tape size
    #[must_use]
    pub fn new(config: &CliConfig) -> Self {
        Self {
            engine: Engine::with_tape(Tape::with_capacity(config.tape_size)),
            record_steps: false,
        }
    }

    /// Record the display after every key
    #[must_use]
    pub const fn with_steps(mut self, record_steps: bool) -> Self {
        self.record_steps = record_steps;
        self
    }

    /// Parses `keys` and presses them in order.
    ///
    /// Whitespace is skipped. The whole sequence is checked before any key is
    /// pressed, so an unknown character leaves the engine untouched.
    pub fn run(&mut self, keys: &str) -> CliResult<EvalReport> {
        let keys = parse_keys(keys)?;
        debug!(count = keys.len(), "replaying keys");

        let mut steps = Vec::new();
        for key in keys {
            let display = self.engine.press(key);
            if self.record_steps {
                steps.push(EvalStep {
                    key: key.label(),
                    display: display.to_string(),
                });
            }
        }

        Ok(EvalReport {
            display: self.engine.display().to_string(),
            expression: self.engine.expression().map(str::to_string),
            status: self.engine.status().to_string(),
            error: self.engine.is_error(),
            steps,
            tape: self
                .engine
                .tape()
                .export_formatted()
                .lines()
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Converts replay text to keys
pub fn parse_keys(text: &str) -> CliResult<Vec<Key>> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Key::from_char(c).ok_or(CliError::Calc(CalcError::InvalidKey(c))))
        .collect()
}

/// Reads a replay from `path`
pub fn read_keys_file(path: &Path) -> CliResult<String> {
    let text = std::fs::read_to_string(path)?;
    info!(path = %path.display(), bytes = text.len(), "read keys file");
    Ok(text)
}

/// Applies one terminal event to the app
pub fn handle_event(app: &mut CalculatorApp, input: &InputHandler, event: &Event) {
    match *event {
        Event::Key(key) => app.apply(input.handle_key(key)),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) => app.click(column, row),
        _ => {}
    }
}

/// Draws and handles events until the app asks to quit
pub fn event_loop<B, F>(
    terminal: &mut Terminal<B>,
    app: &mut CalculatorApp,
    mut next_event: F,
) -> CliResult<()>
where
    B: Backend,
    F: FnMut() -> io::Result<Event>,
{
    let input = InputHandler::new();

    while !app.should_quit() {
        terminal
            .draw(|frame| render(app, frame))
            .map_err(CliError::terminal)?;
        let event = next_event().map_err(CliError::terminal)?;
        handle_event(app, &input, &event);
    }

    Ok(())
}

/// Runs the interactive calculator on the real terminal
pub fn run_tui(config: &CliConfig) -> CliResult<()> {
    enable_raw_mode().map_err(CliError::terminal)?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        abandon_screen(&mut stdout);
        return Err(CliError::terminal(e));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            abandon_screen(&mut io::stdout());
            return Err(CliError::terminal(e));
        }
    };

    info!(tape_size = config.tape_size, "interactive session started");
    let mut app = CalculatorApp::with_tape_size(config.tape_size);
    let result = event_loop(&mut terminal, &mut app, event::read);

    // Restore the terminal even when the loop failed
    disable_raw_mode().map_err(CliError::terminal)?;
    leave_screen(terminal.backend_mut()).map_err(CliError::terminal)?;
    terminal.show_cursor().map_err(CliError::terminal)?;

    info!(calculations = app.tape().len(), "interactive session ended");
    result
}

/// Leaves the alternate screen and stops mouse reporting
pub fn leave_screen<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, DisableMouseCapture)
}

/// Best-effort restore after a failed setup; the setup error is the one reported
fn abandon_screen<W: Write>(out: &mut W) {
    let _ = leave_screen(out);
    let _ = disable_raw_mode();
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    mod replay_tests {
        use super::*;

        #[test]
        fn test_replay_addition() {
            let report = KeyReplay::new(&CliConfig::new()).run("5+3=").unwrap();
            assert_eq!(report.display, "8");
            assert_eq!(report.expression.as_deref(), Some("5 + 3 ="));
            assert_eq!(report.status, "Calculated");
            assert!(!report.error);
            assert!(report.steps.is_empty());
            assert_eq!(report.tape, vec!["5 + 3 = 8"]);
        }

        #[test]
        fn test_replay_division_by_zero() {
            let report = KeyReplay::new(&CliConfig::new()).run("10/0=").unwrap();
            assert_eq!(report.display, "Error");
            assert!(report.error);
            assert_eq!(report.status, "Division by zero");
            assert!(report.tape.is_empty());
        }

        #[test]
        fn test_replay_steps() {
            let report = KeyReplay::new(&CliConfig::new())
                .with_steps(true)
                .run("7 + 2 + 1 =")
                .unwrap();
            let displays: Vec<&str> = report.steps.iter().map(|s| s.display.as_str()).collect();
            assert_eq!(displays, vec!["7", "7", "2", "9", "1", "10"]);
            assert_eq!(report.steps[1].key, "+");
        }

        #[test]
        fn test_replay_rejects_unknown_key_before_pressing() {
            let mut replay = KeyReplay::new(&CliConfig::new());
            let err = replay.run("1+a").unwrap_err();
            assert!(matches!(err, CliError::Calc(CalcError::InvalidKey('a'))));
            assert_eq!(replay.engine.display(), "0");
        }

        #[test]
        fn test_replay_tape_size() {
            let config = CliConfig::new().with_tape_size(2);
            let report = KeyReplay::new(&config).run("1+1=2+2=3+3=").unwrap();
            assert_eq!(report.tape, vec!["2 + 2 = 4", "3 + 3 = 6"]);
        }

        #[test]
        fn test_parse_keys() {
            let keys = parse_keys(" 9 n % ").unwrap();
            assert_eq!(keys, vec![Key::Digit(9), Key::PlusMinus, Key::Percent]);
            assert!(parse_keys("").unwrap().is_empty());
        }

        #[test]
        fn test_read_keys_file_missing() {
            let err = read_keys_file(Path::new("/nonexistent/keycalc/keys.txt")).unwrap_err();
            assert!(matches!(err, CliError::Io(_)));
        }
    }

    mod tui_loop_tests {
        use super::*;

        #[test]
        fn test_handle_key_events() {
            let mut app = CalculatorApp::new();
            let input = InputHandler::new();
            for event in [
                key(KeyCode::Char('6')),
                key(KeyCode::Char('*')),
                key(KeyCode::Char('7')),
                key(KeyCode::Enter),
            ] {
                handle_event(&mut app, &input, &event);
            }
            assert_eq!(app.display(), "42");
        }

        #[test]
        fn test_handle_unrelated_events() {
            let mut app = CalculatorApp::new();
            let input = InputHandler::new();
            handle_event(&mut app, &input, &Event::FocusGained);
            handle_event(&mut app, &input, &Event::Resize(80, 24));
            assert_eq!(app.display(), "0");
            assert!(!app.should_quit());
        }

        #[test]
        fn test_event_loop_until_quit() {
            let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
            let mut app = CalculatorApp::new();
            let mut events: VecDeque<Event> = [
                key(KeyCode::Char('9')),
                key(KeyCode::Char('n')),
                key(KeyCode::Char('q')),
            ]
            .into_iter()
            .collect();

            event_loop(&mut terminal, &mut app, || {
                Ok(events.pop_front().unwrap_or(key(KeyCode::Char('q'))))
            })
            .unwrap();

            assert!(app.should_quit());
            assert_eq!(app.display(), "-9");
        }

        #[test]
        fn test_event_loop_mouse_click() {
            let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
            let mut app = CalculatorApp::new();
            let area = keycalc::tui::keypad_area(ratatui::layout::Rect::new(0, 0, 80, 24));
            // second row, first column is "7"
            let btn_height = (area.height - 2) / 5;
            let click = Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: area.x + 1,
                row: area.y + 1 + btn_height,
                modifiers: KeyModifiers::NONE,
            });
            let mut events: VecDeque<Event> =
                [click, key(KeyCode::Char('q'))].into_iter().collect();

            event_loop(&mut terminal, &mut app, || {
                Ok(events.pop_front().unwrap_or(key(KeyCode::Char('q'))))
            })
            .unwrap();

            assert_eq!(app.display(), "7");
        }

        #[test]
        fn test_leave_screen_restores_screen_and_mouse() {
            let mut out = Vec::new();
            leave_screen(&mut out).unwrap();
            let written = String::from_utf8(out).unwrap();
            // leave alternate screen, then disable mouse reporting
            assert!(written.contains("\x1b[?1049l"), "{written:?}");
            assert!(written.contains("\x1b[?1000l"), "{written:?}");
        }

        #[test]
        fn test_event_loop_read_failure() {
            let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
            let mut app = CalculatorApp::new();
            let err = event_loop(&mut terminal, &mut app, || {
                Err(io::Error::new(io::ErrorKind::Other, "no tty"))
            })
            .unwrap_err();
            assert!(matches!(err, CliError::Terminal { .. }));
        }
    }
}
