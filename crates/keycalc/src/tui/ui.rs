//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::input::KEY_BINDINGS;
use super::keypad::KeypadWidget;

/// Window title
pub const TITLE: &str = " keycalc ";

/// Number of tape lines shown
const TAPE_LINES: usize = 10;

/// Renders the calculator and remembers where the keypad went
pub fn render(app: &mut CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    app.set_keypad_area(keypad_area(area));
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Splits the window into main area, keypad and help sidebar
fn columns(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(30),
            Constraint::Length(24),
            Constraint::Length(22),
        ])
        .split(area)
        .to_vec()
}

/// Screen area of the keypad for a window of size `area`
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    columns(area)[1]
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn create_layout(&self, area: Rect) -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Display
                Constraint::Length(1), // Operation label
                Constraint::Length(3), // Status
                Constraint::Min(3),    // Tape
            ])
            .split(area)
            .to_vec()
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.app.engine().is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(self.app.display(), style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }

    fn render_expression(&self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(
            self.app.expression(),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right)
        .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let style = if self.app.engine().is_error() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Paragraph::new(Span::styled(self.app.status(), style))
            .block(
                Block::default()
                    .title(" Status ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }

    fn render_tape(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .tape()
            .iter_rev()
            .take(TAPE_LINES)
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.expression.as_str(), Style::default().fg(Color::Gray)),
                    Span::raw(" = "),
                    Span::styled(entry.result_display(), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Tape (newest first) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = KEY_BINDINGS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Keys ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let cols = columns(area);
        let rows = self.create_layout(cols[0]);

        self.render_display(rows[0], buf);
        self.render_expression(rows[1], buf);
        self.render_status(rows[2], buf);
        self.render_tape(rows[3], buf);
        KeypadWidget::new(self.app.keypad()).render(cols[1], buf);
        self.render_help(cols[2], buf);
    }
}
