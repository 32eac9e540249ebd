//! TUI rendering
//!
//! ```text
//! ┌ deskcalc ─────────────────────────────────────────────┐
//! │┌ Display ──────────────────────┐┌ Tape ──────────────┐│
//! ││                        12 × 3 ││ 2+3 = 5            ││
//! ││                            4  ││                    ││
//! │└───────────────────────────────┘│                    ││
//! │ status / hint                    │                    ││
//! │┌ Keypad ───────────────────────┐│                    ││
//! ││ ...                           ││                    ││
//! └───────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::accumulator::ERROR_SENTINEL;

/// Title on the outer border
pub const TITLE: &str = " deskcalc ";

/// Shown on the status line when nothing went wrong
pub const HINT: &str = "Enter = | Esc clear | s x² | r √x | Ctrl+L tape | q quit";

/// Screen regions, shared by rendering and mouse hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Committed and pending lines
    pub display: Rect,
    /// One-line status
    pub status: Rect,
    /// Keypad grid
    pub keypad: Rect,
    /// Session tape
    pub tape: Rect,
}

/// Splits the screen into its regions
#[must_use]
pub fn layout(area: Rect) -> ScreenLayout {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Min(30),    // Display, status and keypad
            Constraint::Length(28), // Tape
        ])
        .split(area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Display
            Constraint::Length(1), // Status
            Constraint::Min(7),    // Keypad
        ])
        .split(columns[0]);

    ScreenLayout {
        display: rows[0],
        status: rows[1],
        keypad: rows[2],
        tape: columns[1],
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
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

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let pending = self.app.pending_display();
        let pending_style = if self.app.accumulator().is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(Span::styled(
                self.app.committed_display(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(pending, pending_style)),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let line = match self.app.status() {
            Some(message) => Span::styled(
                format!(" {ERROR_SENTINEL}: {message}"),
                Style::default().fg(Color::Red),
            ),
            None => Span::styled(format!(" {HINT}"), Style::default().fg(Color::DarkGray)),
        };
        Paragraph::new(line).render(area, buf);
    }

    fn render_tape(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .history()
            .iter_rev()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.expression.as_str(), Style::default().fg(Color::Gray)),
                    Span::raw(" = "),
                    Span::styled(entry.result.to_string(), Style::default().fg(Color::Cyan)),
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
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let regions = layout(area);
        self.render_display(regions.display, buf);
        self.render_status(regions.status, buf);
        KeypadWidget::new(self.app.keypad()).render(regions.keypad, buf);
        self.render_tape(regions.tape, buf);
    }
}
