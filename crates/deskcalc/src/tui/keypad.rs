//! Clickable keypad
//!
//! ```text
//! [ C ] [ x² ] [ √x ] [ ÷ ]
//! [ 7 ] [ 8  ] [ 9  ] [ × ]
//! [ 4 ] [ 5  ] [ 6  ] [ - ]
//! [ 1 ] [ 2  ] [ 3  ] [ + ]
//! [ . ] [ 0  ] [    =     ]
//! ```
//!
//! Buttons are laid out on a 5x4 grid; `=` spans the last two columns.
//! The same geometry drives rendering and mouse hit testing.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::Operation;

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// What a keypad button does when pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// Append a digit (0-9)
    Digit(u8),
    /// Append a decimal point
    Point,
    /// Append an operator and commit the operand
    Operator(Operation),
    /// Empty both buffers
    Clear,
    /// Square the pending operand
    Square,
    /// Square root of the pending operand
    SquareRoot,
    /// Evaluate the expression
    Equals,
}

impl ButtonAction {
    /// Text printed on the button
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_LABELS.get(usize::from(d)).copied().unwrap_or("?"),
            Self::Point => ".",
            Self::Operator(op) => op.glyph(),
            Self::Clear => "C",
            Self::Square => "x\u{00B2}",
            Self::SquareRoot => "\u{221A}x",
            Self::Equals => "=",
        }
    }

    /// Character appended to the pending operand, if this is an entry key
    #[must_use]
    pub fn entry_char(self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(d), 10),
            Self::Point => Some('.'),
            _ => None,
        }
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// What the button does
    pub action: ButtonAction,
    /// Whether the button is currently highlighted
    pub pressed: bool,
    /// Grid row
    pub row: usize,
    /// First grid column
    pub col: usize,
    /// Number of columns covered
    pub span: usize,
}

impl KeypadButton {
    fn new(action: ButtonAction, row: usize, col: usize, span: usize) -> Self {
        Self {
            action,
            pressed: false,
            row,
            col,
            span,
        }
    }

    /// Text printed on the button
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.action.label()
    }

    /// Returns true if the button covers the given grid cell
    #[must_use]
    pub fn covers(&self, row: usize, col: usize) -> bool {
        self.row == row && (self.col..self.col + self.span).contains(&col)
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The calculator keypad
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use ButtonAction::{Clear, Digit, Equals, Point, Square, SquareRoot};
        let op = ButtonAction::Operator;

        let layout: [&[(ButtonAction, usize)]; 5] = [
            &[(Clear, 1), (Square, 1), (SquareRoot, 1), (op(Operation::Divide), 1)],
            &[(Digit(7), 1), (Digit(8), 1), (Digit(9), 1), (op(Operation::Multiply), 1)],
            &[(Digit(4), 1), (Digit(5), 1), (Digit(6), 1), (op(Operation::Subtract), 1)],
            &[(Digit(1), 1), (Digit(2), 1), (Digit(3), 1), (op(Operation::Add), 1)],
            &[(Point, 1), (Digit(0), 1), (Equals, 2)],
        ];

        let mut buttons = Vec::new();
        for (row, entries) in layout.iter().enumerate() {
            let mut col = 0;
            for &(action, span) in *entries {
                buttons.push(KeypadButton::new(action, row, col, span));
                col += span;
            }
        }

        Self {
            buttons,
            rows: layout.len(),
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Index of the button covering a grid cell
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons.iter().position(|b| b.covers(row, col))
    }

    /// Gets the button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.index_at(row, col).and_then(|i| self.buttons.get(i))
    }

    /// Finds the button performing an action
    #[must_use]
    pub fn find_button(&self, action: ButtonAction) -> Option<usize> {
        self.buttons.iter().position(|b| b.action == action)
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.set_pressed(false);
        }
    }

    /// Highlights the button for an action, releasing the others
    pub fn highlight(&mut self, action: ButtonAction) {
        for btn in &mut self.buttons {
            btn.set_pressed(btn.action == action);
        }
    }

    /// Returns an iterator over all buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Area inside the keypad border, and the size of one grid cell
    fn grid(&self, area: Rect) -> Option<(Rect, u16, u16)> {
        let inner = Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };
        let cell_width = inner.width / self.cols as u16;
        let cell_height = inner.height / self.rows as u16;
        if cell_width == 0 || cell_height == 0 {
            None
        } else {
            Some((inner, cell_width, cell_height))
        }
    }

    /// Screen area occupied by a button when the keypad is drawn in `area`
    #[must_use]
    pub fn button_area(&self, area: Rect, index: usize) -> Option<Rect> {
        let btn = self.buttons.get(index)?;
        let (inner, cell_width, cell_height) = self.grid(area)?;
        Some(Rect {
            x: inner.x + btn.col as u16 * cell_width,
            y: inner.y + btn.row as u16 * cell_height,
            width: btn.span as u16 * cell_width,
            height: cell_height,
        })
    }

    /// Converts a click position to a button index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        let (inner, cell_width, cell_height) = self.grid(area)?;
        if x < inner.x || y < inner.y {
            return None;
        }

        let col = ((x - inner.x) / cell_width) as usize;
        let row = ((y - inner.y) / cell_height) as usize;
        if row < self.rows && col < self.cols {
            self.index_at(row, col)
        } else {
            None
        }
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }

    fn style_for(btn: &KeypadButton) -> Style {
        if btn.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match btn.action {
            ButtonAction::Digit(_) | ButtonAction::Point => {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            }
            ButtonAction::Operator(_) => Style::default().fg(Color::Yellow),
            ButtonAction::Equals => Style::default().fg(Color::Green),
            ButtonAction::Clear => Style::default().fg(Color::Red),
            ButtonAction::Square | ButtonAction::SquareRoot => Style::default().fg(Color::Cyan),
        }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        for (index, btn) in self.keypad.buttons().enumerate() {
            let Some(cell) = self.keypad.button_area(area, index) else {
                return;
            };
            let style = Self::style_for(btn);

            // Boxed buttons when there is room, bare labels otherwise
            if cell.height >= 3 && cell.width >= 5 {
                Paragraph::new(btn.label())
                    .alignment(Alignment::Center)
                    .style(style)
                    .block(Block::bordered().border_style(style))
                    .render(cell, buf);
            } else {
                let line = Rect {
                    y: cell.y + cell.height / 2,
                    height: 1,
                    ..cell
                };
                Paragraph::new(btn.label())
                    .alignment(Alignment::Center)
                    .style(style)
                    .render(line, buf);
            }
        }
    }
}
