//! Query bar widget — single-line text input plus the `[ Search ]` button.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//!
//! The bar only edits its own buffer; the app shell copies the buffer into
//! the controller after every edit so the two never drift.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const BUTTON_LABEL: &str = "[ Search ]";
const PLACEHOLDER: &str = "Search...";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct QueryBarState {
    /// The text typed by the user.
    pub input: String,
    /// Byte offset of the cursor within `input`.
    pub cursor: usize,
}

impl QueryBarState {
    /// Handle an editing event. Returns `true` when `input` changed.
    pub fn handle(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.input.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                tracing::debug!(input = %self.input, cursor = self.cursor, "query: char inserted");
                true
            }
            AppEvent::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                let prev = self.prev_boundary();
                self.input.remove(prev);
                self.cursor = prev;
                tracing::debug!(input = %self.input, cursor = self.cursor, "query: backspace");
                true
            }
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor < self.input.len() {
                    self.cursor = self.input[self.cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.cursor + i)
                        .unwrap_or(self.input.len());
                }
                false
            }
            _ => false,
        }
    }

    /// Replace the whole buffer and park the cursor at the end.
    pub fn set(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor = self.input.len();
    }

    fn prev_boundary(&self) -> usize {
        self.input[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct QueryBar<'a> {
    state: &'a QueryBarState,
    input_focused: bool,
    button_focused: bool,
    theme: &'a Theme,
}

impl<'a> QueryBar<'a> {
    pub fn new(
        state: &'a QueryBarState,
        input_focused: bool,
        button_focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self { state, input_focused, button_focused, theme }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.input[..self.state.cursor].chars().count() as u16;
        let text_right = area.right().saturating_sub(BUTTON_LABEL.len() as u16 + 2);
        let x = (area.x + 1 + col).min(text_right);
        (x, area.y + 1)
    }
}

impl Widget for QueryBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title("Query")
            .border_style(self.theme.border(self.input_focused || self.button_focused));

        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(BUTTON_LABEL.len() as u16 + 1),
            ])
            .split(inner);

        let query_line = if self.state.input.is_empty() && !self.input_focused {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.input.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let button_style = if self.button_focused {
            self.theme.button_focused
        } else {
            self.theme.button
        };
        Paragraph::new(Line::from(Span::styled(BUTTON_LABEL, button_style)))
            .render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
