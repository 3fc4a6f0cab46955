//! Header widget — application title, endpoint and key hints on one row.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

pub struct Header<'a> {
    title: &'a str,
    endpoint: &'a str,
    theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, endpoint: &'a str, theme: &'a Theme) -> Self {
        Self { title, endpoint, theme }
    }
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", self.title), self.theme.title),
            Span::styled(format!(" {}", self.endpoint), self.theme.hint),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);

        // Keybinding hints at the right edge
        let hint = " q:quit  ?:help ";
        let hint_x = area.right().saturating_sub(hint.len() as u16);
        buf.set_string(hint_x, area.y, hint, self.theme.hint);
    }
}
