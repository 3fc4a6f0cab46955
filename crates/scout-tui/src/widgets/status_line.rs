//! Status line — one row under the results showing the lifecycle status.

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, text::{Line, Span}, widgets::Widget};
use scout_core::{ControllerState, Status};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusLine<'a> {
    state: &'a ControllerState,
    /// Frame counter driving the loading spinner.
    tick: usize,
    /// Transient message from the shell (e.g. a link that failed to open).
    notice: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusLine<'a> {
    pub fn new(
        state: &'a ControllerState,
        tick: usize,
        notice: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self { state, tick, notice, theme }
    }
}

/// Text shown for the current status, without styling.
pub fn status_text(state: &ControllerState, tick: usize) -> String {
    match state.status() {
        Status::Idle => "idle".to_string(),
        Status::Loading => format!(
            "{} searching for \"{}\"",
            SPINNER[tick % SPINNER.len()],
            state.in_flight_text().unwrap_or_default().trim()
        ),
        Status::Success => match state.results().len() {
            1 => "1 result".to_string(),
            n => format!("{n} results"),
        },
        Status::Error => match state.last_error() {
            Some(err) => format!("Error: {err}"),
            None => "Error".to_string(),
        },
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            format!(" {} ", status_text(self.state, self.tick)),
            self.theme.status_style(self.state.status()),
        )];
        if let Some(notice) = self.notice {
            spans.push(Span::styled(format!(" │ {notice}"), self.theme.hint));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
